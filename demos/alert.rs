//! Requires chromedriver running on port 4444:
//!
//!     chromedriver --port=4444
//!
//! Run as follows:
//!
//!     RUST_LOG=debug cargo run --example alert

use demoqa_sync::config::HarnessConfig;
use demoqa_sync::prelude::*;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let config = HarnessConfig::from_env()?;
    let driver = config.connect()?;

    // Navigate to the alerts page.
    driver.get(config.page_url("alerts"))?;

    // This button opens an alert five seconds after it is clicked.
    driver.find_element(By::Id("timerAlertButton"))?.click()?;

    // Poll for the alert with the configured wait (10 seconds by default).
    let alert = driver
        .wait_until()
        .with_spec(config.wait)
        .error("Timed out waiting for the timer alert")
        .alert_is_present()?;
    println!("Alert says: {}", alert.text()?);
    alert.accept()?;

    driver.quit()?;

    Ok(())
}
