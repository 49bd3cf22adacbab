//! Requires chromedriver running on port 4444:
//!
//!     chromedriver --port=4444
//!
//! Run as follows:
//!
//!     cargo run --example windows

use demoqa_sync::config::HarnessConfig;
use demoqa_sync::prelude::*;
use demoqa_sync::scenarios::pass_between_windows;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let config = HarnessConfig::from_env()?;
    let driver = config.connect()?;

    let url = pass_between_windows(&driver, &config.base_url, config.wait)?;
    println!("New window showed {}", url);
    println!("Back on {}", driver.current_url()?);

    // Dropping the driver also ends the session, even if a step above failed.
    Ok(())
}
