use std::time::Duration;

use demoqa_sync::prelude::*;

mod common;
use common::{spec, FakeOptions, FakeWebDriver, SITE_URL};

#[test]
fn alert_waiter_uses_session_default_spec() -> WebDriverResult<()> {
    let fake = FakeWebDriver::start(FakeOptions {
        alert_delay: Some(Duration::from_millis(100)),
        ..FakeOptions::default()
    });
    let mut driver = fake.connect();
    driver.config_mut().wait_spec = spec(2000, 20);

    driver.get(format!("{}/alerts", SITE_URL))?;
    driver.find_element(By::Id("timerAlertButton"))?.click()?;

    let alert = driver.wait_until().alert_is_present()?;
    assert_eq!(alert.text()?, common::ALERT_TEXT);
    alert.dismiss()?;
    assert_eq!(fake.state().alerts_accepted, 0);
    Ok(())
}

#[test]
fn window_waiters_see_the_new_window() -> WebDriverResult<()> {
    let fake = FakeWebDriver::start(FakeOptions::default());
    let driver = fake.connect();

    driver.get(format!("{}/browser-windows", SITE_URL))?;
    let known = driver.window_handles()?;
    driver.find_element(By::Id("windowButton"))?.click()?;

    let handles = driver.wait_until().with_spec(spec(500, 20)).number_of_windows_to_be(2)?;
    let new_window =
        driver.wait_until().with_spec(spec(500, 20)).new_window_is_opened(&known)?;
    assert!(handles.contains(&new_window));
    assert!(!known.contains(&new_window));

    driver.switch_to().window(&new_window)?;
    let url = driver
        .wait_until()
        .with_spec(spec(500, 20))
        .url_matches(format!("{}/sample", SITE_URL))?;
    assert_eq!(url, "https://demoqa.test/sample");
    Ok(())
}

#[test]
fn custom_error_message_is_reported_on_timeout() {
    let fake = FakeWebDriver::start(FakeOptions::default());
    let driver = fake.connect();

    let result = driver
        .wait_until()
        .with_spec(spec(100, 20))
        .error("second window never appeared")
        .number_of_windows_to_be(2);
    match result {
        Err(WebDriverError::Timeout(message)) => {
            assert_eq!(message, "second window never appeared")
        }
        other => panic!("expected a timeout, got {:?}", other),
    }
}

#[test]
fn errors_can_end_a_wait_early() {
    let fake = FakeWebDriver::start(FakeOptions::default());
    let driver = fake.connect();

    // Closing the only window leaves the session without a current browsing context.
    driver.execute_script("window.close();").expect("script failed");

    let result = driver
        .wait_until()
        .with_spec(spec(5000, 20))
        .ignore_errors(false)
        .url_matches("https://demoqa.test/sample");
    assert!(matches!(result, Err(WebDriverError::NoSuchWindow(_))), "{:?}", result);
}

#[test]
fn element_waiter_checks_element_state() -> WebDriverResult<()> {
    let fake = FakeWebDriver::start(FakeOptions::default());
    let driver = fake.connect();

    driver.get(format!("{}/alerts", SITE_URL))?;
    let button = driver.find_element(By::Id("timerAlertButton"))?;
    button.wait_until().with_spec(spec(500, 20)).clickable()?;
    button.wait_until().with_spec(spec(500, 20)).has_text("Click me")?;

    let result = button.wait_until().with_spec(spec(100, 20)).not_displayed();
    assert!(matches!(result, Err(WebDriverError::Timeout(_))), "{:?}", result);
    Ok(())
}

#[test]
fn invalid_wait_is_rejected_before_polling() {
    let fake = FakeWebDriver::start(FakeOptions::default());
    let driver = fake.connect();

    let result = driver.wait_until().wait(Duration::from_millis(10), Duration::from_millis(20));
    assert!(matches!(result, Err(WebDriverError::InvalidArgument(_))));
}
