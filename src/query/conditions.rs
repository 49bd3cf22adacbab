//! Ready-made predicates for `ConditionWaiter`.
//!
//! Driver predicates return `Ok(None)` while the condition is not yet met.

use stringmatch::Needle;

use crate::common::types::WindowHandle;
use crate::error::{WebDriverError, WebDriverResult};
use crate::webdrivercommands::WebDriverCommands;
use crate::{WebDriverSession, WebElement};

pub type DriverPredicate<T> =
    Box<dyn Fn(&WebDriverSession) -> WebDriverResult<Option<T>> + Send + Sync>;
pub type ElementPredicate = Box<dyn Fn(&WebElement<'_>) -> WebDriverResult<bool> + Send + Sync>;

/// Yields the alert text once an alert is open.
pub fn alert_is_present() -> DriverPredicate<String> {
    Box::new(|session| match session.switch_to().alert().text() {
        Ok(text) => Ok(Some(text)),
        Err(WebDriverError::NoSuchAlert(_)) => Ok(None),
        Err(e) => Err(e),
    })
}

/// Yields the current URL once it matches `needle`.
pub fn url_matches<N>(needle: N) -> DriverPredicate<String>
where
    N: Needle + Send + Sync + 'static,
{
    Box::new(move |session| {
        let url = session.current_url()?;
        Ok(if needle.is_match(&url) { Some(url) } else { None })
    })
}

/// Yields the page title once it matches `needle`.
pub fn title_matches<N>(needle: N) -> DriverPredicate<String>
where
    N: Needle + Send + Sync + 'static,
{
    Box::new(move |session| {
        let title = session.title()?;
        Ok(if needle.is_match(&title) { Some(title) } else { None })
    })
}

/// Yields all window handles once exactly `count` windows are open.
pub fn number_of_windows_to_be(count: usize) -> DriverPredicate<Vec<WindowHandle>> {
    Box::new(move |session| {
        let handles = session.window_handles()?;
        Ok(if handles.len() == count { Some(handles) } else { None })
    })
}

/// Yields the first window handle that is not in `known`.
pub fn new_window_is_opened(known: &[WindowHandle]) -> DriverPredicate<WindowHandle> {
    let known = known.to_vec();
    Box::new(move |session| {
        let handles = session.window_handles()?;
        Ok(handles.into_iter().find(|h| !known.contains(h)))
    })
}

pub fn element_is_displayed() -> ElementPredicate {
    Box::new(|elem| elem.is_displayed())
}

pub fn element_is_not_displayed() -> ElementPredicate {
    Box::new(|elem| elem.is_displayed().map(|x| !x))
}

pub fn element_is_enabled() -> ElementPredicate {
    Box::new(|elem| elem.is_enabled())
}

/// Displayed and enabled.
pub fn element_is_clickable() -> ElementPredicate {
    Box::new(|elem| Ok(elem.is_displayed()? && elem.is_enabled()?))
}

pub fn element_is_stale() -> ElementPredicate {
    Box::new(|elem| elem.is_present().map(|x| !x))
}

pub fn element_has_text<N>(text: N) -> ElementPredicate
where
    N: Needle + Send + Sync + 'static,
{
    Box::new(move |elem| {
        let t = elem.text()?;
        Ok(text.is_match(&t))
    })
}
