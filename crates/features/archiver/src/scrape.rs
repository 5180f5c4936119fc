//! Narrow extractors over the archiver page HTML.
//!
//! Each helper takes the raw response text and answers with an `Option`, so a missing
//! pattern is never confused with a transport failure.

use regex::Regex;
use std::sync::LazyLock;

/// Marker the archiver page shows instead of a GP amount for free downloads.
pub const FREE_MARKER: &str = "Free!";
/// Query suffix that makes the archive host start the transfer immediately.
pub const START_SUFFIX: &str = "?start=1";
const AUTOSTART_SUFFIX: &str = "?autostart=1";

static COST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<strong>(.*?)</strong>").expect("cost pattern is valid"));
static REDIRECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"document\.location = "(.*?)";"#).expect("redirect pattern is valid")
});

/// Text of the first `<strong>` element on the page.
#[must_use]
pub fn extract_cost_text(html: &str) -> Option<&str> {
    COST_RE.captures(html).and_then(|caps| caps.get(1)).map(|m| m.as_str())
}

/// Interprets the cost text: [`FREE_MARKER`] is zero, anything else keeps only its digits.
#[must_use]
pub fn parse_cost(text: &str) -> Option<u64> {
    if text == FREE_MARKER {
        return Some(0);
    }
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Direct download URL from the client-side redirect, with [`START_SUFFIX`] appended.
///
/// An empty redirect target counts as absent.
#[must_use]
pub fn extract_download_url(html: &str) -> Option<String> {
    let url = REDIRECT_RE.captures(html)?.get(1)?.as_str();
    let url = url.strip_suffix(AUTOSTART_SUFFIX).unwrap_or(url);
    if url.is_empty() {
        return None;
    }
    Some(format!("{url}{START_SUFFIX}"))
}
