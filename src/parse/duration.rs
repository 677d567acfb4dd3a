use regex::Regex;
use std::sync::LazyLock;

/// ISO-8601-style duration restricted to hours and minutes.
static ISO_DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*PT(?:(\d+)H)?(?:(\d+)M)?\s*$").unwrap());

/// Parse a duration string to whole minutes.
///
/// Recognizes `PT1H30M`-style values; anything else falls back to the first
/// run of digits found in the string, treated as minutes. Total function:
/// empty or unparsable input yields 0, never panics.
pub fn parse_duration(s: &str) -> u32 {
    if let Some(caps) = ISO_DURATION.captures(s) {
        let hours: u32 = caps
            .get(1)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);
        let minutes: u32 = caps
            .get(2)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);
        return hours.saturating_mul(60).saturating_add(minutes);
    }

    super::leading_integer(s).unwrap_or(0)
}
