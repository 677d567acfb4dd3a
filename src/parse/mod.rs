mod duration;
mod ingredient;

pub use duration::parse_duration;
pub use ingredient::{parse_ingredient_line, ParsedIngredient};

use regex::Regex;
use std::sync::LazyLock;

static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// First run of digits found anywhere in `s`, if any.
///
/// Used for free-text servings ("pour 4 personnes") and as the duration
/// fallback ("45 minutes").
pub fn leading_integer(s: &str) -> Option<u32> {
    DIGIT_RUN.find(s).and_then(|m| m.as_str().parse().ok())
}
