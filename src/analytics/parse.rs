use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::sync::OnceLock;

fn numeric_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Leading sign, digits with optional fraction (or a bare fraction), optional exponent
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("static regex is valid")
    })
}

/// Parse a price typed into the form.
///
/// Surrounding whitespace is ignored and only the leading numeric part is read,
/// so `"112.5 USD"` is `112.5`. Empty, non-numeric and non-finite values are `None`.
pub fn parse_price(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let matched = numeric_prefix().find(trimmed)?;
    let parsed = matched.as_str().parse::<f64>().ok()?;
    parsed.is_finite().then_some(parsed)
}

/// `YYYY-MM-DD`, as emitted by a date input.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// `HH:MM` or `HH:MM:SS`.
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

pub fn parse_instant(date: &str, time: &str) -> Option<NaiveDateTime> {
    Some(parse_date(date)?.and_time(parse_time(time)?))
}
