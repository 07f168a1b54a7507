//! Field-level validation primitives.
//!
//! Handles:
//! - Phone normalization (strip punctuation, exactly 10 digits)
//! - Email shape and the no-consecutive-periods rule
//! - Positive-integer age parsing
//! - ISO date parsing with chronological comparison

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

/// `local@domain.tld` shape: no whitespace or extra `@`, one dot in the
/// domain part.
fn email_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"))
}

/// Strip everything but ASCII digits from a phone input.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Whether a phone input normalizes to exactly 10 digits.
pub fn is_valid_phone(raw: &str) -> bool {
    normalize_phone(raw).len() == 10
}

/// Whether an email matches the `local@domain.tld` shape.
pub fn email_shape_ok(email: &str) -> bool {
    email_shape().is_match(email)
}

/// Whether an email contains two consecutive periods anywhere.
pub fn has_consecutive_periods(email: &str) -> bool {
    email.contains("..")
}

/// Parse an age input into a positive integer.
pub fn parse_age(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|age| *age > 0)
}

/// Parse an ISO `yyyy-mm-dd` input, tolerating a trailing time component by
/// truncating to the calendar day.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    let date_part = raw.split('T').next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
