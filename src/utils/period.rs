//! Parsing of the free-form period strings found on listing records.
//!
//! Accepted forms, each optionally as the end of a range:
//! `"Dec 2025"`, `"December 2025"`, `"2024"`, `"2025-08-15"`, `"Aug 15, 2025"`,
//! and the open-ended markers `Present`, `Current` and `Now`.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static RANGE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[\x{2013}\x{2014}]\s*|\s+-\s+|\s+to\s+").expect("valid regex"));

static MONTH_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i)([a-z]+)\.?,?\s+(\d{4})$").expect("valid regex"));

static MONTH_DAY_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)([a-z]+)\.?\s+(\d{1,2}),?\s+(\d{4})$").expect("valid regex")
});

static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{4})$").expect("valid regex"));

const OPEN_ENDED: [&str; 3] = ["present", "current", "now"];

/// Returns the end of a period, or `None` when it cannot be understood.
///
/// Open-ended periods resolve to `NaiveDate::MAX` so they sort newest.
pub fn parse_period_end(period: &str) -> Option<NaiveDate> {
    let end = RANGE_SEPARATOR
        .split(period.trim())
        .filter(|part| !part.is_empty())
        .last()?;

    parse_date(end)
}

pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if OPEN_ENDED.iter().any(|marker| text.eq_ignore_ascii_case(marker)) {
        return Some(NaiveDate::MAX);
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }

    if let Some(caps) = YEAR.captures(text) {
        let year = caps[1].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }

    if let Some(caps) = MONTH_YEAR.captures(text) {
        let month = month_number(&caps[1])?;
        let year = caps[2].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, 1);
    }

    if let Some(caps) = MONTH_DAY_YEAR.captures(text) {
        let month = month_number(&caps[1])?;
        let day = caps[2].parse().ok()?;
        let year = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    None
}

fn month_number(name: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];

    let name = name.to_ascii_lowercase();
    if name.len() < 3 {
        return None;
    }
    // "sept" is common enough to special-case
    let name = if name == "sept" { "sep".to_string() } else { name };

    MONTHS
        .iter()
        .position(|month| month.starts_with(name.as_str()))
        .map(|index| index as u32 + 1)
}
