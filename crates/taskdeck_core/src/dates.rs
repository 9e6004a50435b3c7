//! Relative due-date resolution.
//!
//! # Responsibility
//! - Turn model-produced phrases like `2 weeks` into absolute calendar
//!   dates anchored on a reference instant.
//!
//! # Invariants
//! - Resolution is pure and deterministic for a given reference instant.
//! - Unrecognized input resolves to `None`; this function never fails.
//! - The output carries no time-of-day component.

use chrono::{DateTime, Days, Months, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static RELATIVE_PHRASE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(\d{1,4})\s+(day|days|week|weeks|month|months)\s*$")
        .expect("valid relative phrase regex")
});

/// Resolves a relative-or-absolute due-date string against a reference
/// instant.
///
/// Recognized inputs:
/// - absolute ISO dates (`2025-03-14`), parsed and passed through;
/// - `<n> day(s)` / `<n> week(s)` / `<n> month(s)`, case-insensitive.
///
/// Day offsets add calendar days, week offsets add `7*n` days, month
/// offsets add calendar months anchored on the reference date. Labels such
/// as `start date`, `none` or `n/a` and any other unparseable text resolve
/// to `None`; due dates are optional and best-effort.
pub fn resolve_due_date(raw: Option<&str>, reference: DateTime<Utc>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(absolute) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(absolute);
    }

    let captures = RELATIVE_PHRASE_RE.captures(raw)?;
    let amount: u32 = captures.get(1)?.as_str().parse().ok()?;
    let unit = captures.get(2)?.as_str().to_ascii_lowercase();
    let anchor = reference.date_naive();

    match unit.as_str() {
        "day" | "days" => anchor.checked_add_days(Days::new(u64::from(amount))),
        "week" | "weeks" => anchor.checked_add_days(Days::new(u64::from(amount) * 7)),
        "month" | "months" => anchor.checked_add_months(Months::new(amount)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::resolve_due_date;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn reference() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 31, 15, 30, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn resolves_day_and_week_offsets() {
        assert_eq!(
            resolve_due_date(Some("3 days"), reference()),
            Some(date(2025, 2, 3))
        );
        assert_eq!(
            resolve_due_date(Some("1 week"), reference()),
            Some(date(2025, 2, 7))
        );
        // n weeks is exactly 7*n days.
        assert_eq!(
            resolve_due_date(Some("2 weeks"), reference()),
            resolve_due_date(Some("14 days"), reference())
        );
    }

    #[test]
    fn month_offsets_use_calendar_months_not_fixed_day_counts() {
        // Jan 31 + 1 month clamps to Feb 28, not Mar 2.
        assert_eq!(
            resolve_due_date(Some("1 month"), reference()),
            Some(date(2025, 2, 28))
        );
        assert_eq!(
            resolve_due_date(Some("2 MONTHS"), reference()),
            Some(date(2025, 3, 31))
        );
    }

    #[test]
    fn absolute_iso_dates_pass_through() {
        assert_eq!(
            resolve_due_date(Some("2025-06-01"), reference()),
            Some(date(2025, 6, 1))
        );
    }

    #[test]
    fn labels_and_noise_resolve_to_none() {
        for raw in ["start date", "END DATE", "none", "N/A", "soonish", "", "  "] {
            assert_eq!(resolve_due_date(Some(raw), reference()), None, "{raw:?}");
        }
        assert_eq!(resolve_due_date(None, reference()), None);
    }

    #[test]
    fn resolution_is_deterministic() {
        let first = resolve_due_date(Some("6 months"), reference());
        let second = resolve_due_date(Some("6 months"), reference());
        assert_eq!(first, second);
    }
}
