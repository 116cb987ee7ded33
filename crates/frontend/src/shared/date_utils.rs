//! Calendar helpers for forms and campaign badges.

use chrono::{Duration, NaiveDate, Utc};

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// `YYYY-MM-DD`, the value format of `<input type="date">`
pub fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Default validity window of a new campaign: today plus `days`
pub fn default_window(from: NaiveDate, days: i64) -> (String, String) {
    (iso(from), iso(from + Duration::days(days)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window() {
        let from = NaiveDate::from_ymd_opt(2025, 12, 20).unwrap();
        assert_eq!(
            default_window(from, 30),
            ("2025-12-20".to_string(), "2026-01-19".to_string())
        );
    }
}
