//! Display formatting for money, dates and the two-state flags the API uses.

use chrono::{NaiveDate, NaiveDateTime};

/// Group the integer part with `.` and use `,` for decimals (vi-VN)
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::new();
    for (i, c) in integer_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 && c != '-' {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    match decimal_part {
        Some(d) => format!("{},{}", grouped, d),
        None => grouped,
    }
}

/// Whole number with thousands separators; fractional values keep two decimals
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format_number_with_decimals(value, 0)
    } else {
        format_number_with_decimals(value, 2)
    }
}

/// Amount in dong, e.g. `1.500.000 ₫`
pub fn format_vnd(value: f64) -> String {
    format!("{} ₫", format_number_with_decimals(value, 0))
}

/// `2025-03-08` or `2025-03-08T10:15:00` -> `08/03/2025`; unparseable input is returned as is
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    raw.get(..10)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// ISO timestamp -> `08/03/2025 10:15`
pub fn format_datetime(raw: &str) -> String {
    let raw = raw.trim();
    let trimmed = raw.get(..16).unwrap_or(raw);
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M")
        .map(|d| d.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|_| format_date(raw))
}

pub fn active_label(active: bool) -> &'static str {
    if active {
        "Hoạt động"
    } else {
        "Ngừng hoạt động"
    }
}

pub fn gender_label(male: Option<bool>) -> &'static str {
    match male {
        Some(true) => "Nam",
        Some(false) => "Nữ",
        None => "—",
    }
}

/// Options of the common active/inactive filter (empty value = all)
pub const ACTIVE_FILTER_OPTIONS: [(&str, &str); 3] = [
    ("", "Tất cả trạng thái"),
    ("true", "Hoạt động"),
    ("false", "Ngừng hoạt động"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_vnd() {
        assert_eq!(format_vnd(1_500_000.0), "1.500.000 ₫");
        assert_eq!(format_vnd(0.0), "0 ₫");
        assert_eq!(format_vnd(999.0), "999 ₫");
        assert_eq!(format_vnd(-75_000.0), "-75.000 ₫");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1000.0), "1.000");
        assert_eq!(format_number(1.5), "1,50");
        assert_eq!(format_number_with_decimals(1234.567, 1), "1.234,6");
    }

    #[test]
    fn test_format_dates() {
        assert_eq!(format_date("2025-03-08"), "08/03/2025");
        assert_eq!(format_date("2025-03-08T10:15:00"), "08/03/2025");
        assert_eq!(format_date("hôm qua"), "hôm qua");
        assert_eq!(format_datetime("2025-03-08T10:15:42.123"), "08/03/2025 10:15");
        assert_eq!(format_datetime("2025-03-08"), "08/03/2025");
    }
}
