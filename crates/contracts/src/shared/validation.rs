//! Field validation for every create/edit form.
//!
//! Rules are plain `const` values so each resource can declare its form
//! constraints in one table. Errors are keyed by field name; the UI only shows
//! the ones whose field has been touched (blurred once or submitted).

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::labels::format_number;

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").expect("hex color regex"));
static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex")
});
static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10,11}$").expect("phone regex"));
static CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("code regex"));
static THOUSANDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[0-9]{1,3}(\.[0-9]{3})+$").expect("thousands regex"));
static IMEI: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{15}$").expect("imei regex"));

/// Named formats a string field can be checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    HexColor,
    Email,
    Phone,
    Code,
    Imei,
}

impl Pattern {
    fn regex(&self) -> &'static Regex {
        match self {
            Pattern::HexColor => &*HEX_COLOR,
            Pattern::Email => &*EMAIL,
            Pattern::Phone => &*PHONE,
            Pattern::Code => &*CODE,
            Pattern::Imei => &*IMEI,
        }
    }

    fn hint(&self) -> &'static str {
        match self {
            Pattern::HexColor => "phải có dạng #RRGGBB hoặc #RGB",
            Pattern::Email => "không đúng định dạng email",
            Pattern::Phone => "phải gồm 10-11 chữ số",
            Pattern::Code => "chỉ được chứa chữ, số, dấu gạch ngang và gạch dưới",
            Pattern::Imei => "phải gồm đúng 15 chữ số",
        }
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex().is_match(value)
    }
}

/// Validation rules for a field
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValidationRules {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub integer: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Pattern>,
}

impl ValidationRules {
    pub const fn none() -> Self {
        Self {
            required: false,
            min: None,
            max: None,
            integer: false,
            min_length: None,
            max_length: None,
            pattern: None,
        }
    }

    pub const fn required() -> Self {
        Self {
            required: true,
            ..Self::none()
        }
    }

    /// Same constraints, but an empty value is accepted
    pub const fn optional(self) -> Self {
        Self {
            required: false,
            ..self
        }
    }

    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Validate a text value; length counts characters of the trimmed value
    pub fn validate_string(&self, value: &str, field_label: &str) -> Result<(), String> {
        let value = value.trim();
        if value.is_empty() {
            return if self.required {
                Err(format!("{} không được để trống", field_label))
            } else {
                Ok(())
            };
        }

        let len = value.chars().count();
        if let Some(min) = self.min_length {
            if len < min {
                return Err(format!("{} phải có ít nhất {} ký tự", field_label, min));
            }
        }
        if let Some(max) = self.max_length {
            if len > max {
                return Err(format!("{} không được vượt quá {} ký tự", field_label, max));
            }
        }
        if let Some(pattern) = self.pattern {
            if !pattern.is_match(value) {
                return Err(format!("{} {}", field_label, pattern.hint()));
            }
        }
        Ok(())
    }

    /// Validate a numeric value against min/max rules
    pub fn validate_number(&self, value: f64, field_label: &str) -> Result<(), String> {
        if self.integer && value.fract() != 0.0 {
            return Err(format!("{} phải là số nguyên", field_label));
        }
        if let Some(min) = self.min {
            if value < min {
                return Err(format!(
                    "{} phải lớn hơn hoặc bằng {}",
                    field_label,
                    format_number(min)
                ));
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return Err(format!(
                    "{} không được lớn hơn {}",
                    field_label,
                    format_number(max)
                ));
            }
        }
        Ok(())
    }

    /// Validate a number typed into a text input; returns the parsed value
    pub fn validate_number_text(&self, raw: &str, field_label: &str) -> Result<Option<f64>, String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return if self.required {
                Err(format!("{} không được để trống", field_label))
            } else {
                Ok(None)
            };
        }
        let value = parse_number(raw).ok_or_else(|| format!("{} phải là số", field_label))?;
        self.validate_number(value, field_label)?;
        Ok(Some(value))
    }
}

/// Parse a user-typed number in either `1500000.5` or vi-VN `1.500.000,5` notation
pub fn parse_number(raw: &str) -> Option<f64> {
    let raw = raw.trim().replace(' ', "");
    let normalized = if raw.contains(',') || THOUSANDS.is_match(&raw) {
        raw.replace('.', "").replace(',', ".")
    } else {
        raw
    };
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Rule table shared by all forms
pub mod rules {
    use super::{Pattern, ValidationRules};

    pub const NAME: ValidationRules = ValidationRules {
        required: true,
        min_length: Some(2),
        max_length: Some(100),
        ..ValidationRules::none()
    };

    /// Longest free text: descriptions, notes
    pub const DESCRIPTION_MAX: usize = 500;

    pub const DESCRIPTION: ValidationRules = ValidationRules {
        max_length: Some(DESCRIPTION_MAX),
        ..ValidationRules::none()
    };

    pub const CODE: ValidationRules = ValidationRules {
        required: true,
        min_length: Some(3),
        max_length: Some(50),
        pattern: Some(Pattern::Code),
        ..ValidationRules::none()
    };

    pub const HEX_COLOR: ValidationRules = ValidationRules {
        required: true,
        pattern: Some(Pattern::HexColor),
        ..ValidationRules::none()
    };

    pub const EMAIL: ValidationRules = ValidationRules {
        required: true,
        max_length: Some(100),
        pattern: Some(Pattern::Email),
        ..ValidationRules::none()
    };

    pub const PHONE: ValidationRules = ValidationRules {
        required: true,
        pattern: Some(Pattern::Phone),
        ..ValidationRules::none()
    };

    pub const ADDRESS: ValidationRules = ValidationRules {
        required: true,
        min_length: Some(5),
        max_length: Some(255),
        ..ValidationRules::none()
    };

    pub const PRICE: ValidationRules = ValidationRules {
        required: true,
        min: Some(0.0),
        max: Some(999_999_999.0),
        ..ValidationRules::none()
    };

    pub const QUANTITY: ValidationRules = ValidationRules {
        required: true,
        min: Some(0.0),
        max: Some(1_000_000.0),
        integer: true,
        ..ValidationRules::none()
    };

    pub const PERCENT: ValidationRules = ValidationRules {
        required: true,
        min: Some(1.0),
        max: Some(100.0),
        ..ValidationRules::none()
    };
}

// ============================================================================
// Error collection
// ============================================================================

/// Field name -> first error message
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    errors: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one check; the first error per field wins
    pub fn check<T>(&mut self, field: &str, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(message) => {
                self.insert(field, message);
                None
            }
        }
    }

    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Fields the user has already interacted with
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TouchedFields(BTreeSet<String>);

impl TouchedFields {
    pub fn touch(&mut self, field: &str) {
        self.0.insert(field.to_string());
    }

    /// Mark every field carrying an error, used on submit
    pub fn touch_all(&mut self, errors: &ValidationErrors) {
        for field in errors.fields() {
            self.touch(field);
        }
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.0.contains(field)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

// ============================================================================
// Dates
// ============================================================================

/// Parse `YYYY-MM-DD`, also accepting a trailing time part (`datetime-local` inputs)
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Both dates present, valid, and the end strictly after the start
pub fn validate_date_range(
    start: &str,
    end: &str,
    errors: &mut ValidationErrors,
    start_field: &str,
    end_field: &str,
) -> Option<(NaiveDate, NaiveDate)> {
    let start_date = errors.check(start_field, required_date(start, "Ngày bắt đầu"));
    let end_date = errors.check(end_field, required_date(end, "Ngày kết thúc"));
    let (start_date, end_date) = (start_date?, end_date?);
    if end_date <= start_date {
        errors.insert(end_field, "Ngày kết thúc phải sau ngày bắt đầu");
        return None;
    }
    Some((start_date, end_date))
}

fn required_date(raw: &str, label: &str) -> Result<NaiveDate, String> {
    if raw.trim().is_empty() {
        return Err(format!("{} không được để trống", label));
    }
    parse_date(raw).ok_or_else(|| format!("{} không hợp lệ", label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_rule_counts_characters() {
        assert!(rules::NAME.validate_string("Đỏ", "Tên màu").is_ok());
        assert_eq!(
            rules::NAME.validate_string(" Đ ", "Tên màu").unwrap_err(),
            "Tên màu phải có ít nhất 2 ký tự"
        );
        assert_eq!(
            rules::NAME.validate_string("   ", "Tên màu").unwrap_err(),
            "Tên màu không được để trống"
        );
        let long = "a".repeat(101);
        assert!(rules::NAME.validate_string(&long, "Tên").is_err());
    }

    #[test]
    fn test_hex_color_pattern() {
        for ok in ["#FF0000", "#f00", "#a1B2c3"] {
            assert!(rules::HEX_COLOR.validate_string(ok, "Mã màu").is_ok(), "{ok}");
        }
        for bad in ["FF0000", "#GG0000", "#12345", "#1234567"] {
            assert!(rules::HEX_COLOR.validate_string(bad, "Mã màu").is_err(), "{bad}");
        }
    }

    #[test]
    fn test_email_and_phone() {
        assert!(rules::EMAIL.validate_string("an.nguyen@shop.vn", "Email").is_ok());
        assert!(rules::EMAIL.validate_string("an.nguyen@", "Email").is_err());
        assert!(rules::PHONE.validate_string("0912345678", "SĐT").is_ok());
        assert!(rules::PHONE.validate_string("+84912345678", "SĐT").is_err());
        assert!(rules::PHONE.validate_string("12345", "SĐT").is_err());
    }

    #[test]
    fn test_number_text() {
        assert_eq!(rules::PRICE.validate_number_text("1500000", "Giá").unwrap(), Some(1_500_000.0));
        assert_eq!(rules::PRICE.validate_number_text("1.500.000", "Giá").unwrap(), Some(1_500_000.0));
        assert_eq!(
            rules::PRICE.validate_number_text("-1", "Giá").unwrap_err(),
            "Giá phải lớn hơn hoặc bằng 0"
        );
        assert_eq!(rules::PRICE.validate_number_text("abc", "Giá").unwrap_err(), "Giá phải là số");
        assert_eq!(
            rules::QUANTITY.validate_number_text("2.5", "Số lượng").unwrap_err(),
            "Số lượng phải là số nguyên"
        );
        assert_eq!(ValidationRules::none().validate_number_text("", "x").unwrap(), None);
        assert_eq!(parse_number("1.250"), Some(1250.0));
        assert_eq!(parse_number("1,5"), Some(1.5));
        assert_eq!(parse_number("12.5"), Some(12.5));
    }

    #[test]
    fn test_first_error_wins_and_touch_gating() {
        let mut errors = ValidationErrors::new();
        errors.insert("tenMau", "first");
        errors.insert("tenMau", "second");
        assert_eq!(errors.get("tenMau"), Some("first"));

        let mut touched = TouchedFields::default();
        assert!(!touched.is_touched("tenMau"));
        touched.touch_all(&errors);
        assert!(touched.is_touched("tenMau"));
    }

    #[test]
    fn test_date_range() {
        let mut errors = ValidationErrors::new();
        assert!(validate_date_range("2025-01-01", "2025-02-01T08:00", &mut errors, "s", "e").is_some());
        assert!(errors.is_empty());

        let mut errors = ValidationErrors::new();
        assert!(validate_date_range("2025-02-01", "2025-02-01", &mut errors, "s", "e").is_none());
        assert_eq!(errors.get("e"), Some("Ngày kết thúc phải sau ngày bắt đầu"));

        let mut errors = ValidationErrors::new();
        assert!(validate_date_range("", "nope", &mut errors, "s", "e").is_none());
        assert_eq!(errors.len(), 2);
    }
}
