//! Checks shared by customers and staff.

use chrono::NaiveDate;

use crate::shared::validation::{parse_date, rules, ValidationErrors};

/// Name, email and phone, each under its wire field name
pub fn validate_contact(
    errors: &mut ValidationErrors,
    name_field: &str,
    name_label: &str,
    name: &str,
    email: &str,
    phone: &str,
) {
    errors.check(name_field, rules::NAME.validate_string(name, name_label));
    errors.check("email", rules::EMAIL.validate_string(email, "Email"));
    errors.check("soDienThoai", rules::PHONE.validate_string(phone, "Số điện thoại"));
}

/// Optional date that must not lie after `today`
pub fn validate_past_date(raw: &str, label: &str, today: NaiveDate) -> Result<Option<NaiveDate>, String> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let date = parse_date(raw).ok_or_else(|| format!("{} không hợp lệ", label))?;
    if date > today {
        return Err(format!("{} không được ở tương lai", label));
    }
    Ok(Some(date))
}

/// `true` = male on the wire
pub fn gender_from_form(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

pub fn gender_to_form(value: Option<bool>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_past_date() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(validate_past_date("", "Ngày sinh", today), Ok(None));
        assert!(validate_past_date("2000-02-29", "Ngày sinh", today).unwrap().is_some());
        assert_eq!(
            validate_past_date("2025-06-02", "Ngày sinh", today).unwrap_err(),
            "Ngày sinh không được ở tương lai"
        );
        assert_eq!(
            validate_past_date("31/12/2000", "Ngày sinh", today).unwrap_err(),
            "Ngày sinh không hợp lệ"
        );
    }

    #[test]
    fn test_gender_mapping() {
        assert_eq!(gender_from_form("true"), Some(true));
        assert_eq!(gender_from_form(""), None);
        assert_eq!(gender_to_form(Some(false)), "false");
    }
}
