//! Suggested business codes for new records.

use chrono::NaiveDate;

/// Successor of the highest sequence number; 1 when there is none or it would overflow
fn next_sequence(numbers: impl Iterator<Item = u32>) -> u32 {
    numbers.max().and_then(|max| max.checked_add(1)).unwrap_or(1)
}

/// Next `SP0001`-style product code after the highest existing one
pub fn next_product_code<'a>(existing: impl IntoIterator<Item = &'a str>) -> String {
    let next = next_sequence(
        existing
            .into_iter()
            .filter_map(|code| code.trim().strip_prefix("SP"))
            .filter_map(|digits| digits.parse::<u32>().ok()),
    );
    format!("SP{:04}", next)
}

/// `CS-20250308-004`: day prefix plus the next sequence number of that day
pub fn next_sale_number<'a>(date: NaiveDate, existing: impl IntoIterator<Item = &'a str>) -> String {
    let prefix = format!("CS-{}-", date.format("%Y%m%d"));
    let next = next_sequence(
        existing
            .into_iter()
            .filter_map(|n| n.strip_prefix(prefix.as_str()))
            .filter_map(|seq| seq.parse::<u32>().ok()),
    );
    format!("{}{:03}", prefix, next)
}

/// `KM20250308042`; `suffix` is reduced to three digits
pub fn promotion_code(date: NaiveDate, suffix: u32) -> String {
    format!("KM{}{:03}", date.format("%Y%m%d"), suffix % 1000)
}

/// `PGG_` followed by the first eight alphanumerics of `seed`, upper-cased
pub fn voucher_code(seed: &str) -> String {
    let tail: String = seed
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(8)
        .collect::<String>()
        .to_ascii_uppercase();
    format!("PGG_{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_product_code() {
        assert_eq!(next_product_code(Vec::<&str>::new()), "SP0001");
        assert_eq!(next_product_code(["SP0003", "SP0010", "MU-01", "SPX"]), "SP0011");
    }

    #[test]
    fn test_sale_number_sequence_per_day() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 8).unwrap();
        assert_eq!(next_sale_number(day, Vec::<&str>::new()), "CS-20250308-001");
        assert_eq!(
            next_sale_number(day, ["CS-20250308-001", "CS-20250308-002", "CS-20250307-009"]),
            "CS-20250308-003"
        );
    }

    #[test]
    fn test_codes_at_the_numeric_limit_restart() {
        assert_eq!(next_product_code(["SP4294967295"]), "SP0001");
        assert_eq!(next_product_code(["SP99999999999"]), "SP0001");
        let day = NaiveDate::from_ymd_opt(2025, 3, 8).unwrap();
        assert_eq!(next_sale_number(day, ["CS-20250308-4294967295"]), "CS-20250308-001");
    }

    #[test]
    fn test_promotion_and_voucher_codes() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 8).unwrap();
        assert_eq!(promotion_code(day, 1042), "KM20250308042");
        assert_eq!(voucher_code("3f2a-9c1b-77de"), "PGG_3F2A9C1B");
    }
}
