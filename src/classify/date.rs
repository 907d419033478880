//! YYMMDD date helpers.

use chrono::{Local, NaiveDate};

/// Today's local date as YYMMDD.
pub fn today_yymmdd() -> String {
    Local::now().date_naive().format("%y%m%d").to_string()
}

/// Convert `YYYY-MM-DD` to `YYMMDD`.
///
/// Empty input gives an empty string; anything that is not a valid date is
/// returned unchanged.
pub fn to_yymmdd(date: &str) -> String {
    if date.is_empty() {
        return String::new();
    }
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.format("%y%m%d").to_string(),
        Err(_) => date.to_string(),
    }
}

/// Convert `YYMMDD` to `20YY-MM-DD`; anything that is not six characters gives an empty string.
pub fn from_yymmdd(yymmdd: &str) -> String {
    if yymmdd.chars().count() != 6 || !yymmdd.is_ascii() {
        return String::new();
    }
    format!("20{}-{}-{}", &yymmdd[0..2], &yymmdd[2..4], &yymmdd[4..6])
}

/// Check for a well-formed YYMMDD calendar date.
pub fn is_yymmdd(value: &str) -> bool {
    value.len() == 6
        && value.bytes().all(|b| b.is_ascii_digit())
        && NaiveDate::parse_from_str(&from_yymmdd(value), "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_yymmdd() {
        assert_eq!(to_yymmdd("2024-01-05"), "240105");
        assert_eq!(to_yymmdd(""), "");
        assert_eq!(to_yymmdd("not a date"), "not a date");
    }

    #[test]
    fn test_from_yymmdd() {
        assert_eq!(from_yymmdd("240105"), "2024-01-05");
        assert_eq!(from_yymmdd("2401"), "");
        assert_eq!(from_yymmdd(""), "");
    }

    #[test]
    fn test_is_yymmdd() {
        assert!(is_yymmdd("240229"));
        assert!(!is_yymmdd("230229"));
        assert!(!is_yymmdd("24011"));
        assert!(!is_yymmdd("[日付]"));
    }

    #[test]
    fn test_today_shape() {
        let today = today_yymmdd();
        assert!(is_yymmdd(&today));
    }
}
