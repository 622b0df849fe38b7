//! Calendar month helpers.

use crate::errors::CoreError;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English name for a month number, or `None` outside 1–12.
#[must_use]
pub fn month_name(month: u8) -> Option<&'static str> {
    if (1..=12).contains(&month) {
        Some(MONTH_NAMES[usize::from(month) - 1])
    } else {
        None
    }
}

/// Validate an issue month/year pair.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the month is outside 1–12 or the year
/// is not positive.
pub fn validate_issue_date(month: u8, year: i32) -> Result<(), CoreError> {
    if !(1..=12).contains(&month) {
        return Err(CoreError::Validation(format!(
            "issue_month must be 1-12, got {month}"
        )));
    }
    if year <= 0 {
        return Err(CoreError::Validation(format!(
            "issue_year must be positive, got {year}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_names_cover_full_year() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(6), Some("June"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn issue_date_bounds() {
        assert!(validate_issue_date(1, 1980).is_ok());
        assert!(validate_issue_date(12, 2026).is_ok());
        assert!(matches!(
            validate_issue_date(0, 2026),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            validate_issue_date(13, 2026),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            validate_issue_date(6, 0),
            Err(CoreError::Validation(_))
        ));
    }
}
