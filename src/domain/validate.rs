//! Field validators: normalize raw input or report which field is invalid.
//!
//! All functions are pure. Absent/empty optional input passes through as
//! `None`; the death validators additionally check ordering against the
//! corresponding birth field.

use chrono::{Datelike, NaiveDate};

use crate::domain::entities::Gender;
use crate::domain::error::ValidationError;

/// Accepted year range for birth/death fields.
pub const MIN_YEAR: i32 = 1500;
pub const MAX_YEAR: i32 = 2100;

/// Maximum length for name and city fields.
pub const MAX_TEXT_LEN: usize = 100;

/// Trim and length-check a person's name. Empty names are rejected.
pub fn validate_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::new("name", "Name cannot be empty"));
    }
    if name.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::new(
            "name",
            format!("Name cannot exceed {} characters", MAX_TEXT_LEN),
        ));
    }
    Ok(name.to_string())
}

/// Check a year is within the accepted range. `None` passes through.
pub fn validate_year(
    year: Option<i32>,
    field: &'static str,
) -> Result<Option<i32>, ValidationError> {
    match year {
        None => Ok(None),
        Some(y) if (MIN_YEAR..=MAX_YEAR).contains(&y) => Ok(Some(y)),
        Some(_) => Err(ValidationError::new(
            field,
            format!("Year must be between {} and {}", MIN_YEAR, MAX_YEAR),
        )),
    }
}

/// Check a death year against the range and the birth year, if both known.
pub fn validate_death_year(
    death_year: Option<i32>,
    birth_year: Option<i32>,
) -> Result<Option<i32>, ValidationError> {
    let death_year = validate_year(death_year, "death_year")?;
    if let (Some(death), Some(birth)) = (death_year, birth_year) {
        if death < birth {
            return Err(ValidationError::new(
                "death_year",
                "Death year cannot be before birth year",
            ));
        }
    }
    Ok(death_year)
}

/// Parse a gender value. Empty input passes through as `None`.
pub fn validate_gender(raw: Option<&str>) -> Result<Option<Gender>, ValidationError> {
    match raw {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|_| {
            ValidationError::new(
                "gender",
                format!("Gender must be one of: {}", Gender::VALID.join(", ")),
            )
        }),
    }
}

/// Parse a strict `YYYY-MM-DD` date. Empty input passes through as `None`.
///
/// Rejects malformed structure, impossible calendar dates (e.g. Feb 30) and
/// years outside the accepted range.
pub fn validate_date(
    raw: Option<&str>,
    field: &'static str,
) -> Result<Option<NaiveDate>, ValidationError> {
    let raw = match raw {
        None | Some("") => return Ok(None),
        Some(value) => value,
    };

    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ValidationError::new(field, "Date must be in YYYY-MM-DD format"))?;

    if parsed.year() < MIN_YEAR || parsed.year() > MAX_YEAR {
        return Err(ValidationError::new(
            field,
            format!("Year must be between {} and {}", MIN_YEAR, MAX_YEAR),
        ));
    }

    Ok(Some(parsed))
}

/// Parse a death date and check it does not precede the birth date, or the
/// birth year when no full birth date is known.
pub fn validate_death_date(
    raw: Option<&str>,
    birth_date: Option<NaiveDate>,
    birth_year: Option<i32>,
    field: &'static str,
) -> Result<Option<NaiveDate>, ValidationError> {
    let parsed = validate_date(raw, field)?;

    if let Some(death) = parsed {
        if let Some(birth) = birth_date {
            if death < birth {
                return Err(ValidationError::new(
                    field,
                    "Death date cannot be before birth date",
                ));
            }
        } else if let Some(birth_year) = birth_year {
            if death.year() < birth_year {
                return Err(ValidationError::new(
                    field,
                    "Death date cannot be before birth year",
                ));
            }
        }
    }

    Ok(parsed)
}

/// Trim and length-check a city name. Empty input passes through as `None`.
pub fn validate_city(raw: Option<&str>) -> Result<Option<String>, ValidationError> {
    let city = match raw {
        None | Some("") => return Ok(None),
        Some(value) => value.trim(),
    };
    if city.is_empty() {
        return Ok(None);
    }
    if city.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::new(
            "birth_city",
            format!("City name cannot exceed {} characters", MAX_TEXT_LEN),
        ));
    }
    Ok(Some(city.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("John", "John")]
    #[case("  John Smith  ", "John Smith")]
    fn name_is_trimmed(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(validate_name(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn empty_name_is_rejected(#[case] raw: &str) {
        let err = validate_name(raw).unwrap_err();
        assert_eq!(err.field, "name");
    }

    #[test]
    fn overlong_name_is_rejected() {
        let raw = "x".repeat(101);
        assert!(validate_name(&raw).is_err());
        assert!(validate_name(&"x".repeat(100)).is_ok());
    }

    #[rstest]
    #[case(1500)]
    #[case(1950)]
    #[case(2100)]
    fn year_in_range_passes_through(#[case] year: i32) {
        assert_eq!(validate_year(Some(year), "birth_year").unwrap(), Some(year));
    }

    #[rstest]
    #[case(1499)]
    #[case(2101)]
    #[case(-44)]
    fn year_out_of_range_is_rejected(#[case] year: i32) {
        let err = validate_year(Some(year), "birth_year").unwrap_err();
        assert_eq!(err.field, "birth_year");
    }

    #[test]
    fn absent_year_passes_through() {
        assert_eq!(validate_year(None, "birth_year").unwrap(), None);
    }

    #[test]
    fn death_year_before_birth_year_is_rejected() {
        let err = validate_death_year(Some(1940), Some(1950)).unwrap_err();
        assert_eq!(err.field, "death_year");
        assert!(validate_death_year(Some(1950), Some(1950)).is_ok());
        assert!(validate_death_year(Some(1990), None).is_ok());
        assert_eq!(validate_death_year(None, Some(1950)).unwrap(), None);
    }

    #[rstest]
    #[case("M", Gender::Male)]
    #[case("F", Gender::Female)]
    #[case("Other", Gender::Other)]
    fn known_gender_parses(#[case] raw: &str, #[case] expected: Gender) {
        assert_eq!(validate_gender(Some(raw)).unwrap(), Some(expected));
    }

    #[rstest]
    #[case(Some("m"))]
    #[case(Some("male"))]
    #[case(Some("X"))]
    fn unknown_gender_is_rejected(#[case] raw: Option<&str>) {
        assert!(validate_gender(raw).is_err());
    }

    #[test]
    fn empty_gender_passes_through() {
        assert_eq!(validate_gender(None).unwrap(), None);
        assert_eq!(validate_gender(Some("")).unwrap(), None);
    }

    #[rstest]
    #[case("1950-03-15", 1950, 3, 15)]
    #[case("2100-12-31", 2100, 12, 31)]
    fn well_formed_date_parses(
        #[case] raw: &str,
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
    ) {
        let parsed = validate_date(Some(raw), "birth_date").unwrap().unwrap();
        assert_eq!(parsed, NaiveDate::from_ymd_opt(year, month, day).unwrap());
    }

    #[rstest]
    #[case("1950-02-30")] // impossible calendar date
    #[case("1950-13-01")]
    #[case("1950/03/15")]
    #[case("15-03-1950")]
    #[case("not-a-date")]
    #[case("1950-03")]
    fn malformed_date_is_rejected(#[case] raw: &str) {
        let err = validate_date(Some(raw), "birth_date").unwrap_err();
        assert_eq!(err.field, "birth_date");
    }

    #[rstest]
    #[case("1499-12-31")]
    #[case("2101-01-01")]
    fn date_year_out_of_range_is_rejected(#[case] raw: &str) {
        assert!(validate_date(Some(raw), "birth_date").is_err());
    }

    #[test]
    fn death_date_before_birth_date_is_rejected() {
        let birth = NaiveDate::from_ymd_opt(1950, 6, 1);
        let err = validate_death_date(Some("1950-05-31"), birth, None, "death_date").unwrap_err();
        assert_eq!(err.field, "death_date");
        assert!(validate_death_date(Some("1950-06-01"), birth, None, "death_date").is_ok());
    }

    #[test]
    fn death_date_checked_against_birth_year_when_no_birth_date() {
        let err =
            validate_death_date(Some("1949-12-31"), None, Some(1950), "death_date").unwrap_err();
        assert_eq!(err.field, "death_date");
        assert!(validate_death_date(Some("1950-01-01"), None, Some(1950), "death_date").is_ok());
    }

    #[test]
    fn city_is_trimmed_and_bounded() {
        assert_eq!(
            validate_city(Some("  Boston ")).unwrap(),
            Some("Boston".to_string())
        );
        assert_eq!(validate_city(None).unwrap(), None);
        assert_eq!(validate_city(Some("")).unwrap(), None);
        assert!(validate_city(Some(&"x".repeat(101))).is_err());
    }
}
