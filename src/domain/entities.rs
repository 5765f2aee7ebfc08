//! Domain entities: core data structures

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of a person, assigned sequentially starting at 1.
pub type PersonId = u32;

/// Gender, serialized as "M" / "F" / "Other".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    Other,
}

impl Gender {
    pub const VALID: [&'static str; 3] = ["M", "F", "Other"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Gender::Male),
            "F" => Ok(Gender::Female),
            "Other" => Ok(Gender::Other),
            _ => Err(()),
        }
    }
}

/// A person in the family tree.
///
/// Relationship edges are stored as ID lists on both ends: a parent-child
/// edge appears in the parent's `child_ids` and the child's `parent_ids`,
/// a spouse edge in both spouses' `spouse_ids`. Lists are deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    #[serde(default)]
    pub birth_year: Option<i32>,
    #[serde(default)]
    pub death_year: Option<i32>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub death_date: Option<NaiveDate>,
    #[serde(default)]
    pub birth_city: Option<String>,
    #[serde(default)]
    pub parent_ids: Vec<PersonId>,
    #[serde(default)]
    pub spouse_ids: Vec<PersonId>,
    #[serde(default)]
    pub child_ids: Vec<PersonId>,
}

impl Person {
    /// Birth display value: full date when present, else the year.
    pub fn born(&self) -> Option<String> {
        match (self.birth_date, self.birth_year) {
            (Some(date), _) => Some(date.to_string()),
            (None, Some(year)) => Some(year.to_string()),
            (None, None) => None,
        }
    }

    /// Death display value: full date when present, else the year.
    pub fn died(&self) -> Option<String> {
        match (self.death_date, self.death_year) {
            (Some(date), _) => Some(date.to_string()),
            (None, Some(year)) => Some(year.to_string()),
            (None, None) => None,
        }
    }
}

impl fmt::Display for Person {
    /// One-line summary: "Ada Lovelace (1815-1852) [F] from London"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(born) = self.born() {
            let died = self.died().unwrap_or_else(|| "present".to_string());
            write!(f, " ({}-{})", born, died)?;
        }
        if let Some(gender) = self.gender {
            write!(f, " [{}]", gender)?;
        }
        if let Some(city) = &self.birth_city {
            write!(f, " from {}", city)?;
        }
        Ok(())
    }
}

/// Raw field input for creating a person. Validated by `FamilyTree::create_person`.
#[derive(Debug, Clone, Default)]
pub struct PersonDraft {
    pub name: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    pub gender: Option<String>,
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    pub birth_city: Option<String>,
}

/// Raw field input for a partial update.
///
/// `None` leaves the field untouched. For the string-valued fields an empty
/// string clears the stored value; years cannot be cleared once set.
#[derive(Debug, Clone, Default)]
pub struct PersonUpdate {
    pub name: Option<String>,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    pub gender: Option<String>,
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    pub birth_city: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_years_and_gender() {
        let person = Person {
            id: 1,
            name: "John".to_string(),
            birth_year: Some(1950),
            death_year: None,
            gender: Some(Gender::Male),
            birth_date: None,
            death_date: None,
            birth_city: Some("Boston".to_string()),
            parent_ids: vec![],
            spouse_ids: vec![],
            child_ids: vec![],
        };
        assert_eq!(person.to_string(), "John (1950-present) [M] from Boston");
    }

    #[test]
    fn display_prefers_full_dates() {
        let person = Person {
            id: 2,
            name: "Ada".to_string(),
            birth_year: Some(1815),
            death_year: Some(1852),
            gender: None,
            birth_date: NaiveDate::from_ymd_opt(1815, 12, 10),
            death_date: NaiveDate::from_ymd_opt(1852, 11, 27),
            birth_city: None,
            parent_ids: vec![],
            spouse_ids: vec![],
            child_ids: vec![],
        };
        assert_eq!(person.to_string(), "Ada (1815-12-10-1852-11-27)");
    }

    #[test]
    fn gender_round_trips_through_str() {
        for raw in Gender::VALID {
            let parsed: Gender = raw.parse().unwrap();
            assert_eq!(parsed.to_string(), raw);
        }
        assert!("X".parse::<Gender>().is_err());
    }
}
