//! Core record types for charstore.
//!
//! This module defines the character record stored in the data file, the
//! closed gender enumeration, and the input types accepted by the store's
//! `create` and `update` operations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Gender of a character.
///
/// A closed set; anything the data file holds outside of it reads as
/// [`Gender::Unknown`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Unknown, and the fallback for unrecognized values.
    #[default]
    Unknown,
    /// Genderless.
    Genderless,
}

impl Gender {
    /// Every gender, in declaration order.
    pub const ALL: [Gender; 4] = [Self::Male, Self::Female, Self::Unknown, Self::Genderless];

    /// Map a raw field value to a gender.
    ///
    /// Total and case-insensitive: blank or unrecognized input yields
    /// [`Gender::Unknown`].
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "male" => Self::Male,
            "female" => Self::Female,
            "genderless" => Self::Genderless,
            _ => Self::Unknown,
        }
    }

    /// Upper-case name, as shown to users (`MALE`, `GENDERLESS`).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
            Self::Unknown => "UNKNOWN",
            Self::Genderless => "GENDERLESS",
        }
    }

    /// Title-case name, as written to the data file (`Male`, `Genderless`).
    #[must_use]
    pub fn title_case(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Unknown => "Unknown",
            Self::Genderless => "Genderless",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strict parsing for user input.
///
/// Unlike [`Gender::normalize`], an unrecognized value is an error so a
/// driver can reject it instead of silently storing `UNKNOWN`.
impl FromStr for Gender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "unknown" => Ok(Self::Unknown),
            "genderless" => Ok(Self::Genderless),
            other => Err(Error::invalid_input(
                "gender",
                format!("'{other}' is not one of MALE, FEMALE, UNKNOWN, GENDERLESS"),
            )),
        }
    }
}

/// Reject values that would split a record across lines of the data file.
fn check_single_line(field: &'static str, value: &str) -> Result<(), Error> {
    if value.contains(&['\n', '\r'][..]) {
        return Err(Error::invalid_input(field, "must not contain line breaks"));
    }
    Ok(())
}

/// A character record, one line of the data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Store-assigned identifier, unique within the file.
    pub id: u32,
    /// Character name.
    pub name: String,
    /// Life status (`Alive`, `Dead`, `unknown`, ...).
    pub status: String,
    /// Species (`Human`, `Alien`, ...).
    pub species: String,
    /// Sub-type; often empty.
    #[serde(rename = "type")]
    pub kind: String,
    /// Gender.
    pub gender: Gender,
    /// Name of the place of origin.
    pub origin_name: String,
    /// Name of the last known location.
    pub location_name: String,
    /// Creation timestamp as stored; may be empty.
    pub created: String,
}

impl Character {
    /// Build a record from creation input, an assigned id and a timestamp.
    #[must_use]
    pub fn from_new(id: u32, new: NewCharacter, created: String) -> Self {
        Self {
            id,
            name: new.name,
            status: new.status,
            species: new.species,
            kind: new.kind,
            gender: new.gender,
            origin_name: new.origin_name,
            location_name: new.location_name,
            created,
        }
    }

    /// Apply a changeset in place. Returns `true` if any field was supplied.
    pub fn apply(&mut self, changes: CharacterChanges) -> bool {
        let touched = !changes.is_empty();
        let CharacterChanges {
            name,
            status,
            species,
            kind,
            gender,
            origin_name,
            location_name,
        } = changes;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(species) = species {
            self.species = species;
        }
        if let Some(kind) = kind {
            self.kind = kind;
        }
        if let Some(gender) = gender {
            self.gender = gender;
        }
        if let Some(origin_name) = origin_name {
            self.origin_name = origin_name;
        }
        if let Some(location_name) = location_name {
            self.location_name = location_name;
        }
        touched
    }
}

/// User-supplied fields for a new record.
///
/// `id` and `created` are assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCharacter {
    /// Character name.
    pub name: String,
    /// Life status.
    pub status: String,
    /// Species.
    pub species: String,
    /// Sub-type; may be empty.
    pub kind: String,
    /// Gender.
    pub gender: Gender,
    /// Place of origin.
    pub origin_name: String,
    /// Last known location.
    pub location_name: String,
}

impl NewCharacter {
    /// Start a new record with just a name; other fields default to empty
    /// and gender to [`Gender::Unknown`].
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Check that every field can be stored on a single line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] naming the first field that holds a
    /// `\n` or `\r`.
    pub fn validate(&self) -> Result<(), Error> {
        check_single_line("name", &self.name)?;
        check_single_line("status", &self.status)?;
        check_single_line("species", &self.species)?;
        check_single_line("type", &self.kind)?;
        check_single_line("origin", &self.origin_name)?;
        check_single_line("location", &self.location_name)
    }
}

/// A partial update to a record.
///
/// `None` leaves a field untouched; `Some(String::new())` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterChanges {
    /// New name.
    pub name: Option<String>,
    /// New status.
    pub status: Option<String>,
    /// New species.
    pub species: Option<String>,
    /// New sub-type.
    pub kind: Option<String>,
    /// New gender.
    pub gender: Option<Gender>,
    /// New place of origin.
    pub origin_name: Option<String>,
    /// New last known location.
    pub location_name: Option<String>,
}

impl CharacterChanges {
    /// Check if no field is supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.status.is_none()
            && self.species.is_none()
            && self.kind.is_none()
            && self.gender.is_none()
            && self.origin_name.is_none()
            && self.location_name.is_none()
    }

    /// Check that every supplied value can be stored on a single line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] naming the first field that holds a
    /// `\n` or `\r`.
    pub fn validate(&self) -> Result<(), Error> {
        let fields = [
            ("name", &self.name),
            ("status", &self.status),
            ("species", &self.species),
            ("type", &self.kind),
            ("origin", &self.origin_name),
            ("location", &self.location_name),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                check_single_line(field, value)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rick() -> Character {
        Character {
            id: 1,
            name: "Rick Sanchez".to_string(),
            status: "Alive".to_string(),
            species: "Human".to_string(),
            kind: String::new(),
            gender: Gender::Male,
            origin_name: "Earth (C-137)".to_string(),
            location_name: "Citadel of Ricks".to_string(),
            created: "2017-11-04T18:48:46.250Z".to_string(),
        }
    }

    #[test]
    fn test_normalize_known_values() {
        assert_eq!(Gender::normalize("Male"), Gender::Male);
        assert_eq!(Gender::normalize("FEMALE"), Gender::Female);
        assert_eq!(Gender::normalize("  genderless "), Gender::Genderless);
    }

    #[test]
    fn test_normalize_falls_back_to_unknown() {
        assert_eq!(Gender::normalize(""), Gender::Unknown);
        assert_eq!(Gender::normalize("   "), Gender::Unknown);
        assert_eq!(Gender::normalize("xyz"), Gender::Unknown);
        assert_eq!(Gender::normalize("unknown"), Gender::Unknown);
    }

    #[test]
    fn test_normalize_accepts_its_own_renderings() {
        for gender in Gender::ALL {
            assert_eq!(Gender::normalize(gender.name()), gender);
            assert_eq!(Gender::normalize(gender.title_case()), gender);
        }
    }

    #[test]
    fn test_from_str_is_strict() {
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("UNKNOWN".parse::<Gender>().unwrap(), Gender::Unknown);

        let err = "robot".parse::<Gender>().unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("robot"));
        assert!("".parse::<Gender>().is_err());
    }

    #[test]
    fn test_gender_display_and_title_case() {
        assert_eq!(Gender::Genderless.to_string(), "GENDERLESS");
        assert_eq!(Gender::Genderless.title_case(), "Genderless");
        assert_eq!(Gender::default(), Gender::Unknown);
    }

    #[test]
    fn test_apply_empty_changes_is_noop() {
        let mut character = rick();
        let touched = character.apply(CharacterChanges::default());
        assert!(!touched);
        assert_eq!(character, rick());
    }

    #[test]
    fn test_apply_empty_string_clears_field() {
        let mut character = rick();
        character.apply(CharacterChanges {
            status: Some(String::new()),
            ..CharacterChanges::default()
        });
        assert_eq!(character.status, "");
        assert_eq!(character.name, "Rick Sanchez");
    }

    #[test]
    fn test_apply_sets_supplied_fields_only() {
        let mut character = rick();
        let touched = character.apply(CharacterChanges {
            name: Some("Doofus Rick".to_string()),
            gender: Some(Gender::Unknown),
            ..CharacterChanges::default()
        });
        assert!(touched);
        assert_eq!(character.name, "Doofus Rick");
        assert_eq!(character.gender, Gender::Unknown);
        assert_eq!(character.species, "Human");
        assert_eq!(character.id, 1);
        assert_eq!(character.created, "2017-11-04T18:48:46.250Z");
    }

    #[test]
    fn test_new_character_validate() {
        assert!(NewCharacter::named("Mr. Meeseeks").validate().is_ok());
        assert!(NewCharacter::named("").validate().is_ok());

        let err = NewCharacter {
            species: "Cro\nnenberg".to_string(),
            ..NewCharacter::named("Morty")
        }
        .validate()
        .unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("species"));
    }

    #[test]
    fn test_changes_validate_checks_supplied_values_only() {
        assert!(CharacterChanges::default().validate().is_ok());
        assert!(CharacterChanges {
            kind: Some(String::new()),
            ..CharacterChanges::default()
        }
        .validate()
        .is_ok());

        let err = CharacterChanges {
            origin_name: Some("Earth\r\n".to_string()),
            ..CharacterChanges::default()
        }
        .validate()
        .unwrap_err();
        assert!(err.to_string().contains("origin"));
    }

    #[test]
    fn test_from_new() {
        let mut new = NewCharacter::named("Morty Smith");
        new.gender = Gender::Male;
        let character = Character::from_new(2, new, "2026-01-01T00:00:00.000Z".to_string());
        assert_eq!(character.id, 2);
        assert_eq!(character.name, "Morty Smith");
        assert_eq!(character.gender, Gender::Male);
        assert_eq!(character.kind, "");
    }

    #[test]
    fn test_character_serialization() {
        let json = serde_json::to_string(&rick()).unwrap();
        assert!(json.contains("\"type\":\"\""));
        assert!(json.contains("\"gender\":\"MALE\""));

        let back: Character = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rick());
    }
}
