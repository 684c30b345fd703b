//! Dog record model.
//!
//! # Responsibility
//! - Define the insert payload (`NewDog`) and the stored record (`DogRecord`).
//! - Own the ordered column schema used to read records back from storage.
//!
//! # Invariants
//! - `id` is assigned by the store on insert and never changes.
//! - `DOG_COLUMNS` order is the serialized field order of `DogRecord`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned record identifier.
pub type DogId = i64;

/// Ordered field schema of a stored dog record.
pub const DOG_COLUMNS: [&str; 7] = ["id", "name", "race", "color", "photo", "number", "illnesses"];

/// Payload accepted when registering a new dog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDog {
    pub name: String,
    pub race: String,
    pub color: String,
    /// Filename or URL of the dog's photo.
    pub photo: String,
    /// Contact or tag number.
    pub number: String,
    /// Free-form health notes; may say "none".
    pub illnesses: String,
}

/// Dog record as persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DogRecord {
    pub id: DogId,
    pub name: String,
    pub race: String,
    pub color: String,
    pub photo: String,
    pub number: String,
    pub illnesses: String,
}

/// Validation failure for a `NewDog` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DogValidationError {
    /// A required text field is empty or whitespace only.
    BlankField(&'static str),
}

impl Display for DogValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "field `{field}` must not be blank"),
        }
    }
}

impl Error for DogValidationError {}

impl NewDog {
    /// Checks that every required field carries text.
    ///
    /// `illnesses` is free-form and may be empty.
    pub fn validate(&self) -> Result<(), DogValidationError> {
        let required = [
            ("name", &self.name),
            ("race", &self.race),
            ("color", &self.color),
            ("photo", &self.photo),
            ("number", &self.number),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DogValidationError::BlankField(field));
            }
        }
        Ok(())
    }

    /// Builds the stored shape once the store has assigned an id.
    pub fn into_record(self, id: DogId) -> DogRecord {
        DogRecord {
            id,
            name: self.name,
            race: self.race,
            color: self.color,
            photo: self.photo,
            number: self.number,
            illnesses: self.illnesses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DogValidationError, NewDog, DOG_COLUMNS};

    fn rex() -> NewDog {
        NewDog {
            name: "Rex".to_string(),
            race: "Owczarek Niemiecki".to_string(),
            color: "Czarno-Brązowy".to_string(),
            photo: "rex.jpg".to_string(),
            number: "456".to_string(),
            illnesses: "Brak".to_string(),
        }
    }

    #[test]
    fn validate_accepts_complete_payload() {
        assert!(rex().validate().is_ok());
    }

    #[test]
    fn validate_allows_empty_illnesses() {
        let mut dog = rex();
        dog.illnesses = String::new();
        assert!(dog.validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_required_field() {
        let mut dog = rex();
        dog.race = "   ".to_string();
        assert_eq!(
            dog.validate().unwrap_err(),
            DogValidationError::BlankField("race")
        );
    }

    #[test]
    fn record_serializes_fields_in_column_order() {
        let record = rex().into_record(7);
        let json = serde_json::to_string(&record).unwrap();

        let mut last = 0;
        for column in DOG_COLUMNS {
            let pos = json.find(&format!("\"{column}\"")).unwrap();
            assert!(pos >= last, "{column} out of order in {json}");
            last = pos;
        }
    }
}
