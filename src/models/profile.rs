use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "O")]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub age: u8,
    pub gender: Gender,
}

impl Profile {
    pub fn new(name: impl Into<String>, age: u8, gender: Gender) -> Result<Self, AppError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AppError::BadRequest("name cannot be empty".to_string()));
        }

        Ok(Self {
            name: name.trim().to_string(),
            age,
            gender,
        })
    }
}

pub(crate) fn validate_password(password: &str) -> Result<(), AppError> {
    if password.is_empty() {
        return Err(AppError::BadRequest("password cannot be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Gender, Profile};

    #[test]
    fn blank_name_is_rejected() {
        assert!(Profile::new("   ", 30, Gender::Male).is_err());
    }

    #[test]
    fn gender_uses_single_letter_codes() {
        let json = serde_json::to_string(&Gender::Female).unwrap();
        assert_eq!(json, "\"F\"");
    }
}
