//! Validated name newtypes for domain entities
//!
//! These newtypes ensure that names are valid by construction:
//! - Non-empty
//! - Within length limits
//! - Trimmed of leading/trailing whitespace

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for name fields
const MAX_NAME_LENGTH: usize = 200;

/// Maximum length for a forbidden word or phrase
const MAX_FORBIDDEN_WORD_LENGTH: usize = 100;

macro_rules! define_name {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// # Errors
            ///
            /// Returns `DomainError::Validation` if the trimmed value is empty
            /// or longer than 200 characters.
            pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
                let name = name.into();
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::validation(concat!($label, " cannot be empty")));
                }
                if trimmed.chars().count() > MAX_NAME_LENGTH {
                    return Err(DomainError::validation(format!(
                        "{} cannot exceed {} characters",
                        $label, MAX_NAME_LENGTH
                    )));
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Returns the name as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(name: $name) -> String {
                name.0
            }
        }
    };
}

define_name!(
    /// A validated theme name (unique across the catalog).
    ThemeName,
    "Theme name"
);
define_name!(
    /// A validated character name.
    CharacterName,
    "Character name"
);
define_name!(
    /// A validated username. Identity is first-seen-wins on this value.
    Username,
    "Username"
);

/// A forbidden word or phrase, stored trimmed and lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ForbiddenWordText(String);

impl ForbiddenWordText {
    pub fn new(word: impl Into<String>) -> Result<Self, DomainError> {
        let word = word.into();
        let normalized = word.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(DomainError::validation("Forbidden word cannot be empty"));
        }
        if normalized.chars().count() > MAX_FORBIDDEN_WORD_LENGTH {
            return Err(DomainError::validation(format!(
                "Forbidden word cannot exceed {} characters",
                MAX_FORBIDDEN_WORD_LENGTH
            )));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ForbiddenWordText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ForbiddenWordText {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ForbiddenWordText> for String {
    fn from(word: ForbiddenWordText) -> String {
        word.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_trimmed() {
        let name = ThemeName::new("  Lord of the Rings ").expect("valid");
        assert_eq!(name.as_str(), "Lord of the Rings");
    }

    #[test]
    fn empty_names_are_rejected() {
        assert!(Username::new("   ").is_err());
        assert!(CharacterName::new("").is_err());
    }

    #[test]
    fn overlong_names_are_rejected() {
        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(CharacterName::new(long).is_err());
    }

    #[test]
    fn forbidden_words_are_lowercased_and_trimmed() {
        let word = ForbiddenWordText::new("  CaPe ").expect("valid");
        assert_eq!(word.as_str(), "cape");
    }

    #[test]
    fn deserialization_validates() {
        let result: Result<Username, _> = serde_json::from_str("\"  \"");
        assert!(result.is_err());

        let word: ForbiddenWordText = serde_json::from_str("\"Wand\"").expect("valid");
        assert_eq!(word.as_str(), "wand");
    }
}
