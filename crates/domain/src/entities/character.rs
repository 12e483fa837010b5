//! Character entity - a guessable figure belonging to one theme
//!
//! Characters own their forbidden words. Deleting a character cascades to its
//! forbidden words and to any game progress rows that reference it.

use serde::{Deserialize, Serialize};

use crate::{CharacterId, CharacterName, ForbiddenWordText, ThemeId};

/// Points awarded for a character when none are configured.
pub const DEFAULT_CHARACTER_POINTS: u32 = 10;

/// A character in the catalog, with its forbidden vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: CharacterId,
    pub theme_id: ThemeId,
    pub name: String,
    pub image_url: String,
    pub points: u32,
    #[serde(default)]
    pub forbidden_words: Vec<ForbiddenWordText>,
}

impl Character {
    pub fn new(
        id: CharacterId,
        theme_id: ThemeId,
        name: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            theme_id,
            name: name.into(),
            image_url: image_url.into(),
            points: DEFAULT_CHARACTER_POINTS,
            forbidden_words: Vec::new(),
        }
    }

    pub fn with_points(mut self, points: u32) -> Self {
        self.points = points;
        self
    }

    pub fn with_forbidden_word(mut self, word: ForbiddenWordText) -> Self {
        if !self.forbidden_words.contains(&word) {
            self.forbidden_words.push(word);
        }
        self
    }
}

/// Insert payload for a character; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCharacter {
    pub theme_id: ThemeId,
    pub name: CharacterName,
    pub image_url: String,
    pub points: u32,
}

impl NewCharacter {
    pub fn new(theme_id: ThemeId, name: CharacterName, image_url: impl Into<String>) -> Self {
        Self {
            theme_id,
            name,
            image_url: image_url.into(),
            points: DEFAULT_CHARACTER_POINTS,
        }
    }

    pub fn with_points(mut self, points: u32) -> Self {
        self.points = points;
        self
    }
}

/// A (character, word) pair. Unique per character, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForbiddenWord {
    pub character_id: CharacterId,
    pub word: ForbiddenWordText,
}

impl ForbiddenWord {
    pub fn new(character_id: CharacterId, word: ForbiddenWordText) -> Self {
        Self { character_id, word }
    }
}
