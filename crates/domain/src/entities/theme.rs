//! Theme entity - a named group of characters a game is played over

use serde::{Deserialize, Serialize};

use crate::{ThemeId, ThemeName};

/// A theme in the catalog. Deleting a theme cascades to its characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: ThemeId,
    pub name: String,
    pub image_url: Option<String>,
}

/// Listing row: a theme plus how many characters it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSummary {
    pub theme: Theme,
    pub character_count: u32,
}

/// Insert payload for a theme; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTheme {
    pub name: ThemeName,
    pub image_url: Option<String>,
}

impl NewTheme {
    pub fn new(name: ThemeName) -> Self {
        Self {
            name,
            image_url: None,
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        let image_url = image_url.into();
        self.image_url = if image_url.trim().is_empty() {
            None
        } else {
            Some(image_url)
        };
        self
    }
}
