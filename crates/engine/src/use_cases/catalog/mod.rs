//! Catalog use cases: themes, characters, forbidden words and uploads.

use std::sync::Arc;

mod characters;
mod themes;
mod upload;

pub use characters::CharacterOps;
pub use themes::ThemeOps;
pub use upload::{parse_image, ImageSource, UploadCharacter};

use charades_domain::{CharacterId, DomainError, ThemeId};

use crate::infrastructure::ports::{BlobError, RepoError};

/// Container for catalog use cases.
pub struct CatalogUseCases {
    pub themes: Arc<ThemeOps>,
    pub characters: Arc<CharacterOps>,
    pub upload: Arc<UploadCharacter>,
}

impl CatalogUseCases {
    pub fn new(
        themes: Arc<ThemeOps>,
        characters: Arc<CharacterOps>,
        upload: Arc<UploadCharacter>,
    ) -> Self {
        Self {
            themes,
            characters,
            upload,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("{0}")]
    MissingFields(&'static str),
    #[error("Invalid image: {0}")]
    InvalidImage(String),
    #[error("Theme not found: {0}")]
    ThemeNotFound(ThemeId),
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),
    #[error("Theme already exists: {0}")]
    DuplicateTheme(String),
    #[error("Forbidden word already exists: {0}")]
    DuplicateForbiddenWord(String),
    #[error("Blob storage error: {0}")]
    Blob(#[from] BlobError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
