//! Upload character use case.
//!
//! Accepts an image as a `data:` URL, raw base64 (taken as PNG) or an
//! `http(s)` URL. Inline images go to the blob store; remote URLs are stored
//! as the character's image reference unchanged. The theme is created on
//! first use.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use charades_domain::{Character, CharacterName, NewCharacter, ThemeName, DEFAULT_CHARACTER_POINTS};
use uuid::Uuid;

use super::CatalogError;
use crate::infrastructure::ports::{BlobStorePort, CatalogRepo};

/// Where a character image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Remote(String),
    Inline {
        bytes: Vec<u8>,
        content_type: String,
        extension: String,
    },
}

/// Classify and decode an image payload.
pub fn parse_image(data: &str) -> Result<ImageSource, CatalogError> {
    let data = data.trim();
    if data.is_empty() {
        return Err(CatalogError::MissingFields("Image data is required"));
    }

    if data.starts_with("http://") || data.starts_with("https://") {
        return Ok(ImageSource::Remote(data.to_string()));
    }

    if let Some(rest) = data.strip_prefix("data:") {
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| CatalogError::InvalidImage("data URL has no payload".to_string()))?;
        let content_type = header.split(';').next().unwrap_or_default().trim();
        let extension = raster_extension(content_type).ok_or_else(|| {
            CatalogError::InvalidImage(format!("unsupported content type '{}'", content_type))
        })?;
        return Ok(ImageSource::Inline {
            bytes: decode_base64(payload)?,
            content_type: content_type.to_ascii_lowercase(),
            extension: extension.to_string(),
        });
    }

    Ok(ImageSource::Inline {
        bytes: decode_base64(data)?,
        content_type: "image/png".to_string(),
        extension: "png".to_string(),
    })
}

/// File extension for the raster types we store and serve. Anything that can
/// carry script (SVG, HTML) is refused.
fn raster_extension(content_type: &str) -> Option<&'static str> {
    match content_type.to_ascii_lowercase().as_str() {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

fn decode_base64(payload: &str) -> Result<Vec<u8>, CatalogError> {
    let bytes = BASE64
        .decode(payload.trim())
        .map_err(|e| CatalogError::InvalidImage(format!("invalid base64 image data: {}", e)))?;
    if bytes.is_empty() {
        return Err(CatalogError::InvalidImage("image is empty".to_string()));
    }
    Ok(bytes)
}

pub struct UploadCharacter {
    catalog: Arc<dyn CatalogRepo>,
    blobs: Arc<dyn BlobStorePort>,
}

impl UploadCharacter {
    pub fn new(catalog: Arc<dyn CatalogRepo>, blobs: Arc<dyn BlobStorePort>) -> Self {
        Self { catalog, blobs }
    }

    pub async fn execute(
        &self,
        name: &str,
        theme: &str,
        image: &str,
        points: Option<u32>,
    ) -> Result<Character, CatalogError> {
        let name = CharacterName::new(name)?;
        let theme_name = ThemeName::new(theme)?;
        let source = parse_image(image)?;

        let theme = self.catalog.upsert_theme_by_name(&theme_name).await?;

        let (image_url, stored_key) = match source {
            ImageSource::Remote(url) => (url, None),
            ImageSource::Inline {
                bytes,
                content_type,
                extension,
            } => {
                let key = format!("character-{}.{}", Uuid::new_v4(), extension);
                let url = self.blobs.put(&key, bytes, &content_type).await?;
                (url, Some(key))
            }
        };

        let created = self
            .catalog
            .create_character(
                &NewCharacter::new(theme.id, name, image_url)
                    .with_points(points.unwrap_or(DEFAULT_CHARACTER_POINTS)),
            )
            .await;
        let character = match created {
            Ok(character) => character,
            Err(e) => {
                if let Some(key) = stored_key {
                    if let Err(cleanup) = self.blobs.delete(&key).await {
                        tracing::warn!(key = %key, error = %cleanup, "Failed to remove orphaned image");
                    }
                }
                return Err(e.into());
            }
        };

        tracing::info!(
            character_id = %character.id,
            theme_id = %theme.id,
            name = %character.name,
            "Character uploaded"
        );
        Ok(character)
    }
}
