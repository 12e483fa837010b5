use serde::{Deserialize, Serialize};

/// Body of `POST /api/themes`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateThemeRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Body of `POST /api/forbidden-words`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddForbiddenWordRequest {
    #[serde(default)]
    pub character_id: Option<i64>,
    #[serde(default)]
    pub word: Option<String>,
}

/// Body of `POST /api/upload-character`.
///
/// `image` is a `data:` URL, raw base64 (treated as PNG) or an `http(s)` URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadCharacterRequest {
    #[serde(default)]
    pub name: Option<String>,
    /// Theme name; created if it does not exist yet.
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default, alias = "imageUrl", alias = "image_url")]
    pub image: Option<String>,
    #[serde(default)]
    pub points: Option<u32>,
}
