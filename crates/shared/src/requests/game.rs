use serde::{Deserialize, Serialize};

/// Body of `POST /api/give-hint`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitHintRequest {
    #[serde(default)]
    pub game_id: Option<i64>,
    #[serde(default)]
    pub hint: Option<String>,
}

/// Body of `POST /api/start-game`.
///
/// Without `characterId` every character of the theme must be guessed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartGameRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub theme_id: Option<i64>,
    #[serde(default)]
    pub character_id: Option<i64>,
}

/// Body of `POST /api/save-username`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveUsernameRequest {
    #[serde(default)]
    pub username: Option<String>,
}
