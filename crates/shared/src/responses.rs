//! Response bodies returned by the HTTP API.
//!
//! Every error, whatever the endpoint, is rendered as an [`ErrorResponse`].

use serde::{Deserialize, Serialize};

use charades_domain::MatchKind;

// =============================================================================
// Errors
// =============================================================================

/// Error classification codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // === Client Errors (4xx) ===
    /// Request was malformed or missing required fields
    BadRequest,
    /// Requested resource not found
    NotFound,
    /// The game has already been completed
    GameNotActive,
    /// The hint names a forbidden word of the theme
    ForbiddenWords,
    /// Operation conflicts with existing data (duplicate name, word, ...)
    Conflict,

    // === Server Errors (5xx) ===
    /// The completion service failed or answered with nothing usable
    AiUnavailable,
    /// Internal server error
    InternalError,

    /// Unknown variant for forward compatibility
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    pub code: ErrorCode,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

// =============================================================================
// Hint submission
// =============================================================================

/// Result of one hint submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HintResponse {
    /// The completion service's answer, or the resolved name when the answer
    /// had to be matched loosely.
    pub guess: String,
    pub is_correct: bool,
    pub correct_character: String,
    pub correct_character_image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guessed_character_image: Option<String>,
    pub game_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_kind: Option<MatchKind>,
    /// Points credited to the user by this submission.
    #[serde(default)]
    pub points_awarded: u32,
}

// =============================================================================
// Users and games
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: i64,
    pub username: String,
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: UserData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameCharacterData {
    pub character_id: i64,
    pub guessed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameData {
    pub id: i64,
    pub user_id: i64,
    pub theme_id: i64,
    pub status: String,
    pub characters: Vec<GameCharacterData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResponse {
    pub game: GameData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: i64,
    pub username: String,
    pub score: i64,
    /// Percentage of the user's games that were completed, two decimals.
    pub win_rate: f64,
    pub favorite_theme: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub users: Vec<LeaderboardEntry>,
}

// =============================================================================
// Catalog
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeData {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeResponse {
    pub theme: ThemeData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemesResponse {
    pub themes: Vec<ThemeData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterData {
    pub id: i64,
    pub theme_id: i64,
    pub name: String,
    pub image_url: String,
    pub points: u32,
    pub forbidden_words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterResponse {
    pub character: CharacterData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharactersResponse {
    pub characters: Vec<CharacterData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForbiddenWordData {
    pub character_id: i64,
    pub word: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForbiddenWordResponse {
    pub forbidden_word: ForbiddenWordData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_response_uses_client_field_names() {
        let response = HintResponse {
            guess: "Gandalf".to_string(),
            is_correct: true,
            correct_character: "Gandalf".to_string(),
            correct_character_image: "/uploads/gandalf.png".to_string(),
            guessed_character_image: None,
            game_completed: true,
            match_kind: Some(MatchKind::Exact),
            points_awarded: 10,
        };

        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json["isCorrect"], true);
        assert_eq!(json["correctCharacter"], "Gandalf");
        assert_eq!(json["gameCompleted"], true);
        assert_eq!(json["matchKind"], "exact");
        assert!(json.get("guessedCharacterImage").is_none());
    }

    #[test]
    fn error_codes_are_snake_case() {
        let json = serde_json::to_value(ErrorResponse::new(
            ErrorCode::GameNotActive,
            "Game is not active",
        ))
        .expect("serialize");
        assert_eq!(json["code"], "game_not_active");
        assert_eq!(json["error"], "Game is not active");
    }

    #[test]
    fn unknown_error_codes_deserialize() {
        let parsed: ErrorResponse =
            serde_json::from_str(r#"{"error":"x","code":"rate_limited"}"#).expect("parse");
        assert_eq!(parsed.code, ErrorCode::Unknown);
    }
}
