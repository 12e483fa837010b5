//! HTTP routes.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        DefaultBodyLimit, Path, Query, State,
    },
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;

use charades_domain::{Character, CharacterId, Game, GameId, Theme, ThemeId, ThemeSummary, User};
use charades_shared::{
    AddForbiddenWordRequest, CharacterData, CharacterResponse, CharactersResponse,
    CreateThemeRequest, ForbiddenWordData, ForbiddenWordResponse, GameCharacterData, GameData,
    GameResponse, HintResponse, LeaderboardEntry, LeaderboardResponse, SaveUsernameRequest,
    StartGameRequest, SubmitHintRequest, SuccessResponse, ThemeData, ThemeResponse,
    ThemesResponse, UploadCharacterRequest, UserData, UserResponse,
};

use super::error::ApiError;
use crate::app::App;
use crate::use_cases::hint::HintError;

/// Uploads carry base64 images, well above axum's 2 MB default.
const UPLOAD_BODY_LIMIT: usize = 16 * 1024 * 1024;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/give-hint", post(give_hint))
        .route("/api/start-game", post(start_game))
        .route("/api/save-username", post(save_username))
        .route("/api/random-character", get(random_character))
        .route("/api/leaderboard", get(leaderboard))
        .route("/api/themes", get(list_themes).post(create_theme))
        .route("/api/themes/{id}", delete(delete_theme))
        .route("/api/characters", get(list_characters))
        .route("/api/characters/{id}", delete(delete_character))
        .route("/api/forbidden-words", post(add_forbidden_word))
        .route(
            "/api/forbidden-words/{character_id}/{word}",
            delete(remove_forbidden_word),
        )
        .route(
            "/api/upload-character",
            post(upload_character).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Play
// =============================================================================

async fn give_hint(
    State(app): State<Arc<App>>,
    payload: Result<Json<SubmitHintRequest>, JsonRejection>,
) -> Result<Json<HintResponse>, ApiError> {
    let Json(body) = payload?;
    let (Some(game_id), Some(hint)) = (body.game_id, body.hint) else {
        return Err(HintError::MissingFields.into());
    };

    let outcome = app
        .use_cases
        .hint
        .submit
        .execute(GameId::from_i64(game_id), &hint)
        .await?;

    Ok(Json(HintResponse {
        guess: outcome.guess,
        is_correct: outcome.is_correct,
        correct_character: outcome.target.name,
        correct_character_image: outcome.target.image_url,
        guessed_character_image: outcome.guessed_character.map(|c| c.image_url),
        game_completed: outcome.game_completed,
        match_kind: outcome.match_kind,
        points_awarded: outcome.points_awarded,
    }))
}

async fn start_game(
    State(app): State<Arc<App>>,
    payload: Result<Json<StartGameRequest>, JsonRejection>,
) -> Result<Json<GameResponse>, ApiError> {
    let Json(body) = payload?;
    let (Some(username), Some(theme_id)) = (body.username, body.theme_id) else {
        return Err(ApiError::bad_request("username and themeId are required"));
    };

    let game = app
        .use_cases
        .session
        .start_game
        .execute(
            &username,
            ThemeId::from_i64(theme_id),
            body.character_id.map(CharacterId::from_i64),
        )
        .await?;

    Ok(Json(GameResponse {
        game: game_data(game),
    }))
}

async fn save_username(
    State(app): State<Arc<App>>,
    payload: Result<Json<SaveUsernameRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let Json(body) = payload?;
    let user = app
        .use_cases
        .session
        .register_user
        .execute(body.username.as_deref().unwrap_or_default())
        .await?;
    Ok(Json(UserResponse {
        user: user_data(user),
    }))
}

#[derive(Debug, Deserialize)]
struct RandomCharacterQuery {
    #[serde(rename = "themeId")]
    theme_id: Option<String>,
}

async fn random_character(
    State(app): State<Arc<App>>,
    query: Result<Query<RandomCharacterQuery>, QueryRejection>,
) -> Result<Json<CharacterResponse>, ApiError> {
    let Query(query) = query?;
    let theme_id = query
        .theme_id
        .ok_or_else(|| ApiError::bad_request("themeId is required"))?
        .parse::<ThemeId>()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let character = app
        .use_cases
        .session
        .random_character
        .execute(theme_id)
        .await?;
    Ok(Json(CharacterResponse {
        character: character_data(character),
    }))
}

async fn leaderboard(State(app): State<Arc<App>>) -> Result<Json<LeaderboardResponse>, ApiError> {
    let standings = app.use_cases.leaderboard.execute().await?;
    let users = standings
        .into_iter()
        .map(|s| LeaderboardEntry {
            id: s.user.id.as_i64(),
            username: s.user.username,
            score: s.user.score,
            win_rate: s.win_rate,
            favorite_theme: s.favorite_theme,
        })
        .collect();
    Ok(Json(LeaderboardResponse { users }))
}

// =============================================================================
// Catalog
// =============================================================================

async fn list_themes(State(app): State<Arc<App>>) -> Result<Json<ThemesResponse>, ApiError> {
    let themes = app.use_cases.catalog.themes.list().await?;
    Ok(Json(ThemesResponse {
        themes: themes.into_iter().map(theme_summary_data).collect(),
    }))
}

async fn create_theme(
    State(app): State<Arc<App>>,
    payload: Result<Json<CreateThemeRequest>, JsonRejection>,
) -> Result<Json<ThemeResponse>, ApiError> {
    let Json(body) = payload?;
    let theme = app
        .use_cases
        .catalog
        .themes
        .create(
            body.name.as_deref().unwrap_or_default(),
            body.image_url.as_deref(),
        )
        .await?;
    Ok(Json(ThemeResponse {
        theme: theme_data(theme, None),
    }))
}

async fn delete_theme(
    State(app): State<Arc<App>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Path(id) = id?;
    app.use_cases
        .catalog
        .themes
        .delete(ThemeId::from_i64(id))
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

async fn list_characters(
    State(app): State<Arc<App>>,
) -> Result<Json<CharactersResponse>, ApiError> {
    let characters = app.use_cases.catalog.characters.list().await?;
    Ok(Json(CharactersResponse {
        characters: characters.into_iter().map(character_data).collect(),
    }))
}

async fn delete_character(
    State(app): State<Arc<App>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Path(id) = id?;
    app.use_cases
        .catalog
        .characters
        .delete(CharacterId::from_i64(id))
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

async fn add_forbidden_word(
    State(app): State<Arc<App>>,
    payload: Result<Json<AddForbiddenWordRequest>, JsonRejection>,
) -> Result<Json<ForbiddenWordResponse>, ApiError> {
    let Json(body) = payload?;
    let (Some(character_id), Some(word)) = (body.character_id, body.word) else {
        return Err(ApiError::bad_request("characterId and word are required"));
    };

    let entry = app
        .use_cases
        .catalog
        .characters
        .add_forbidden_word(CharacterId::from_i64(character_id), &word)
        .await?;
    Ok(Json(ForbiddenWordResponse {
        forbidden_word: ForbiddenWordData {
            character_id: entry.character_id.as_i64(),
            word: entry.word.to_string(),
        },
    }))
}

async fn remove_forbidden_word(
    State(app): State<Arc<App>>,
    path: Result<Path<(i64, String)>, PathRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Path((character_id, word)) = path?;
    app.use_cases
        .catalog
        .characters
        .remove_forbidden_word(CharacterId::from_i64(character_id), &word)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

async fn upload_character(
    State(app): State<Arc<App>>,
    payload: Result<Json<UploadCharacterRequest>, JsonRejection>,
) -> Result<Json<CharacterResponse>, ApiError> {
    let Json(body) = payload?;
    let (Some(name), Some(theme), Some(image)) = (body.name, body.theme, body.image) else {
        return Err(ApiError::bad_request("name, theme and image are required"));
    };

    let character = app
        .use_cases
        .catalog
        .upload
        .execute(&name, &theme, &image, body.points)
        .await?;
    Ok(Json(CharacterResponse {
        character: character_data(character),
    }))
}

// =============================================================================
// Wire conversions
// =============================================================================

fn user_data(user: User) -> UserData {
    UserData {
        id: user.id.as_i64(),
        username: user.username,
        score: user.score,
    }
}

fn game_data(game: Game) -> GameData {
    GameData {
        id: game.id.as_i64(),
        user_id: game.user_id.as_i64(),
        theme_id: game.theme_id.as_i64(),
        status: game.status.as_str().to_string(),
        characters: game
            .progress
            .into_iter()
            .map(|p| GameCharacterData {
                character_id: p.character_id.as_i64(),
                guessed: p.guessed,
            })
            .collect(),
    }
}

fn theme_data(theme: Theme, character_count: Option<u32>) -> ThemeData {
    ThemeData {
        id: theme.id.as_i64(),
        name: theme.name,
        image_url: theme.image_url,
        character_count,
    }
}

fn theme_summary_data(summary: ThemeSummary) -> ThemeData {
    theme_data(summary.theme, Some(summary.character_count))
}

fn character_data(character: Character) -> CharacterData {
    CharacterData {
        id: character.id.as_i64(),
        theme_id: character.theme_id.as_i64(),
        name: character.name,
        image_url: character.image_url,
        points: character.points,
        forbidden_words: character
            .forbidden_words
            .into_iter()
            .map(|w| w.to_string())
            .collect(),
    }
}
