//! Charades Protocol - JSON contracts between the engine and its clients
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde and the domain vocabulary types
//! 2. **No business logic** - Pure data types and serialization
//! 3. **No domain IDs** - use raw `i64` in DTOs
//! 4. **camelCase** - field names follow the browser client's conventions

pub mod requests;
pub mod responses;

pub use requests::{
    AddForbiddenWordRequest, CreateThemeRequest, SaveUsernameRequest, StartGameRequest,
    SubmitHintRequest, UploadCharacterRequest,
};

pub use responses::{
    CharacterData, CharacterResponse, CharactersResponse, ErrorCode, ErrorResponse,
    ForbiddenWordData, ForbiddenWordResponse, GameCharacterData, GameData, GameResponse,
    HintResponse, LeaderboardEntry, LeaderboardResponse, SuccessResponse, ThemeData,
    ThemeResponse, ThemesResponse, UserData, UserResponse,
};

// Domain vocabulary re-exported for clients
pub use charades_domain::MatchKind;
