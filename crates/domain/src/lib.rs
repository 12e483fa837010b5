//! Charades domain: catalog and session entities, ID newtypes and the
//! invariants that hold independently of storage.

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::{
    Character, ForbiddenWord, Game, GameCharacterProgress, GameStatus, NewCharacter, NewTheme,
    Theme, ThemeSummary, User, DEFAULT_CHARACTER_POINTS,
};

pub use error::DomainError;

// Re-export ID types
pub use ids::{CharacterId, GameId, ThemeId, UserId};

pub use value_objects::{CharacterName, ForbiddenWordText, MatchKind, ThemeName, Username};
