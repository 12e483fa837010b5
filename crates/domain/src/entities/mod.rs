//! Domain entities.

mod character;
mod game;
mod theme;
mod user;

pub use character::{Character, ForbiddenWord, NewCharacter, DEFAULT_CHARACTER_POINTS};
pub use game::{Game, GameCharacterProgress, GameStatus};
pub use theme::{NewTheme, Theme, ThemeSummary};
pub use user::User;
