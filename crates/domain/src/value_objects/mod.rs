//! Value objects - validated, immutable domain values.

mod match_kind;
mod names;

pub use match_kind::MatchKind;
pub use names::{CharacterName, ForbiddenWordText, ThemeName, Username};
