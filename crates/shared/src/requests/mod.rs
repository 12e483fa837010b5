//! Request bodies accepted by the HTTP API.
//!
//! Required fields are modelled as `Option` so that a missing field is
//! reported by the handler as a bad request with a readable message instead
//! of a deserialization rejection.

mod catalog;
mod game;

pub use catalog::{AddForbiddenWordRequest, CreateThemeRequest, UploadCharacterRequest};
pub use game::{SaveUsernameRequest, StartGameRequest, SubmitHintRequest};
