//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific area of the game.

pub mod catalog;
pub mod hint;
pub mod leaderboard;
pub mod session;

// Re-export main types
pub use catalog::CatalogUseCases;
pub use hint::HintUseCases;
pub use leaderboard::Leaderboard;
pub use session::SessionUseCases;
