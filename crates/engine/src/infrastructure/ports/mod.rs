//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Database access (could swap SQLite -> Postgres)
//! - Text completion (any OpenAI-compatible endpoint)
//! - Blob storage (could swap local disk -> object storage)
//! - Clock/Random (for testing)

mod error;
mod external;
mod repos;
mod testing;
pub mod types;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::{CatalogRepo, GameRepo, UserRepo};

pub use types::{CorrectGuess, GuessCommit};

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{
    BlobStorePort, ChatMessage, FinishReason, LlmPort, LlmRequest, LlmResponse, TokenUsage,
};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::{MockCatalogRepo, MockGameRepo, MockUserRepo};

#[cfg(test)]
pub use external::{MockBlobStorePort, MockLlmPort};

#[cfg(test)]
pub use testing::{MockClockPort, MockRandomPort};

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::{ClockPort, RandomPort};

// =============================================================================
// Error Types
// =============================================================================
pub use error::{BlobError, LlmError, RepoError};
