//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod blob_store;
pub mod clock;
pub mod openai_compat;
pub mod ports;
pub mod sqlite;
