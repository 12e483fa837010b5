//! Charades Engine library.
//!
//! Server side of the character-guessing game: hint checking, guess
//! resolution, scoring and the catalog behind it.
//!
//! ## Structure
//!
//! - `use_cases/` - User story orchestration over the ports
//! - `infrastructure/` - Port traits and their adapters (SQLite, completion client, blob store)
//! - `api/` - HTTP entry points
//! - `app` - Application composition
//! - `config` - Environment configuration

pub mod api;
pub mod app;
pub mod config;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
