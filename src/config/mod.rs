//! Process configuration.
//!
//! # Data Flow
//! ```text
//! environment variables
//!     → loader.rs (lookup & parse)
//!     → Settings (validated, immutable)
//!     → handed to subsystems at startup
//! ```
//!
//! # Design Decisions
//! - Missing optional variables fall back to documented defaults
//! - The project id has no default: without one the directory is
//!   unknowable, so its absence is fatal before anything listens
//! - Settings are immutable once loaded; changes require a restart

pub mod loader;
pub mod schema;

pub use loader::{load_from_env, SettingsError};
pub use schema::Settings;
