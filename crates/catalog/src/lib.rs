//! # Catalog Crate
//!
//! Domain types and configuration for the Ghibli movie catalog facade.
//!
//! ## Main Components
//!
//! - **types**: The `Film` and `Person` schema the joined dataset is
//!   validated against
//! - **config**: `GhibliConfig` - upstream host and per-resource field
//!   lists, read from the environment
//! - **error**: Error types for configuration validation
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{Film, GhibliConfig};
//!
//! let config = GhibliConfig::from_env();
//! config.validate()?;
//!
//! // Later: validate a joined payload before serving it
//! let films: Vec<Film> = serde_json::from_value(joined)?;
//! ```

// Public modules
pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types for convenience
pub use config::{DEFAULT_FILMS_FIELDS, DEFAULT_HOST, DEFAULT_PEOPLE_FIELDS, GhibliConfig};
pub use error::{ConfigError, Result};
pub use types::{Film, Person};
