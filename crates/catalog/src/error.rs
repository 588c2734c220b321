//! Error types for the catalog crate.
//!
//! Rust error handling concepts demonstrated:
//! - thiserror for defining custom error types
//! - Enum variants for different error cases
//! - Automatic `Display` and `Error` trait implementations

use thiserror::Error;

/// Errors that can occur while assembling the catalog configuration
///
/// These are startup errors: configuration is checked once when the
/// service is constructed, so a broken environment fails immediately
/// instead of surfacing on the first request.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The upstream host was configured but blank
    #[error("Ghibli API host must not be empty")]
    MissingHost,

    /// A per-resource field list parsed down to nothing
    #[error("Field list for '{endpoint}' must not be empty")]
    EmptyFieldList { endpoint: &'static str },
}

/// Convenience type alias for Results in this crate
///
/// Rust concept: Type aliases make code more readable
/// Instead of writing `Result<T, ConfigError>` everywhere,
/// we can write `Result<T>`
pub type Result<T> = std::result::Result<T, ConfigError>;
