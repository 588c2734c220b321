//! Configuration for the upstream Ghibli API.
//!
//! The host and the per-resource field lists come from the environment
//! (with defaults matching the public API), get parsed into an explicit
//! config struct, and are validated once at startup. Nothing below this
//! layer reads the environment.

use std::env;

use crate::error::{ConfigError, Result};

/// Public host of the Studio Ghibli API
pub const DEFAULT_HOST: &str = "https://ghibliapi.herokuapp.com";

/// Fields requested from the `films` endpoint by default
pub const DEFAULT_FILMS_FIELDS: &[&str] = &[
    "id",
    "title",
    "original_title",
    "original_title_romanised",
    "description",
    "director",
    "producer",
    "release_date",
    "running_time",
    "rt_score",
    "url",
];

/// Fields requested from the `people` endpoint by default
///
/// `films` must stay in this list: it is the back-reference the join is
/// computed from.
pub const DEFAULT_PEOPLE_FIELDS: &[&str] = &[
    "id",
    "name",
    "gender",
    "age",
    "eye_color",
    "hair_color",
    "films",
    "url",
];

/// Settings for talking to the upstream catalog API.
///
/// Field lists are configuration, not hard-coded: callers may override
/// them to fetch a narrower projection.
#[derive(Debug, Clone)]
pub struct GhibliConfig {
    /// Base URL of the API, e.g. `https://ghibliapi.herokuapp.com`
    pub host: String,
    /// Fields requested for each film record
    pub films_fields: Vec<String>,
    /// Fields requested for each person record
    pub people_fields: Vec<String>,
}

impl Default for GhibliConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            films_fields: to_owned_fields(DEFAULT_FILMS_FIELDS),
            people_fields: to_owned_fields(DEFAULT_PEOPLE_FIELDS),
        }
    }
}

impl GhibliConfig {
    /// Read the configuration from the process environment.
    ///
    /// Recognized variables:
    /// * `GHIBLI_HOST` - base URL of the API
    /// * `FILMS_FIELDS` - comma-separated film field list
    /// * `PEOPLE_FIELDS` - comma-separated person field list
    ///
    /// Unset variables fall back to the defaults above. A variable that
    /// is set but unusable (e.g. `FILMS_FIELDS=""`) is kept as-is so
    /// `validate` rejects it loudly instead of silently papering over a
    /// broken environment.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = env::var("GHIBLI_HOST").unwrap_or(defaults.host);
        let films_fields = env::var("FILMS_FIELDS")
            .map(|raw| parse_field_list(&raw))
            .unwrap_or(defaults.films_fields);
        let people_fields = env::var("PEOPLE_FIELDS")
            .map(|raw| parse_field_list(&raw))
            .unwrap_or(defaults.people_fields);

        Self {
            host,
            films_fields,
            people_fields,
        }
    }

    /// Check that the configuration can actually drive a fetch.
    ///
    /// The fetch layer treats a blank endpoint or empty field list as a
    /// programmer error, so we reject those combinations up front.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::MissingHost);
        }
        if self.films_fields.is_empty() {
            return Err(ConfigError::EmptyFieldList { endpoint: "films" });
        }
        if self.people_fields.is_empty() {
            return Err(ConfigError::EmptyFieldList { endpoint: "people" });
        }
        Ok(())
    }
}

/// Split a comma-separated field list, trimming entries and dropping blanks
fn parse_field_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(str::to_string)
        .collect()
}

fn to_owned_fields(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|field| field.to_string()).collect()
}
