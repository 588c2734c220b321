//! # Film Catalog Orchestrator
//!
//! This module coordinates the fetch-and-join routine behind `/movies`:
//! 1. Fetch film records from the upstream API
//! 2. Fetch people records
//! 3. Join people into the films they appear in (by canonical film URL)
//! 4. Wrap the outcome in a `{data, error}` envelope
//!
//! Fetch failures never escape this layer as errors: each one is mapped
//! to a fixed user-facing message so the HTTP layer can render a uniform
//! error response.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use catalog::GhibliConfig;
use ghibli_client::{FetchError, GhibliClient, Record};

/// Combined films+people payload handed to the HTTP layer.
///
/// Exactly one of `data`/`error` is set: a successful join carries the
/// films, any failure carries its fixed message instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedResult {
    pub data: Option<Vec<Record>>,
    pub error: Option<String>,
}

impl CombinedResult {
    fn success(films: Vec<Record>) -> Self {
        Self {
            data: Some(films),
            error: None,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Coordinates the two upstream fetches and the in-memory join.
///
/// Stateless across requests: every call to [`get_films`] builds the
/// dataset from scratch, so there is nothing to lock or invalidate here.
///
/// [`get_films`]: CatalogOrchestrator::get_films
#[derive(Clone)]
pub struct CatalogOrchestrator {
    client: GhibliClient,
    films_fields: Vec<String>,
    people_fields: Vec<String>,
}

impl CatalogOrchestrator {
    /// Create an orchestrator from a fetch client and configuration.
    ///
    /// # Arguments
    /// * `client` - client pointing at the upstream API
    /// * `config` - field lists (and host) to fetch with; validated here
    ///   so a broken environment fails at startup, not on the first request
    pub fn new(client: GhibliClient, config: GhibliConfig) -> Result<Self> {
        config
            .validate()
            .context("Invalid Ghibli catalog configuration")?;

        Ok(Self {
            client,
            films_fields: config.films_fields,
            people_fields: config.people_fields,
        })
    }

    /// Main entry point: fetch films and people, join them.
    ///
    /// The two fetches run one after the other; the first failure
    /// short-circuits the whole operation. On success every film carries
    /// a `people` list (possibly empty).
    pub async fn get_films(&self) -> CombinedResult {
        let films = match self.client.fetch("films", &self.films_fields).await {
            Ok(records) => records,
            Err(err) => {
                error!("Films fetch failed: {}", err);
                return CombinedResult::failure(failure_message(&err));
            }
        };
        info!("Fetched {} films", films.len());

        let people = match self.client.fetch("people", &self.people_fields).await {
            Ok(records) => records,
            Err(err) => {
                error!("People fetch failed: {}", err);
                return CombinedResult::failure(failure_message(&err));
            }
        };
        info!("Fetched {} people", people.len());

        let joined = self.join_people_into_films(films, &people);
        info!("Joined dataset ready with {} films", joined.len());

        CombinedResult::success(joined)
    }

    /// Join every person into the films their back-reference points at.
    ///
    /// For each film, collect the people whose `films` array contains the
    /// film's canonical URL and attach them under a `people` key. The
    /// back-reference is dropped from the attached copy only - the shared
    /// source record is never mutated, so a person appearing in several
    /// films shows up under all of them.
    ///
    /// Pure function of its inputs: joining the same datasets twice
    /// produces identical output.
    fn join_people_into_films(&self, films: Vec<Record>, people: &[Record]) -> Vec<Record> {
        films
            .into_iter()
            .map(|mut film| {
                let cast: Vec<Value> = people
                    .iter()
                    .filter(|person| appears_in(person, film.get("url")))
                    .map(|person| {
                        let mut person = person.clone();
                        person.remove("films");
                        Value::Object(person)
                    })
                    .collect();

                // Always present, even when nobody matched
                film.insert("people".to_string(), Value::Array(cast));
                film
            })
            .collect()
    }
}

/// Whether a person's `films` back-reference contains the film URL.
///
/// A film without a string `url` matches nobody, and a person whose
/// `films` value is missing or not an array matches nothing. Matching is
/// exact string equality, never substring containment.
fn appears_in(person: &Record, film_url: Option<&Value>) -> bool {
    let Some(film_url) = film_url.and_then(Value::as_str) else {
        return false;
    };

    match person.get("films") {
        Some(Value::Array(refs)) => refs.iter().any(|r| r.as_str() == Some(film_url)),
        _ => false,
    }
}

/// Map a fetch failure to the fixed message shown to API consumers.
///
/// These strings are part of the external interface; downstream clients
/// match on them, so they must not change.
fn failure_message(err: &FetchError) -> &'static str {
    match err {
        FetchError::Unreachable(_) => "Connection error: Unable to reach Ghibli's API.",
        FetchError::JsonResponse(_) => "Error decoding JSON from Ghibli's API.",
        FetchError::ServiceRequest { .. } => "Ghibli's API didn't respond with a valid response.",
        FetchError::EmptyData => "Ghibli's API returned an empty list.",
        // The orchestrator only fetches with arguments validated in
        // `new`, so a blank endpoint or empty field list cannot occur.
        FetchError::InvalidArgument(_) => unreachable!("fetch arguments are validated at startup"),
    }
}
