//! Core domain types for the Ghibli movie catalog.
//!
//! This module defines the schema the joined films+people dataset is
//! validated against before it is served. Key Rust concepts demonstrated:
//! - Structs with public fields
//! - Derive macros for common traits
//! - serde for JSON (de)serialization

use serde::{Deserialize, Serialize};

// =============================================================================
// Person
// =============================================================================

/// A person as nested under a film's `people` list.
///
/// Every field is a string, exactly as the upstream API returns them.
/// Even `age` and numbers like running times are served as text.
///
/// Note there is no `films` field here: the back-reference is stripped
/// during the join, so a person nested under a film never points back at
/// films (that would nest without bound).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub gender: String,
    /// May be blank; the upstream leaves age empty for some characters
    pub age: String,
    pub eye_color: String,
    pub hair_color: String,
    pub url: String,
}

// =============================================================================
// Film
// =============================================================================

/// A film with its joined people list.
///
/// Rust concept: serde's derived `Deserialize` rejects records with
/// missing fields but silently ignores unknown extra keys. That is
/// exactly the validation rule we want: the handler deserializes the
/// joined records into `Vec<Film>` and any shortfall fails the whole
/// response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Film {
    pub id: String,
    pub title: String,
    pub original_title: String,
    pub original_title_romanised: String,
    pub description: String,
    pub director: String,
    pub producer: String,
    pub release_date: String,
    pub running_time: String,
    pub rt_score: String,
    /// Canonical URL, unique per film; the join key
    pub url: String,
    /// People appearing in this film; empty when nobody matched
    pub people: Vec<Person>,
}
