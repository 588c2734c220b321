//! Server crate for the Ghibli catalog facade.
//!
//! This crate contains the orchestrator that fetches and joins the
//! upstream film and people datasets, the response cache, and the HTTP
//! routes that expose the combined movie list.

pub mod cache;
pub mod orchestrator;
pub mod routes;

pub use cache::ResponseCache;
pub use orchestrator::{CatalogOrchestrator, CombinedResult};
pub use routes::AppState;
