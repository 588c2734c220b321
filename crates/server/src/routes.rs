//! HTTP routes for the catalog facade.
//!
//! Two endpoints: `GET /movies` serves the joined films+people dataset
//! (validated and cached), `GET /health` answers liveness probes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use catalog::Film;
use ghibli_client::Record;

use crate::cache::ResponseCache;
use crate::orchestrator::CatalogOrchestrator;

/// Shared state handed to every request handler.
///
/// Everything in here is cheap to clone: the orchestrator shares its
/// HTTP connection pool and the cache clones share one slot.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: CatalogOrchestrator,
    pub cache: ResponseCache<Vec<Film>>,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/movies", get(list_movies))
        .route("/health", get(health_check))
        .with_state(state)
}

/// Serve the joined films+people dataset.
///
/// A fresh cache entry is served as-is. Otherwise the orchestrator runs
/// and the outcome maps to one of three responses:
/// * upstream failure - 502 with the `{data, error}` envelope
/// * joined data not matching the schema - plain 500
/// * success - 200 with the films, which also warms the cache
async fn list_movies(State(state): State<AppState>) -> Response {
    if let Some(films) = state.cache.get().await {
        debug!("Serving movie list from cache");
        return Json(films).into_response();
    }

    let result = state.orchestrator.get_films().await;

    if let Some(message) = &result.error {
        warn!("Upstream failure: {}", message);
        return (StatusCode::BAD_GATEWAY, Json(&result)).into_response();
    }

    // data is always set when error is not
    let records = result.data.unwrap_or_default();
    let films: Vec<Film> = match deserialize_films(records) {
        Ok(films) => films,
        Err(err) => {
            error!("Joined movie list failed schema validation: {}", err);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Movies list is not valid")
                .into_response();
        }
    };

    state.cache.put(films.clone()).await;
    Json(films).into_response()
}

/// Validate the joined records against the catalog schema
fn deserialize_films(records: Vec<Record>) -> Result<Vec<Film>, serde_json::Error> {
    let value = Value::Array(records.into_iter().map(Value::Object).collect());
    serde_json::from_value(value)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
