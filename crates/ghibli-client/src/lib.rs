//! HTTP fetch client for the Studio Ghibli catalog API.
//!
//! This crate provides a thin client for pulling raw film and people
//! records from the upstream catalog service. It handles:
//! - Building the per-resource request URL with a `?fields=` projection
//! - Classifying transport, HTTP-status and body failures into [`FetchError`]
//! - Detecting the empty payloads the upstream occasionally serves
//!
//! It deliberately does not retry and does not coerce record fields.
//! Timeouts are the owner's concern: pass a `reqwest::Client` configured
//! with one via [`GhibliClient::with_client`].

use serde_json::Value;
use tracing::{debug, error, warn};

pub mod error;

pub use error::{FetchError, Result};

/// A raw record exactly as the upstream returned it.
///
/// Records stay untyped key/value maps at this layer. Callers choose the
/// field projection per request, so there is no fixed struct a response
/// is guaranteed to fit.
pub type Record = serde_json::Map<String, Value>;

/// Client for the Ghibli catalog API.
///
/// Holds the upstream host (normalized once at construction) and the
/// underlying HTTP client. Cloning is cheap; the connection pool is
/// shared between clones.
#[derive(Debug, Clone)]
pub struct GhibliClient {
    client: reqwest::Client,
    host: String,
}

impl GhibliClient {
    /// Create a client for the given host with a default `reqwest::Client`.
    ///
    /// # Arguments
    /// * `host` - Base URL of the API (e.g. "https://ghibliapi.herokuapp.com")
    pub fn new(host: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), host)
    }

    /// Create a client reusing an existing `reqwest::Client`.
    ///
    /// This is how the server wires in its pooled client with a request
    /// timeout; the fetch logic itself stays timeout-unaware.
    pub fn with_client(client: reqwest::Client, host: impl Into<String>) -> Self {
        Self {
            client,
            host: normalize_host(&host.into()),
        }
    }

    /// Get the normalized host this client talks to.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Fetch all records of one resource, projected down to `fields`.
    ///
    /// Issues a single `GET {host}/{endpoint}?fields=f1,f2,...` and
    /// returns the parsed records unchanged. Exactly one request is made
    /// per call; failures are never retried here.
    ///
    /// # Errors
    /// * [`FetchError::InvalidArgument`] - blank `endpoint` or empty
    ///   `fields`; returned before any request is issued
    /// * [`FetchError::Unreachable`] - the host could not be reached
    /// * [`FetchError::ServiceRequest`] - the host answered non-2xx
    /// * [`FetchError::JsonResponse`] - the body did not decode into records
    /// * [`FetchError::EmptyData`] - the body decoded but was empty
    pub async fn fetch(&self, endpoint: &str, fields: &[String]) -> Result<Vec<Record>> {
        if endpoint.trim().is_empty() {
            return Err(FetchError::InvalidArgument("endpoint"));
        }
        if fields.is_empty() {
            return Err(FetchError::InvalidArgument("fields"));
        }

        let url = format!("{}/{}?fields={}", self.host, endpoint, fields.join(","));
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            error!("Failed to reach {}: {}", url, e);
            FetchError::Unreachable(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("Request to /{} returned status {}", endpoint, status);
            return Err(FetchError::ServiceRequest {
                status: status.as_u16(),
            });
        }

        // The body streams in after the status line, so a failure while
        // reading it is still a transport problem.
        let body = response.text().await.map_err(FetchError::Unreachable)?;

        let payload: Value = serde_json::from_str(&body).map_err(|e| {
            error!("Response from /{} is not valid JSON: {}", endpoint, e);
            FetchError::JsonResponse(e)
        })?;

        if is_empty_data(&payload) {
            warn!("Response from /{} carried no usable records", endpoint);
            return Err(FetchError::EmptyData);
        }

        // Anything non-empty that is not an array of objects cannot be
        // returned as records and counts as a decode failure.
        let records: Vec<Record> =
            serde_json::from_value(payload).map_err(FetchError::JsonResponse)?;

        debug!("Fetched {} records from /{}", records.len(), endpoint);
        Ok(records)
    }
}

/// Trim surrounding slashes, backslashes and whitespace from a host
fn normalize_host(raw: &str) -> String {
    raw.trim_matches(|c: char| c == '/' || c == '\\' || c.is_whitespace())
        .to_string()
}

/// Whether a decoded payload counts as empty.
///
/// Empty means: an empty array, an array whose entries are all blank
/// values, or an object with no keys (or only blank ones). A non-empty
/// scalar payload is not "empty" - it falls through to record conversion
/// and fails there instead.
fn is_empty_data(payload: &Value) -> bool {
    match payload {
        Value::Array(items) => items.iter().all(is_blank),
        Value::Object(map) => map.keys().all(|key| key.is_empty()),
        _ => false,
    }
}

/// Blank values: null, false, zero, empty string, empty collection
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::extract::RawQuery;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;
    use serde_json::json;

    // ============================================================================
    // Stub upstream helpers
    // ============================================================================

    /// Start a stub catalog API on a random port
    async fn start_stub_api(router: Router) -> (String, tokio::task::JoinHandle<()>) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub API");

        let addr = listener.local_addr().expect("Failed to get local address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Stub API failed");
        });

        (format!("http://{}", addr), handle)
    }

    /// Stub serving a fixed body on `/films`
    fn films_stub(body: &'static str) -> Router {
        Router::new().route("/films", get(move || async move { body }))
    }

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    // ============================================================================
    // Fetch behavior
    // ============================================================================

    #[tokio::test]
    async fn test_fetch_returns_parsed_records() {
        let body = r#"[{
            "id": "2baf70d1-42bb-4437-b551-e5fed5a87abe",
            "title": "Castle in the Sky",
            "url": "https://ghibliapi.herokuapp.com/films/2baf70d1-42bb-4437-b551-e5fed5a87abe"
        }]"#;
        let (host, handle) = start_stub_api(films_stub(body)).await;

        let client = GhibliClient::new(host);
        let records = client
            .fetch("films", &fields(&["id", "title", "url"]))
            .await
            .expect("Fetch against a healthy stub should succeed");

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].get("title").and_then(Value::as_str),
            Some("Castle in the Sky")
        );

        handle.abort();
    }

    #[tokio::test]
    async fn test_fetch_sends_comma_joined_field_projection() {
        let captured: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
        let captured_by_stub = captured.clone();

        let router = Router::new().route(
            "/films",
            get(move |RawQuery(query): RawQuery| {
                let captured = captured_by_stub.clone();
                async move {
                    *captured.lock().unwrap() = query;
                    r#"[{"id": "1"}]"#
                }
            }),
        );
        let (host, handle) = start_stub_api(router).await;

        let client = GhibliClient::new(host);
        client
            .fetch("films", &fields(&["id", "title", "url"]))
            .await
            .expect("Fetch should succeed");

        let query = captured.lock().unwrap().clone();
        assert_eq!(query.as_deref(), Some("fields=id,title,url"));

        handle.abort();
    }

    #[tokio::test]
    async fn test_host_is_normalized_at_construction() {
        let (host, handle) = start_stub_api(films_stub(r#"[{"id": "1"}]"#)).await;

        // Trailing separators and whitespace must not lead to `//films`
        let client = GhibliClient::new(format!("{}///  ", host));
        assert_eq!(client.host(), host);

        client
            .fetch("films", &fields(&["id"]))
            .await
            .expect("Fetch should succeed against the normalized host");

        handle.abort();
    }

    #[tokio::test]
    async fn test_fetch_rejects_blank_endpoint_before_any_request() {
        // Port 1 would refuse; getting InvalidArgument proves we never dialed
        let client = GhibliClient::new("http://127.0.0.1:1");
        let err = client
            .fetch("  ", &fields(&["id"]))
            .await
            .expect_err("Blank endpoint must be rejected");

        assert!(matches!(err, FetchError::InvalidArgument("endpoint")));
    }

    #[tokio::test]
    async fn test_fetch_rejects_empty_fields_before_any_request() {
        let client = GhibliClient::new("http://127.0.0.1:1");
        let err = client
            .fetch("films", &[])
            .await
            .expect_err("Empty field list must be rejected");

        assert!(matches!(err, FetchError::InvalidArgument("fields")));
    }

    // ============================================================================
    // Failure classification
    // ============================================================================

    #[tokio::test]
    async fn test_fetch_classifies_connection_refused_as_unreachable() {
        // Bind a port to learn a free address, then free it again
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = GhibliClient::new(format!("http://{}", addr));
        let err = client
            .fetch("films", &fields(&["id"]))
            .await
            .expect_err("Nothing is listening on the dropped port");

        assert!(matches!(err, FetchError::Unreachable(_)));
    }

    #[tokio::test]
    async fn test_fetch_classifies_error_statuses_as_service_request() {
        let router = Router::new()
            .route("/films", get(|| async { (StatusCode::NOT_FOUND, "nope") }))
            .route(
                "/people",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            );
        let (host, handle) = start_stub_api(router).await;
        let client = GhibliClient::new(host);

        let err = client.fetch("films", &fields(&["id"])).await.unwrap_err();
        assert!(matches!(err, FetchError::ServiceRequest { status: 404 }));

        let err = client.fetch("people", &fields(&["id"])).await.unwrap_err();
        assert!(matches!(err, FetchError::ServiceRequest { status: 500 }));

        handle.abort();
    }

    #[tokio::test]
    async fn test_fetch_classifies_non_json_body_as_json_response() {
        let (host, handle) = start_stub_api(films_stub("<html>definitely not json</html>")).await;

        let client = GhibliClient::new(host);
        let err = client.fetch("films", &fields(&["id"])).await.unwrap_err();
        assert!(matches!(err, FetchError::JsonResponse(_)));

        handle.abort();
    }

    #[tokio::test]
    async fn test_fetch_classifies_empty_payloads_as_empty_data() {
        for body in ["[]", "{}", "[{}]"] {
            let (host, handle) = start_stub_api(films_stub(body)).await;

            let client = GhibliClient::new(host);
            let err = client.fetch("films", &fields(&["id"])).await.unwrap_err();
            assert!(
                matches!(err, FetchError::EmptyData),
                "Body {:?} should classify as EmptyData",
                body
            );

            handle.abort();
        }
    }

    #[tokio::test]
    async fn test_fetch_classifies_non_record_payload_as_decode_failure() {
        for body in ["42", r#""just a string""#, "[1, 2, 3]"] {
            let (host, handle) = start_stub_api(films_stub(body)).await;

            let client = GhibliClient::new(host);
            let err = client.fetch("films", &fields(&["id"])).await.unwrap_err();
            assert!(
                matches!(err, FetchError::JsonResponse(_)),
                "Body {:?} should classify as JsonResponse",
                body
            );

            handle.abort();
        }
    }

    // ============================================================================
    // Empty payload rules
    // ============================================================================

    #[test]
    fn test_empty_data_rules() {
        assert!(is_empty_data(&json!([])));
        assert!(is_empty_data(&json!({})));
        assert!(is_empty_data(&json!([{}])));
        assert!(is_empty_data(&json!([null, 0, "", false, [], {}])));

        assert!(!is_empty_data(&json!([{"id": "1"}])));
        assert!(!is_empty_data(&json!({"id": "1"})));
        assert!(!is_empty_data(&json!([{}, {"id": "1"}])));
        // Scalars are not "empty" - they fail record conversion instead
        assert!(!is_empty_data(&json!(42)));
        assert!(!is_empty_data(&json!("text")));
    }

    #[test]
    fn test_normalize_host_strips_surrounding_noise() {
        assert_eq!(
            normalize_host("https://ghibliapi.herokuapp.com/"),
            "https://ghibliapi.herokuapp.com"
        );
        assert_eq!(
            normalize_host("  https://ghibliapi.herokuapp.com\\ "),
            "https://ghibliapi.herokuapp.com"
        );
        assert_eq!(normalize_host("http://localhost:8000"), "http://localhost:8000");
    }
}
