//! Error types for the ghibli-client crate.
//!
//! One enum covers the whole failure taxonomy of a fetch. The four
//! operational kinds (unreachable, bad status, undecodable body, empty
//! payload) are what callers match on to build user-facing responses;
//! `InvalidArgument` is the odd one out, signalling a caller bug rather
//! than an upstream problem.

use thiserror::Error;

/// Errors that can occur while fetching records from the Ghibli API
#[derive(Error, Debug)]
pub enum FetchError {
    /// A required argument was blank; no request was issued
    #[error("{0} must not be empty")]
    InvalidArgument(&'static str),

    /// The host could not be reached (DNS, refused connection, timeout)
    #[error("Unable to reach the Ghibli API: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// The host answered with a non-success HTTP status
    #[error("Ghibli API request failed with status {status}")]
    ServiceRequest { status: u16 },

    /// The response body could not be decoded into records
    #[error("Failed to decode the Ghibli API response: {0}")]
    JsonResponse(#[source] serde_json::Error),

    /// The response decoded fine but carried no usable records
    #[error("Ghibli API returned an empty payload")]
    EmptyData,
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, FetchError>;
