//! Error types for the user API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the user does not exist" from "the server returned an unexpected status".
//! All other unexpected statuses land in `Http` with the raw status and body.

use thiserror::Error;

/// Errors returned by `UserClient` and `UserApi`.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a status other than the expected one or 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be decoded into the contract's response.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The merged request could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The transport could not complete the round-trip.
    #[error("transport failed: {0}")]
    Transport(String),
}
