//! Error types for the merged client input.
//!
//! # Design
//! Contract mismatches are compile errors and have no runtime variant. The
//! only runtime failures the core can report come from giving a
//! [`Merged`](crate::Merged) value its flat wire form, where the two halves
//! must both be objects (or contribute nothing).

use std::fmt;

use thiserror::Error;

/// Which half of a merged input an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Params,
    Body,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Params => f.write_str("request params"),
            Side::Body => f.write_str("request body"),
        }
    }
}

/// Errors produced while flattening or splitting a merged input.
#[derive(Debug, Error)]
pub enum MergeError {
    /// One half serialized to something other than an object or `null`.
    #[error("{side} must serialize to an object, found {found}")]
    NotAnObject { side: Side, found: &'static str },

    /// The flat input handed to `from_object` was not an object.
    #[error("merged input must be an object, found {0}")]
    ExpectedObject(&'static str),

    /// One half failed to serialize or to decode from the flat object.
    #[error("{side}: {source}")]
    Json {
        side: Side,
        #[source]
        source: serde_json::Error,
    },
}
