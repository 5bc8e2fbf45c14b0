//! Structural merge of request params and request body.
//!
//! # Design
//! Rust has no anonymous record union, so `Merged` keeps both halves typed
//! (`params`, `body`) and becomes flat only on the wire: it serializes to one
//! object whose keys are the union of both halves' keys, and it deserializes
//! by feeding that one object to both halves.
//!
//! Collision rule: when both halves serialize the same key, the request body
//! wins. On the way in, a colliding key is visible to both halves.

use serde::de::{DeserializeOwned, Error as _};
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{MergeError, Side};

/// One client input carrying both the params and the body of a contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Merged<P, B> {
    pub params: P,
    pub body: B,
}

impl<P, B> Merged<P, B> {
    pub fn new(params: P, body: B) -> Self {
        Self { params, body }
    }

    pub fn into_parts(self) -> (P, B) {
        (self.params, self.body)
    }
}

impl<P: Serialize, B: Serialize> Merged<P, B> {
    /// Flatten into a single object. Body keys overwrite params keys.
    pub fn to_object(&self) -> Result<Map<String, Value>, MergeError> {
        let mut merged = object_fields(&self.params, Side::Params)?;
        merged.extend(object_fields(&self.body, Side::Body)?);
        Ok(merged)
    }
}

impl<P: DeserializeOwned, B: DeserializeOwned> Merged<P, B> {
    /// Split a flat object into both halves. Keys neither half declares are
    /// ignored unless the half itself denies unknown fields.
    pub fn from_object(value: Value) -> Result<Self, MergeError> {
        if !value.is_object() {
            return Err(MergeError::ExpectedObject(kind(&value)));
        }
        let params = P::deserialize(&value).map_err(|source| MergeError::Json {
            side: Side::Params,
            source,
        })?;
        let body = B::deserialize(&value).map_err(|source| MergeError::Json {
            side: Side::Body,
            source,
        })?;
        Ok(Self { params, body })
    }
}

impl<P: Serialize, B: Serialize> Serialize for Merged<P, B> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_object().map_err(S::Error::custom)?.serialize(serializer)
    }
}

impl<'de, P: DeserializeOwned, B: DeserializeOwned> Deserialize<'de> for Merged<P, B> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_object(value).map_err(D::Error::custom)
    }
}

/// `null` contributes nothing; anything other than an object is an error.
fn object_fields<T: Serialize>(value: &T, side: Side) -> Result<Map<String, Value>, MergeError> {
    match serde_json::to_value(value).map_err(|source| MergeError::Json { side, source })? {
        Value::Null => Ok(Map::new()),
        Value::Object(fields) => Ok(fields),
        other => Err(MergeError::NotAnObject {
            side,
            found: kind(&other),
        }),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
