use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The failing branch of a remote call, exactly as received.
///
/// Kept untyped until it reaches the normalizer: the endpoint is allowed to
/// send tags this crate does not know, and those must still be representable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawWireError(pub serde_json::Value);

impl RawWireError {
    /// Decode into the closed wire taxonomy.
    ///
    /// Only the tag decides the variant. A string detail is kept as is, any
    /// other detail becomes its JSON text, and the `NotAuthenticated` detail
    /// is ignored. Returns `None` for non-object values, unknown tags and
    /// objects with more than one key.
    pub fn decode(&self) -> Option<WireError> {
        let object = self.0.as_object()?;
        if object.len() != 1 {
            return None;
        }
        let (tag, detail) = object.iter().next()?;
        let detail = || match detail {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        match tag.as_str() {
            "NotAuthenticated" => Some(WireError::NotAuthenticated),
            "PlatformError" => Some(WireError::PlatformError(detail())),
            "QueryError" => Some(WireError::QueryError(detail())),
            "InternalError" => Some(WireError::InternalError(detail())),
            "InvalidParameters" => Some(WireError::InvalidParameters(detail())),
            _ => None,
        }
    }
}

impl From<WireError> for RawWireError {
    fn from(error: WireError) -> Self {
        let (tag, detail) = match error {
            WireError::NotAuthenticated => ("NotAuthenticated", serde_json::Value::Null),
            WireError::PlatformError(d) => ("PlatformError", d.into()),
            WireError::QueryError(d) => ("QueryError", d.into()),
            WireError::InternalError(d) => ("InternalError", d.into()),
            WireError::InvalidParameters(d) => ("InvalidParameters", d.into()),
        };
        let mut object = serde_json::Map::new();
        object.insert(tag.to_string(), detail);
        RawWireError(serde_json::Value::Object(object))
    }
}

/// Single-key tagged error defined by the remote interface.
///
/// On the wire: `{"NotAuthenticated": null}`, `{"PlatformError": "..."}`, etc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    NotAuthenticated,
    PlatformError(String),
    QueryError(String),
    InternalError(String),
    InvalidParameters(String),
}

/// Tagged result envelope: `{"Ok": payload}` or `{"Err": wire_error}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WireResult<T> {
    Ok(T),
    Err(RawWireError),
}

impl<T> WireResult<T> {
    pub fn into_result(self) -> Result<T, RawWireError> {
        match self {
            WireResult::Ok(value) => Ok(value),
            WireResult::Err(error) => Err(error),
        }
    }
}

/// Error taxonomy exposed to callers of the façade.
///
/// The `Display` output is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ErrorKind {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Platform error: {0}")]
    PlatformFailure(String),

    #[error("Query error: {0}")]
    QueryFailure(String),

    #[error("Internal error: {0}")]
    InternalFailure(String),

    #[error("Invalid parameters: {0}")]
    InvalidInput(String),

    #[error("Unknown error")]
    Unknown,
}

/// Errors from loading the on-disk configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("invalid config file '{path}': {message}")]
    Parse { path: String, message: String },
}
