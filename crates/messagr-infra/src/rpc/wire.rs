//! Request and reply shapes of the endpoint's HTTP surface.
//!
//! Transport-level failures (connection refused, bad status, unparseable
//! body) are folded into the endpoint's own error encoding here so the
//! façade only ever sees one taxonomy.

use serde::de::DeserializeOwned;
use serde_json::Value;

use messagr_core::remote::RemoteResult;
use messagr_types::error::{RawWireError, WireError, WireResult};

/// `{base}/rpc/{method}`, tolerating a trailing slash on `base`.
pub fn rpc_url(base_url: &str, method: &str) -> String {
    format!("{}/rpc/{method}", base_url.trim_end_matches('/'))
}

/// A failure that happened before the endpoint produced a tagged reply.
pub fn transport_error(message: impl std::fmt::Display) -> RawWireError {
    RawWireError::from(WireError::InternalError(format!("transport: {message}")))
}

/// Map a non-success HTTP status onto the wire taxonomy.
pub fn status_error(status: u16, body: &str) -> RawWireError {
    match status {
        401 | 403 => RawWireError::from(WireError::NotAuthenticated),
        _ if body.is_empty() => transport_error(format!("HTTP {status}")),
        _ => transport_error(format!("HTTP {status}: {body}")),
    }
}

/// Decode a `{"Ok": ..}` / `{"Err": ..}` reply.
pub fn decode_tagged<T: DeserializeOwned>(body: Value) -> RemoteResult<T> {
    serde_json::from_value::<WireResult<T>>(body)
        .map_err(|e| transport_error(format!("malformed reply: {e}")))?
        .into_result()
}

/// Decode a reply that carries its payload directly (no tagged envelope).
pub fn decode_bare<T: DeserializeOwned>(body: Value) -> RemoteResult<T> {
    serde_json::from_value(body).map_err(|e| transport_error(format!("malformed reply: {e}")))
}
