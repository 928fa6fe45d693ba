//! Wire error normalization.
//!
//! Every place that consumes the failing branch of a remote call goes through
//! [`normalize`], so callers only ever see an [`ErrorKind`].

use messagr_types::error::{ErrorKind, RawWireError, WireError};

use crate::remote::RemoteResult;

/// Map a raw wire error onto the caller-facing taxonomy.
///
/// Total: unknown tags, extra keys and non-object values all become
/// [`ErrorKind::Unknown`]. Non-string details are rendered as JSON text.
pub fn normalize(error: &RawWireError) -> ErrorKind {
    match error.decode() {
        Some(WireError::NotAuthenticated) => ErrorKind::Unauthenticated,
        Some(WireError::PlatformError(detail)) => ErrorKind::PlatformFailure(detail),
        Some(WireError::QueryError(detail)) => ErrorKind::QueryFailure(detail),
        Some(WireError::InternalError(detail)) => ErrorKind::InternalFailure(detail),
        Some(WireError::InvalidParameters(detail)) => ErrorKind::InvalidInput(detail),
        None => {
            tracing::warn!(raw = %error.0, "unrecognized wire error");
            ErrorKind::Unknown
        }
    }
}

/// Unwrap a remote call, normalizing its failing branch.
pub fn settle<T>(result: RemoteResult<T>) -> Result<T, ErrorKind> {
    result.map_err(|e| normalize(&e))
}
