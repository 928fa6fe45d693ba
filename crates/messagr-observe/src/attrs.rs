//! Span field names used when instrumenting remote calls.
//!
//! Declared on spans as dotted identifiers (`messagr.rpc.method = ...`) and
//! filled in later through `Span::record` with these constants.

/// Endpoint method name (e.g. "get_conversations").
pub const RPC_METHOD: &str = "messagr.rpc.method";

/// Correlation id sent as `x-request-id`.
pub const RPC_REQUEST_ID: &str = "messagr.rpc.request_id";

/// HTTP status of the reply.
pub const RPC_STATUS: &str = "messagr.rpc.status";

/// "ok", "err" (tagged endpoint error) or "transport".
pub const RPC_OUTCOME: &str = "messagr.rpc.outcome";

/// Platform an operation is scoped to.
pub const PLATFORM: &str = "messagr.platform";

/// Generation stamp of a registry refresh, fan-out or query.
pub const GENERATION: &str = "messagr.generation";

// --- Outcome values ---

pub const OUTCOME_OK: &str = "ok";
pub const OUTCOME_ERR: &str = "err";
pub const OUTCOME_TRANSPORT: &str = "transport";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_share_prefix() {
        for name in [RPC_METHOD, RPC_REQUEST_ID, RPC_STATUS, RPC_OUTCOME, PLATFORM, GENERATION] {
            assert!(name.starts_with("messagr."), "{name}");
        }
    }
}
