//! Shared domain and wire types for Messagr.
//!
//! Platforms, conversations, messages, query filters and results, the wire
//! error encoding and the error taxonomy the façade exposes to callers.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod codec;
pub mod config;
pub mod conversation;
pub mod error;
pub mod event;
pub mod insights;
pub mod platform;
pub mod query;
