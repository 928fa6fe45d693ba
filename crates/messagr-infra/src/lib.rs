//! Infrastructure layer for Messagr.
//!
//! Implements the `RemoteClient` trait defined in `messagr-core` over HTTP
//! (reqwest) and loads `config.toml` from the data directory.

pub mod config;
pub mod rpc;
