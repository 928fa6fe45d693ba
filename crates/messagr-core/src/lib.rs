//! Aggregation and query façade for Messagr.
//!
//! Everything here talks to the remote endpoint through the [`RemoteClient`]
//! trait, which messagr-infra implements over HTTP. This crate depends only
//! on `messagr-types` plus async plumbing -- never on `messagr-infra` or any
//! transport crate.
//!
//! [`RemoteClient`]: remote::RemoteClient

pub mod aggregator;
pub mod event;
pub mod facade;
pub mod generation;
pub mod normalize;
pub mod query;
pub mod registry;
pub mod remote;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use facade::Messagr;
