//! Clash Royale API client library
//!
//! Exposes the HTTP client, the response cache, the typed response wrappers,
//! and the CLI definition used by the `royale` binary and integration tests.

pub mod cache;
pub mod cli;
pub mod client;
pub mod data;
