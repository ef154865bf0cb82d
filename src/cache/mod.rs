//! In-memory response cache
//!
//! This module provides the freshness cache that sits between the client and the
//! network. Responses are keyed by request URL and expire after a configurable
//! time-to-live. Expiry is checked lazily when an entry is read; there is no
//! background sweep and no size bound.

mod manager;

pub use manager::{ResponseCache, Ttl};
