//! Result caching for dalal.
//!
//! A [`TtlCache`] is a concurrent key/value store whose entries expire a fixed
//! time after insertion. [`Stores`] groups one typed cache per payload kind and
//! [`keys`] builds their deterministic string keys.
#![warn(missing_docs)]

/// TTL cache and per-payload stores.
pub mod cache;

pub use cache::{CacheStore, Stores, TtlCache, keys};
