//! learnstep-store — Persistence adapters and the remote validator client.
//!
//! Provides the concrete implementations behind the core trait seams: an
//! in-memory store with last-write-wins semantics, a caching decorator
//! with an explicit invalidate-on-write rule, an HTTP client for the
//! server-side validator, test doubles, and TOML configuration loading.

pub mod cached;
pub mod config;
pub mod http;
pub mod memory;
pub mod mock;
