//! Shared test utilities for the converge workspace.
//!
//! This crate provides in-memory stand-ins for the host services so the
//! engine can be exercised without a running application. It is a
//! dev-dependency only and is never published.
//!
//! # Modules
//!
//! - [`host`]: [`FakeHost`], a plugin registry, migration runner and update
//!   tracker in one, recording every call it receives
//! - [`lookup`]: [`FakeLookup`], a table-backed reference lookup

pub mod host;
pub mod lookup;

pub use host::{Call, FakeHost};
pub use lookup::FakeLookup;
