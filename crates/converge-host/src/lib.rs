//! Host contracts for converge.
//!
//! This crate defines the live entity models and the narrow service traits
//! through which the synchronizer reads and mutates the host application:
//! the plugin registry, the migration runner, the update tracker, and the
//! section / user-group / asset-source lookups.
//!
//! Nothing here talks to a real host. Implementations live with whatever
//! embeds the engine, and in-memory doubles live in `converge-test-utils`.

pub mod error;
pub mod field;
pub mod lookup;
pub mod plugin;

/// Free-form settings attributes, in insertion order.
pub type Settings = serde_json::Map<String, serde_json::Value>;

pub use error::{Error, Result};
pub use field::{Field, FieldGroup};
pub use lookup::{SourceLookup, SourceObject};
pub use plugin::{MigrationRunner, Plugin, PluginRegistry, UpdateTracker};
