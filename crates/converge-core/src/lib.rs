//! Declarative-state synchronizer
//!
//! This crate converges the live state of a host application to a set of
//! declared definitions, and snapshots live state back into definitions:
//!
//! - **Plugin sync**: Install, uninstall, enable, disable, migrate and save
//!   settings so host plugins match their definitions
//! - **Source mapping**: Rewrite `kind:selector` references in field settings
//!   between portable handles and environment-local ids
//! - **Field definitions**: Convert live fields to and from definitions
//! - **Documents**: Read and write definitions as YAML or JSON
//!
//! # Architecture
//!
//! `converge-core` only reaches the host through the traits in
//! `converge-host`:
//!
//! ```text
//!          caller (CLI, deploy hook, ...)
//!                        |
//!                  converge-core
//!                        |
//!                  converge-host
//!                        |
//!       registry / migrations / updates / lookups
//! ```
//!
//! # Example
//!
//! ```ignore
//! use converge_core::{PluginSync, SchemaDocument, SyncConfig};
//!
//! let config = SyncConfig::load_or_default(Path::new(CONFIG_FILENAME))?;
//! let document = SchemaDocument::load(Path::new("schema.yml"))?;
//! let sync = PluginSync::new(&registry, &migrations, &updates, &config.plugins)?;
//! let report = sync.import_with_options(&document.plugins, &config.import_options())?;
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod fields;
pub mod logging;
pub mod sync;

/// The canonical filename for synchronizer configuration.
pub const CONFIG_FILENAME: &str = "converge.toml";

pub use config::{FieldsConfig, ImportConfig, LoggingConfig, PluginsConfig, SyncConfig};
pub use document::{DocumentFormat, FieldGroupDefinitions, SchemaDocument};
pub use error::{Error, Result};
pub use fields::{FieldDefinition, FieldMapper, Index, SourceKind, SourceMapper};
pub use sync::{ImportOptions, ImportReport, PluginDefinition, PluginSync};
