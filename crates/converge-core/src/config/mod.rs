//! Configuration for the synchronizer
//!
//! Settings are read from a single `converge.toml`:
//!
//! - `[plugins]` - namespace and suffix stripped from plugin class names on export
//! - `[fields]` - whether field definitions carry their storage context
//! - `[import]` - dry-run toggle
//! - `[logging]` - default log filter
//!
//! # Example
//!
//! ```ignore
//! use converge_core::config::SyncConfig;
//! use std::path::Path;
//!
//! let config = SyncConfig::load_or_default(Path::new("converge.toml"))?;
//! let options = config.import_options();
//! ```

mod file;

pub use file::{FieldsConfig, ImportConfig, LoggingConfig, PluginsConfig, SyncConfig};
