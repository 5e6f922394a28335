//! Plugin synchronization between declared definitions and the live host
//!
//! This module provides:
//! - **import**: Converge host plugins to declared definitions
//! - **export**: Snapshot host plugins into definitions
//! - **report**: The aggregated outcome of an import

mod plugins;
mod report;

pub use plugins::{PluginDefinition, PluginSync};
pub use report::{ImportOptions, ImportReport};
