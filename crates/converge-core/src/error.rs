//! Error types for converge-core

use std::path::PathBuf;

/// Result type for converge-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in converge-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Host-wide migrations failed before any plugin was touched
    #[error("There was a problem updating the host database")]
    HostMigrationFailed,

    /// A plugin's migrations failed part-way through an import
    #[error("There was a problem running migrations for plugin {handle}")]
    PluginMigrationFailed { handle: String },

    /// Migrations succeeded but the new plugin info could not be recorded
    #[error(
        "Migrations for plugin {handle} succeeded, but there was a problem recording the new plugin info"
    )]
    PluginInfoUpdateFailed { handle: String },

    /// Declared plugin is not known to the host
    #[error("Plugin {handle} could not be found, make sure its files are installed")]
    PluginNotFound { handle: String },

    /// Reference token kind is not one of section, group or folder
    #[error("Unknown source kind: {0}")]
    UnknownSourceKind(String),

    /// Namespace or suffix could not be compiled into a handle pattern
    #[error("Invalid plugin handle format: {0}")]
    InvalidHandleFormat(#[from] regex::Error),

    /// Configuration file not found at expected path
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    // Transparent wrappers for underlying crate errors
    /// Lifecycle operation rejected by the host
    #[error(transparent)]
    Host(#[from] converge_host::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}

impl Error {
    /// Whether this error aborts a whole import rather than a single entity.
    ///
    /// Migrations may be left partially applied, so any migration failure
    /// stops the import outright.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::HostMigrationFailed
                | Error::PluginMigrationFailed { .. }
                | Error::PluginInfoUpdateFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_errors_are_fatal() {
        assert!(Error::HostMigrationFailed.is_fatal());
        assert!(
            Error::PluginMigrationFailed {
                handle: "seo".into()
            }
            .is_fatal()
        );
        assert!(
            Error::PluginInfoUpdateFailed {
                handle: "seo".into()
            }
            .is_fatal()
        );
    }

    #[test]
    fn test_entity_errors_are_not_fatal() {
        assert!(
            !Error::PluginNotFound {
                handle: "seo".into()
            }
            .is_fatal()
        );
        let host = converge_host::Error::operation_failed("install", "seo", "boom");
        assert!(!Error::from(host).is_fatal());
    }

    #[test]
    fn test_plugin_not_found_mentions_handle() {
        let err = Error::PluginNotFound {
            handle: "ghost".into(),
        };
        assert!(err.to_string().contains("ghost"));
    }
}
