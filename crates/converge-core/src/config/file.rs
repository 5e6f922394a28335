//! Parsing for `converge.toml`
//!
//! Every section and key is optional; an empty file yields the defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sync::ImportOptions;
use crate::{Error, Result};

fn default_namespace() -> String {
    "Craft\\".to_string()
}

fn default_suffix() -> String {
    "Plugin".to_string()
}

fn default_level() -> String {
    "info".to_string()
}

/// How plugin handles are derived from class names on export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginsConfig {
    /// Prefix stripped from the class name
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Suffix stripped from the class name
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            suffix: default_suffix(),
        }
    }
}

/// Field export settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldsConfig {
    /// Write each field's storage context into its definition
    #[serde(default)]
    pub include_context: bool,
}

/// Import settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportConfig {
    #[serde(default)]
    pub dry_run: bool,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

/// Synchronizer configuration parsed from converge.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default)]
    pub plugins: PluginsConfig,

    #[serde(default)]
    pub fields: FieldsConfig,

    #[serde(default)]
    pub import: ImportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SyncConfig {
    /// Parse a configuration from TOML content
    ///
    /// # Example
    ///
    /// ```
    /// use converge_core::config::SyncConfig;
    ///
    /// let config = SyncConfig::parse(r#"
    /// [plugins]
    /// namespace = "Acme\\"
    ///
    /// [fields]
    /// include_context = true
    /// "#).unwrap();
    ///
    /// assert_eq!(config.plugins.namespace, "Acme\\");
    /// assert_eq!(config.plugins.suffix, "Plugin");
    /// assert!(config.fields.include_context);
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let config: SyncConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load a configuration file
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigNotFound`] if the file does not exist, or a
    /// parse error if it is not valid.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load a configuration file, falling back to defaults if it is missing
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(Error::ConfigNotFound { .. }) => Ok(Self::default()),
            other => other,
        }
    }

    /// Serialize back to TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Import options derived from the `[import]` section
    pub fn import_options(&self) -> ImportOptions {
        ImportOptions {
            dry_run: self.import.dry_run,
        }
    }
}
