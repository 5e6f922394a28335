//! Definition documents
//!
//! A `SchemaDocument` is the on-disk form of exported definitions:
//!
//! ```yaml
//! plugins:
//!   Seo:
//!     isInstalled: true
//!     isEnabled: true
//!     settings: {}
//! fields:
//!   Content:
//!     body:
//!       name: Body
//!       type: RichText
//! ```
//!
//! YAML is the default format; files ending in `.json` are read and written
//! as JSON. Entries keep the order they appear in the file.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Result;
use crate::fields::FieldDefinition;
use crate::sync::PluginDefinition;

/// Serialization format of a definition document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }
}

/// Field definitions of one field group, keyed by field handle.
pub type FieldGroupDefinitions = IndexMap<String, FieldDefinition>;

/// Declared definitions for every managed entity class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Plugin definitions keyed by handle, in import order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub plugins: IndexMap<String, PluginDefinition>,

    /// Field definitions keyed by group name, then by field handle.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub fields: IndexMap<String, FieldGroupDefinitions>,
}

impl SchemaDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a document, choosing the format by extension.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading definitions");
        let content = fs::read_to_string(path)?;
        match DocumentFormat::from_path(path) {
            DocumentFormat::Json => Self::from_json(&content),
            DocumentFormat::Yaml => Self::from_yaml(&content),
        }
    }

    /// Write a document, choosing the format by extension.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "Saving definitions");
        let content = match DocumentFormat::from_path(path) {
            DocumentFormat::Json => self.to_json()?,
            DocumentFormat::Yaml => self.to_yaml()?,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, content)?;
        Ok(())
    }
}
