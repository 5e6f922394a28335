//! Plugin model and the host services that manage plugin lifecycle.

use serde::{Deserialize, Serialize};

use crate::Settings;
use crate::error::Result;

/// A plugin as the host currently knows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plugin {
    /// Registry handle used for every lifecycle call.
    pub handle: String,
    /// Fully-qualified type name of the plugin class, e.g. `Craft\SeoPlugin`.
    pub class_name: String,
    /// Whether the plugin is installed.
    pub is_installed: bool,
    /// Whether the plugin is enabled.
    pub is_enabled: bool,
    /// Current settings attributes.
    #[serde(default)]
    pub settings: Settings,
}

impl Plugin {
    /// Create an uninstalled, disabled plugin with no settings.
    pub fn new(handle: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            class_name: class_name.into(),
            is_installed: false,
            is_enabled: false,
            settings: Settings::new(),
        }
    }

    /// Builder-style installed/enabled flags.
    pub fn with_state(mut self, is_installed: bool, is_enabled: bool) -> Self {
        self.is_installed = is_installed;
        self.is_enabled = is_enabled;
        self
    }

    /// Builder-style settings.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }
}

/// The host's plugin registry.
///
/// Lifecycle calls are keyed by handle and are expected to be idempotent:
/// enabling an enabled plugin or uninstalling an uninstalled one is not an
/// error.
pub trait PluginRegistry {
    /// Look up a plugin by handle, whether or not it is installed.
    fn get_plugin(&self, handle: &str) -> Option<Plugin>;

    /// List plugins known to the host.
    ///
    /// With `include_disabled` set, disabled and uninstalled plugins are
    /// returned as well.
    fn get_plugins(&self, include_disabled: bool) -> Vec<Plugin>;

    fn install_plugin(&self, handle: &str) -> Result<()>;

    fn uninstall_plugin(&self, handle: &str) -> Result<()>;

    fn enable_plugin(&self, handle: &str) -> Result<()>;

    fn disable_plugin(&self, handle: &str) -> Result<()>;

    /// Persist settings for a plugin.
    fn save_plugin_settings(&self, plugin: &Plugin, settings: &Settings) -> Result<()>;
}

/// Applies pending database migrations.
pub trait MigrationRunner {
    /// Run migrations up to the latest version.
    ///
    /// With `None` the host's own migrations run; with a plugin, that
    /// plugin's pending migrations run. Returns `false` on failure, which
    /// may leave migrations partially applied.
    fn run_to_top(&self, plugin: Option<&Plugin>) -> bool;
}

/// Records plugin version info after an update.
pub trait UpdateTracker {
    /// Store the plugin's new version info. Returns `false` on failure.
    fn set_new_plugin_info(&self, plugin: &Plugin) -> bool;
}
