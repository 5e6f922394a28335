//! Plugin lifecycle reconciliation
//!
//! `PluginSync` converges the host's plugins to a set of declared
//! definitions (import) and snapshots the host's plugins back into that
//! declarative shape (export).

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, warn};

use converge_host::{MigrationRunner, Plugin, PluginRegistry, Settings, UpdateTracker};

use crate::config::PluginsConfig;
use crate::{Error, Result};

use super::report::{ImportOptions, ImportReport};

/// Declared state of a single plugin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginDefinition {
    pub is_installed: bool,
    pub is_enabled: bool,
    /// Settings to save. The key's presence, even with an empty map or a
    /// null, is what triggers a save on import.
    #[serde(
        default,
        deserialize_with = "present_settings",
        skip_serializing_if = "Option::is_none"
    )]
    pub settings: Option<Settings>,
}

/// Only called when the key is present; a null reads as empty settings.
fn present_settings<'de, D>(deserializer: D) -> std::result::Result<Option<Settings>, D::Error>
where
    D: Deserializer<'de>,
{
    let settings = Option::<Settings>::deserialize(deserializer)?;
    Ok(Some(settings.unwrap_or_default()))
}

impl PluginDefinition {
    /// Snapshot a live plugin
    pub fn from_plugin(plugin: &Plugin) -> Self {
        Self {
            is_installed: plugin.is_installed,
            is_enabled: plugin.is_enabled,
            settings: Some(plugin.settings.clone()),
        }
    }
}

/// Derives portable plugin handles from class names.
#[derive(Debug, Clone)]
struct HandlePattern(Regex);

impl HandlePattern {
    fn new(config: &PluginsConfig) -> Result<Self> {
        let pattern = format!(
            "^{}(.*?){}$",
            regex::escape(&config.namespace),
            regex::escape(&config.suffix)
        );
        Ok(Self(Regex::new(&pattern)?))
    }

    /// `Craft\SeoPlugin` becomes `Seo`; anything not matching is kept as is.
    fn handle_for(&self, class_name: &str) -> String {
        self.0
            .captures(class_name)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| class_name.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Install,
    Uninstall,
    Enable,
    Disable,
    SaveSettings,
}

impl Operation {
    fn planned(self, handle: &str) -> String {
        match self {
            Operation::Install => format!("install plugin {}", handle),
            Operation::Uninstall => format!("uninstall plugin {}", handle),
            Operation::Enable => format!("enable plugin {}", handle),
            Operation::Disable => format!("disable plugin {}", handle),
            Operation::SaveSettings => format!("save settings for plugin {}", handle),
        }
    }

    fn done(self, handle: &str) -> String {
        match self {
            Operation::Install => format!("Installed plugin {}", handle),
            Operation::Uninstall => format!("Uninstalled plugin {}", handle),
            Operation::Enable => format!("Enabled plugin {}", handle),
            Operation::Disable => format!("Disabled plugin {}", handle),
            Operation::SaveSettings => format!("Saved settings for plugin {}", handle),
        }
    }
}

/// Reconciler for plugins
///
/// All host access goes through the injected services, so any of them can be
/// swapped for a test double.
pub struct PluginSync<'h> {
    registry: &'h dyn PluginRegistry,
    migrations: &'h dyn MigrationRunner,
    updates: &'h dyn UpdateTracker,
    handles: HandlePattern,
}

impl<'h> PluginSync<'h> {
    /// Create a new PluginSync
    ///
    /// # Errors
    ///
    /// Returns an error if the configured namespace and suffix cannot be
    /// compiled into a handle pattern.
    pub fn new(
        registry: &'h dyn PluginRegistry,
        migrations: &'h dyn MigrationRunner,
        updates: &'h dyn UpdateTracker,
        config: &PluginsConfig,
    ) -> Result<Self> {
        Ok(Self {
            registry,
            migrations,
            updates,
            handles: HandlePattern::new(config)?,
        })
    }

    /// Apply plugin definitions to the host
    ///
    /// Definitions are applied in iteration order.
    ///
    /// # Errors
    ///
    /// Returns an error only for migration failures, which abort the whole
    /// import. Everything else is recorded in the returned report.
    pub fn import<'d, I, K>(&self, definitions: I) -> Result<ImportReport>
    where
        I: IntoIterator<Item = (K, &'d PluginDefinition)>,
        K: AsRef<str>,
    {
        self.import_with_options(definitions, &ImportOptions::default())
    }

    /// Apply plugin definitions to the host with options
    ///
    /// When `options.dry_run` is true, nothing is changed and no migrations
    /// run; the report lists what would have been done.
    pub fn import_with_options<'d, I, K>(
        &self,
        definitions: I,
        options: &ImportOptions,
    ) -> Result<ImportReport>
    where
        I: IntoIterator<Item = (K, &'d PluginDefinition)>,
        K: AsRef<str>,
    {
        let mut report = ImportReport::new();

        info!("Updating host");
        if options.dry_run {
            report.add_action("[dry-run] Would run pending host migrations");
        } else if !self.migrations.run_to_top(None) {
            return Err(Error::HostMigrationFailed);
        }

        info!("Importing plugins");
        for (handle, definition) in definitions {
            let handle = handle.as_ref();
            info!(handle, "Applying definitions");

            match self.apply(handle, definition, options, &mut report) {
                Ok(()) => {}
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!(handle, error = %e, "Failed to apply plugin definition");
                    report.add_error(e.to_string());
                }
            }
        }

        Ok(report)
    }

    /// Snapshot every plugin the host knows about, installed or not
    ///
    /// The result is keyed by the handle derived from each plugin's class
    /// name and is therefore sorted by handle.
    pub fn export(&self) -> BTreeMap<String, PluginDefinition> {
        info!("Exporting plugins");

        self.registry
            .get_plugins(true)
            .iter()
            .map(|plugin| {
                (
                    self.handles.handle_for(&plugin.class_name),
                    PluginDefinition::from_plugin(plugin),
                )
            })
            .collect()
    }

    fn apply(
        &self,
        handle: &str,
        definition: &PluginDefinition,
        options: &ImportOptions,
        report: &mut ImportReport,
    ) -> Result<()> {
        let plugin = self
            .registry
            .get_plugin(handle)
            .ok_or_else(|| Error::PluginNotFound {
                handle: handle.to_string(),
            })?;

        if !definition.is_installed {
            if plugin.is_installed {
                self.perform(Operation::Uninstall, handle, options, report, || {
                    self.registry.uninstall_plugin(handle)
                })?;
            } else {
                debug!(handle, "Plugin already uninstalled");
            }
            return Ok(());
        }

        let is_new = !plugin.is_installed;
        if is_new {
            self.perform(Operation::Install, handle, options, report, || {
                self.registry.install_plugin(handle)
            })?;
        }

        if definition.is_enabled {
            self.perform(Operation::Enable, handle, options, report, || {
                self.registry.enable_plugin(handle)
            })?;
        } else {
            self.perform(Operation::Disable, handle, options, report, || {
                self.registry.disable_plugin(handle)
            })?;
        }

        if !is_new && definition.is_enabled {
            self.run_migrations(&plugin, options, report)?;
        }

        if let Some(settings) = &definition.settings {
            self.perform(Operation::SaveSettings, handle, options, report, || {
                self.registry.save_plugin_settings(&plugin, settings)
            })?;
        }

        Ok(())
    }

    fn perform<F>(
        &self,
        operation: Operation,
        handle: &str,
        options: &ImportOptions,
        report: &mut ImportReport,
        op: F,
    ) -> Result<()>
    where
        F: FnOnce() -> converge_host::Result<()>,
    {
        if options.dry_run {
            report.add_action(format!("[dry-run] Would {}", operation.planned(handle)));
            return Ok(());
        }

        debug!(handle, ?operation, "Running lifecycle operation");
        op()?;
        report.add_action(operation.done(handle));
        Ok(())
    }

    fn run_migrations(
        &self,
        plugin: &Plugin,
        options: &ImportOptions,
        report: &mut ImportReport,
    ) -> Result<()> {
        let handle = plugin.handle.as_str();
        if options.dry_run {
            report.add_action(format!(
                "[dry-run] Would run pending migrations for plugin {}",
                handle
            ));
            return Ok(());
        }

        debug!(handle, "Running plugin migrations");
        if !self.migrations.run_to_top(Some(plugin)) {
            return Err(Error::PluginMigrationFailed {
                handle: handle.to_string(),
            });
        }
        if !self.updates.set_new_plugin_info(plugin) {
            return Err(Error::PluginInfoUpdateFailed {
                handle: handle.to_string(),
            });
        }
        report.add_action(format!("Ran migrations for plugin {}", handle));
        Ok(())
    }
}
