//! [`FakeHost`]: an in-memory host that records every call.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashSet};

use converge_host::{
    Error, MigrationRunner, Plugin, PluginRegistry, Result, Settings, UpdateTracker,
};

/// A single call received by [`FakeHost`], in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Install(String),
    Uninstall(String),
    Enable(String),
    Disable(String),
    SaveSettings(String),
    /// `None` is the host-wide migration run.
    RunToTop(Option<String>),
    SetPluginInfo(String),
}

impl Call {
    /// Whether this call touches an individual plugin.
    pub fn is_plugin_call(&self) -> bool {
        !matches!(self, Call::RunToTop(None))
    }
}

/// Plugin registry, migration runner and update tracker backed by a map.
///
/// Behaves like a well-mannered host: install also enables, uninstall also
/// disables, and toggles are idempotent. Enabling an uninstalled plugin is
/// rejected. Individual operations can be set up to fail.
#[derive(Debug)]
pub struct FakeHost {
    plugins: RefCell<BTreeMap<String, Plugin>>,
    calls: RefCell<Vec<Call>>,
    failing: HashSet<(String, String)>,
    host_migrations_ok: Cell<bool>,
    plugin_migrations_ok: Cell<bool>,
    plugin_info_ok: Cell<bool>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            plugins: RefCell::new(BTreeMap::new()),
            calls: RefCell::new(Vec::new()),
            failing: HashSet::new(),
            host_migrations_ok: Cell::new(true),
            plugin_migrations_ok: Cell::new(true),
            plugin_info_ok: Cell::new(true),
        }
    }

    /// Register a plugin in its given state.
    pub fn with_plugin(self, plugin: Plugin) -> Self {
        self.plugins
            .borrow_mut()
            .insert(plugin.handle.clone(), plugin);
        self
    }

    /// Make `operation` (`install`, `uninstall`, `enable`, `disable` or
    /// `save`) fail for `handle`.
    pub fn failing_on(mut self, operation: &str, handle: &str) -> Self {
        self.failing
            .insert((operation.to_string(), handle.to_string()));
        self
    }

    /// Make the host-wide migration run report failure.
    pub fn failing_host_migrations(self) -> Self {
        self.host_migrations_ok.set(false);
        self
    }

    /// Make every per-plugin migration run report failure.
    pub fn failing_plugin_migrations(self) -> Self {
        self.plugin_migrations_ok.set(false);
        self
    }

    /// Make recording new plugin info report failure.
    pub fn failing_plugin_info(self) -> Self {
        self.plugin_info_ok.set(false);
        self
    }

    /// Current state of a plugin.
    pub fn plugin(&self, handle: &str) -> Option<Plugin> {
        self.plugins.borrow().get(handle).cloned()
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Calls that touched an individual plugin.
    pub fn plugin_calls(&self) -> Vec<Call> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.is_plugin_call())
            .cloned()
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn check(&self, operation: &str, handle: &str) -> Result<()> {
        if self
            .failing
            .contains(&(operation.to_string(), handle.to_string()))
        {
            return Err(Error::operation_failed(operation, handle, "rejected by host"));
        }
        Ok(())
    }

    fn update<F>(&self, handle: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut Plugin) -> Result<()>,
    {
        let mut plugins = self.plugins.borrow_mut();
        let plugin = plugins
            .get_mut(handle)
            .ok_or_else(|| Error::UnknownPlugin(handle.to_string()))?;
        f(plugin)
    }
}

impl PluginRegistry for FakeHost {
    fn get_plugin(&self, handle: &str) -> Option<Plugin> {
        self.plugin(handle)
    }

    fn get_plugins(&self, include_disabled: bool) -> Vec<Plugin> {
        self.plugins
            .borrow()
            .values()
            .filter(|p| include_disabled || (p.is_installed && p.is_enabled))
            .cloned()
            .collect()
    }

    fn install_plugin(&self, handle: &str) -> Result<()> {
        self.record(Call::Install(handle.to_string()));
        self.check("install", handle)?;
        self.update(handle, |p| {
            p.is_installed = true;
            p.is_enabled = true;
            Ok(())
        })
    }

    fn uninstall_plugin(&self, handle: &str) -> Result<()> {
        self.record(Call::Uninstall(handle.to_string()));
        self.check("uninstall", handle)?;
        self.update(handle, |p| {
            p.is_installed = false;
            p.is_enabled = false;
            Ok(())
        })
    }

    fn enable_plugin(&self, handle: &str) -> Result<()> {
        self.record(Call::Enable(handle.to_string()));
        self.check("enable", handle)?;
        self.update(handle, |p| {
            if !p.is_installed {
                return Err(Error::operation_failed("enable", handle, "not installed"));
            }
            p.is_enabled = true;
            Ok(())
        })
    }

    fn disable_plugin(&self, handle: &str) -> Result<()> {
        self.record(Call::Disable(handle.to_string()));
        self.check("disable", handle)?;
        self.update(handle, |p| {
            p.is_enabled = false;
            Ok(())
        })
    }

    fn save_plugin_settings(&self, plugin: &Plugin, settings: &Settings) -> Result<()> {
        self.record(Call::SaveSettings(plugin.handle.clone()));
        self.check("save", &plugin.handle)?;
        self.update(&plugin.handle, |p| {
            p.settings = settings.clone();
            Ok(())
        })
    }
}

impl MigrationRunner for FakeHost {
    fn run_to_top(&self, plugin: Option<&Plugin>) -> bool {
        self.record(Call::RunToTop(plugin.map(|p| p.handle.clone())));
        match plugin {
            None => self.host_migrations_ok.get(),
            Some(_) => self.plugin_migrations_ok.get(),
        }
    }
}

impl UpdateTracker for FakeHost {
    fn set_new_plugin_info(&self, plugin: &Plugin) -> bool {
        self.record(Call::SetPluginInfo(plugin.handle.clone()));
        self.plugin_info_ok.get()
    }
}
