//! The plugin lifecycle contract.
//!
//! The kernel calls each hook exactly once per plugin during startup,
//! in declaration order: [`KioskPlugin::info`], [`KioskPlugin::init_app`],
//! [`KioskPlugin::bind`], [`KioskPlugin::register_index`],
//! [`KioskPlugin::register_menus`], [`KioskPlugin::register_global_routes`],
//! [`KioskPlugin::register_global_scripts`], and finally
//! [`KioskPlugin::all_plugins_ready`] once every plugin is loaded.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use serde::Serialize;

use crate::assets::ScriptAsset;
use crate::host::Host;
use crate::menu::MenuItem;

/// Identity of a plugin as it reports itself to the kernel.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PluginInfo {
    /// Registered plugin name, e.g. `hmlabplugin`.
    pub name: &'static str,
    /// Controller module name, e.g. `hmlab`.
    pub package: &'static str,
    pub version: &'static str,
}

/// What the kernel knows about a loaded plugin, exposed to templates.
#[derive(Debug, Clone, Serialize)]
pub struct PluginDescriptor {
    pub name: String,
    pub package: String,
    pub version: String,
    pub is_main_index: bool,
}

/// Host-side instance handle, created once at startup and held for the
/// lifetime of the process. The kernel hands a clone to the plugin via
/// [`KioskPlugin::bind`]; the plugin stores it in a write-once cell.
#[derive(Debug, Clone)]
pub struct PluginHandle {
    inner: Arc<PluginInstance>,
}

#[derive(Debug)]
struct PluginInstance {
    info: PluginInfo,
    is_main_index: bool,
}

impl PluginHandle {
    pub fn new(info: PluginInfo, is_main_index: bool) -> Self {
        Self {
            inner: Arc::new(PluginInstance {
                info,
                is_main_index,
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.inner.info.name
    }

    pub fn package(&self) -> &'static str {
        self.inner.info.package
    }

    pub fn version(&self) -> &'static str {
        self.inner.info.version
    }

    /// Whether this plugin serves the application's root path.
    pub fn is_main_index(&self) -> bool {
        self.inner.is_main_index
    }

    pub fn descriptor(&self) -> PluginDescriptor {
        PluginDescriptor {
            name: self.name().to_string(),
            package: self.package().to_string(),
            version: self.version().to_string(),
            is_main_index: self.is_main_index(),
        }
    }
}

/// Filesystem assets a plugin ships next to its crate.
#[derive(Debug, Clone, Default)]
pub struct PluginAssets {
    /// Directory of Tera templates merged into the kernel's theme engine.
    pub templates: Option<PathBuf>,
    /// Directory served under `/<prefix>/static/`.
    pub static_dir: Option<PathBuf>,
}

/// A kiosk controller plugin.
pub trait KioskPlugin: Send + Sync + 'static {
    fn info(&self) -> PluginInfo;

    /// URL prefix the blueprint router is nested under, e.g. `/hmlab`.
    fn url_prefix(&self) -> &'static str;

    /// Privilege required for every blueprint route. The kernel skips
    /// the guard when running in development mode.
    fn blueprint_guard(&self) -> Option<&'static str> {
        None
    }

    fn assets(&self) -> PluginAssets {
        PluginAssets::default()
    }

    /// Build the blueprint router. Handlers capture what they need from
    /// the [`Host`]; the returned router carries its own state.
    fn init_app(&self, host: &Host) -> anyhow::Result<Router>;

    /// Receive the host-side instance handle. Called exactly once.
    fn bind(&self, handle: PluginHandle);

    /// Path the application root should redirect to when this plugin is
    /// the configured main index plugin.
    fn register_index(&self) -> Option<String> {
        None
    }

    fn register_menus(&self) -> Vec<MenuItem> {
        Vec::new()
    }

    /// Static route identifiers the plugin serves globally, e.g.
    /// `hmlab.static`.
    fn register_global_routes(&self) -> Vec<String> {
        Vec::new()
    }

    /// Scripts loaded on every kiosk page, keyed by module name.
    fn register_global_scripts(&self) -> HashMap<String, ScriptAsset> {
        HashMap::new()
    }

    /// Called after every plugin finished loading.
    fn all_plugins_ready(&self, handle: &PluginHandle) {
        tracing::info!(
            plugin = handle.name(),
            version = handle.version(),
            main_index = handle.is_main_index(),
            "plugin ready"
        );
    }
}
