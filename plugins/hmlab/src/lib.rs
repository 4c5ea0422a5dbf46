//! Stratigraphy studio plugin.
//!
//! Registers the `/hmlab` blueprint (redirect route, studio page, and
//! the matrix analysis endpoint), one menu entry, and the hmlab browser
//! script. The Harris Matrix engine lives in [`matrix`].

pub mod matrix;
mod routes;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use axum::Router;
use tracing::warn;

use kiosk_sdk::assets::{LoadMode, ScriptAsset};
use kiosk_sdk::host::Host;
use kiosk_sdk::menu::{MenuItem, MenuVisibility};
use kiosk_sdk::plugin::{KioskPlugin, PluginAssets, PluginHandle, PluginInfo};
use kiosk_sdk::privileges;

pub const PLUGIN_NAME: &str = "hmlabplugin";
/// Controller module name, also the blueprint's name on the kiosk side.
pub const CONTROLLER_NAME: &str = "hmlab";
pub const URL_PREFIX: &str = "/hmlab";
pub const PLUGIN_VERSION: &str = "0.13";

/// Privileges this plugin knows about, with display labels.
pub const LOCAL_PRIVILEGES: &[(&str, &str)] = &[
    (privileges::EDIT_WORKSTATION, "edit workstation"),
    (privileges::CREATE_WORKSTATION, "create workstation"),
    (privileges::PREPARE_WORKSTATIONS, "prepare workstation"),
    (privileges::DOWNLOAD_WORKSTATION, "download workstation"),
    (privileges::UPLOAD_WORKSTATION, "upload workstation"),
    (privileges::SYNCHRONIZE, "synchronize"),
];

pub struct HmLabPlugin {
    handle: Arc<OnceLock<PluginHandle>>,
}

impl HmLabPlugin {
    pub fn new() -> Self {
        Self {
            handle: Arc::new(OnceLock::new()),
        }
    }
}

impl Default for HmLabPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl KioskPlugin for HmLabPlugin {
    fn info(&self) -> PluginInfo {
        PluginInfo {
            name: PLUGIN_NAME,
            package: CONTROLLER_NAME,
            version: PLUGIN_VERSION,
        }
    }

    fn url_prefix(&self) -> &'static str {
        URL_PREFIX
    }

    fn blueprint_guard(&self) -> Option<&'static str> {
        Some(privileges::DOWNLOAD_WORKSTATION)
    }

    fn assets(&self) -> PluginAssets {
        let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        PluginAssets {
            templates: Some(base.join("templates")),
            static_dir: Some(base.join("static")),
        }
    }

    fn init_app(&self, host: &Host) -> anyhow::Result<Router> {
        Ok(routes::blueprint(host.clone(), Arc::clone(&self.handle)))
    }

    fn bind(&self, handle: PluginHandle) {
        if self.handle.set(handle).is_err() {
            warn!(
                plugin = PLUGIN_NAME,
                "plugin instance registered twice; keeping the first"
            );
        }
    }

    fn register_index(&self) -> Option<String> {
        Some(format!("{URL_PREFIX}/_redirect"))
    }

    fn register_menus(&self) -> Vec<MenuItem> {
        vec![MenuItem {
            name: "stratigraphy studio".to_string(),
            onclick: format!("triggerModule('{CONTROLLER_NAME}.show')"),
            endpoint: URL_PREFIX.to_string(),
            visibility: MenuVisibility::RequiresPrivilege(
                privileges::ENTER_ADMINISTRATION.to_string(),
            ),
            order: "zzz".to_string(),
        }]
    }

    fn register_global_routes(&self) -> Vec<String> {
        vec![format!("{CONTROLLER_NAME}.static")]
    }

    fn register_global_scripts(&self) -> HashMap<String, ScriptAsset> {
        HashMap::from([(
            CONTROLLER_NAME.to_string(),
            ScriptAsset {
                route: format!("{CONTROLLER_NAME}.static"),
                path: "scripts/hmlab.js".to_string(),
                load: LoadMode::Async,
            },
        )])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_info() {
        let plugin = HmLabPlugin::new();
        let info = plugin.info();
        assert_eq!(info.name, "hmlabplugin");
        assert_eq!(info.package, "hmlab");
        assert_eq!(info.version, "0.13");
    }

    #[test]
    fn test_registers_exactly_one_menu_entry() {
        let menus = HmLabPlugin::new().register_menus();
        assert_eq!(menus.len(), 1);
        let entry = &menus[0];
        assert_eq!(entry.name, "stratigraphy studio");
        assert_eq!(entry.endpoint, URL_PREFIX);
        assert_eq!(entry.onclick, "triggerModule('hmlab.show')");
        assert_eq!(entry.order, "zzz");
        assert_eq!(
            entry.visibility,
            MenuVisibility::RequiresPrivilege(privileges::ENTER_ADMINISTRATION.to_string())
        );
    }

    #[test]
    fn test_registers_global_script() {
        let scripts = HmLabPlugin::new().register_global_scripts();
        assert_eq!(scripts.len(), 1);
        let script = scripts.get(CONTROLLER_NAME).unwrap();
        assert_eq!(
            script.descriptor(),
            ("hmlab.static", "scripts/hmlab.js", "async")
        );
    }

    #[test]
    fn test_registers_global_static_route() {
        assert_eq!(
            HmLabPlugin::new().register_global_routes(),
            vec!["hmlab.static"]
        );
    }

    #[test]
    fn test_index_points_at_redirect_route() {
        assert_eq!(
            HmLabPlugin::new().register_index().as_deref(),
            Some("/hmlab/_redirect")
        );
    }

    #[test]
    fn test_bind_keeps_first_handle() {
        let plugin = HmLabPlugin::new();
        let first = PluginHandle::new(plugin.info(), true);
        let second = PluginHandle::new(plugin.info(), false);
        plugin.bind(first);
        plugin.bind(second);
        assert!(plugin.handle.get().unwrap().is_main_index());
    }
}
