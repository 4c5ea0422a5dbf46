//! Drives the plugin startup hooks, each exactly once per plugin.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tracing::info;

use kiosk_sdk::assets::ScriptAsset;
use kiosk_sdk::host::Host;
use kiosk_sdk::plugin::{KioskPlugin, PluginHandle};

use crate::menu::MenuRegistry;
use crate::middleware::guard_routes;
use crate::routes::static_files;

struct RegisteredPlugin {
    plugin: Arc<dyn KioskPlugin>,
    handle: PluginHandle,
}

/// A globally registered script, resolved to the URL it is served from.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PageScript {
    pub module: String,
    pub url: String,
    pub load: &'static str,
}

/// Everything the kernel collected while loading plugins.
pub struct PluginRegistry {
    plugins: Vec<RegisteredPlugin>,
    routers: Vec<Router>,
    menus: MenuRegistry,
    global_routes: Vec<String>,
    global_scripts: HashMap<String, ScriptAsset>,
    page_scripts: Vec<PageScript>,
    index_redirect: Option<String>,
}

impl PluginRegistry {
    /// Run the startup hooks for every plugin, in order: `info`,
    /// `init_app` (guarded unless in development mode), `bind`,
    /// `register_index`, `register_menus`, `register_global_routes`,
    /// `register_global_scripts`, and finally `all_plugins_ready` once
    /// every plugin is loaded.
    pub fn initialize(
        plugins: Vec<Arc<dyn KioskPlugin>>,
        host: &Host,
        main_index_plugin: &str,
    ) -> Result<Self> {
        let mut registry = Self {
            plugins: Vec::new(),
            routers: Vec::new(),
            menus: MenuRegistry::new(),
            global_routes: Vec::new(),
            global_scripts: HashMap::new(),
            page_scripts: Vec::new(),
            index_redirect: None,
        };

        for plugin in plugins {
            let info = plugin.info();
            let is_main_index =
                info.name == main_index_plugin || info.package == main_index_plugin;
            let handle = PluginHandle::new(info, is_main_index);

            let mut blueprint = plugin
                .init_app(host)
                .with_context(|| format!("plugin {} failed to initialize", handle.name()))?;
            if !host.dev_mode
                && let Some(privilege) = plugin.blueprint_guard()
            {
                blueprint = guard_routes(blueprint, Arc::clone(&host.auth), privilege);
            }
            let mut router = Router::new().nest(plugin.url_prefix(), blueprint);
            if let Some(static_dir) = plugin.assets().static_dir {
                router = router.merge(static_files::plugin_static_router(
                    plugin.url_prefix(),
                    static_dir,
                ));
            }
            registry.routers.push(router);

            plugin.bind(handle.clone());

            if is_main_index && let Some(target) = plugin.register_index() {
                registry.index_redirect = Some(target);
            }
            registry.menus.register(plugin.register_menus());
            registry.global_routes.extend(plugin.register_global_routes());
            for (module, asset) in plugin.register_global_scripts() {
                registry.page_scripts.push(PageScript {
                    module: module.clone(),
                    url: format!("{}/static/{}", plugin.url_prefix(), asset.path),
                    load: asset.load.as_str(),
                });
                registry.global_scripts.insert(module, asset);
            }

            info!(
                plugin = handle.name(),
                version = handle.version(),
                main_index = is_main_index,
                "controller plugin loaded"
            );
            registry.plugins.push(RegisteredPlugin { plugin, handle });
        }

        registry.menus.finish();
        for entry in &registry.plugins {
            entry.plugin.all_plugins_ready(&entry.handle);
        }

        Ok(registry)
    }

    pub fn routers(&self) -> &[Router] {
        &self.routers
    }

    pub fn menus(&self) -> &MenuRegistry {
        &self.menus
    }

    pub fn global_routes(&self) -> &[String] {
        &self.global_routes
    }

    pub fn global_scripts(&self) -> &HashMap<String, ScriptAsset> {
        &self.global_scripts
    }

    /// Scripts to include on every kiosk page, with resolved URLs.
    pub fn page_scripts(&self) -> &[PageScript] {
        &self.page_scripts
    }

    /// Where the application root redirects, if a main index plugin
    /// registered one.
    pub fn index_redirect(&self) -> Option<&str> {
        self.index_redirect.as_deref()
    }

    /// Look up a plugin handle by plugin or controller name.
    pub fn handle_for(&self, name: &str) -> Option<&PluginHandle> {
        self.plugins
            .iter()
            .map(|entry| &entry.handle)
            .find(|handle| handle.name() == name || handle.package() == name)
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
