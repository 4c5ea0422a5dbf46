//! Shared application state.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;

use kiosk_sdk::host::{AuthService, Host};
use kiosk_sdk::plugin::KioskPlugin;
use kiosk_sdk::theme::ThemeEngine;

use crate::auth::UserStore;
use crate::config::Config;
use crate::plugin::PluginRegistry;
use crate::routes;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    theme: Arc<ThemeEngine>,
    users: Arc<UserStore>,
    plugins: PluginRegistry,
}

impl AppState {
    /// Load users from the configured file and bring up all plugins.
    pub fn new(config: Config, plugins: Vec<Arc<dyn KioskPlugin>>) -> Result<Self> {
        let users = Arc::new(
            UserStore::from_file(&config.users_file)
                .with_context(|| format!("loading users from {}", config.users_file.display()))?,
        );
        Self::with_users(config, plugins, users)
    }

    /// Like [`AppState::new`] but with an already-built user store.
    pub fn with_users(
        config: Config,
        plugins: Vec<Arc<dyn KioskPlugin>>,
        users: Arc<UserStore>,
    ) -> Result<Self> {
        let mut template_dirs: Vec<PathBuf> = vec![config.templates_dir.clone()];
        for plugin in &plugins {
            if let Some(dir) = plugin.assets().templates {
                template_dirs.push(dir);
            }
        }
        let theme = Arc::new(ThemeEngine::new(&template_dirs)?);

        let host = Host {
            theme: Arc::clone(&theme),
            auth: Arc::clone(&users) as Arc<dyn AuthService>,
            site_name: config.site_name.clone(),
            dev_mode: config.webapp_development,
        };
        let registry = PluginRegistry::initialize(plugins, &host, &config.main_index_plugin)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                theme,
                users,
                plugins: registry,
            }),
        })
    }

    /// Compose the full application router. Session and trace layers are
    /// applied by the caller so they wrap every route, plugin routes
    /// included.
    pub fn router(&self) -> Router {
        let kernel = Router::new()
            .merge(routes::front::router())
            .merge(routes::auth::router())
            .with_state(self.clone());

        let mut app = kernel;
        for plugin_router in self.inner.plugins.routers() {
            app = app.merge(plugin_router.clone());
        }
        app
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn theme(&self) -> &ThemeEngine {
        &self.inner.theme
    }

    pub fn users(&self) -> &UserStore {
        &self.inner.users
    }

    pub fn plugins(&self) -> &PluginRegistry {
        &self.inner.plugins
    }
}
