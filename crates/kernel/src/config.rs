//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// Site name shown in page titles (default: "Kiosk").
    pub site_name: String,

    /// Path to the TOML file holding the user accounts (default: ./users.toml).
    pub users_file: PathBuf,

    /// Path to the kernel's template directory (default: ./templates).
    pub templates_dir: PathBuf,

    /// Cookie SameSite policy: "strict", "lax", or "none" (default: "strict").
    pub cookie_same_site: String,

    /// When true, plugin blueprint privilege guards are skipped.
    pub webapp_development: bool,

    /// Name of the plugin the application root redirects into
    /// (default: "hmlabplugin").
    pub main_index_plugin: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let site_name = env::var("SITE_NAME").unwrap_or_else(|_| "Kiosk".to_string());

        let users_file = env::var("USERS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./users.toml"));

        let templates_dir = env::var("TEMPLATES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./templates"));

        let cookie_same_site = env::var("COOKIE_SAME_SITE")
            .unwrap_or_else(|_| "strict".to_string())
            .to_lowercase();

        let webapp_development = env::var("WEBAPP_DEVELOPMENT")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(false);

        let main_index_plugin =
            env::var("MAIN_INDEX_PLUGIN").unwrap_or_else(|_| "hmlabplugin".to_string());

        Ok(Self {
            port,
            site_name,
            users_file,
            templates_dir,
            cookie_same_site,
            webapp_development,
            main_index_plugin,
        })
    }
}
