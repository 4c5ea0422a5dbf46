//! Kiosk Plugin SDK
//!
//! Types, traits, and host service handles for kiosk controller plugins.
//! Plugins depend on this crate to declare their blueprint router, menu
//! entries, privileges, and static assets to the kiosk kernel; the
//! kernel drives the [`plugin::KioskPlugin`] lifecycle hooks once at
//! startup.

pub mod assets;
pub mod host;
pub mod http;
pub mod menu;
pub mod plugin;
pub mod privileges;
pub mod theme;

pub mod prelude {
    pub use crate::assets::{LoadMode, ScriptAsset};
    pub use crate::host::{Host, require_full_login};
    pub use crate::http::nocache;
    pub use crate::menu::{MenuItem, MenuVisibility};
    pub use crate::plugin::{KioskPlugin, PluginAssets, PluginHandle, PluginInfo};
    pub use crate::privileges::UserContext;
}
