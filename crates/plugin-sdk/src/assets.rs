//! Script and asset descriptors plugins hand to the kernel.

use serde::Serialize;

/// How a registered script is loaded by the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadMode {
    Async,
    Defer,
    Blocking,
}

impl LoadMode {
    pub fn as_str(self) -> &'static str {
        match self {
            LoadMode::Async => "async",
            LoadMode::Defer => "defer",
            LoadMode::Blocking => "blocking",
        }
    }
}

/// A script a plugin wants loaded on every kiosk page.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptAsset {
    /// Static route identifier the script is served from, e.g. `hmlab.static`.
    pub route: String,
    /// Path below the plugin's static directory, e.g. `scripts/hmlab.js`.
    pub path: String,
    pub load: LoadMode,
}

impl ScriptAsset {
    /// The descriptor as a (route, path, load) triple.
    pub fn descriptor(&self) -> (&str, &str, &'static str) {
        (&self.route, &self.path, self.load.as_str())
    }
}
