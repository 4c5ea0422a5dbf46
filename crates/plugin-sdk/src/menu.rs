//! Menu entry descriptors registered by plugins.

use serde::Serialize;

use crate::privileges::UserContext;

/// When a menu entry is shown to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "privilege")]
pub enum MenuVisibility {
    Always,
    RequiresPrivilege(String),
}

/// One entry in the kiosk menu, as a plugin declares it.
///
/// Constructed once during menu registration and owned by the kernel's
/// menu registry afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct MenuItem {
    /// Display label.
    pub name: String,
    /// Browser-side handler reference, e.g. `triggerModule('hmlab.show')`.
    pub onclick: String,
    /// Path of the route the entry points at.
    pub endpoint: String,
    pub visibility: MenuVisibility,
    /// Lexicographic sort hint; `"zzz"` sorts last.
    pub order: String,
}

impl MenuItem {
    /// Whether the entry is shown for the given user context.
    ///
    /// Entries default to visible when no user context is available or
    /// when the context carries no privilege information.
    pub fn visible_for(&self, user: Option<&UserContext>) -> bool {
        match &self.visibility {
            MenuVisibility::Always => true,
            MenuVisibility::RequiresPrivilege(privilege) => match user {
                Some(user) => user.fulfills_requirement(privilege),
                None => true,
            },
        }
    }
}
