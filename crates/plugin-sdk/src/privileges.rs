//! Privilege identifiers shared between the kernel and plugins.
//!
//! Privileges are plain machine names stored per user account. Plugins
//! reference them through these constants; the kernel checks them when
//! guarding blueprints and filtering menus.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const EDIT_WORKSTATION: &str = "edit_workstation";
pub const CREATE_WORKSTATION: &str = "create_workstation";
pub const PREPARE_WORKSTATIONS: &str = "prepare_workstations";
pub const DOWNLOAD_WORKSTATION: &str = "download_workstation";
pub const UPLOAD_WORKSTATION: &str = "upload_workstation";
pub const SYNCHRONIZE: &str = "synchronize";
pub const ENTER_ADMINISTRATION: &str = "enter_administration";

/// The authenticated user as the kernel presents it to plugins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserContext {
    pub id: Uuid,
    pub username: String,
    /// `None` for accounts that predate privilege tracking; such
    /// accounts pass every requirement check.
    pub privileges: Option<HashSet<String>>,
}

impl UserContext {
    /// Whether this user holds the given privilege.
    pub fn fulfills_requirement(&self, privilege: &str) -> bool {
        match &self.privileges {
            Some(privileges) => privileges.contains(privilege),
            None => true,
        }
    }
}
