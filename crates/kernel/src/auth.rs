//! User accounts and session authentication.
//!
//! Accounts live in a TOML file read once at startup; the kiosk has no
//! database. Passwords are stored as argon2 PHC strings.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use argon2::password_hash::{PasswordHash, SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use async_trait::async_trait;
use serde::Deserialize;
use tower_sessions::Session;
use uuid::Uuid;

use kiosk_sdk::host::AuthService;
use kiosk_sdk::privileges::UserContext;

/// Session key for the authenticated user id.
pub const SESSION_USER_ID: &str = "user_id";

/// One account as it appears in the users file.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub username: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    /// Omitted for legacy accounts without privilege tracking.
    #[serde(default)]
    pub privileges: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct UsersFile {
    #[serde(default)]
    users: Vec<UserRecord>,
}

#[derive(Debug)]
struct StoredUser {
    username: String,
    password_hash: String,
    privileges: Option<HashSet<String>>,
}

/// In-memory user store loaded once at startup.
#[derive(Debug)]
pub struct UserStore {
    by_id: HashMap<Uuid, StoredUser>,
    by_name: HashMap<String, Uuid>,
}

impl UserStore {
    /// Load accounts from a TOML users file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read users file {}", path.display()))?;
        let parsed: UsersFile = toml::from_str(&raw)
            .with_context(|| format!("failed to parse users file {}", path.display()))?;
        Ok(Self::from_records(parsed.users))
    }

    /// Build a store directly from records (used by tests).
    pub fn from_records(records: Vec<UserRecord>) -> Self {
        let mut by_id = HashMap::new();
        let mut by_name = HashMap::new();
        for record in records {
            let id = Uuid::now_v7();
            by_name.insert(record.username.clone(), id);
            by_id.insert(
                id,
                StoredUser {
                    username: record.username,
                    password_hash: record.password_hash,
                    privileges: record
                        .privileges
                        .map(|p| p.into_iter().collect::<HashSet<String>>()),
                },
            );
        }
        Self { by_id, by_name }
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Verify a username/password pair, returning the user id on success.
    pub fn verify_login(&self, username: &str, password: &str) -> Option<Uuid> {
        let id = self.by_name.get(username)?;
        let user = self.by_id.get(id)?;
        let parsed = PasswordHash::new(&user.password_hash).ok()?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .ok()?;
        Some(*id)
    }

    pub fn user_context(&self, id: Uuid) -> Option<UserContext> {
        let user = self.by_id.get(&id)?;
        Some(UserContext {
            id,
            username: user.username.clone(),
            privileges: user.privileges.clone(),
        })
    }
}

#[async_trait]
impl AuthService for UserStore {
    async fn current_user(&self, session: &Session) -> Option<UserContext> {
        let user_id: Option<Uuid> = session.get(SESSION_USER_ID).await.ok().flatten();
        self.user_context(user_id?)
    }
}

/// Hash a password for a users-file entry.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("failed to hash password: {e}"))?
        .to_string())
}
