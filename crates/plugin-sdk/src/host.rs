//! Host services handed to plugins during initialization.

use std::sync::Arc;

use async_trait::async_trait;
use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::Session;

use crate::privileges::UserContext;
use crate::theme::ThemeEngine;

/// Path of the kernel's login form, used when a route requires a session.
pub const LOGIN_PATH: &str = "/user/login";

/// Session-backed user lookup, implemented by the kernel's user store.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve the fully authenticated user behind a session, if any.
    async fn current_user(&self, session: &Session) -> Option<UserContext>;
}

/// Handle on the kernel services a plugin may use from its handlers.
#[derive(Clone)]
pub struct Host {
    pub theme: Arc<ThemeEngine>,
    pub auth: Arc<dyn AuthService>,
    pub site_name: String,
    /// True when the kernel runs with the `webapp_development` option
    /// set; the kernel then skips blueprint privilege guards.
    pub dev_mode: bool,
}

/// Require a fully authenticated session, or redirect to the login page.
pub async fn require_full_login(host: &Host, session: &Session) -> Result<UserContext, Response> {
    match host.auth.current_user(session).await {
        Some(user) => Ok(user),
        None => Err(Redirect::to(LOGIN_PATH).into_response()),
    }
}
