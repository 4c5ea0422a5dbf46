//! Login and logout.

use anyhow::Context;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{info, warn};

use kiosk_sdk::host::LOGIN_PATH;

use crate::auth::SESSION_USER_ID;
use crate::error::AppError;
use crate::state::AppState;

/// Create the authentication router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(LOGIN_PATH, get(login_form).post(login))
        .route("/user/logout", post(logout))
}

#[derive(Debug, Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn login_form(State(state): State<AppState>) -> Result<Response, AppError> {
    Ok(Html(render_login_page(&state, None)?).into_response())
}

async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let Some(user_id) = state.users().verify_login(&form.username, &form.password) else {
        warn!(username = %form.username, "failed login attempt");
        let page = render_login_page(&state, Some("Wrong username or password."))?;
        return Ok((StatusCode::UNAUTHORIZED, Html(page)).into_response());
    };

    // Rotate the session id on privilege change.
    session
        .cycle_id()
        .await
        .context("failed to cycle session id")?;
    session
        .insert(SESSION_USER_ID, user_id)
        .await
        .context("failed to store session user")?;

    info!(username = %form.username, "user logged in");
    Ok(Redirect::to("/").into_response())
}

async fn logout(session: Session) -> Result<Response, AppError> {
    session.flush().await.context("failed to flush session")?;
    Ok(Redirect::to(LOGIN_PATH).into_response())
}

fn render_login_page(state: &AppState, error: Option<&str>) -> Result<String, AppError> {
    let mut context = tera::Context::new();
    context.insert("site_name", &state.config().site_name);
    context.insert("error", &error);

    match state.theme().tera().render("user/login.html", &context) {
        Ok(html) => Ok(html),
        Err(e) => {
            warn!(error = %e, "login template unavailable, using fallback");
            Ok(fallback_login_page(error))
        }
    }
}

fn fallback_login_page(error: Option<&str>) -> String {
    let notice = error
        .map(|e| format!("<p class=\"error\">{e}</p>"))
        .unwrap_or_default();
    format!(
        "<!DOCTYPE html><html><body><h1>Log in</h1>{notice}\
         <form method=\"post\" action=\"{LOGIN_PATH}\">\
         <input name=\"username\" autocomplete=\"username\">\
         <input name=\"password\" type=\"password\" autocomplete=\"current-password\">\
         <button type=\"submit\">Log in</button></form></body></html>"
    )
}
