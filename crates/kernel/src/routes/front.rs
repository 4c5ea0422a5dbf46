//! Application root.

use axum::{
    Router,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use tower_sessions::Session;

use kiosk_sdk::host::AuthService;

use crate::error::AppError;
use crate::state::AppState;

/// Create the front page router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(front_page))
}

/// Front page handler.
///
/// When a main index plugin registered an index route, the root
/// redirects there. Otherwise the kiosk menu page is rendered.
async fn front_page(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    if let Some(target) = state.plugins().index_redirect() {
        return Ok(Redirect::to(target).into_response());
    }

    let user = state.users().current_user(&session).await;
    let menus = state.plugins().menus().visible_for(user.as_ref());

    let mut context = tera::Context::new();
    context.insert("site_name", &state.config().site_name);
    context.insert("user", &user);
    context.insert("menus", &menus);
    context.insert("global_scripts", state.plugins().page_scripts());

    let html = state
        .theme()
        .render_page("/", &state.config().site_name, "", &mut context)
        .map_err(AppError::Internal)?;

    Ok(Html(html).into_response())
}
