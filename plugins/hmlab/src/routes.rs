//! Blueprint routes for the stratigraphy studio.

use std::sync::{Arc, OnceLock};

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_sessions::Session;
use tracing::error;

use kiosk_sdk::host::{Host, require_full_login};
use kiosk_sdk::http::nocache;
use kiosk_sdk::plugin::PluginHandle;

use crate::URL_PREFIX;
use crate::matrix::loader::{LocusRelations, nodes_from_relations};
use crate::matrix::{AnalysisReport, HmNode, analyze_relations, remove_transitive_relations};

#[derive(Clone)]
struct BlueprintState {
    host: Host,
    handle: Arc<OnceLock<PluginHandle>>,
}

/// Build the blueprint router. The kernel nests it under [`URL_PREFIX`]
/// and applies the privilege guard.
pub fn blueprint(host: Host, handle: Arc<OnceLock<PluginHandle>>) -> Router {
    let state = BlueprintState { host, handle };
    Router::new()
        .route("/", get(show_page).post(show_page))
        .route("/matrix", post(analyze_matrix))
        .route_layer(middleware::from_fn(nocache))
        .route("/_redirect", get(redirect_to_show))
        .with_state(state)
}

/// Redirecting entry route; the kernel maps the application root here
/// when this plugin is the main index plugin.
async fn redirect_to_show(State(state): State<BlueprintState>, session: Session) -> Response {
    if let Err(denied) = require_full_login(&state.host, &session).await {
        return denied;
    }
    Redirect::to(URL_PREFIX).into_response()
}

/// The studio page itself.
async fn show_page(State(state): State<BlueprintState>, session: Session) -> Response {
    let user = match require_full_login(&state.host, &session).await {
        Ok(user) => user,
        Err(denied) => return denied,
    };

    let mut context = tera::Context::new();
    context.insert("site_name", &state.host.site_name);
    context.insert("user", &user);
    if let Some(handle) = state.handle.get() {
        context.insert("current_plugin", &handle.descriptor());
    }

    match state.host.theme.tera().render("hmlab.html", &context) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(error = %e, "failed to render the stratigraphy studio page");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[derive(Debug, Serialize)]
struct MatrixResponse {
    analysis: AnalysisReport,
    /// Transitive edges dropped from the reduced matrix.
    removed_transitive: Vec<(String, String)>,
    nodes: Vec<HmNode>,
}

/// Run the Harris Matrix pipeline over locus relation records.
async fn analyze_matrix(
    State(state): State<BlueprintState>,
    session: Session,
    Json(relations): Json<LocusRelations>,
) -> Response {
    if let Err(denied) = require_full_login(&state.host, &session).await {
        return denied;
    }

    let mut nodes = nodes_from_relations(&relations);
    let analysis = match analyze_relations(&mut nodes) {
        Ok(analysis) => analysis,
        Err(e) => return (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response(),
    };
    let removed_transitive = match remove_transitive_relations(&mut nodes) {
        Ok(removed) => removed,
        Err(e) => return (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response(),
    };

    Json(MatrixResponse {
        analysis,
        removed_transitive,
        nodes,
    })
    .into_response()
}
