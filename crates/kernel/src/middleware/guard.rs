//! Blueprint privilege guard.

use std::sync::Arc;

use axum::Router;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Redirect};
use tower_sessions::Session;
use tracing::warn;

use kiosk_sdk::host::{AuthService, LOGIN_PATH};

/// Wrap a blueprint router so every route requires `privilege`.
///
/// Anonymous requests are redirected to the login page; authenticated
/// users without the privilege get a 403.
pub fn guard_routes(
    router: Router,
    auth: Arc<dyn AuthService>,
    privilege: &'static str,
) -> Router {
    router.layer(middleware::from_fn(
        move |session: Session, request: Request, next: Next| {
            let auth = Arc::clone(&auth);
            async move {
                match auth.current_user(&session).await {
                    Some(user) if user.fulfills_requirement(privilege) => next.run(request).await,
                    Some(user) => {
                        warn!(
                            user = %user.username,
                            privilege,
                            "blueprint access denied"
                        );
                        StatusCode::FORBIDDEN.into_response()
                    }
                    None => Redirect::to(LOGIN_PATH).into_response(),
                }
            }
        },
    ))
}
