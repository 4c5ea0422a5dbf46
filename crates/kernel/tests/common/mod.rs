//! Shared helpers for kernel integration tests.

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use hmlab::HmLabPlugin;
use kiosk_kernel::auth::{UserRecord, UserStore, hash_password};
use kiosk_kernel::session::{create_session_layer, same_site_from_config};
use kiosk_kernel::{AppState, Config};
use kiosk_sdk::plugin::KioskPlugin;

pub const TEST_PASSWORD: &str = "squared-trowel";

pub fn test_config() -> Config {
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    Config {
        port: 0,
        site_name: "Dig Kiosk".to_string(),
        users_file: manifest.join("users.toml"),
        templates_dir: manifest.join("templates"),
        cookie_same_site: "strict".to_string(),
        webapp_development: false,
        main_index_plugin: "hmlabplugin".to_string(),
    }
}

/// Three accounts: one fully privileged, one without privileges, and
/// one legacy account without a privilege list at all.
pub fn test_users() -> Arc<UserStore> {
    let hash = hash_password(TEST_PASSWORD).unwrap();
    Arc::new(UserStore::from_records(vec![
        UserRecord {
            username: "digger".to_string(),
            password_hash: hash.clone(),
            privileges: Some(vec![
                "download_workstation".to_string(),
                "enter_administration".to_string(),
            ]),
        },
        UserRecord {
            username: "intern".to_string(),
            password_hash: hash.clone(),
            privileges: Some(Vec::new()),
        },
        UserRecord {
            username: "legacy".to_string(),
            password_hash: hash,
            privileges: None,
        },
    ]))
}

pub fn test_state(config: Config) -> AppState {
    let plugins: Vec<Arc<dyn KioskPlugin>> = vec![Arc::new(HmLabPlugin::new())];
    AppState::with_users(config, plugins, test_users()).unwrap()
}

/// The full application with its session layer, built once per test.
/// Router clones share the in-memory session store.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: Config) -> Self {
        let same_site = same_site_from_config(&config.cookie_same_site);
        let state = test_state(config);
        let router = state.router().layer(create_session_layer(same_site));
        Self { router }
    }

    pub async fn request(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.request(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(
        &self,
        path: &str,
        body: &str,
        cookie: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.request(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn post_json(
        &self,
        path: &str,
        json: &serde_json::Value,
        cookie: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.request(builder.body(Body::from(json.to_string())).unwrap())
            .await
    }

    /// Log in and return the session cookie.
    pub async fn login(&self, username: &str) -> String {
        let response = self
            .post_form(
                "/user/login",
                &format!("username={username}&password={TEST_PASSWORD}"),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        session_cookie(&response)
    }
}

pub fn session_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
