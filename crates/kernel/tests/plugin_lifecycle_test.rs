//! Plugin registration and startup hook behavior.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use axum::http::StatusCode;

use common::{TEST_PASSWORD, TestApp, body_string, test_config, test_state};

#[tokio::test]
async fn test_plugin_is_registered_as_main_index() {
    let state = test_state(test_config());
    let plugins = state.plugins();

    assert_eq!(plugins.len(), 1);
    assert_eq!(plugins.index_redirect(), Some("/hmlab/_redirect"));

    // Lookup works by plugin name and by controller name.
    let by_plugin_name = plugins.handle_for("hmlabplugin").unwrap();
    let by_controller = plugins.handle_for("hmlab").unwrap();
    assert!(by_plugin_name.is_main_index());
    assert_eq!(by_plugin_name.name(), by_controller.name());
    assert_eq!(by_plugin_name.version(), "0.13");
}

#[tokio::test]
async fn test_menu_entries_respect_privileges() {
    let state = test_state(test_config());
    let menus = state.plugins().menus();
    assert_eq!(menus.len(), 1);
    assert_eq!(menus.all()[0].name, "stratigraphy studio");

    let digger_id = state.users().verify_login("digger", TEST_PASSWORD).unwrap();
    let digger = state.users().user_context(digger_id).unwrap();
    assert_eq!(menus.visible_for(Some(&digger)).len(), 1);

    let intern_id = state.users().verify_login("intern", TEST_PASSWORD).unwrap();
    let intern = state.users().user_context(intern_id).unwrap();
    assert!(menus.visible_for(Some(&intern)).is_empty());
}

#[tokio::test]
async fn test_global_routes_and_scripts_are_collected() {
    let state = test_state(test_config());
    let plugins = state.plugins();

    assert_eq!(plugins.global_routes(), ["hmlab.static"]);

    let script = plugins.global_scripts().get("hmlab").unwrap();
    assert_eq!(
        script.descriptor(),
        ("hmlab.static", "scripts/hmlab.js", "async")
    );

    let page_scripts = plugins.page_scripts();
    assert_eq!(page_scripts.len(), 1);
    assert_eq!(page_scripts[0].module, "hmlab");
    assert_eq!(page_scripts[0].url, "/hmlab/static/scripts/hmlab.js");
    assert_eq!(page_scripts[0].load, "async");
}

#[tokio::test]
async fn test_front_page_renders_menu_without_main_index() {
    let mut config = test_config();
    // No plugin matches, so the root keeps the kiosk menu page.
    config.main_index_plugin = "frontdesk".to_string();
    let app = TestApp::with_config(config);

    let response = app.get("/", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("stratigraphy studio"));
    assert!(body.contains("/hmlab/static/scripts/hmlab.js"));
    assert!(body.contains("Dig Kiosk"));
}

#[tokio::test]
async fn test_development_mode_skips_blueprint_guard() {
    let mut config = test_config();
    config.webapp_development = true;
    let app = TestApp::with_config(config);

    // Still redirects anonymous visitors: the route itself requires a
    // session, only the privilege guard is skipped.
    let response = app.get("/hmlab", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // A user with no privileges gets through in development mode.
    let cookie = app.login("intern").await;
    let response = app.get("/hmlab", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
}
