//! End-to-end tests for the portfolio client.
//!
//! These tests run the shell against the reqwest adapter talking to an
//! in-process fake backend, with preferences stored in a temp directory.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::tempdir;
use tokio::net::TcpListener;

use folio_application::contact::{GENERIC_SUBMIT_MESSAGE, SUCCESS_MESSAGE};
use folio_application::ports::{ColorSchemeSource, PortfolioApi};
use folio_application::{BannerKind, Rendered, Shell, ThemeStore};
use folio_domain::{ContactField, Route, TIMEOUT_MESSAGE, ThemePreference};
use folio_infrastructure::{
    ApiConfig, FilePreferenceStorage, ReqwestPortfolioApi, SystemClock, SystemColorScheme,
};

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake backend");
    let addr = listener.local_addr().expect("Failed to read local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Fake backend failed");
    });
    addr
}

fn backend() -> Router {
    Router::new()
        .route(
            "/about",
            get(|| async {
                Json(json!({
                    "name": "Ada Lovelace",
                    "title": "Software Engineer",
                    "bio": "Writes programs for engines.",
                    "techStack": ["Rust", "TypeScript"],
                    "links": {
                        "github": "https://github.com/ada",
                        "linkedin": "https://linkedin.com/in/ada"
                    }
                }))
            }),
        )
        .route(
            "/main-info",
            get(|| async {
                Json(json!({
                    "name": "Ada Lovelace",
                    "title": "Software Engineer",
                    "location": "London",
                    "email": "ada@example.com"
                }))
            }),
        )
        .route(
            "/projects",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(100)).await;
                Json(json!([
                    { "name": "Alpha", "description": "First" },
                    { "name": "Beta", "description": "Second" },
                    { "name": "Gamma", "description": "Third" }
                ]))
            }),
        )
        .route(
            "/contact",
            post(|Json(body): Json<Value>| async move {
                match body["subject"].as_str() {
                    Some("explode") => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "message": "server error" })),
                    ),
                    Some("silent") => (StatusCode::BAD_GATEWAY, Json(json!({}))),
                    _ => (StatusCode::OK, Json(json!({ "success": true }))),
                }
            }),
        )
}

fn api(addr: SocketAddr, timeout: Duration) -> Arc<dyn PortfolioApi> {
    let config = ApiConfig::new(&format!("http://{addr}/"))
        .expect("Invalid base URL")
        .with_timeout(timeout);
    Arc::new(ReqwestPortfolioApi::new(config).expect("Failed to build client"))
}

fn shell(api: Arc<dyn PortfolioApi>, prefs: &std::path::Path) -> Shell {
    let theme = ThemeStore::initialize(
        Arc::new(FilePreferenceStorage::at(prefs)),
        Arc::new(SystemColorScheme::new(ThemePreference::Light)),
    );
    Shell::new("Ada Lovelace", api, theme, Arc::new(SystemClock::new()))
}

fn fill_form(shell: &Shell, subject: &str) {
    let form = shell.contact();
    form.set_field(ContactField::Name, "Grace");
    form.set_field(ContactField::Email, "grace@example.com");
    form.set_field(ContactField::Subject, subject);
    form.set_field(ContactField::Message, "Hello there");
}

#[tokio::test]
async fn test_about_page_renders_profile_and_footer() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let addr = serve(backend()).await;
    let shell = shell(
        api(addr, Duration::from_secs(5)),
        &temp_dir.path().join("prefs.json"),
    );

    for load in shell.navigate(Route::About) {
        assert!(load.await.expect("Load task panicked"));
    }

    let page = shell.render().to_string();
    assert!(page.contains("Location: London"));
    assert!(page.contains("[ada@example.com](mailto:ada@example.com)"));
    assert!(page.contains("# Ada Lovelace"));
    assert!(page.contains("## Software Engineer"));
    assert!(page.contains("Rust · TypeScript"));
    assert!(page.contains("[LinkedIn](https://linkedin.com/in/ada)"));
    assert!(page.contains("My Portfolio by Ada Lovelace ©"));
}

#[tokio::test]
async fn test_projects_page_shows_loading_then_cards_in_order() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let addr = serve(backend()).await;
    let shell = shell(
        api(addr, Duration::from_secs(5)),
        &temp_dir.path().join("prefs.json"),
    );

    let loads = shell.navigate(Route::Projects);
    assert_eq!(loads.len(), 1);
    assert_eq!(shell.render().body, Rendered::Loading);

    for load in loads {
        assert!(load.await.expect("Load task panicked"));
    }
    let body = shell.render().body.to_string();
    let alpha = body.find("## Alpha").expect("Alpha card");
    let beta = body.find("## Beta").expect("Beta card");
    let gamma = body.find("## Gamma").expect("Gamma card");
    assert!(alpha < beta && beta < gamma);
}

#[tokio::test]
async fn test_slow_backend_shows_timeout_message() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let addr = serve(backend()).await;
    let shell = shell(
        api(addr, Duration::from_millis(20)),
        &temp_dir.path().join("prefs.json"),
    );

    for load in shell.navigate(Route::Projects) {
        assert!(load.await.expect("Load task panicked"));
    }
    assert_eq!(
        shell.render().body,
        Rendered::Error(TIMEOUT_MESSAGE.to_string())
    );
}

#[tokio::test]
async fn test_leaving_projects_discards_late_response() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let addr = serve(backend()).await;
    let shell = shell(
        api(addr, Duration::from_secs(5)),
        &temp_dir.path().join("prefs.json"),
    );

    let projects = shell.navigate(Route::Projects);
    assert!(shell.navigate(Route::Contact).is_empty());

    for load in projects {
        assert!(!load.await.expect("Load task panicked"));
    }
    assert!(shell.projects().slot().state().is_idle());
}

#[tokio::test]
async fn test_contact_submission_clears_form() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let addr = serve(backend()).await;
    let shell = shell(
        api(addr, Duration::from_secs(5)),
        &temp_dir.path().join("prefs.json"),
    );
    shell.navigate(Route::Contact);
    fill_form(&shell, "Hi");

    shell.contact().submit().await.expect("Submission accepted");

    assert!(shell.contact().fields().is_empty());
    let banner = shell.contact().banner().expect("Success banner");
    assert_eq!(banner.kind, BannerKind::Success);
    assert_eq!(banner.message, SUCCESS_MESSAGE);
    assert!(shell.contact().is_submit_enabled());
}

#[tokio::test]
async fn test_contact_failure_keeps_fields() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let addr = serve(backend()).await;
    let shell = shell(
        api(addr, Duration::from_secs(5)),
        &temp_dir.path().join("prefs.json"),
    );

    fill_form(&shell, "explode");
    assert!(shell.contact().submit().await.is_err());
    assert_eq!(shell.contact().fields().subject, "explode");
    assert_eq!(
        shell.contact().banner().map(|b| b.message).as_deref(),
        Some("server error")
    );

    shell.contact().set_field(ContactField::Subject, "silent");
    assert!(shell.contact().submit().await.is_err());
    assert_eq!(
        shell.contact().banner().map(|b| b.message).as_deref(),
        Some(GENERIC_SUBMIT_MESSAGE)
    );
}

#[tokio::test]
async fn test_theme_choice_survives_restart() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let prefs = temp_dir.path().join("prefs.json");
    let os = Arc::new(SystemColorScheme::new(ThemePreference::Light));

    let first = ThemeStore::initialize(Arc::new(FilePreferenceStorage::at(&prefs)), os.clone());
    assert_eq!(first.toggle(), ThemePreference::Dark);
    drop(first);

    let second = ThemeStore::initialize(Arc::new(FilePreferenceStorage::at(&prefs)), os.clone());
    assert_eq!(second.preference(), ThemePreference::Dark);

    os.set(ThemePreference::Light);
    assert_eq!(os.current(), ThemePreference::Light);
    assert_eq!(second.preference(), ThemePreference::Dark);
}

#[tokio::test]
async fn test_theme_follows_os_without_stored_choice() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let os = Arc::new(SystemColorScheme::new(ThemePreference::Light));
    let store = ThemeStore::initialize(
        Arc::new(FilePreferenceStorage::at(temp_dir.path().join("prefs.json"))),
        os.clone(),
    );

    os.set(ThemePreference::Dark);
    assert!(store.is_dark());
    assert!(!temp_dir.path().join("prefs.json").exists());
}
