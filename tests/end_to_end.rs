use std::net::SocketAddr;
use std::time::Duration;

use axum::{routing::get, Json, Router};
use rust_page_content::renderer::{FetchError, HttpContentSource, PageRenderer, ViewState};
use rust_page_content::{create_router, AppState, Config, ContentCatalog, ContentRecord};

async fn spawn_router(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn spawn_service() -> String {
    let state = AppState::new(ContentCatalog::builtin(), Config::default());
    let addr = spawn_router(create_router(state).unwrap()).await;
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_home_page() {
    let base_url = spawn_service().await;

    let record: ContentRecord = reqwest::get(format!("{}/api/home", base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(record.title, "Bienvenido al Dashboard");
    assert_eq!(record.icon, "🏠");
    assert!(!record.body.is_empty());
}

#[tokio::test]
async fn test_about_page() {
    let base_url = spawn_service().await;
    let renderer = PageRenderer::new(HttpContentSource::new(&base_url));

    renderer.navigate("/about");
    let view = renderer.settled().await;

    assert!(view.record().unwrap().title.contains("Sobre el Proyecto"));
}

#[tokio::test]
async fn test_unknown_page() {
    let base_url = spawn_service().await;

    let response = reqwest::get(format!("{}/api/unknown-page", base_url))
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

    let body = response.bytes().await.unwrap();
    assert!(serde_json::from_slice::<ContentRecord>(&body).is_err());

    let renderer = PageRenderer::new(HttpContentSource::new(&base_url));
    renderer.load("unknown-page");
    assert_eq!(
        renderer.settled().await,
        ViewState::Failed {
            identifier: "unknown-page".to_string(),
            error: FetchError::NotFound("unknown-page".to_string()),
        }
    );
}

#[tokio::test]
async fn test_rapid_navigation_renders_last_page() {
    let base_url = spawn_service().await;
    let renderer = PageRenderer::new(HttpContentSource::new(&base_url));

    renderer.navigate("/");
    renderer.navigate("/about");
    let view = renderer.settled().await;

    assert_eq!(view.identifier(), Some("about"));
    assert!(view.record().unwrap().title.contains("Sobre el Proyecto"));

    tokio::time::sleep(Duration::from_millis(200)).await;
    let screen = renderer.render();
    assert!(screen.contains("Sobre el Proyecto"));
    assert!(!screen.contains("Bienvenido al Dashboard"));
}

#[tokio::test]
async fn test_unreachable_service() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let renderer = PageRenderer::new(HttpContentSource::new(format!("http://{}", addr)));
    renderer.load("home");
    let view = renderer.settled().await;

    assert!(matches!(view, ViewState::Failed { error: FetchError::Network(_), .. }));
}

#[tokio::test]
async fn test_malformed_response() {
    let app = Router::new().route(
        "/api/home",
        get(|| async { Json(serde_json::json!({ "unexpected": true })) }),
    );
    let addr = spawn_router(app).await;

    let renderer = PageRenderer::new(HttpContentSource::new(format!("http://{}", addr)));
    renderer.load("home");
    let view = renderer.settled().await;

    assert!(matches!(view, ViewState::Failed { error: FetchError::Malformed(_), .. }));
}

#[tokio::test]
async fn test_slow_service_times_out() {
    let app = Router::new().route(
        "/api/home",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            "too late"
        }),
    );
    let addr = spawn_router(app).await;

    let renderer = PageRenderer::new(HttpContentSource::new(format!("http://{}", addr)))
        .with_timeout(Duration::from_millis(100));
    renderer.load("home");

    assert_eq!(
        renderer.settled().await,
        ViewState::Failed {
            identifier: "home".to_string(),
            error: FetchError::Timeout(Duration::from_millis(100)),
        }
    );
}

#[tokio::test]
async fn test_identifier_is_never_reinterpreted() {
    let base_url = spawn_service().await;
    let renderer = PageRenderer::new(HttpContentSource::new(&base_url));

    for identifier in ["home?x=1", "x/../about", "../health", "home#top"] {
        renderer.load(identifier);
        assert_eq!(
            renderer.settled().await,
            ViewState::Failed {
                identifier: identifier.to_string(),
                error: FetchError::NotFound(identifier.to_string()),
            },
            "{}",
            identifier
        );
    }
}

#[tokio::test]
async fn test_empty_identifier_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<div id=\"root\"></div>").unwrap();
    let config = Config {
        static_dir: dir.path().to_path_buf(),
        ..Config::default()
    };
    let addr = spawn_router(create_router(AppState::new(ContentCatalog::builtin(), config)).unwrap())
        .await;
    let base_url = format!("http://{}", addr);

    let response = reqwest::get(format!("{}/api/", base_url)).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("No API route"));

    let renderer = PageRenderer::new(HttpContentSource::new(&base_url));
    renderer.load("");
    assert!(matches!(
        renderer.settled().await,
        ViewState::Failed { error: FetchError::NotFound(_), .. }
    ));
}
