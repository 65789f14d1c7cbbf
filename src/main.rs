use anyhow::{Context, Result};
use rust_page_content::config::LogFormat;
use rust_page_content::{create_router, AppState, Config, ContentCatalog};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(config.log_format);

    tracing::info!("rust-page-content starting");
    config.log_startup();

    let catalog = match &config.content_file {
        Some(path) => ContentCatalog::from_json_file(path)?,
        None => ContentCatalog::builtin(),
    };
    tracing::info!(
        "Serving {} pages: {}",
        catalog.len(),
        catalog.identifiers().collect::<Vec<_>>().join(", ")
    );

    let addr = config.bind_address();
    let app = create_router(AppState::new(catalog, config))?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
