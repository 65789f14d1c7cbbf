//! Terminal client for the page content service
//!
//! Navigates through one or more routes and prints what the page renderer
//! shows for each of them.

use anyhow::{bail, Result};
use clap::Parser;
use rust_page_content::renderer::{HttpContentSource, PageRenderer, ViewState};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "page-client")]
#[command(version = "0.1.0")]
#[command(about = "Render pages from a rust-page-content service", long_about = None)]
struct Cli {
    /// Base URL of the content service
    #[arg(long, env = "CONTENT_API_URL", default_value = "http://localhost:3000")]
    base_url: String,

    /// Give up on a page after this many milliseconds
    #[arg(long, env = "PAGE_TIMEOUT_MS", default_value = "5000")]
    timeout_ms: u64,

    /// Navigate through all routes back to back and only print the final page
    #[arg(long)]
    rapid: bool,

    /// Routes to visit, e.g. / /about /contact
    #[arg(default_value = "/")]
    routes: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let source = HttpContentSource::new(&cli.base_url);
    let renderer =
        PageRenderer::new(source).with_timeout(Duration::from_millis(cli.timeout_ms));

    let mut last = ViewState::Idle;
    if cli.rapid {
        for route in &cli.routes {
            renderer.navigate(route);
        }
        last = renderer.settled().await;
        println!("{}", renderer.render());
    } else {
        for (i, route) in cli.routes.iter().enumerate() {
            if i > 0 {
                println!();
            }
            println!("==> {}", route);
            renderer.navigate(route);
            last = renderer.settled().await;
            println!("{}", renderer.render());
        }
    }

    if let ViewState::Failed { identifier, error } = last {
        bail!("failed to load '{}': {}", identifier, error);
    }

    Ok(())
}
