//! Fixed page content served over HTTP, and the renderer that displays it

pub mod api_doc;
pub mod app;
pub mod config;
pub mod content;
pub mod error;
pub mod handlers;
pub mod models;
pub mod renderer;
pub mod routes;
pub mod state;

pub use app::create_router;
pub use config::Config;
pub use content::ContentCatalog;
pub use models::ContentRecord;
pub use state::AppState;
