pub mod health;
pub mod content;
pub mod docs;

pub use health::health_handler;
pub use content::{api_not_found_handler, content_handler};
pub use docs::openapi_handler;
