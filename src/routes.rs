// Route path constants - single source of truth for all API paths

pub const HEALTH: &str = "/health";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

pub const CONTENT_ITEM: &str = "/api/{identifier}";

// Paths under /api that never name a page; they answer with a JSON 404
pub const API_ROOT: &str = "/api";
pub const API_ROOT_SLASH: &str = "/api/";
pub const API_NESTED: &str = "/api/{identifier}/{*rest}";
