/// One navigable page: the browser path, the identifier it loads and its
/// menu label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRoute {
    pub path: String,
    pub identifier: String,
    pub label: String,
}

/// Maps route paths to content identifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<PageRoute>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    pub fn with_route(
        mut self,
        path: impl Into<String>,
        identifier: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        self.routes.push(PageRoute {
            path: path.into(),
            identifier: identifier.into(),
            label: label.into(),
        });
        self
    }

    /// Identifier for `path`, ignoring a trailing slash and any query string
    pub fn resolve(&self, path: &str) -> Option<&str> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        self.routes
            .iter()
            .find(|route| route.path == path)
            .map(|route| route.identifier.as_str())
    }

    pub fn routes(&self) -> &[PageRoute] {
        &self.routes
    }

    /// Menu line with the active page in brackets
    pub fn render_nav(&self, active: Option<&str>) -> String {
        self.routes
            .iter()
            .map(|route| {
                if Some(route.identifier.as_str()) == active {
                    format!("[{}]", route.label)
                } else {
                    route.label.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        RouteTable::new()
            .with_route("/", "home", "Inicio")
            .with_route("/about", "about", "About")
            .with_route("/contact", "contact", "Contacto")
    }
}
