use serde::{Deserialize, Serialize};

/// Content record served for one page identifier
///
/// The identifier itself is not part of the body; it is the URL segment the
/// record was requested under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ContentRecord {
    pub title: String,
    pub body: String,
    pub icon: String,
}

impl ContentRecord {
    pub fn new(title: impl Into<String>, body: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            icon: icon.into(),
        }
    }

    /// Name of the first empty field, if any
    pub fn first_empty_field(&self) -> Option<&'static str> {
        if self.title.is_empty() {
            Some("title")
        } else if self.body.is_empty() {
            Some("body")
        } else if self.icon.is_empty() {
            Some("icon")
        } else {
            None
        }
    }
}
