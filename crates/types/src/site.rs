use serde::{Deserialize, Serialize};

/// Minimal site record supplied by the caller's site lookup.
///
/// Only the admin URL matters here: it anchors the safety check for
/// caller-supplied redirect destinations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Site {
    /// Admin dashboard base URL (e.g., "https://my.site/wp-admin/")
    pub admin_url: Option<String>,
}

impl Site {
    pub fn with_admin_url(admin_url: impl Into<String>) -> Self {
        Self {
            admin_url: Some(admin_url.into()),
        }
    }
}
