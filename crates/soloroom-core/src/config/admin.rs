//! Admin endpoint configuration.

use serde::{Deserialize, Serialize};

/// Admin endpoint configuration.
///
/// An empty secret disables the admin endpoints entirely rather than
/// leaving them open.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AdminConfig {
    /// Shared secret required by the admin endpoints.
    #[serde(default)]
    pub secret: String,
}

impl AdminConfig {
    /// Whether the presented secret grants admin access.
    pub fn authorizes(&self, presented: &str) -> bool {
        !self.secret.is_empty() && self.secret == presented
    }
}
