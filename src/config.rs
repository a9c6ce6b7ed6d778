//! Lookup configuration

use serde::{Deserialize, Serialize};

fn default_mailbox() -> String {
    "INBOX".to_string()
}

/// Where and how the header service looks messages up
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Mailbox searched by subject
    #[serde(default = "default_mailbox")]
    pub mailbox: String,

    /// Also fetch the full message source, not just the header block
    #[serde(default)]
    pub include_source: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            mailbox: default_mailbox(),
            include_source: false,
        }
    }
}

impl ServiceConfig {
    /// Load from a JSON document; missing keys take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn with_mailbox(mut self, mailbox: impl Into<String>) -> Self {
        self.mailbox = mailbox.into();
        self
    }
}
