use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A key/value row whose value is an arbitrary nested JSON document
/// controlling page content and appearance.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SiteSetting {
    pub id: i32,
    /// Unique lookup key ("header", "footer", "company_branding", ...).
    pub key: String,
    pub value: Value,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new setting.
#[derive(Debug, Clone)]
pub struct NewSiteSetting {
    pub key: String,
    pub value: Value,
    pub description: Option<String>,
}

impl NewSiteSetting {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
