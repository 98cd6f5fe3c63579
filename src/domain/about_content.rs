use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One section of the about page.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AboutContent {
    pub id: i32,
    /// Section identifier ("story", "mission", ...).
    pub section: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    /// Position within the page (ascending).
    pub order_index: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new section.
#[derive(Debug, Clone)]
pub struct NewAboutContent {
    pub section: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub order_index: i32,
}

/// Full-row update applied when saving the edit form.
#[derive(Debug, Clone)]
pub struct UpdateAboutContent {
    pub section: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub order_index: i32,
    pub updated_at: NaiveDateTime,
}
