use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A contact channel shown on the contact page (phone, email, address...).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ContactInfo {
    pub id: i32,
    /// Channel kind, free text ("phone", "email", "address", ...).
    pub kind: String,
    pub value: String,
    pub label: Option<String>,
    /// Primary entries are rendered first and highlighted.
    pub is_primary: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new contact channel.
#[derive(Debug, Clone)]
pub struct NewContactInfo {
    pub kind: String,
    pub value: String,
    pub label: Option<String>,
    pub is_primary: bool,
}

/// Full-row update applied when saving the edit form.
#[derive(Debug, Clone)]
pub struct UpdateContactInfo {
    pub kind: String,
    pub value: String,
    pub label: Option<String>,
    pub is_primary: bool,
    pub updated_at: NaiveDateTime,
}
