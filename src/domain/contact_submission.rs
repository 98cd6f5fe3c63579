use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// A message left through the public contact form.
///
/// Submissions are append-only: there is no update path, only insert,
/// listing, export and delete.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ContactSubmission {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: NaiveDateTime,
}

/// Payload required to insert a new submission.
#[derive(Debug, Clone)]
pub struct NewContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

/// Query definition used to list submissions, newest first.
#[derive(Debug, Clone, Default)]
pub struct ContactSubmissionListQuery {
    pub pagination: Option<Pagination>,
}

impl ContactSubmissionListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
