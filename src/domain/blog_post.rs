use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Domain representation of a blog post.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BlogPost {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub cover_image_url: Option<String>,
    pub author: String,
    pub is_published: bool,
    /// Set when the post was first published.
    pub published_at: Option<NaiveDateTime>,
    pub tags: Vec<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new blog post.
#[derive(Debug, Clone)]
pub struct NewBlogPost {
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub cover_image_url: Option<String>,
    pub author: String,
    pub is_published: bool,
    pub published_at: Option<NaiveDateTime>,
    pub tags: Vec<String>,
}

/// Full-row update applied when saving the edit form.
#[derive(Debug, Clone)]
pub struct UpdateBlogPost {
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub cover_image_url: Option<String>,
    pub author: String,
    pub is_published: bool,
    pub published_at: Option<NaiveDateTime>,
    pub tags: Vec<String>,
    pub updated_at: NaiveDateTime,
}

/// Query definition used to list blog posts.
#[derive(Debug, Clone, Default)]
pub struct BlogPostListQuery {
    /// Restrict results to published posts (public pages).
    pub published_only: bool,
    /// Optional title or summary search term.
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl BlogPostListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published_only(mut self) -> Self {
        self.published_only = true;
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
