use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Domain representation of a customer testimonial.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Testimonial {
    pub id: i32,
    pub name: String,
    pub quote: String,
    /// Star rating from 1 to 5.
    pub rating: i32,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub is_featured: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new testimonial.
#[derive(Debug, Clone)]
pub struct NewTestimonial {
    pub name: String,
    pub quote: String,
    pub rating: i32,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub is_featured: bool,
}

/// Full-row update applied when saving the edit form.
#[derive(Debug, Clone)]
pub struct UpdateTestimonial {
    pub name: String,
    pub quote: String,
    pub rating: i32,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub is_featured: bool,
    pub updated_at: NaiveDateTime,
}

/// Query definition used to list testimonials.
#[derive(Debug, Clone, Default)]
pub struct TestimonialListQuery {
    pub featured_only: bool,
    /// Optional name or quote search term.
    pub search: Option<String>,
}

impl TestimonialListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn featured_only(mut self) -> Self {
        self.featured_only = true;
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }
}
