use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Domain representation of a catalog product.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Owning category, if assigned.
    pub category_id: Option<i32>,
    /// Human-readable name of the product.
    pub name: String,
    /// Optional longer description shown on the detail page.
    pub description: Option<String>,
    /// Public URL of the product image.
    pub image_url: Option<String>,
    /// Price in the smallest currency unit.
    pub price_cents: i32,
    /// Whether the product can currently be ordered.
    pub is_available: bool,
    /// Whether the product is highlighted on the home page.
    pub is_featured: bool,
    /// Position within catalog listings (ascending).
    pub display_order: i32,
    /// Free-text ingredients list.
    pub ingredients: Option<String>,
    /// Free-text usage instructions.
    pub usage_instructions: Option<String>,
    /// Free-text benefits description.
    pub benefits: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub category_id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price_cents: i32,
    pub is_available: bool,
    pub is_featured: bool,
    pub display_order: i32,
    pub ingredients: Option<String>,
    pub usage_instructions: Option<String>,
    pub benefits: Option<String>,
}

impl NewProduct {
    /// Build a new product payload with catalog defaults.
    pub fn new(name: impl Into<String>, price_cents: i32) -> Self {
        Self {
            category_id: None,
            name: name.into(),
            description: None,
            image_url: None,
            price_cents,
            is_available: true,
            is_featured: false,
            display_order: 0,
            ingredients: None,
            usage_instructions: None,
            benefits: None,
        }
    }

    pub fn with_category(mut self, category_id: Option<i32>) -> Self {
        self.category_id = category_id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

/// Full-row update applied when saving the edit form.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    pub category_id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price_cents: i32,
    pub is_available: bool,
    pub is_featured: bool,
    pub display_order: i32,
    pub ingredients: Option<String>,
    pub usage_instructions: Option<String>,
    pub benefits: Option<String>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

/// Query definition used to list products.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Optional owning category filter.
    pub category_id: Option<i32>,
    /// Optional name or description search term.
    pub search: Option<String>,
    /// Restrict the results to available products.
    pub only_available: bool,
    /// Restrict the results to featured products.
    pub only_featured: bool,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Filter by a case-insensitive substring over name or description.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn only_available(mut self) -> Self {
        self.only_available = true;
        self
    }

    pub fn only_featured(mut self) -> Self {
        self.only_featured = true;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
