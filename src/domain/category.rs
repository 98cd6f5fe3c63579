use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Domain representation of a catalog category.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// Position within category listings (ascending).
    pub display_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Category {
    /// URL-safe identifier derived from the category name.
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }

    /// Whether this category matches a `category`/`filter_by` URL value.
    ///
    /// Accepts the slug as well as the plain name, case-insensitively, so
    /// legacy links keep working.
    pub fn matches_filter(&self, value: &str) -> bool {
        let value = value.trim();
        self.slug() == slugify(value) || self.name.eq_ignore_ascii_case(value)
    }
}

/// Lowercase the name and collapse runs of non-alphanumeric characters
/// into single dashes, matching what template-side slugification produces.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut previous_dash = true; // swallow leading separators

    for ch in name.trim().chars() {
        if ch.is_alphanumeric() {
            for lower in ch.to_lowercase() {
                slug.push(lower);
            }
            previous_dash = false;
        } else if !previous_dash {
            slug.push('-');
            previous_dash = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

/// Payload required to insert a new category.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub display_order: i32,
}

/// Full-row update applied when saving the edit form.
#[derive(Debug, Clone)]
pub struct UpdateCategory {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub display_order: i32,
    pub updated_at: NaiveDateTime,
}

/// Query definition used to list categories.
#[derive(Debug, Clone, Default)]
pub struct CategoryListQuery {
    /// Optional name or description search term.
    pub search: Option<String>,
}

impl CategoryListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn category(name: &str) -> Category {
        let at = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap_or_default();
        Category {
            id: 1,
            name: name.to_string(),
            description: None,
            image_url: None,
            display_order: 0,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Essential Oils"), "essential-oils");
        assert_eq!(slugify("  Bath   &  Body  "), "bath-body");
        assert_eq!(slugify("Soaps"), "soaps");
    }

    #[test]
    fn matches_filter_accepts_slug_and_name() {
        let oils = category("Essential Oils");
        assert!(oils.matches_filter("essential-oils"));
        assert!(oils.matches_filter("Essential Oils"));
        assert!(oils.matches_filter("ESSENTIAL OILS"));
        assert!(!oils.matches_filter("soaps"));
    }
}
