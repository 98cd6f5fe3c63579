use chrono::Local;
use serde::Deserialize;
use validator::Validate;

use crate::domain::product::{NewProduct, UpdateProduct};
use crate::forms::{
    FormError, FormResult, empty_string_as_none, optional_inline, optional_multiline,
    parse_price_cents,
};

/// Maximum allowed length for a product name.
const NAME_MAX_LEN: u64 = 128;

/// Form payload shared by the "Add product" and "Edit product" dialogs.
#[derive(Debug, Deserialize, Validate)]
pub struct ProductForm {
    /// Name entered by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Public image URL, usually filled in by the upload relay.
    pub image_url: Option<String>,
    /// Decimal price text, e.g. `12.34`.
    pub price: String,
    /// Selected category; an unselected option posts an empty string.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub category_id: Option<i32>,
    #[serde(default)]
    pub is_available: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub display_order: Option<i32>,
    pub ingredients: Option<String>,
    pub usage_instructions: Option<String>,
    pub benefits: Option<String>,
}

impl ProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct`.
    pub fn into_new_product(self) -> FormResult<NewProduct> {
        self.validate()?;
        let (name, price_cents, rest) = self.into_parts()?;

        Ok(NewProduct {
            category_id: rest.category_id,
            name,
            description: rest.description,
            image_url: rest.image_url,
            price_cents,
            is_available: rest.is_available,
            is_featured: rest.is_featured,
            display_order: rest.display_order,
            ingredients: rest.ingredients,
            usage_instructions: rest.usage_instructions,
            benefits: rest.benefits,
        })
    }

    /// Validates and sanitizes the payload into a domain `UpdateProduct`.
    pub fn into_update_product(self) -> FormResult<UpdateProduct> {
        self.validate()?;
        let (name, price_cents, rest) = self.into_parts()?;

        Ok(UpdateProduct {
            category_id: rest.category_id,
            name,
            description: rest.description,
            image_url: rest.image_url,
            price_cents,
            is_available: rest.is_available,
            is_featured: rest.is_featured,
            display_order: rest.display_order,
            ingredients: rest.ingredients,
            usage_instructions: rest.usage_instructions,
            benefits: rest.benefits,
            updated_at: Local::now().naive_utc(),
        })
    }

    fn into_parts(self) -> FormResult<(String, i32, SanitizedProduct)> {
        let name = super::sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(FormError::EmptyField { field: "name" });
        }

        let price_cents = parse_price_cents(&self.price)?;

        let sanitized = SanitizedProduct {
            category_id: self.category_id,
            description: optional_multiline(self.description.as_deref()),
            image_url: optional_inline(self.image_url.as_deref()),
            is_available: self.is_available,
            is_featured: self.is_featured,
            display_order: self.display_order.unwrap_or(0),
            ingredients: optional_multiline(self.ingredients.as_deref()),
            usage_instructions: optional_multiline(self.usage_instructions.as_deref()),
            benefits: optional_multiline(self.benefits.as_deref()),
        };

        Ok((name, price_cents, sanitized))
    }
}

struct SanitizedProduct {
    category_id: Option<i32>,
    description: Option<String>,
    image_url: Option<String>,
    is_available: bool,
    is_featured: bool,
    display_order: i32,
    ingredients: Option<String>,
    usage_instructions: Option<String>,
    benefits: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_form() -> ProductForm {
        ProductForm {
            name: "  Lavender  Oil ".to_string(),
            description: Some(" Calming.\n\n Pure. ".to_string()),
            image_url: Some(" https://cdn.example.com/lavender.webp ".to_string()),
            price: "12.34".to_string(),
            category_id: Some(3),
            is_available: true,
            is_featured: false,
            display_order: Some(2),
            ingredients: Some("Lavandula angustifolia".to_string()),
            usage_instructions: None,
            benefits: Some("  ".to_string()),
        }
    }

    #[test]
    fn product_form_converts_successfully() {
        let new_product = base_form().into_new_product().expect("expected success");

        assert_eq!(new_product.name, "Lavender Oil");
        assert_eq!(new_product.price_cents, 1234);
        assert_eq!(new_product.category_id, Some(3));
        assert_eq!(new_product.description.as_deref(), Some("Calming.\n\nPure."));
        assert_eq!(
            new_product.image_url.as_deref(),
            Some("https://cdn.example.com/lavender.webp")
        );
        assert_eq!(new_product.display_order, 2);
        // Whitespace-only optional fields collapse to None.
        assert!(new_product.benefits.is_none());
    }

    #[test]
    fn product_form_rejects_empty_name() {
        let mut form = base_form();
        form.name = "   ".to_string();

        assert!(matches!(
            form.into_new_product(),
            Err(FormError::EmptyField { field: "name" })
        ));
    }

    #[test]
    fn product_form_rejects_bad_price() {
        let mut form = base_form();
        form.price = "12,34".to_string();

        assert!(matches!(
            form.into_new_product(),
            Err(FormError::InvalidPrice { .. })
        ));
    }
}
