use chrono::Local;
use serde::Deserialize;
use validator::Validate;

use crate::domain::category::{NewCategory, UpdateCategory};
use crate::forms::{
    FormError, FormResult, empty_string_as_none, optional_inline, optional_multiline,
};

const NAME_MAX_LEN: u64 = 128;

/// Form payload shared by the "Add category" and "Edit category" dialogs.
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub display_order: Option<i32>,
}

impl CategoryForm {
    pub fn into_new_category(self) -> FormResult<NewCategory> {
        self.validate()?;
        let (name, sanitized) = self.into_parts()?;

        Ok(NewCategory {
            name,
            description: sanitized.description,
            image_url: sanitized.image_url,
            display_order: sanitized.display_order,
        })
    }

    pub fn into_update_category(self) -> FormResult<UpdateCategory> {
        self.validate()?;
        let (name, sanitized) = self.into_parts()?;

        Ok(UpdateCategory {
            name,
            description: sanitized.description,
            image_url: sanitized.image_url,
            display_order: sanitized.display_order,
            updated_at: Local::now().naive_utc(),
        })
    }

    fn into_parts(self) -> FormResult<(String, SanitizedCategory)> {
        let name = super::sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(FormError::EmptyField { field: "name" });
        }

        Ok((
            name,
            SanitizedCategory {
                description: optional_multiline(self.description.as_deref()),
                image_url: optional_inline(self.image_url.as_deref()),
                display_order: self.display_order.unwrap_or(0),
            },
        ))
    }
}

struct SanitizedCategory {
    description: Option<String>,
    image_url: Option<String>,
    display_order: i32,
}
