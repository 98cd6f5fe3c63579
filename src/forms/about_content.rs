use chrono::Local;
use serde::Deserialize;
use validator::Validate;

use crate::domain::about_content::{NewAboutContent, UpdateAboutContent};
use crate::forms::{
    FormError, FormResult, empty_string_as_none, optional_inline, optional_multiline,
};

const SECTION_MAX_LEN: u64 = 64;

/// Form payload shared by the about section create and edit dialogs.
#[derive(Debug, Deserialize, Validate)]
pub struct AboutContentForm {
    #[validate(length(min = 1, max = SECTION_MAX_LEN))]
    pub section: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub order_index: Option<i32>,
}

impl AboutContentForm {
    pub fn into_new_about_content(self) -> FormResult<NewAboutContent> {
        self.validate()?;
        let parts = self.into_parts()?;

        Ok(NewAboutContent {
            section: parts.section,
            title: parts.title,
            content: parts.content,
            image_url: parts.image_url,
            order_index: parts.order_index,
        })
    }

    pub fn into_update_about_content(self) -> FormResult<UpdateAboutContent> {
        self.validate()?;
        let parts = self.into_parts()?;

        Ok(UpdateAboutContent {
            section: parts.section,
            title: parts.title,
            content: parts.content,
            image_url: parts.image_url,
            order_index: parts.order_index,
            updated_at: Local::now().naive_utc(),
        })
    }

    fn into_parts(self) -> FormResult<SanitizedAboutContent> {
        let section = super::sanitize_inline_text(&self.section).to_lowercase();
        if section.is_empty() {
            return Err(FormError::EmptyField { field: "section" });
        }

        Ok(SanitizedAboutContent {
            section,
            title: optional_inline(self.title.as_deref()),
            content: optional_multiline(self.content.as_deref()),
            image_url: optional_inline(self.image_url.as_deref()),
            order_index: self.order_index.unwrap_or(0),
        })
    }
}

struct SanitizedAboutContent {
    section: String,
    title: Option<String>,
    content: Option<String>,
    image_url: Option<String>,
    order_index: i32,
}
