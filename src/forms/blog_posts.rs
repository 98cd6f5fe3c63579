use chrono::{Local, NaiveDateTime};
use serde::Deserialize;
use validator::Validate;

use crate::domain::blog_post::{NewBlogPost, UpdateBlogPost};
use crate::forms::{FormError, FormResult, optional_inline, optional_multiline};

const TITLE_MAX_LEN: u64 = 256;

/// Form payload shared by the blog post create and edit dialogs.
///
/// Tags are entered as a comma-separated list and normalized into a vector.
#[derive(Debug, Deserialize, Validate)]
pub struct BlogPostForm {
    #[validate(length(min = 1, max = TITLE_MAX_LEN))]
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub cover_image_url: Option<String>,
    pub author: String,
    #[serde(default)]
    pub is_published: bool,
    /// Comma-separated tag list, e.g. `skincare, diy`.
    pub tags: Option<String>,
}

impl BlogPostForm {
    pub fn into_new_blog_post(self) -> FormResult<NewBlogPost> {
        self.validate()?;
        let parts = self.into_parts()?;

        let published_at = parts.is_published.then(|| Local::now().naive_utc());

        Ok(NewBlogPost {
            title: parts.title,
            content: parts.content,
            summary: parts.summary,
            cover_image_url: parts.cover_image_url,
            author: parts.author,
            is_published: parts.is_published,
            published_at,
            tags: parts.tags,
        })
    }

    /// Convert into an update, keeping the original publish date when the
    /// post was already published.
    pub fn into_update_blog_post(
        self,
        existing_published_at: Option<NaiveDateTime>,
    ) -> FormResult<UpdateBlogPost> {
        self.validate()?;
        let parts = self.into_parts()?;

        let published_at = if parts.is_published {
            existing_published_at.or_else(|| Some(Local::now().naive_utc()))
        } else {
            None
        };

        Ok(UpdateBlogPost {
            title: parts.title,
            content: parts.content,
            summary: parts.summary,
            cover_image_url: parts.cover_image_url,
            author: parts.author,
            is_published: parts.is_published,
            published_at,
            tags: parts.tags,
            updated_at: Local::now().naive_utc(),
        })
    }

    fn into_parts(self) -> FormResult<SanitizedBlogPost> {
        let title = super::sanitize_inline_text(&self.title);
        if title.is_empty() {
            return Err(FormError::EmptyField { field: "title" });
        }

        let content = super::sanitize_multiline_text(&self.content);
        if content.is_empty() {
            return Err(FormError::EmptyField { field: "content" });
        }

        let author = super::sanitize_inline_text(&self.author);
        if author.is_empty() {
            return Err(FormError::EmptyField { field: "author" });
        }

        Ok(SanitizedBlogPost {
            title,
            content,
            summary: optional_multiline(self.summary.as_deref()),
            cover_image_url: optional_inline(self.cover_image_url.as_deref()),
            author,
            is_published: self.is_published,
            tags: parse_tags(self.tags.as_deref().unwrap_or_default()),
        })
    }
}

struct SanitizedBlogPost {
    title: String,
    content: String,
    summary: Option<String>,
    cover_image_url: Option<String>,
    author: String,
    is_published: bool,
    tags: Vec<String>,
}

fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|tag| super::sanitize_inline_text(tag))
        .filter(|tag| !tag.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_form() -> BlogPostForm {
        BlogPostForm {
            title: " Five uses for  rose water ".to_string(),
            content: "Body text.".to_string(),
            summary: None,
            cover_image_url: None,
            author: "Mira".to_string(),
            is_published: true,
            tags: Some(" skincare , diy ,, ".to_string()),
        }
    }

    #[test]
    fn blog_post_form_parses_tags() {
        let post = base_form().into_new_blog_post().expect("expected success");
        assert_eq!(post.title, "Five uses for rose water");
        assert_eq!(post.tags, vec!["skincare".to_string(), "diy".to_string()]);
        assert!(post.published_at.is_some());
    }

    #[test]
    fn unpublished_post_has_no_publish_date() {
        let mut form = base_form();
        form.is_published = false;

        let post = form.into_new_blog_post().expect("expected success");
        assert!(post.published_at.is_none());
    }

    #[test]
    fn update_keeps_original_publish_date() {
        let original = chrono::NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .unwrap_or_default();

        let update = base_form()
            .into_update_blog_post(Some(original))
            .expect("expected success");
        assert_eq!(update.published_at, Some(original));
    }

    #[test]
    fn blog_post_form_requires_content() {
        let mut form = base_form();
        form.content = "\n\n".to_string();

        assert!(matches!(
            form.into_new_blog_post(),
            Err(FormError::EmptyField { field: "content" })
        ));
    }
}
