use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::blog_post::{
    BlogPost as DomainBlogPost, NewBlogPost as DomainNewBlogPost,
    UpdateBlogPost as DomainUpdateBlogPost,
};

/// Tags are stored as a JSON array in a text column.
fn encode_tags(tags: &[String]) -> String {
    serde_json::to_string(tags).unwrap_or_else(|_| "[]".to_string())
}

fn decode_tags(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::blog_posts)]
pub struct BlogPost {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub cover_image_url: Option<String>,
    pub author: String,
    pub is_published: bool,
    pub published_at: Option<NaiveDateTime>,
    pub tags: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::blog_posts)]
pub struct NewBlogPost<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub summary: Option<&'a str>,
    pub cover_image_url: Option<&'a str>,
    pub author: &'a str,
    pub is_published: bool,
    pub published_at: Option<NaiveDateTime>,
    pub tags: String,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::blog_posts)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateBlogPost<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub summary: Option<&'a str>,
    pub cover_image_url: Option<&'a str>,
    pub author: &'a str,
    pub is_published: bool,
    pub published_at: Option<NaiveDateTime>,
    pub tags: String,
    pub updated_at: NaiveDateTime,
}

impl From<BlogPost> for DomainBlogPost {
    fn from(value: BlogPost) -> Self {
        let tags = decode_tags(&value.tags);
        Self {
            id: value.id,
            title: value.title,
            content: value.content,
            summary: value.summary,
            cover_image_url: value.cover_image_url,
            author: value.author,
            is_published: value.is_published,
            published_at: value.published_at,
            tags,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewBlogPost> for NewBlogPost<'a> {
    fn from(value: &'a DomainNewBlogPost) -> Self {
        Self {
            title: value.title.as_str(),
            content: value.content.as_str(),
            summary: value.summary.as_deref(),
            cover_image_url: value.cover_image_url.as_deref(),
            author: value.author.as_str(),
            is_published: value.is_published,
            published_at: value.published_at,
            tags: encode_tags(&value.tags),
        }
    }
}

impl<'a> From<&'a DomainUpdateBlogPost> for UpdateBlogPost<'a> {
    fn from(value: &'a DomainUpdateBlogPost) -> Self {
        Self {
            title: value.title.as_str(),
            content: value.content.as_str(),
            summary: value.summary.as_deref(),
            cover_image_url: value.cover_image_url.as_deref(),
            author: value.author.as_str(),
            is_published: value.is_published,
            published_at: value.published_at,
            tags: encode_tags(&value.tags),
            updated_at: value.updated_at,
        }
    }
}
