use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::about_content::{
    AboutContent as DomainAboutContent, NewAboutContent as DomainNewAboutContent,
    UpdateAboutContent as DomainUpdateAboutContent,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::about_content)]
pub struct AboutContent {
    pub id: i32,
    pub section: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub order_index: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::about_content)]
pub struct NewAboutContent<'a> {
    pub section: &'a str,
    pub title: Option<&'a str>,
    pub content: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub order_index: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::about_content)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateAboutContent<'a> {
    pub section: &'a str,
    pub title: Option<&'a str>,
    pub content: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub order_index: i32,
    pub updated_at: NaiveDateTime,
}

impl From<AboutContent> for DomainAboutContent {
    fn from(value: AboutContent) -> Self {
        Self {
            id: value.id,
            section: value.section,
            title: value.title,
            content: value.content,
            image_url: value.image_url,
            order_index: value.order_index,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewAboutContent> for NewAboutContent<'a> {
    fn from(value: &'a DomainNewAboutContent) -> Self {
        Self {
            section: value.section.as_str(),
            title: value.title.as_deref(),
            content: value.content.as_deref(),
            image_url: value.image_url.as_deref(),
            order_index: value.order_index,
        }
    }
}

impl<'a> From<&'a DomainUpdateAboutContent> for UpdateAboutContent<'a> {
    fn from(value: &'a DomainUpdateAboutContent) -> Self {
        Self {
            section: value.section.as_str(),
            title: value.title.as_deref(),
            content: value.content.as_deref(),
            image_url: value.image_url.as_deref(),
            order_index: value.order_index,
            updated_at: value.updated_at,
        }
    }
}
