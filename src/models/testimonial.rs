use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::testimonial::{
    NewTestimonial as DomainNewTestimonial, Testimonial as DomainTestimonial,
    UpdateTestimonial as DomainUpdateTestimonial,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::testimonials)]
pub struct Testimonial {
    pub id: i32,
    pub name: String,
    pub quote: String,
    pub rating: i32,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub is_featured: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::testimonials)]
pub struct NewTestimonial<'a> {
    pub name: &'a str,
    pub quote: &'a str,
    pub rating: i32,
    pub location: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub is_featured: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::testimonials)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateTestimonial<'a> {
    pub name: &'a str,
    pub quote: &'a str,
    pub rating: i32,
    pub location: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub is_featured: bool,
    pub updated_at: NaiveDateTime,
}

impl From<Testimonial> for DomainTestimonial {
    fn from(value: Testimonial) -> Self {
        Self {
            id: value.id,
            name: value.name,
            quote: value.quote,
            rating: value.rating,
            location: value.location,
            image_url: value.image_url,
            is_featured: value.is_featured,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewTestimonial> for NewTestimonial<'a> {
    fn from(value: &'a DomainNewTestimonial) -> Self {
        Self {
            name: value.name.as_str(),
            quote: value.quote.as_str(),
            rating: value.rating,
            location: value.location.as_deref(),
            image_url: value.image_url.as_deref(),
            is_featured: value.is_featured,
        }
    }
}

impl<'a> From<&'a DomainUpdateTestimonial> for UpdateTestimonial<'a> {
    fn from(value: &'a DomainUpdateTestimonial) -> Self {
        Self {
            name: value.name.as_str(),
            quote: value.quote.as_str(),
            rating: value.rating,
            location: value.location.as_deref(),
            image_url: value.image_url.as_deref(),
            is_featured: value.is_featured,
            updated_at: value.updated_at,
        }
    }
}
