use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
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
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub category_id: Option<i32>,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub price_cents: i32,
    pub is_available: bool,
    pub is_featured: bool,
    pub display_order: i32,
    pub ingredients: Option<&'a str>,
    pub usage_instructions: Option<&'a str>,
    pub benefits: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateProduct<'a> {
    pub category_id: Option<i32>,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub price_cents: i32,
    pub is_available: bool,
    pub is_featured: bool,
    pub display_order: i32,
    pub ingredients: Option<&'a str>,
    pub usage_instructions: Option<&'a str>,
    pub benefits: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            category_id: value.category_id,
            name: value.name,
            description: value.description,
            image_url: value.image_url,
            price_cents: value.price_cents,
            is_available: value.is_available,
            is_featured: value.is_featured,
            display_order: value.display_order,
            ingredients: value.ingredients,
            usage_instructions: value.usage_instructions,
            benefits: value.benefits,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            category_id: value.category_id,
            name: value.name.as_str(),
            description: value.description.as_deref(),
            image_url: value.image_url.as_deref(),
            price_cents: value.price_cents,
            is_available: value.is_available,
            is_featured: value.is_featured,
            display_order: value.display_order,
            ingredients: value.ingredients.as_deref(),
            usage_instructions: value.usage_instructions.as_deref(),
            benefits: value.benefits.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(value: &'a DomainUpdateProduct) -> Self {
        Self {
            category_id: value.category_id,
            name: value.name.as_str(),
            description: value.description.as_deref(),
            image_url: value.image_url.as_deref(),
            price_cents: value.price_cents,
            is_available: value.is_available,
            is_featured: value.is_featured,
            display_order: value.display_order,
            ingredients: value.ingredients.as_deref(),
            usage_instructions: value.usage_instructions.as_deref(),
            benefits: value.benefits.as_deref(),
            updated_at: value.updated_at,
        }
    }
}
