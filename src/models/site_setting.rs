use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde_json::Value;

use crate::domain::site_setting::{
    NewSiteSetting as DomainNewSiteSetting, SiteSetting as DomainSiteSetting,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::site_settings)]
pub struct SiteSetting {
    pub id: i32,
    pub key: String,
    pub value: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::site_settings)]
pub struct NewSiteSetting<'a> {
    pub key: &'a str,
    pub value: String,
    pub description: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::site_settings)]
pub struct UpdateSiteSettingValue {
    pub value: String,
    pub updated_at: NaiveDateTime,
}

impl From<SiteSetting> for DomainSiteSetting {
    fn from(value: SiteSetting) -> Self {
        // A malformed document degrades to a plain string leaf instead of
        // failing the whole row.
        let parsed = serde_json::from_str(&value.value)
            .unwrap_or_else(|_| Value::String(value.value.clone()));
        Self {
            id: value.id,
            key: value.key,
            value: parsed,
            description: value.description,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewSiteSetting> for NewSiteSetting<'a> {
    fn from(value: &'a DomainNewSiteSetting) -> Self {
        Self {
            key: value.key.as_str(),
            value: value.value.to_string(),
            description: value.description.as_deref(),
        }
    }
}
