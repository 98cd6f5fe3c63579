use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::contact_info::{
    ContactInfo as DomainContactInfo, NewContactInfo as DomainNewContactInfo,
    UpdateContactInfo as DomainUpdateContactInfo,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::contact_info)]
pub struct ContactInfo {
    pub id: i32,
    pub kind: String,
    pub value: String,
    pub label: Option<String>,
    pub is_primary: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::contact_info)]
pub struct NewContactInfo<'a> {
    pub kind: &'a str,
    pub value: &'a str,
    pub label: Option<&'a str>,
    pub is_primary: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::contact_info)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateContactInfo<'a> {
    pub kind: &'a str,
    pub value: &'a str,
    pub label: Option<&'a str>,
    pub is_primary: bool,
    pub updated_at: NaiveDateTime,
}

impl From<ContactInfo> for DomainContactInfo {
    fn from(value: ContactInfo) -> Self {
        Self {
            id: value.id,
            kind: value.kind,
            value: value.value,
            label: value.label,
            is_primary: value.is_primary,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewContactInfo> for NewContactInfo<'a> {
    fn from(value: &'a DomainNewContactInfo) -> Self {
        Self {
            kind: value.kind.as_str(),
            value: value.value.as_str(),
            label: value.label.as_deref(),
            is_primary: value.is_primary,
        }
    }
}

impl<'a> From<&'a DomainUpdateContactInfo> for UpdateContactInfo<'a> {
    fn from(value: &'a DomainUpdateContactInfo) -> Self {
        Self {
            kind: value.kind.as_str(),
            value: value.value.as_str(),
            label: value.label.as_deref(),
            is_primary: value.is_primary,
            updated_at: value.updated_at,
        }
    }
}
