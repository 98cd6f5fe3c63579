use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::contact_submission::{
    ContactSubmission as DomainContactSubmission,
    NewContactSubmission as DomainNewContactSubmission,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::contact_submissions)]
pub struct ContactSubmission {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::contact_submissions)]
pub struct NewContactSubmission<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub subject: Option<&'a str>,
    pub message: &'a str,
}

impl From<ContactSubmission> for DomainContactSubmission {
    fn from(value: ContactSubmission) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            phone: value.phone,
            subject: value.subject,
            message: value.message,
            created_at: value.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewContactSubmission> for NewContactSubmission<'a> {
    fn from(value: &'a DomainNewContactSubmission) -> Self {
        Self {
            name: value.name.as_str(),
            email: value.email.as_str(),
            phone: value.phone.as_deref(),
            subject: value.subject.as_deref(),
            message: value.message.as_str(),
        }
    }
}
