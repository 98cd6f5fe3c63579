use chrono::Local;
use serde::Deserialize;
use validator::Validate;

use crate::domain::contact_info::{NewContactInfo, UpdateContactInfo};
use crate::forms::{FormError, FormResult, optional_inline};

const KIND_MAX_LEN: u64 = 64;

/// Form payload shared by the contact info create and edit dialogs.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactInfoForm {
    /// Channel kind: "phone", "email", "address", ...
    #[validate(length(min = 1, max = KIND_MAX_LEN))]
    pub kind: String,
    pub value: String,
    pub label: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

impl ContactInfoForm {
    pub fn into_new_contact_info(self) -> FormResult<NewContactInfo> {
        self.validate()?;
        let parts = self.into_parts()?;

        Ok(NewContactInfo {
            kind: parts.kind,
            value: parts.value,
            label: parts.label,
            is_primary: parts.is_primary,
        })
    }

    pub fn into_update_contact_info(self) -> FormResult<UpdateContactInfo> {
        self.validate()?;
        let parts = self.into_parts()?;

        Ok(UpdateContactInfo {
            kind: parts.kind,
            value: parts.value,
            label: parts.label,
            is_primary: parts.is_primary,
            updated_at: Local::now().naive_utc(),
        })
    }

    fn into_parts(self) -> FormResult<SanitizedContactInfo> {
        let kind = super::sanitize_inline_text(&self.kind).to_lowercase();
        if kind.is_empty() {
            return Err(FormError::EmptyField { field: "kind" });
        }

        let value = super::sanitize_inline_text(&self.value);
        if value.is_empty() {
            return Err(FormError::EmptyField { field: "value" });
        }

        Ok(SanitizedContactInfo {
            kind,
            value,
            label: optional_inline(self.label.as_deref()),
            is_primary: self.is_primary,
        })
    }
}

struct SanitizedContactInfo {
    kind: String,
    value: String,
    label: Option<String>,
    is_primary: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_info_form_lowercases_kind() {
        let form = ContactInfoForm {
            kind: " Phone ".to_string(),
            value: "+91 98765 43210".to_string(),
            label: Some("Store front".to_string()),
            is_primary: true,
        };

        let info = form.into_new_contact_info().expect("expected success");
        assert_eq!(info.kind, "phone");
        assert_eq!(info.value, "+91 98765 43210");
        assert!(info.is_primary);
    }

    #[test]
    fn contact_info_form_requires_value() {
        let form = ContactInfoForm {
            kind: "email".to_string(),
            value: "  ".to_string(),
            label: None,
            is_primary: false,
        };

        assert!(matches!(
            form.into_new_contact_info(),
            Err(FormError::EmptyField { field: "value" })
        ));
    }
}
