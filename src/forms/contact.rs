use serde::Deserialize;
use validator::Validate;

use crate::domain::contact_submission::NewContactSubmission;
use crate::forms::{FormError, FormResult, optional_inline};

const NAME_MAX_LEN: u64 = 128;
const MESSAGE_MAX_LEN: u64 = 4000;

/// Payload of the public contact form.
///
/// Required fields are enforced here as well as in the browser, so a
/// hand-crafted request cannot insert an empty submission.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    #[validate(length(min = 1, max = MESSAGE_MAX_LEN))]
    pub message: String,
}

impl ContactForm {
    pub fn into_new_submission(self) -> FormResult<NewContactSubmission> {
        self.validate()?;

        let name = super::sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(FormError::EmptyField { field: "name" });
        }

        let message = super::sanitize_multiline_text(&self.message);
        if message.is_empty() {
            return Err(FormError::EmptyField { field: "message" });
        }

        Ok(NewContactSubmission {
            name,
            email: self.email.trim().to_string(),
            phone: optional_inline(self.phone.as_deref()),
            subject: optional_inline(self.subject.as_deref()),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_form() -> ContactForm {
        ContactForm {
            name: " Ravi ".to_string(),
            email: "ravi@example.com".to_string(),
            phone: Some(" +91 90000 00000 ".to_string()),
            subject: None,
            message: "Do you ship to Goa?".to_string(),
        }
    }

    #[test]
    fn contact_form_converts_successfully() {
        let submission = base_form().into_new_submission().expect("expected success");
        assert_eq!(submission.name, "Ravi");
        assert_eq!(submission.email, "ravi@example.com");
        assert_eq!(submission.phone.as_deref(), Some("+91 90000 00000"));
        assert!(submission.subject.is_none());
    }

    #[test]
    fn contact_form_rejects_invalid_email() {
        let mut form = base_form();
        form.email = "not-an-email".to_string();

        assert!(matches!(
            form.into_new_submission(),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn contact_form_rejects_empty_message() {
        let mut form = base_form();
        form.message = " \n ".to_string();

        let result = form.into_new_submission();
        assert!(result.is_err());
    }
}
