use chrono::Local;
use serde::Deserialize;
use validator::Validate;

use crate::domain::testimonial::{NewTestimonial, UpdateTestimonial};
use crate::forms::{FormError, FormResult, optional_inline};

const NAME_MAX_LEN: u64 = 128;
const MIN_RATING: i32 = 1;
const MAX_RATING: i32 = 5;

/// Form payload shared by the testimonial create and edit dialogs.
#[derive(Debug, Deserialize, Validate)]
pub struct TestimonialForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    pub quote: String,
    pub rating: i32,
    pub location: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
}

impl TestimonialForm {
    pub fn into_new_testimonial(self) -> FormResult<NewTestimonial> {
        self.validate()?;
        let parts = self.into_parts()?;

        Ok(NewTestimonial {
            name: parts.name,
            quote: parts.quote,
            rating: parts.rating,
            location: parts.location,
            image_url: parts.image_url,
            is_featured: parts.is_featured,
        })
    }

    pub fn into_update_testimonial(self) -> FormResult<UpdateTestimonial> {
        self.validate()?;
        let parts = self.into_parts()?;

        Ok(UpdateTestimonial {
            name: parts.name,
            quote: parts.quote,
            rating: parts.rating,
            location: parts.location,
            image_url: parts.image_url,
            is_featured: parts.is_featured,
            updated_at: Local::now().naive_utc(),
        })
    }

    fn into_parts(self) -> FormResult<SanitizedTestimonial> {
        let name = super::sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(FormError::EmptyField { field: "name" });
        }

        let quote = super::sanitize_multiline_text(&self.quote);
        if quote.is_empty() {
            return Err(FormError::EmptyField { field: "quote" });
        }

        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(FormError::InvalidRating { value: self.rating });
        }

        Ok(SanitizedTestimonial {
            name,
            quote,
            rating: self.rating,
            location: optional_inline(self.location.as_deref()),
            image_url: optional_inline(self.image_url.as_deref()),
            is_featured: self.is_featured,
        })
    }
}

struct SanitizedTestimonial {
    name: String,
    quote: String,
    rating: i32,
    location: Option<String>,
    image_url: Option<String>,
    is_featured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn testimonial_form_rejects_out_of_range_rating() {
        let form = TestimonialForm {
            name: "Asha".to_string(),
            quote: "Lovely soap.".to_string(),
            rating: 6,
            location: None,
            image_url: None,
            is_featured: false,
        };

        assert!(matches!(
            form.into_new_testimonial(),
            Err(FormError::InvalidRating { value: 6 })
        ));
    }

    #[test]
    fn testimonial_form_converts_successfully() {
        let form = TestimonialForm {
            name: " Asha ".to_string(),
            quote: "Lovely soap.".to_string(),
            rating: 5,
            location: Some(" Pune ".to_string()),
            image_url: None,
            is_featured: true,
        };

        let testimonial = form.into_new_testimonial().expect("expected success");
        assert_eq!(testimonial.name, "Asha");
        assert_eq!(testimonial.location.as_deref(), Some("Pune"));
        assert!(testimonial.is_featured);
    }
}
