use serde::Deserialize;

use crate::forms::{FormError, FormResult};

/// Payload of the nested site-settings form.
///
/// The template renders one hidden `paths` input and one visible `values`
/// input per leaf field; the two lists are parallel. Multi-value bodies are
/// decoded with `serde_html_form` in the route handler.
#[derive(Debug, Deserialize)]
pub struct UpdateSettingForm {
    /// Id of the setting row being edited.
    pub id: i32,
    /// Dotted leaf paths, e.g. `footer.social_links.facebook`.
    #[serde(default)]
    pub paths: Vec<String>,
    /// Submitted leaf text, parallel to `paths`.
    #[serde(default)]
    pub values: Vec<String>,
}

impl UpdateSettingForm {
    /// Pair up paths and values, rejecting mismatched lists.
    pub fn into_edits(self) -> FormResult<(i32, Vec<(String, String)>)> {
        if self.paths.len() != self.values.len() {
            return Err(FormError::MismatchedFields);
        }

        Ok((self.id, self.paths.into_iter().zip(self.values).collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_multi_value_body() {
        let body = "id=3&paths=footer.tagline&values=Pure+goods&paths=footer.year&values=2024";
        let form: UpdateSettingForm = serde_html_form::from_str(body).expect("decode");

        let (id, edits) = form.into_edits().expect("expected success");
        assert_eq!(id, 3);
        assert_eq!(
            edits,
            vec![
                ("footer.tagline".to_string(), "Pure goods".to_string()),
                ("footer.year".to_string(), "2024".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_mismatched_lists() {
        let form = UpdateSettingForm {
            id: 1,
            paths: vec!["a".to_string()],
            values: Vec::new(),
        };

        assert!(matches!(
            form.into_edits(),
            Err(FormError::MismatchedFields)
        ));
    }
}
