use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use thiserror::Error;
use validator::ValidationErrors;

pub mod about_content;
pub mod auth;
pub mod blog_posts;
pub mod categories;
pub mod contact;
pub mod contact_info;
pub mod products;
pub mod settings;
pub mod testimonials;

/// Result type returned by the form helpers.
pub type FormResult<T> = Result<T, FormError>;

/// Errors that can occur while converting submitted forms into domain
/// payloads.
#[derive(Debug, Error)]
pub enum FormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// A required field is empty after sanitization.
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },
    /// The provided price is not a valid decimal amount.
    #[error("invalid price `{value}`")]
    InvalidPrice { value: String },
    /// A rating outside the 1-5 star range.
    #[error("invalid rating {value}, expected 1 to 5")]
    InvalidRating { value: i32 },
    /// A settings edit referenced a path missing from the stored document.
    #[error("unknown settings path `{path}`")]
    UnknownPath { path: String },
    /// The settings form posted mismatched paths/values lists.
    #[error("settings form fields are mismatched")]
    MismatchedFields,
}

/// Trim, collapse whitespace runs, and strip control characters.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

/// Sanitize each line, then trim leading/trailing blank lines and collapse
/// runs of blank lines.
pub(crate) fn sanitize_multiline_text(input: &str) -> String {
    let mut lines: Vec<String> = input.lines().map(|line| sanitize_inline_text(line)).collect();

    while matches!(lines.first(), Some(line) if line.is_empty()) {
        lines.remove(0);
    }

    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }

    let mut result = Vec::with_capacity(lines.len());
    let mut previous_empty = false;
    for line in lines {
        if line.is_empty() {
            if previous_empty {
                continue;
            }
            previous_empty = true;
            result.push(String::new());
        } else {
            previous_empty = false;
            result.push(line);
        }
    }

    result.join("\n")
}

/// Sanitize an optional field, mapping whitespace-only input to `None`.
pub(crate) fn optional_inline(input: Option<&str>) -> Option<String> {
    input
        .map(sanitize_inline_text)
        .filter(|value| !value.is_empty())
}

pub(crate) fn optional_multiline(input: Option<&str>) -> Option<String> {
    input
        .map(sanitize_multiline_text)
        .filter(|value| !value.is_empty())
}

/// Parse a decimal amount like `12.34` into cents without going through
/// floating point.
pub(crate) fn parse_price_cents(input: &str) -> FormResult<i32> {
    let trimmed = input.trim();
    let invalid = || FormError::InvalidPrice {
        value: trimmed.to_string(),
    };

    let (whole, frac) = match trimmed.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (trimmed, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(invalid());
    }

    // Digits only: a sign would otherwise survive `parse` and store a
    // negative price.
    if !whole.chars().all(|ch| ch.is_ascii_digit())
        || !frac.chars().all(|ch| ch.is_ascii_digit())
    {
        return Err(invalid());
    }

    let whole_cents = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<i32>()
            .ok()
            .and_then(|value| value.checked_mul(100))
            .ok_or_else(invalid)?
    };

    let frac_cents = match frac.len() {
        0 => 0,
        1 | 2 => {
            let parsed = frac.parse::<i32>().map_err(|_| invalid())?;
            if frac.len() == 1 { parsed * 10 } else { parsed }
        }
        _ => return Err(invalid()),
    };

    whole_cents.checked_add(frac_cents).ok_or_else(invalid)
}

/// Deserialize `""` (an unselected `<option>` or blank input) as `None`.
pub(crate) fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_inline_text_collapses_whitespace() {
        assert_eq!(sanitize_inline_text("  Rose \t Water  "), "Rose Water");
        assert_eq!(sanitize_inline_text("a\u{0000}b"), "ab");
    }

    #[test]
    fn sanitize_multiline_text_trims_blank_lines() {
        assert_eq!(
            sanitize_multiline_text("\n\nFirst.\n\n\nSecond.\n\n"),
            "First.\n\nSecond."
        );
    }

    #[test]
    fn parse_price_cents_handles_decimals() {
        assert_eq!(parse_price_cents("12.34").unwrap(), 1234);
        assert_eq!(parse_price_cents("12.3").unwrap(), 1230);
        assert_eq!(parse_price_cents("12").unwrap(), 1200);
        assert_eq!(parse_price_cents(".50").unwrap(), 50);
        assert!(parse_price_cents("12.345").is_err());
        assert!(parse_price_cents("abc").is_err());
        assert!(parse_price_cents("").is_err());
    }

    #[test]
    fn parse_price_cents_rejects_signed_amounts() {
        assert!(parse_price_cents("-5").is_err());
        assert!(parse_price_cents("-0.50").is_err());
        assert!(parse_price_cents("+5").is_err());
        assert!(parse_price_cents("5.-1").is_err());
    }
}
