//! The post create/edit form and its validation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Post;

pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// User-submitted post fields. Missing fields deserialize as empty strings so
/// that they are reported by [`PostForm::validate`] instead of failing decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
}

/// Cleaned form data, ready to be written to a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidPost {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Per-field validation failures, in form field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl PostForm {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }

    /// Check required fields. Surrounding whitespace is stripped before the check
    /// and from the cleaned values.
    pub fn validate(&self) -> Result<ValidPost, ValidationErrors> {
        let title = self.title.trim();
        let text = self.text.trim();

        let mut errors = ValidationErrors::default();
        if title.is_empty() {
            errors.push("title", REQUIRED_MESSAGE);
        }
        if text.is_empty() {
            errors.push("text", REQUIRED_MESSAGE);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidPost {
            title: title.to_string(),
            text: text.to_string(),
        })
    }
}

impl From<&Post> for PostForm {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            text: post.text.clone(),
        }
    }
}

impl ValidationErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// First message recorded for `field`.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_form() {
        let form = PostForm::new("Post with post new", "Text with post new");
        let valid = form.validate().unwrap();
        assert_eq!(valid.title, "Post with post new");
        assert_eq!(valid.text, "Text with post new");
    }

    #[test]
    fn test_missing_fields_are_required() {
        let errors = PostForm::default().validate().unwrap_err();
        assert_eq!(errors.get("title"), Some(REQUIRED_MESSAGE));
        assert_eq!(errors.get("text"), Some(REQUIRED_MESSAGE));
        assert_eq!(errors.iter().count(), 2);
    }

    #[test]
    fn test_blank_title_only() {
        let errors = PostForm::new("   ", "body").validate().unwrap_err();
        assert_eq!(errors.get("title"), Some(REQUIRED_MESSAGE));
        assert_eq!(errors.get("text"), None);
        assert_eq!(errors.to_string(), "title: This field is required.");
    }

    #[test]
    fn test_values_are_stripped() {
        let valid = PostForm::new("  Title \n", "\tText ").validate().unwrap();
        assert_eq!(valid.title, "Title");
        assert_eq!(valid.text, "Text");
    }
}
