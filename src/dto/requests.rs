use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::errors::ApiError;

#[derive(Debug, Validate, Deserialize)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Username is required."))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Validate, Deserialize)]
pub struct PostForm {
    #[validate(length(min = 1, message = "Title is required."))]
    pub title: String,
    // The body may be empty.
    #[serde(default)]
    pub body: String,
}

impl RegisterRequest {
    pub fn validated(&self) -> Result<(), ApiError> {
        self.validate()
            .map_err(|e| ApiError::Validation(first_message(&e, &["username", "password"])))
    }
}

impl PostForm {
    pub fn validated(&self) -> Result<(), ApiError> {
        self.validate()
            .map_err(|e| ApiError::Validation(first_message(&e, &["title"])))
    }
}

/// Picks one user-facing message, checking fields in declared order so the
/// reported error is deterministic when several fields are bad.
fn first_message(errors: &ValidationErrors, fields: &[&str]) -> String {
    for field in fields {
        if let Some(list) = errors.field_errors().get(*field) {
            if let Some(msg) = list.iter().find_map(|e| e.message.as_ref()) {
                return msg.to_string();
            }
        }
    }
    errors.to_string()
}
