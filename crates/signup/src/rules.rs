//! Validation rules for the diner sign-up steps.
//!
//! Each field reports at most one message: the first rule it breaks.

use std::sync::LazyLock;

use openmeal_wizard::{FieldErrors, FieldValues, Validator};
use regex::Regex;

use crate::upload::{files_in, ALLOWED_MIME_TYPES, MAX_UPLOAD_BYTES};

pub const NAME_MAX_CHARS: usize = 72;
pub const PASSWORD_MIN_CHARS: usize = 8;
pub const PASSWORD_MAX_CHARS: usize = 32;

/// Symbols a password must draw at least one character from.
pub const PASSWORD_SYMBOLS: &str = "@#$%^&+=";

#[allow(clippy::expect_used)]
static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(?([0-9]{3})\)?[-. ]?([0-9]{3})[-. ]?([0-9]{4})$").expect("compile regex")
});

#[allow(clippy::expect_used)]
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$")
        .expect("compile regex")
});

/// Step 1: account details.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicInfoRules;

impl Validator for BasicInfoRules {
    fn validate(&self, values: &FieldValues) -> FieldErrors {
        let mut errors = FieldErrors::new();
        let mut check = |field: &str, result: Result<(), String>| {
            if let Err(message) = result {
                errors.insert(field.to_string(), message);
            }
        };

        let password = text(values, "password");
        check("name", check_name(text(values, "name")));
        check("email", check_email(text(values, "email")));
        check("phone", check_phone(text(values, "phone")));
        check("password", check_password(password));
        check(
            "passwordConfirm",
            check_confirmation(password, text(values, "passwordConfirm")),
        );
        errors
    }
}

/// Step 3: photo ID upload.
#[derive(Debug, Clone, Copy, Default)]
pub struct UploadRules;

impl Validator for UploadRules {
    fn validate(&self, values: &FieldValues) -> FieldErrors {
        let mut errors = FieldErrors::new();
        let files = files_in(values.get("uploadedFiles"));
        if files.is_empty() {
            errors.insert("uploadedFiles".into(), "Please upload a photo ID".into());
            return errors;
        }

        let mut messages = Vec::new();
        for file in &files {
            if !ALLOWED_MIME_TYPES.contains(&file.mime_type.as_str()) {
                messages.push("File must be jpeg or png");
            }
            if file.size == 0 || file.size > MAX_UPLOAD_BYTES {
                messages.push("File must be < 1 Mb");
            }
        }
        if !messages.is_empty() {
            messages.dedup();
            errors.insert("uploadedFiles".into(), messages.join(". "));
        }
        errors
    }
}

fn text<'a>(values: &'a FieldValues, field: &str) -> &'a str {
    values.get(field).and_then(|v| v.as_str()).unwrap_or("")
}

fn check_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Please enter full name".into());
    }
    if name.chars().count() > NAME_MAX_CHARS {
        return Err(format!("name must be at most {} characters", NAME_MAX_CHARS));
    }
    Ok(())
}

fn check_email(email: &str) -> Result<(), String> {
    if email.trim().is_empty() {
        return Err("Please enter email".into());
    }
    if !EMAIL_REGEX.is_match(email.trim()) {
        return Err("Please enter a valid email".into());
    }
    Ok(())
}

fn check_phone(phone: &str) -> Result<(), String> {
    if phone.trim().is_empty() {
        return Err("Please enter phone".into());
    }
    if !PHONE_REGEX.is_match(phone) {
        return Err("Please enter a valild phone number".into());
    }
    Ok(())
}

fn check_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Please enter password".into());
    }
    let len = password.chars().count();
    if len < PASSWORD_MIN_CHARS {
        return Err(format!(
            "password must be at least {} characters",
            PASSWORD_MIN_CHARS
        ));
    }
    if len > PASSWORD_MAX_CHARS {
        return Err(format!(
            "password must be at most {} characters",
            PASSWORD_MAX_CHARS
        ));
    }

    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| PASSWORD_SYMBOLS.contains(c));
    if !(has_lower && has_upper && has_digit && has_symbol) {
        return Err("Requires 1 lower, 1 upper, 1 number, and 1 of @#$%^&+=".into());
    }
    Ok(())
}

fn check_confirmation(password: &str, confirmation: &str) -> Result<(), String> {
    if confirmation.is_empty() {
        return Err("Please confirm password".into());
    }
    if confirmation != password {
        return Err("Passwords must match".into());
    }
    Ok(())
}
