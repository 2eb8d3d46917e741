//! Input validation for signup and login payloads
//!
//! Structural checks produce field-scoped [`FieldError`]s so handlers can
//! return them verbatim in the error envelope. The password strength
//! policy returns one message per missing character class rather than
//! stopping at the first violation.

use crate::models::{Category, Gender};
use crate::types::{FieldError, SignupRequest};

/// Validate email format
pub fn validate_email(email: &str) -> bool {
    if email.is_empty() || email.len() > 255 {
        return false;
    }
    let email_regex = regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    email_regex.is_match(email)
}

/// Validate password strength
///
/// Returns one message per unmet requirement; an empty vector means the
/// password passes the policy.
pub fn validate_password_strength(password: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        errors.push("Password must contain at least one letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one number".to_string());
    }
    if password.chars().all(|c| c.is_ascii_alphanumeric()) {
        errors.push("Password must contain at least one special character".to_string());
    }

    errors
}

/// Structural validation of the signup payload
///
/// Covers the unconditional fields only; category-specific requirements
/// are checked separately by [`validate_category_fields`] because the
/// workflow runs them after the duplicate-email lookup.
pub fn validate_signup_structure(req: &SignupRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if req.name.trim().len() < 2 {
        errors.push(FieldError::new(
            "name",
            "Name must be at least 2 characters long",
        ));
    }
    if !validate_email(req.email.trim()) {
        errors.push(FieldError::new("email", "Please enter a valid email"));
    }
    if req.password.len() < 8 {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 8 characters long",
        ));
    }
    if req.mobile.chars().filter(|c| c.is_ascii_digit()).count() < 10 {
        errors.push(FieldError::new(
            "mobile",
            "Mobile number must be at least 10 digits",
        ));
    }
    if req.gender.parse::<Gender>().is_err() {
        errors.push(FieldError::new(
            "gender",
            "Gender must be one of male, female or other",
        ));
    }
    if req.category.parse::<Category>().is_err() {
        errors.push(FieldError::new(
            "category",
            "Category must be either college or alumni",
        ));
    }

    errors
}

/// Category-specific fields extracted from a signup payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryData {
    College { course: String, graduation_year: i32 },
    Alumni { profession: String, passed_out_year: i32 },
}

/// Validate the category-conditional signup fields
///
/// College signups require course and graduation year; alumni signups
/// require profession and passed-out year.
pub fn validate_category_fields(
    category: Category,
    req: &SignupRequest,
) -> Result<CategoryData, Vec<FieldError>> {
    let mut errors = Vec::new();

    match category {
        Category::College => {
            let course = req.course.as_deref().map(str::trim).unwrap_or("");
            if course.is_empty() {
                errors.push(FieldError::new("course", "Course is required"));
            }
            let year = match req.graduation_year.as_deref().map(str::trim) {
                None | Some("") => {
                    errors.push(FieldError::new(
                        "graduationYear",
                        "Graduation year is required",
                    ));
                    None
                }
                Some(raw) => match raw.parse::<i32>() {
                    Ok(y) => Some(y),
                    Err(_) => {
                        errors.push(FieldError::new(
                            "graduationYear",
                            "Graduation year must be a valid year",
                        ));
                        None
                    }
                },
            };
            match (errors.is_empty(), year) {
                (true, Some(graduation_year)) => Ok(CategoryData::College {
                    course: course.to_string(),
                    graduation_year,
                }),
                _ => Err(errors),
            }
        }
        Category::Alumni => {
            let profession = req.profession.as_deref().map(str::trim).unwrap_or("");
            if profession.is_empty() {
                errors.push(FieldError::new("profession", "Profession is required"));
            }
            let year = match req.passed_out_year.as_deref().map(str::trim) {
                None | Some("") => {
                    errors.push(FieldError::new(
                        "passedOutYear",
                        "Year passed out is required",
                    ));
                    None
                }
                Some(raw) => match raw.parse::<i32>() {
                    Ok(y) => Some(y),
                    Err(_) => {
                        errors.push(FieldError::new(
                            "passedOutYear",
                            "Year passed out must be a valid year",
                        ));
                        None
                    }
                },
            };
            match (errors.is_empty(), year) {
                (true, Some(passed_out_year)) => Ok(CategoryData::Alumni {
                    profession: profession.to_string(),
                    passed_out_year,
                }),
                _ => Err(errors),
            }
        }
    }
}
