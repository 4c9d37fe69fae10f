// FILE: crates/config/src/validation.rs

//! Validation system for configuration values
//!
//! Each config section implements [`ConfigSection`]; field checks come from
//! [`Validator`] and are gathered with [`Validator::collect_errors`].

pub use crate::error::ValidationError;

/// Trait for configuration sections that can validate themselves
pub trait ConfigSection: Default {
    /// Returns every problem found; `Ok` means valid
    fn validate(&self) -> Result<(), Vec<ValidationError>>;

    /// Returns the section name for error reporting
    fn section_name(&self) -> &'static str;
}

/// Common validators for config values
pub struct Validator;

impl Validator {
    /// Validates that a numeric value is at least `min`
    pub fn at_least<T>(value: T, min: T, field: &str) -> Result<(), ValidationError>
    where
        T: PartialOrd + std::fmt::Display + Copy,
    {
        if value < min {
            Err(ValidationError::with_value(
                field,
                format!("must be at least {}", min),
                value,
            ))
        } else {
            Ok(())
        }
    }

    /// Validates that a string is not empty
    pub fn not_empty(value: &str, field: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            Err(ValidationError::new(field, "must not be empty"))
        } else {
            Ok(())
        }
    }

    /// Validates that a string is made of ASCII letters only
    pub fn ascii_letters(value: &str, field: &str) -> Result<(), ValidationError> {
        if value.is_empty() || !value.chars().all(|c| c.is_ascii_alphabetic()) {
            Err(ValidationError::with_value(
                field,
                "must be one or more ASCII letters",
                value,
            ))
        } else {
            Ok(())
        }
    }

    /// Validates that a template carries the given placeholder
    pub fn contains_placeholder(
        value: &str,
        placeholder: &str,
        field: &str,
    ) -> Result<(), ValidationError> {
        if value.contains(placeholder) {
            Ok(())
        } else {
            Err(ValidationError::with_value(
                field,
                format!("must contain {}", placeholder),
                value,
            ))
        }
    }

    /// Collects multiple validation results into a single result
    pub fn collect_errors(
        results: Vec<Result<(), ValidationError>>,
    ) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = results.into_iter().filter_map(|r| r.err()).collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
