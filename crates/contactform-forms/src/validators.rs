//! Value validators used by the schema rules
//!
//! Validators only answer "is this value acceptable" and report the
//! [`IssueKind`] on failure. Messages and paths are attached by the schema.

use crate::issue::IssueKind;
use regex::Regex;
use std::sync::LazyLock;

// Email address pattern.
//
// - Local part: dot-separated atoms of letters, digits and `_'+-`, so no
//   leading, trailing or doubled dots
// - Domain: one or more labels that do not start or end with a hyphen
// - Top-level domain of at least two letters
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"^[A-Za-z0-9_'+\-]+(\.[A-Za-z0-9_'+\-]+)*@([A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$",
	)
	.expect("EMAIL_REGEX: invalid regex pattern")
});

/// Rejects empty values.
///
/// # Examples
///
/// ```
/// use contactform_forms::validators::RequiredValidator;
///
/// assert!(RequiredValidator.validate("x").is_ok());
/// assert!(RequiredValidator.validate("").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredValidator;

impl RequiredValidator {
	pub fn validate(&self, value: &str) -> Result<(), IssueKind> {
		if value.is_empty() {
			Err(IssueKind::Required)
		} else {
			Ok(())
		}
	}
}

/// Requires at least `min` characters (Unicode scalar values, not bytes).
///
/// # Examples
///
/// ```
/// use contactform_forms::validators::MinLengthValidator;
/// use contactform_forms::IssueKind;
///
/// let validator = MinLengthValidator::new(3);
/// assert!(validator.validate("Zoé").is_ok());
/// assert_eq!(validator.validate("Jo"), Err(IssueKind::TooShort { minimum: 3 }));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MinLengthValidator {
	min: usize,
}

impl MinLengthValidator {
	pub fn new(min: usize) -> Self {
		Self { min }
	}

	pub fn min(&self) -> usize {
		self.min
	}

	pub fn validate(&self, value: &str) -> Result<(), IssueKind> {
		if value.chars().count() >= self.min {
			Ok(())
		} else {
			Err(IssueKind::TooShort { minimum: self.min })
		}
	}
}

/// Validates that a string is a well-formed email address.
///
/// # Examples
///
/// ```
/// use contactform_forms::validators::EmailValidator;
///
/// let validator = EmailValidator::new();
/// assert!(validator.validate("jane.doe@example.com").is_ok());
/// assert!(validator.validate("jane@").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailValidator;

impl EmailValidator {
	pub fn new() -> Self {
		Self
	}

	pub fn validate(&self, value: &str) -> Result<(), IssueKind> {
		if EMAIL_REGEX.is_match(value) {
			Ok(())
		} else {
			Err(IssueKind::InvalidEmail)
		}
	}
}
