//! Declarative form schema
//!
//! A [`ContactSchema`] holds one [`FieldSchema`] per field. Each field schema
//! is an ordered list of rules; the first failing rule wins, so a field
//! reports at most one schema issue at a time.

use crate::form::FormValues;
use crate::issue::{FieldName, ValidationIssue};
use crate::validators::{EmailValidator, MinLengthValidator, RequiredValidator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Why a validation run happens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationTrigger {
	Change,
	Blur,
	Submit,
}

/// A single constraint with the message reported when it fails
#[derive(Debug, Clone)]
pub enum Rule {
	Required { message: String },
	MinLength { min: usize, message: String },
	Email { message: String },
}

impl Rule {
	fn check(&self, field: FieldName, value: &str) -> Result<(), ValidationIssue> {
		let (result, message) = match self {
			Rule::Required { message } => (RequiredValidator.validate(value), message),
			Rule::MinLength { min, message } => (MinLengthValidator::new(*min).validate(value), message),
			Rule::Email { message } => (EmailValidator::new().validate(value), message),
		};
		result.map_err(|kind| ValidationIssue::schema(field, kind, message.clone()))
	}
}

/// Constraints for one field
#[derive(Debug, Clone)]
pub struct FieldSchema {
	pub field: FieldName,
	/// Trim leading and trailing whitespace before the rules run
	pub strip: bool,
	pub rules: Vec<Rule>,
}

impl FieldSchema {
	/// Create a schema with no rules
	///
	/// # Examples
	///
	/// ```
	/// use contactform_forms::schema::FieldSchema;
	/// use contactform_forms::FieldName;
	///
	/// let schema = FieldSchema::new(FieldName::Name);
	/// assert!(schema.validate("").is_none());
	/// ```
	pub fn new(field: FieldName) -> Self {
		Self {
			field,
			strip: false,
			rules: Vec::new(),
		}
	}

	/// Strip surrounding whitespace before validating
	pub fn strip(mut self) -> Self {
		self.strip = true;
		self
	}

	/// Reject empty values
	///
	/// # Examples
	///
	/// ```
	/// use contactform_forms::schema::FieldSchema;
	/// use contactform_forms::{FieldName, IssueKind};
	///
	/// let schema = FieldSchema::new(FieldName::RecaptchaCode).required("ReCAPTCHA is required");
	/// let issue = schema.validate("").unwrap();
	/// assert_eq!(issue.kind, IssueKind::Required);
	/// assert_eq!(issue.message, "ReCAPTCHA is required");
	/// ```
	pub fn required(mut self, message: impl Into<String>) -> Self {
		self.rules.push(Rule::Required {
			message: message.into(),
		});
		self
	}

	/// Require at least `min` characters
	pub fn min_length(mut self, min: usize, message: impl Into<String>) -> Self {
		self.rules.push(Rule::MinLength {
			min,
			message: message.into(),
		});
		self
	}

	/// Require an email address
	pub fn email(mut self, message: impl Into<String>) -> Self {
		self.rules.push(Rule::Email {
			message: message.into(),
		});
		self
	}

	/// Run the rules in order and report the first failure
	pub fn validate(&self, value: &str) -> Option<ValidationIssue> {
		let value = if self.strip { value.trim() } else { value };
		self.rules
			.iter()
			.find_map(|rule| rule.check(self.field, value).err())
	}
}

/// Schema for the whole contact form
#[derive(Debug, Clone)]
pub struct ContactSchema {
	fields: Vec<FieldSchema>,
	validate_on_blur: bool,
}

impl ContactSchema {
	/// Build a schema from explicit field schemas
	pub fn new(fields: Vec<FieldSchema>) -> Self {
		Self {
			fields,
			validate_on_blur: true,
		}
	}

	/// Turn blur-time validation on or off
	pub fn with_blur_validation(mut self, enabled: bool) -> Self {
		self.validate_on_blur = enabled;
		self
	}

	/// Whether a run for `trigger` should happen at all.
	///
	/// `Change` is gated by the field (it only revalidates on change after a
	/// failure) and `Submit` always runs.
	pub fn runs_on(&self, trigger: ValidationTrigger) -> bool {
		match trigger {
			ValidationTrigger::Blur => self.validate_on_blur,
			ValidationTrigger::Change | ValidationTrigger::Submit => true,
		}
	}

	pub fn field(&self, field: FieldName) -> Option<&FieldSchema> {
		self.fields.iter().find(|schema| schema.field == field)
	}

	/// Validate a single field value
	pub fn validate_field(&self, field: FieldName, value: &str) -> Option<ValidationIssue> {
		self.field(field).and_then(|schema| schema.validate(value))
	}

	/// Validate every field of `values`.
	///
	/// Returns an empty map when the schema does not run for `trigger`.
	///
	/// # Examples
	///
	/// ```
	/// use contactform_forms::{ContactSchema, FieldName, FormValues, ValidationTrigger};
	///
	/// let schema = ContactSchema::default();
	/// let issues = schema.validate(&FormValues::default(), ValidationTrigger::Submit);
	/// assert_eq!(issues.len(), 3);
	/// assert_eq!(issues[&FieldName::Name].message, "Name is required");
	/// ```
	pub fn validate(
		&self,
		values: &FormValues,
		trigger: ValidationTrigger,
	) -> BTreeMap<FieldName, ValidationIssue> {
		if !self.runs_on(trigger) {
			return BTreeMap::new();
		}
		FieldName::ALL
			.into_iter()
			.filter_map(|field| {
				self.validate_field(field, values.get(field))
					.map(|issue| (field, issue))
			})
			.collect()
	}
}

impl Default for ContactSchema {
	fn default() -> Self {
		Self::new(vec![
			FieldSchema::new(FieldName::Name)
				.strip()
				.required("Name is required")
				.min_length(3, "Name must be at least 3 characters"),
			FieldSchema::new(FieldName::Email)
				.required("Email address is required")
				.email("Invalid email address"),
			FieldSchema::new(FieldName::RecaptchaCode).required("ReCAPTCHA is required"),
		])
	}
}
