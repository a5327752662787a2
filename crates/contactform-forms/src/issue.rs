//! Validation issues and field names
//!
//! Every error a field can carry, whether it came from the schema or from the
//! (simulated) server, is a [`ValidationIssue`]. The `source` discriminant
//! tells the two apart instead of server code imitating the schema's shape.

use crate::form::FormError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three inputs of the contact form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
	Name,
	Email,
	RecaptchaCode,
}

impl FieldName {
	/// All fields in display order. "First error" always means first in this list.
	pub const ALL: [FieldName; 3] = [FieldName::Name, FieldName::Email, FieldName::RecaptchaCode];

	/// The key used in serialized values and error maps.
	///
	/// # Examples
	///
	/// ```
	/// use contactform_forms::FieldName;
	///
	/// assert_eq!(FieldName::RecaptchaCode.as_str(), "recaptchaCode");
	/// ```
	pub fn as_str(&self) -> &'static str {
		match self {
			FieldName::Name => "name",
			FieldName::Email => "email",
			FieldName::RecaptchaCode => "recaptchaCode",
		}
	}

	/// Human-readable label shown next to the input
	pub fn label(&self) -> &'static str {
		match self {
			FieldName::Name => "Name:",
			FieldName::Email => "Email Address:",
			FieldName::RecaptchaCode => "I am not a robot",
		}
	}
}

impl fmt::Display for FieldName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for FieldName {
	type Err = FormError;

	/// # Examples
	///
	/// ```
	/// use contactform_forms::FieldName;
	///
	/// assert_eq!("email".parse::<FieldName>().unwrap(), FieldName::Email);
	/// assert!("phone".parse::<FieldName>().is_err());
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		FieldName::ALL
			.into_iter()
			.find(|field| field.as_str() == s)
			.ok_or_else(|| FormError::UnknownField(s.to_string()))
	}
}

/// What went wrong with a value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum IssueKind {
	/// Empty value (after stripping, where the field strips)
	Required,
	/// Shorter than the minimum number of characters
	TooShort { minimum: usize },
	/// Does not match the email grammar
	InvalidEmail,
	/// Rejected by the duplicate-email check
	AlreadyInUse,
	/// Recaptcha code refused by the server
	InvalidCode,
}

/// Where an issue originated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSource {
	Schema,
	Server,
}

/// A single validation problem attached to a field.
///
/// # Examples
///
/// ```
/// use contactform_forms::{FieldName, IssueKind, IssueSource, ValidationIssue};
///
/// let issue = ValidationIssue::server(FieldName::Email, IssueKind::AlreadyInUse, "Email already in use");
/// assert_eq!(issue.source, IssueSource::Server);
/// assert_eq!(issue.path, vec![FieldName::Email]);
/// assert_eq!(issue.to_string(), "Email already in use");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
	pub message: String,
	pub path: Vec<FieldName>,
	#[serde(flatten)]
	pub kind: IssueKind,
	pub source: IssueSource,
}

impl ValidationIssue {
	/// Issue produced by the schema validator
	pub fn schema(field: FieldName, kind: IssueKind, message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
			path: vec![field],
			kind,
			source: IssueSource::Schema,
		}
	}

	/// Issue originating from the server (duplicate check, recaptcha rejection)
	pub fn server(field: FieldName, kind: IssueKind, message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
			path: vec![field],
			kind,
			source: IssueSource::Server,
		}
	}

	/// The field this issue is attached to
	pub fn field(&self) -> Option<FieldName> {
		self.path.first().copied()
	}
}

impl fmt::Display for ValidationIssue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.message)
	}
}
