//! Serializable snapshot of the form for the debug panel
//!
//! The snapshot is plain data, detached from the controller and its locks,
//! so it can be printed or shipped to whatever renders the debug zone.
//!
//! ## Aggregate errors
//!
//! `error_map` and `errors` only aggregate validation results (schema and
//! async slots). An error injected after a server rejection of the recaptcha
//! code shows on the field itself but is deliberately absent here.
//!
//! ## Example
//!
//! ```
//! use contactform_forms::snapshot::{FormSnapshot, SnapshotExt};
//! use contactform_forms::{ContactSchema, FormController, FormSettings};
//!
//! let form = FormController::new(ContactSchema::default(), FormSettings::default());
//! let snapshot: FormSnapshot = form.state().to_snapshot();
//!
//! let json = snapshot.to_pretty_json().unwrap();
//! assert!(json.contains("\"submissionAttempts\": 0"));
//! ```

use crate::form::{FormState, FormValues, SubmitState};
use crate::issue::{FieldName, ValidationIssue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Serializable view of the whole form state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
	pub values: FormValues,

	/// Aggregated validation errors per field (fields without errors omitted)
	pub error_map: BTreeMap<FieldName, Vec<ValidationIssue>>,

	/// Flattened aggregated errors in field display order
	pub errors: Vec<ValidationIssue>,

	pub submission_attempts: u32,
	pub is_submitting: bool,
	pub is_validating: bool,
	pub submit_state: SubmitState,

	/// Per-field flags
	pub fields: Vec<FieldSnapshot>,
}

/// Serializable view of one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSnapshot {
	pub name: FieldName,
	pub touched: bool,
	pub validating: bool,
	/// Everything on the field, injected errors included
	pub errors: Vec<ValidationIssue>,
}

impl FormSnapshot {
	pub fn to_pretty_json(&self) -> serde_json::Result<String> {
		serde_json::to_string_pretty(self)
	}
}

/// Extension trait to extract a [`FormSnapshot`]
pub trait SnapshotExt {
	fn to_snapshot(&self) -> FormSnapshot;
}

impl SnapshotExt for FormState {
	fn to_snapshot(&self) -> FormSnapshot {
		let mut error_map = BTreeMap::new();
		let mut errors = Vec::new();
		let mut fields = Vec::with_capacity(FieldName::ALL.len());

		for name in FieldName::ALL {
			let field = self.field(name);
			let aggregated: Vec<ValidationIssue> =
				field.aggregated_errors().into_iter().cloned().collect();
			if !aggregated.is_empty() {
				errors.extend(aggregated.iter().cloned());
				error_map.insert(name, aggregated);
			}
			fields.push(FieldSnapshot {
				name,
				touched: field.is_touched(),
				validating: field.is_validating(),
				errors: field.errors().into_iter().cloned().collect(),
			});
		}

		FormSnapshot {
			values: self.values(),
			error_map,
			errors,
			submission_attempts: self.submission_attempts,
			is_submitting: self.is_submitting,
			is_validating: self.is_validating(),
			submit_state: self.submit_state,
			fields,
		}
	}
}
