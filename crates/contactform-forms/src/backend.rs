//! Seams to the (simulated) server

use crate::form::{FormValues, SubmissionOutcome};
use crate::issue::{FieldName, ValidationIssue};
use async_trait::async_trait;
use std::time::Duration;

/// Receives valid form values and answers with an outcome
#[async_trait]
pub trait Submitter: Send + Sync {
	async fn submit(&self, values: &FormValues) -> SubmissionOutcome;
}

/// Field-scoped validator that runs after the schema passed, on blur.
///
/// Calls are debounced: a check only starts once `debounce()` has elapsed
/// without a newer request for the same field.
#[async_trait]
pub trait AsyncFieldValidator: Send + Sync {
	/// The field this validator is attached to
	fn field(&self) -> FieldName;

	fn debounce(&self) -> Duration;

	/// `Some(issue)` when the value is rejected
	async fn validate(&self, value: &str) -> Option<ValidationIssue>;
}
