//! Duplicate-email check as an asynchronous field validator

use crate::submission::SubmissionSimulator;
use async_trait::async_trait;
use contactform_forms::{AsyncFieldValidator, FieldName, IssueKind, ValidationIssue};
use std::time::Duration;

pub const DUPLICATE_EMAIL_MESSAGE: &str = "Email already in use";

/// Rejects emails the simulated server already knows
#[derive(Debug, Clone)]
pub struct DuplicateEmailCheck {
	server: SubmissionSimulator,
}

impl DuplicateEmailCheck {
	pub fn new(server: SubmissionSimulator) -> Self {
		Self { server }
	}
}

#[async_trait]
impl AsyncFieldValidator for DuplicateEmailCheck {
	fn field(&self) -> FieldName {
		FieldName::Email
	}

	fn debounce(&self) -> Duration {
		self.server.config().debounce()
	}

	async fn validate(&self, value: &str) -> Option<ValidationIssue> {
		self.server.check_duplicate(value).await.then(|| {
			ValidationIssue::server(
				FieldName::Email,
				IssueKind::AlreadyInUse,
				DUPLICATE_EMAIL_MESSAGE,
			)
		})
	}
}
