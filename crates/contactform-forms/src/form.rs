use crate::field::{CheckTicket, ErrorSlot, FieldState};
use crate::issue::{FieldName, IssueKind, ValidationIssue};
use crate::schema::{ContactSchema, ValidationTrigger};
use crate::settings::{FormSettings, ScrollPolicy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
	#[error("Unknown field: {0}")]
	UnknownField(String),
	#[error("The form has already been submitted successfully")]
	Completed,
}

pub type FormResult<T> = Result<T, FormError>;

/// Message injected into the recaptcha field when the server refuses the code
pub const RECAPTCHA_REJECTED_MESSAGE: &str = "ReCAPTCHA is invalid";

/// Candidate values of the contact form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValues {
	pub name: String,
	pub email: String,
	pub recaptcha_code: String,
}

impl FormValues {
	/// # Examples
	///
	/// ```
	/// use contactform_forms::{FieldName, FormValues};
	///
	/// let mut values = FormValues::default();
	/// values.set(FieldName::Email, "jane@example.com");
	/// assert_eq!(values.get(FieldName::Email), "jane@example.com");
	/// ```
	pub fn get(&self, field: FieldName) -> &str {
		match field {
			FieldName::Name => &self.name,
			FieldName::Email => &self.email,
			FieldName::RecaptchaCode => &self.recaptcha_code,
		}
	}

	pub fn set(&mut self, field: FieldName, value: impl Into<String>) {
		let value = value.into();
		match field {
			FieldName::Name => self.name = value,
			FieldName::Email => self.email = value,
			FieldName::RecaptchaCode => self.recaptcha_code = value,
		}
	}
}

/// Result of the last completed submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitState {
	#[default]
	Idle,
	Success,
	Error,
}

/// What the (simulated) server answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionOutcome {
	Success,
	ServerError,
	RecaptchaRejected,
}

/// What `begin_submission` decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
	/// A submission is already in flight; nothing changed
	Ignored,
	/// Validation failed. `scroll` tells whether the scroll signal should fire.
	Invalid { first_error: FieldName, scroll: bool },
	/// Valid; the values must be sent and the result passed to `finish_submission`
	Ready(FormValues),
}

/// Aggregate state of the form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
	pub name: FieldState<String>,
	pub email: FieldState<String>,
	pub recaptcha_code: FieldState<String>,
	pub submission_attempts: u32,
	pub is_submitting: bool,
	pub submit_state: SubmitState,
}

impl FormState {
	pub fn field(&self, field: FieldName) -> &FieldState<String> {
		match field {
			FieldName::Name => &self.name,
			FieldName::Email => &self.email,
			FieldName::RecaptchaCode => &self.recaptcha_code,
		}
	}

	pub fn field_mut(&mut self, field: FieldName) -> &mut FieldState<String> {
		match field {
			FieldName::Name => &mut self.name,
			FieldName::Email => &mut self.email,
			FieldName::RecaptchaCode => &mut self.recaptcha_code,
		}
	}

	pub fn values(&self) -> FormValues {
		FormValues {
			name: self.name.value().clone(),
			email: self.email.value().clone(),
			recaptcha_code: self.recaptcha_code.value().clone(),
		}
	}

	/// True while any field has an asynchronous check pending
	pub fn is_validating(&self) -> bool {
		FieldName::ALL
			.into_iter()
			.any(|field| self.field(field).is_validating())
	}

	/// Conjunction of all field validities.
	///
	/// This is field-level validity: an injected error such as a rejected
	/// recaptcha code makes the form invalid even though it is absent from
	/// the aggregate view of [`FormSnapshot`](crate::snapshot::FormSnapshot).
	pub fn is_valid(&self) -> bool {
		FieldName::ALL
			.into_iter()
			.all(|field| !self.field(field).has_errors())
	}

	/// First field in display order that currently has an error
	pub fn first_invalid_field(&self) -> Option<FieldName> {
		FieldName::ALL
			.into_iter()
			.find(|field| self.field(*field).has_errors())
	}

	pub fn is_completed(&self) -> bool {
		self.submit_state == SubmitState::Success
	}
}

/// Synchronous state machine of the contact form.
///
/// Owns the schema, the settings and the [`FormState`]. Async work (debounced
/// checks, the submission round trip) is driven from outside through
/// [`CheckTicket`]s and the `begin_submission`/`finish_submission` pair.
#[derive(Debug, Clone)]
pub struct FormController {
	schema: ContactSchema,
	settings: FormSettings,
	state: FormState,
	async_fields: BTreeSet<FieldName>,
	scrolled_once: bool,
}

impl FormController {
	/// Create a controller for an empty, untouched form
	///
	/// # Examples
	///
	/// ```
	/// use contactform_forms::{ContactSchema, FormController, FormSettings, SubmitState};
	///
	/// let form = FormController::new(ContactSchema::default(), FormSettings::default());
	/// assert_eq!(form.state().submission_attempts, 0);
	/// assert_eq!(form.state().submit_state, SubmitState::Idle);
	/// ```
	pub fn new(schema: ContactSchema, settings: FormSettings) -> Self {
		let schema = schema.with_blur_validation(settings.validate_on_blur);
		Self {
			schema,
			settings,
			state: FormState::default(),
			async_fields: BTreeSet::new(),
			scrolled_once: false,
		}
	}

	pub fn state(&self) -> &FormState {
		&self.state
	}

	pub fn schema(&self) -> &ContactSchema {
		&self.schema
	}

	pub fn settings(&self) -> &FormSettings {
		&self.settings
	}

	/// Declare that `field` has an asynchronous validator, run on blur
	pub fn register_async_field(&mut self, field: FieldName) {
		self.async_fields.insert(field);
	}

	fn ensure_editable(&self) -> FormResult<()> {
		if self.state.is_completed() {
			Err(FormError::Completed)
		} else {
			Ok(())
		}
	}

	/// Run the schema for one field and store the result.
	///
	/// Returns whether the field is free of schema errors afterwards.
	pub fn validate_field(&mut self, field: FieldName, trigger: ValidationTrigger) -> FormResult<bool> {
		self.ensure_editable()?;
		Ok(self.run_schema(field, trigger))
	}

	fn run_schema(&mut self, field: FieldName, trigger: ValidationTrigger) -> bool {
		if !self.schema.runs_on(trigger) {
			return self.state.field(field).error(ErrorSlot::Schema).is_none();
		}
		let issue = self.schema.validate_field(field, self.state.field(field).value());
		let passed = issue.is_none();
		let switch = self.settings.revalidate_on_change_after_error;
		self.state.field_mut(field).apply_schema_result(issue, switch);
		passed
	}

	/// Update a field's value, re-running the schema if the field is in
	/// change mode
	///
	/// # Examples
	///
	/// ```
	/// use contactform_forms::{ContactSchema, FieldName, FormController, FormSettings};
	///
	/// let mut form = FormController::new(ContactSchema::default(), FormSettings::default());
	///
	/// // Fresh field: typing does not validate yet
	/// form.set_value(FieldName::Name, "Jo").unwrap();
	/// assert!(!form.state().name.has_errors());
	///
	/// // After a failed blur the field revalidates on every change
	/// form.handle_blur(FieldName::Name).unwrap();
	/// assert!(form.state().name.has_errors());
	/// form.set_value(FieldName::Name, "Joe").unwrap();
	/// assert!(!form.state().name.has_errors());
	/// ```
	pub fn set_value(&mut self, field: FieldName, value: impl Into<String>) -> FormResult<()> {
		self.ensure_editable()?;
		let state = self.state.field_mut(field);
		state.set_value(value.into());
		if state.should_validate_on(ValidationTrigger::Change) {
			self.run_schema(field, ValidationTrigger::Change);
		}
		Ok(())
	}

	/// Mark the field touched and run blur validation.
	///
	/// Returns a ticket when the field's asynchronous check must be
	/// dispatched; the caller resolves it with [`FormController::resolve_check`].
	/// A field failing the schema never dispatches its async check.
	pub fn handle_blur(&mut self, field: FieldName) -> FormResult<Option<CheckTicket>> {
		self.ensure_editable()?;
		self.state.field_mut(field).mark_touched();
		self.run_schema(field, ValidationTrigger::Blur);

		if !self.async_fields.contains(&field) {
			return Ok(None);
		}
		// Checked against the current value even when blur results are not stored
		let schema_ok = self
			.schema
			.validate_field(field, self.state.field(field).value())
			.is_none();
		if !schema_ok {
			self.state.field_mut(field).cancel_check();
			return Ok(None);
		}
		Ok(Some(self.state.field_mut(field).begin_check(field)))
	}

	/// Whether `ticket` is still the latest check of its field
	pub fn is_current(&self, ticket: CheckTicket) -> bool {
		self.state.field(ticket.field).is_current(ticket)
	}

	/// Apply an async check result.
	///
	/// Stale results, and any result arriving once the form is completed, are
	/// discarded (`false`).
	pub fn resolve_check(&mut self, ticket: CheckTicket, issue: Option<ValidationIssue>) -> bool {
		if self.state.is_completed() {
			return false;
		}
		self.state.field_mut(ticket.field).resolve_check(ticket, issue)
	}

	/// Abandon the check behind `ticket` if it is still pending.
	///
	/// Returns whether a pending check was cancelled.
	pub fn cancel_check(&mut self, ticket: CheckTicket) -> bool {
		let field = self.state.field_mut(ticket.field);
		if !field.is_current(ticket) || !field.is_validating() {
			return false;
		}
		field.cancel_check();
		true
	}

	/// Inject an error outside the schema pipeline
	pub fn set_external_error(&mut self, field: FieldName, issue: ValidationIssue) -> FormResult<()> {
		self.ensure_editable()?;
		self.state.field_mut(field).set_external_error(issue);
		Ok(())
	}

	/// Start a submission.
	///
	/// Every accepted call counts one attempt and resets the submit state to
	/// idle, whatever the validation result.
	pub fn begin_submission(&mut self) -> FormResult<SubmitDecision> {
		if self.state.is_submitting {
			return Ok(SubmitDecision::Ignored);
		}
		self.ensure_editable()?;

		self.state.submission_attempts += 1;
		self.state.submit_state = SubmitState::Idle;

		for field in FieldName::ALL {
			self.state.field_mut(field).clear_external_error();
			self.run_schema(field, ValidationTrigger::Submit);
		}

		if let Some(first_error) = self.state.first_invalid_field() {
			let scroll = match self.settings.scroll_policy {
				ScrollPolicy::EveryAttempt => true,
				ScrollPolicy::FirstAttemptOnly => !self.scrolled_once,
			};
			self.scrolled_once = true;
			return Ok(SubmitDecision::Invalid { first_error, scroll });
		}

		self.state.is_submitting = true;
		Ok(SubmitDecision::Ready(self.state.values()))
	}

	/// Drop the in-flight flag without an answer from the server
	pub fn abort_submission(&mut self) {
		self.state.is_submitting = false;
	}

	/// Finish the in-flight submission with the server's answer
	pub fn finish_submission(&mut self, outcome: SubmissionOutcome) -> SubmitState {
		self.state.is_submitting = false;
		match outcome {
			SubmissionOutcome::Success => self.state.submit_state = SubmitState::Success,
			SubmissionOutcome::ServerError => self.state.submit_state = SubmitState::Error,
			SubmissionOutcome::RecaptchaRejected => {
				self.state
					.recaptcha_code
					.set_external_error(ValidationIssue::server(
						FieldName::RecaptchaCode,
						IssueKind::InvalidCode,
						RECAPTCHA_REJECTED_MESSAGE,
					));
			}
		}
		self.state.submit_state
	}
}
