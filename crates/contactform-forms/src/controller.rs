//! Async front of the contact form
//!
//! [`ContactForm`] wraps the synchronous [`FormController`] in shared state
//! and drives the two suspension points of the form: the debounced
//! asynchronous field check and the submission round trip. The lock is only
//! taken between awaits, so concurrent calls interleave at those points and
//! nowhere else.
//!
//! ```no_run
//! use contactform_forms::{ContactForm, FieldName, FormValues, SubmissionOutcome, Submitter};
//! use std::sync::Arc;
//!
//! struct AlwaysOk;
//!
//! #[async_trait::async_trait]
//! impl Submitter for AlwaysOk {
//!     async fn submit(&self, _values: &FormValues) -> SubmissionOutcome {
//!         SubmissionOutcome::Success
//!     }
//! }
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), contactform_forms::FormError> {
//! let form = ContactForm::builder(Arc::new(AlwaysOk)).build();
//! form.set_value(FieldName::Name, "Ada")?;
//! form.set_value(FieldName::Email, "ada@example.com")?;
//! form.set_recaptcha_checked(true)?;
//! form.submit().await?;
//! # Ok(())
//! # }
//! ```

use crate::backend::{AsyncFieldValidator, Submitter};
use crate::field::CheckTicket;
use crate::form::{
	FormController, FormResult, FormState, FormValues, SubmissionOutcome, SubmitDecision,
};
use crate::issue::{FieldName, ValidationIssue};
use crate::recaptcha;
use crate::schema::{ContactSchema, ValidationTrigger};
use crate::settings::FormSettings;
use crate::snapshot::{FormSnapshot, SnapshotExt};
use crate::view::FormView;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 16;

/// Side effects the UI should perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
	/// An invalid submission was blocked; bring the first error into view
	ScrollToFirstError { field: FieldName },
	/// The server failed; bring the error banner into view
	ScrollToServerError,
	/// A submission round trip finished
	Submitted { outcome: SubmissionOutcome },
}

/// What a call to [`ContactForm::submit`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAttempt {
	/// Another submission was in flight
	Ignored,
	/// Blocked by validation
	Invalid { first_error: FieldName },
	/// Sent to the server, which answered `outcome`
	Sent(SubmissionOutcome),
}

/// What happened to the asynchronous check started by a blur
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsyncCheck {
	/// No check for this field, or the schema already failed
	Skipped,
	/// A newer request or an edit made this check obsolete
	Superseded,
	/// The result was stored on the field
	Applied(Option<ValidationIssue>),
}

/// Builder for [`ContactForm`]
pub struct ContactFormBuilder {
	submitter: Arc<dyn Submitter>,
	schema: ContactSchema,
	settings: FormSettings,
	validators: BTreeMap<FieldName, Arc<dyn AsyncFieldValidator>>,
}

impl ContactFormBuilder {
	pub fn schema(mut self, schema: ContactSchema) -> Self {
		self.schema = schema;
		self
	}

	pub fn settings(mut self, settings: FormSettings) -> Self {
		self.settings = settings;
		self
	}

	/// Attach an asynchronous validator to its field, replacing any previous one
	pub fn async_validator(mut self, validator: Arc<dyn AsyncFieldValidator>) -> Self {
		self.validators.insert(validator.field(), validator);
		self
	}

	pub fn build(self) -> ContactForm {
		let mut controller = FormController::new(self.schema, self.settings);
		for field in self.validators.keys() {
			controller.register_async_field(*field);
		}
		let (events, _) = broadcast::channel(EVENT_CAPACITY);
		ContactForm {
			inner: Arc::new(Mutex::new(controller)),
			submitter: self.submitter,
			validators: Arc::new(self.validators),
			events,
		}
	}
}

/// Shared handle to one mounted contact form.
///
/// Cloning is cheap; all clones drive the same form.
#[derive(Clone)]
pub struct ContactForm {
	inner: Arc<Mutex<FormController>>,
	submitter: Arc<dyn Submitter>,
	validators: Arc<BTreeMap<FieldName, Arc<dyn AsyncFieldValidator>>>,
	events: broadcast::Sender<FormEvent>,
}

/// Resets the in-flight flag if a submission future is dropped before the
/// server answered.
struct InFlight<'a> {
	controller: &'a Mutex<FormController>,
	armed: bool,
}

impl Drop for InFlight<'_> {
	fn drop(&mut self) {
		if self.armed {
			tracing::warn!("submission dropped before completion");
			self.controller.lock().abort_submission();
		}
	}
}

/// Cancels an asynchronous check whose future is dropped before its result
/// was applied.
struct PendingCheck<'a> {
	controller: &'a Mutex<FormController>,
	ticket: CheckTicket,
}

impl Drop for PendingCheck<'_> {
	fn drop(&mut self) {
		if self.controller.lock().cancel_check(self.ticket) {
			tracing::debug!(field = %self.ticket.field, seq = self.ticket.seq, "async check abandoned");
		}
	}
}

impl ContactForm {
	/// Start building a form that submits through `submitter`
	pub fn builder(submitter: Arc<dyn Submitter>) -> ContactFormBuilder {
		ContactFormBuilder {
			submitter,
			schema: ContactSchema::default(),
			settings: FormSettings::default(),
			validators: BTreeMap::new(),
		}
	}

	/// Receive [`FormEvent`]s published from now on
	pub fn subscribe(&self) -> broadcast::Receiver<FormEvent> {
		self.events.subscribe()
	}

	fn publish(&self, event: FormEvent) {
		// No subscriber is not an error
		let _ = self.events.send(event);
	}

	/// Copy of the current state
	pub fn state(&self) -> FormState {
		self.inner.lock().state().clone()
	}

	pub fn values(&self) -> FormValues {
		self.inner.lock().state().values()
	}

	pub fn snapshot(&self) -> FormSnapshot {
		self.inner.lock().state().to_snapshot()
	}

	pub fn view(&self) -> FormView {
		FormView::render(self.inner.lock().state())
	}

	/// Change a field's value (a keystroke)
	pub fn set_value(&self, field: FieldName, value: impl Into<String>) -> FormResult<()> {
		self.inner.lock().set_value(field, value)
	}

	/// Check or uncheck the "I am not a robot" box
	pub fn set_recaptcha_checked(&self, checked: bool) -> FormResult<()> {
		let mut controller = self.inner.lock();
		controller.set_value(FieldName::RecaptchaCode, recaptcha::code_for(checked))?;
		controller.validate_field(FieldName::RecaptchaCode, ValidationTrigger::Blur)?;
		Ok(())
	}

	/// Re-run the schema for one field
	pub fn validate_field(&self, field: FieldName, trigger: ValidationTrigger) -> FormResult<bool> {
		self.inner.lock().validate_field(field, trigger)
	}

	/// Attach an error outside the schema pipeline
	pub fn set_external_error(&self, field: FieldName, issue: ValidationIssue) -> FormResult<()> {
		self.inner.lock().set_external_error(field, issue)
	}

	/// The field lost focus.
	///
	/// Runs blur validation, then, for fields with an asynchronous validator
	/// and a clean schema result, waits for the debounce window and runs the
	/// check. Resolves once the check is applied or found obsolete.
	pub async fn handle_blur(&self, field: FieldName) -> FormResult<AsyncCheck> {
		let ticket = self.inner.lock().handle_blur(field)?;
		let (Some(ticket), Some(validator)) = (ticket, self.validators.get(&field).cloned()) else {
			return Ok(AsyncCheck::Skipped);
		};
		tracing::debug!(%field, seq = ticket.seq, "async check dispatched");
		let _pending = PendingCheck {
			controller: &self.inner,
			ticket,
		};

		tokio::time::sleep(validator.debounce()).await;

		let value = {
			let controller = self.inner.lock();
			if !controller.is_current(ticket) {
				tracing::debug!(%field, seq = ticket.seq, "async check superseded during debounce");
				return Ok(AsyncCheck::Superseded);
			}
			controller.state().field(field).value().clone()
		};

		let issue = validator.validate(&value).await;

		let applied = self.inner.lock().resolve_check(ticket, issue.clone());
		if applied {
			tracing::debug!(%field, seq = ticket.seq, rejected = issue.is_some(), "async check resolved");
			Ok(AsyncCheck::Applied(issue))
		} else {
			tracing::debug!(%field, seq = ticket.seq, "stale async check result discarded");
			Ok(AsyncCheck::Superseded)
		}
	}

	/// Submit the form.
	///
	/// A call made while another submission is in flight does nothing and
	/// returns [`SubmitAttempt::Ignored`].
	pub async fn submit(&self) -> FormResult<SubmitAttempt> {
		let decision = self.inner.lock().begin_submission()?;
		let values = match decision {
			SubmitDecision::Ignored => {
				tracing::debug!("submission already in flight, ignoring");
				return Ok(SubmitAttempt::Ignored);
			}
			SubmitDecision::Invalid { first_error, scroll } => {
				tracing::info!(%first_error, "submission blocked by validation errors");
				if scroll {
					self.publish(FormEvent::ScrollToFirstError { field: first_error });
				}
				return Ok(SubmitAttempt::Invalid { first_error });
			}
			SubmitDecision::Ready(values) => values,
		};

		let mut in_flight = InFlight {
			controller: &self.inner,
			armed: true,
		};
		tracing::info!("submitting contact form");
		let outcome = self.submitter.submit(&values).await;
		in_flight.armed = false;

		let state = self.inner.lock().finish_submission(outcome);
		tracing::info!(?outcome, ?state, "submission finished");

		self.publish(FormEvent::Submitted { outcome });
		if outcome == SubmissionOutcome::ServerError {
			self.publish(FormEvent::ScrollToServerError);
		}
		Ok(SubmitAttempt::Sent(outcome))
	}
}
