//! Contact form state and validation
//!
//! This crate provides the client side of a demo contact form:
//! - Field rules (required, minimum length, email grammar) and error messages
//! - Per-field state with touched/validating flags and layered errors
//! - Revalidation that switches from blur to change after a first failure
//! - Debounced asynchronous field checks with stale-result suppression
//! - A guarded submission lifecycle with a terminal success state
//! - Render and debug models for whatever draws the form

pub mod backend;
pub mod bound_field;
pub mod controller;
pub mod field;
pub mod form;
pub mod issue;
pub mod recaptcha;
pub mod schema;
pub mod settings;
pub mod snapshot;
pub mod validators;
pub mod view;

pub use backend::{AsyncFieldValidator, Submitter};
pub use bound_field::BoundField;
pub use controller::{AsyncCheck, ContactForm, ContactFormBuilder, FormEvent, SubmitAttempt};
pub use field::{CheckTicket, ErrorSlot, FieldState};
pub use form::{
	FormController, FormError, FormResult, FormState, FormValues, RECAPTCHA_REJECTED_MESSAGE,
	SubmissionOutcome, SubmitDecision, SubmitState,
};
pub use issue::{FieldName, IssueKind, IssueSource, ValidationIssue};
pub use schema::{ContactSchema, FieldSchema, Rule, ValidationTrigger};
pub use settings::{FormSettings, ScrollPolicy};
pub use snapshot::{FieldSnapshot, FormSnapshot, SnapshotExt};
pub use validators::{EmailValidator, MinLengthValidator, RequiredValidator};
pub use view::{FieldView, FormView, SubmitButton};
