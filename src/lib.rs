//! # contactform
//!
//! A contact form with three fields (name, email, "I am not a robot"),
//! schema validation, a debounced duplicate-email check and a simulated
//! server.
//!
//! The form logic lives in [`forms`] and does not know where submissions go.
//! The [`server`] module (feature `server`, on by default) provides the
//! simulated backend, and [`simulated_form`] wires the two together.
//!
//! ## Feature Flags
//!
//! - `server` (default) - Simulated backend and [`simulated_form`]
//!
//! ## Quick Example
//!
//! ```no_run
//! use contactform::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let form = simulated_form(SimulatorConfig::default())?;
//!
//! form.set_value(FieldName::Name, "Ada Lovelace")?;
//! form.set_value(FieldName::Email, "ada@example.com")?;
//! form.handle_blur(FieldName::Email).await?;
//! form.set_recaptcha_checked(true)?;
//!
//! match form.submit().await? {
//!     SubmitAttempt::Sent(SubmissionOutcome::Success) => println!("sent"),
//!     other => println!("not sent: {other:?}"),
//! }
//! # Ok(())
//! # }
//! ```

pub use contactform_forms as forms;
#[cfg(feature = "server")]
pub use contactform_server as server;

pub use contactform_forms::{
	AsyncCheck, ContactForm, ContactFormBuilder, FieldName, FormError, FormEvent, FormResult,
	FormSettings, FormSnapshot, FormState, FormValues, FormView, IssueKind, IssueSource,
	ScrollPolicy, SubmissionOutcome, SubmitAttempt, SubmitState, ValidationIssue,
};
#[cfg(feature = "server")]
pub use contactform_server::{
	ConfigError, DuplicateEmailCheck, Markers, SimulatorConfig, SubmissionSimulator,
};

#[cfg(feature = "server")]
use std::sync::Arc;

/// Build a form backed by the simulated server, with the duplicate-email
/// check attached to the email field.
///
/// # Errors
///
/// Returns [`ConfigError`] if `config` does not validate.
#[cfg(feature = "server")]
pub fn simulated_form(config: SimulatorConfig) -> Result<ContactForm, ConfigError> {
	simulated_form_with_settings(config, FormSettings::default())
}

/// Like [`simulated_form`], with explicit form settings
///
/// # Errors
///
/// Returns [`ConfigError`] if `config` does not validate.
#[cfg(feature = "server")]
pub fn simulated_form_with_settings(
	config: SimulatorConfig,
	settings: FormSettings,
) -> Result<ContactForm, ConfigError> {
	let server = SubmissionSimulator::new(config)?;
	Ok(ContactForm::builder(Arc::new(server.clone()))
		.settings(settings)
		.async_validator(Arc::new(DuplicateEmailCheck::new(server)))
		.build())
}

/// Convenient imports
pub mod prelude {
	pub use crate::{
		AsyncCheck, ContactForm, FieldName, FormError, FormEvent, FormSettings, FormView,
		ScrollPolicy, SubmissionOutcome, SubmitAttempt, SubmitState,
	};
	#[cfg(feature = "server")]
	pub use crate::{SimulatorConfig, simulated_form};
}
