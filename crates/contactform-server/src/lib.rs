//! Simulated server for the contact form
//!
//! There is no network here: the "server" answers after an artificial delay,
//! and failures are triggered by configuration toggles or by marker
//! substrings in the submitted values.
//!
//! - [`SubmissionSimulator`] answers submissions and implements
//!   [`Submitter`](contactform_forms::Submitter)
//! - [`DuplicateEmailCheck`] is the debounced async validator of the email
//!   field
//! - [`SimulatorConfig`] holds toggles, markers and timings

pub mod config;
pub mod duplicate;
pub mod submission;

pub use config::{ConfigError, ConfigResult, Markers, SimulatorConfig};
pub use duplicate::{DUPLICATE_EMAIL_MESSAGE, DuplicateEmailCheck};
pub use submission::SubmissionSimulator;
