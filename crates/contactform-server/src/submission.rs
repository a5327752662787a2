//! Simulated submission endpoint

use crate::config::{ConfigResult, SimulatorConfig};
use async_trait::async_trait;
use contactform_forms::{FormValues, SubmissionOutcome, Submitter};
use parking_lot::RwLock;
use std::sync::Arc;

/// Stand-in for the remote server.
///
/// Clones share their configuration, so a toggle flipped through one handle
/// affects every component built from it.
///
/// # Examples
///
/// ```
/// use contactform_server::{SimulatorConfig, SubmissionSimulator};
///
/// let server = SubmissionSimulator::new(SimulatorConfig::default()).unwrap();
/// server.update_config(|config| config.server_crashed = true).unwrap();
/// assert!(server.config().server_crashed);
/// ```
#[derive(Debug, Clone)]
pub struct SubmissionSimulator {
	config: Arc<RwLock<SimulatorConfig>>,
}

impl SubmissionSimulator {
	/// # Errors
	///
	/// Returns the first problem reported by [`SimulatorConfig::validate`].
	pub fn new(config: SimulatorConfig) -> ConfigResult<Self> {
		config.validate()?;
		Ok(Self {
			config: Arc::new(RwLock::new(config)),
		})
	}

	/// Copy of the current configuration
	pub fn config(&self) -> SimulatorConfig {
		self.config.read().clone()
	}

	/// Change the configuration in place.
	///
	/// The update is discarded if the result does not validate.
	pub fn update_config(&self, update: impl FnOnce(&mut SimulatorConfig)) -> ConfigResult<()> {
		let mut guard = self.config.write();
		let mut next = guard.clone();
		update(&mut next);
		next.validate()?;
		tracing::debug!(config = ?next, "simulator configuration updated");
		*guard = next;
		Ok(())
	}

	/// Answer a submission after the configured latency.
	///
	/// Recaptcha rejection is checked before the server error, so it wins
	/// when both triggers fire.
	pub async fn simulate(&self, values: &FormValues) -> SubmissionOutcome {
		let latency = self.config.read().submit_latency();
		tokio::time::sleep(latency).await;

		let config = self.config.read();
		let outcome = if config.rejects_recaptcha(&values.name) {
			SubmissionOutcome::RecaptchaRejected
		} else if config.crashes_on(&values.name) {
			SubmissionOutcome::ServerError
		} else {
			SubmissionOutcome::Success
		};
		tracing::info!(?outcome, "simulated submission answered");
		outcome
	}

	/// Whether `email` is already registered, after the configured latency
	pub async fn check_duplicate(&self, email: &str) -> bool {
		let latency = self.config.read().duplicate_check_latency();
		tokio::time::sleep(latency).await;

		let duplicate = self.config.read().is_duplicate(email);
		tracing::debug!(duplicate, "simulated duplicate check answered");
		duplicate
	}
}

#[async_trait]
impl Submitter for SubmissionSimulator {
	async fn submit(&self, values: &FormValues) -> SubmissionOutcome {
		self.simulate(values).await
	}
}
