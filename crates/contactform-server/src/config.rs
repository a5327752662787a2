//! Simulator configuration
//!
//! Failure triggers come in two flavors that can be combined: explicit
//! toggles, and substring markers matched against the submitted values. A
//! trigger fires when its toggle is on or its marker matches.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
	#[error("Marker `{0}` must not be empty")]
	EmptyMarker(&'static str),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Substrings that trigger simulated failures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
	/// Matched against the email
	pub duplicate_email: String,
	/// Matched against the name
	pub recaptcha_rejected: String,
	/// Matched against the name
	pub server_error: String,
}

impl Default for Markers {
	fn default() -> Self {
		Self {
			duplicate_email: "dupe".to_string(),
			recaptcha_rejected: "google".to_string(),
			server_error: "500".to_string(),
		}
	}
}

/// Behavior of the simulated server
///
/// # Examples
///
/// ```
/// use contactform_server::SimulatorConfig;
/// use std::time::Duration;
///
/// let config = SimulatorConfig::default()
///     .with_server_crashed(true)
///     .with_submit_latency_ms(50);
///
/// assert!(config.server_crashed);
/// assert!(!config.email_is_dupe);
/// assert_eq!(config.submit_latency(), Duration::from_millis(50));
/// assert_eq!(config.debounce(), Duration::from_millis(300));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
	pub email_is_dupe: bool,
	pub server_crashed: bool,
	pub recaptcha_code_rejected: bool,
	/// Substring triggers, disabled when `None`
	pub markers: Option<Markers>,
	pub submit_latency_ms: u64,
	pub duplicate_check_latency_ms: u64,
	pub debounce_ms: u64,
}

impl Default for SimulatorConfig {
	fn default() -> Self {
		Self {
			email_is_dupe: false,
			server_crashed: false,
			recaptcha_code_rejected: false,
			markers: None,
			submit_latency_ms: 1000,
			duplicate_check_latency_ms: 1000,
			debounce_ms: 300,
		}
	}
}

impl SimulatorConfig {
	pub fn with_email_is_dupe(mut self, enabled: bool) -> Self {
		self.email_is_dupe = enabled;
		self
	}

	pub fn with_server_crashed(mut self, enabled: bool) -> Self {
		self.server_crashed = enabled;
		self
	}

	pub fn with_recaptcha_code_rejected(mut self, enabled: bool) -> Self {
		self.recaptcha_code_rejected = enabled;
		self
	}

	/// Enable substring triggers
	pub fn with_markers(mut self, markers: Markers) -> Self {
		self.markers = Some(markers);
		self
	}

	pub fn with_submit_latency_ms(mut self, ms: u64) -> Self {
		self.submit_latency_ms = ms;
		self
	}

	pub fn with_duplicate_check_latency_ms(mut self, ms: u64) -> Self {
		self.duplicate_check_latency_ms = ms;
		self
	}

	pub fn with_debounce_ms(mut self, ms: u64) -> Self {
		self.debounce_ms = ms;
		self
	}

	pub fn submit_latency(&self) -> Duration {
		Duration::from_millis(self.submit_latency_ms)
	}

	pub fn duplicate_check_latency(&self) -> Duration {
		Duration::from_millis(self.duplicate_check_latency_ms)
	}

	pub fn debounce(&self) -> Duration {
		Duration::from_millis(self.debounce_ms)
	}

	/// Check the configuration for unusable values
	///
	/// # Errors
	///
	/// Returns [`ConfigError::EmptyMarker`] if markers are enabled and one of
	/// them is empty, since an empty marker would match every value.
	pub fn validate(&self) -> ConfigResult<()> {
		let Some(markers) = &self.markers else {
			return Ok(());
		};
		if markers.duplicate_email.is_empty() {
			return Err(ConfigError::EmptyMarker("duplicate_email"));
		}
		if markers.recaptcha_rejected.is_empty() {
			return Err(ConfigError::EmptyMarker("recaptcha_rejected"));
		}
		if markers.server_error.is_empty() {
			return Err(ConfigError::EmptyMarker("server_error"));
		}
		Ok(())
	}

	/// Whether the duplicate trigger fires for `email`
	pub fn is_duplicate(&self, email: &str) -> bool {
		self.email_is_dupe
			|| self
				.markers
				.as_ref()
				.is_some_and(|m| email.contains(&m.duplicate_email))
	}

	/// Whether the recaptcha rejection trigger fires for `name`
	pub fn rejects_recaptcha(&self, name: &str) -> bool {
		self.recaptcha_code_rejected
			|| self
				.markers
				.as_ref()
				.is_some_and(|m| name.contains(&m.recaptcha_rejected))
	}

	/// Whether the server error trigger fires for `name`
	pub fn crashes_on(&self, name: &str) -> bool {
		self.server_crashed
			|| self
				.markers
				.as_ref()
				.is_some_and(|m| name.contains(&m.server_error))
	}
}
