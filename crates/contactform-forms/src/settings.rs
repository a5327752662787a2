//! Form behaviour settings

use serde::{Deserialize, Serialize};

/// When the "scroll to first error" signal fires after an invalid submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollPolicy {
	/// Every invalid submission attempt
	#[default]
	EveryAttempt,
	/// Only the first invalid attempt of the session
	FirstAttemptOnly,
}

/// Behaviour switches for a contact form.
///
/// # Examples
///
/// ```
/// use contactform_forms::{FormSettings, ScrollPolicy};
///
/// let settings: FormSettings = serde_json::from_str(r#"{"scroll_policy": "first_attempt_only"}"#).unwrap();
/// assert_eq!(settings.scroll_policy, ScrollPolicy::FirstAttemptOnly);
/// assert!(settings.validate_on_blur);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
	/// Run the schema when a field loses focus
	pub validate_on_blur: bool,
	/// Once a field has failed validation, re-run the schema on every change
	pub revalidate_on_change_after_error: bool,
	pub scroll_policy: ScrollPolicy,
}

impl Default for FormSettings {
	fn default() -> Self {
		Self {
			validate_on_blur: true,
			revalidate_on_change_after_error: true,
			scroll_policy: ScrollPolicy::EveryAttempt,
		}
	}
}

impl FormSettings {
	pub fn with_blur_validation(mut self, enabled: bool) -> Self {
		self.validate_on_blur = enabled;
		self
	}

	pub fn with_change_revalidation(mut self, enabled: bool) -> Self {
		self.revalidate_on_change_after_error = enabled;
		self
	}

	pub fn with_scroll_policy(mut self, policy: ScrollPolicy) -> Self {
		self.scroll_policy = policy;
		self
	}
}
