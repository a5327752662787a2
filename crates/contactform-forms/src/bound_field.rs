use crate::field::FieldState;
use crate::issue::FieldName;

/// A field bound to its state and the form's submission count.
///
/// Carries the display policy: errors are shown only once the field has been
/// touched or the form has been submitted at least once, so a fresh field
/// does not flash errors while the user is still typing.
pub struct BoundField<'a> {
	name: FieldName,
	state: &'a FieldState<String>,
	submission_attempts: u32,
}

impl<'a> BoundField<'a> {
	/// # Examples
	///
	/// ```
	/// use contactform_forms::{BoundField, FieldName, FieldState};
	///
	/// let state = FieldState::new("Ada".to_string());
	/// let bound = BoundField::new(FieldName::Name, &state, 0);
	/// assert_eq!(bound.name(), FieldName::Name);
	/// assert_eq!(bound.value(), "Ada");
	/// ```
	pub fn new(name: FieldName, state: &'a FieldState<String>, submission_attempts: u32) -> Self {
		Self {
			name,
			state,
			submission_attempts,
		}
	}

	pub fn name(&self) -> FieldName {
		self.name
	}

	/// Get the HTML name attribute
	pub fn html_name(&self) -> &'static str {
		self.name.as_str()
	}

	/// Get the HTML id attribute
	///
	/// # Examples
	///
	/// ```
	/// use contactform_forms::{BoundField, FieldName, FieldState};
	///
	/// let state = FieldState::new(String::new());
	/// let bound = BoundField::new(FieldName::RecaptchaCode, &state, 0);
	/// assert_eq!(bound.id_for_label(), "id_recaptchaCode");
	/// ```
	pub fn id_for_label(&self) -> String {
		format!("id_{}", self.html_name())
	}

	pub fn label(&self) -> &'static str {
		self.name.label()
	}

	pub fn value(&self) -> &str {
		self.state.value()
	}

	pub fn has_errors(&self) -> bool {
		self.state.has_errors()
	}

	/// Whether the field's errors may be shown
	///
	/// # Examples
	///
	/// ```
	/// use contactform_forms::{BoundField, FieldName, FieldState, IssueKind, ValidationIssue};
	///
	/// let mut state = FieldState::new(String::new());
	/// state.apply_schema_result(
	///     Some(ValidationIssue::schema(FieldName::Name, IssueKind::Required, "Name is required")),
	///     true,
	/// );
	///
	/// // Untouched and never submitted: hidden
	/// assert!(!BoundField::new(FieldName::Name, &state, 0).should_display_errors());
	/// // After a submission attempt: shown
	/// assert!(BoundField::new(FieldName::Name, &state, 1).should_display_errors());
	/// ```
	pub fn should_display_errors(&self) -> bool {
		(self.state.is_touched() || self.submission_attempts > 0) && self.state.has_errors()
	}

	/// Error messages joined with ", ", if they may be shown
	pub fn error_text(&self) -> Option<String> {
		if !self.should_display_errors() {
			return None;
		}
		let messages: Vec<&str> = self
			.state
			.errors()
			.into_iter()
			.map(|issue| issue.message.as_str())
			.collect();
		Some(messages.join(", "))
	}

	/// Whether the "Validating..." indicator is shown
	pub fn is_validating(&self) -> bool {
		self.state.is_validating()
	}
}
