//! Render model of the contact form
//!
//! [`FormView`] is what a UI layer draws: either the final success message,
//! or the editable form with its banner, fields, submit control and debug
//! panel.

use crate::bound_field::BoundField;
use crate::form::{FormState, SubmitState};
use crate::issue::FieldName;
use crate::snapshot::SnapshotExt;
use serde::Serialize;

pub const FORM_TITLE: &str = "Contact Form Example";
pub const SUCCESS_MESSAGE: &str = "Form submitted with success!";
pub const SERVER_ERROR_MESSAGE: &str =
	"An error occurred while submitting the form. Please try again.";
pub const VALIDATING_INDICATOR: &str = "Validating...";

/// Render model for one input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
	pub name: FieldName,
	pub id: String,
	pub label: &'static str,
	pub value: String,
	/// Joined error messages, present only when the display policy allows it
	pub error: Option<String>,
	/// Present while an asynchronous check is pending
	pub indicator: Option<&'static str>,
}

/// Render model for the submit button
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitButton {
	pub label: &'static str,
	pub disabled: bool,
}

/// Everything a renderer needs to draw the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormView {
	/// Terminal success state: nothing else is rendered
	Completed { message: &'static str },
	Editing {
		title: &'static str,
		/// Server error banner
		banner: Option<&'static str>,
		fields: Vec<FieldView>,
		submit: SubmitButton,
		/// Pretty-printed [`FormSnapshot`](crate::snapshot::FormSnapshot)
		debug: String,
	},
}

impl FormView {
	/// Build the view of `state`
	///
	/// # Examples
	///
	/// ```
	/// use contactform_forms::view::FormView;
	/// use contactform_forms::FormState;
	///
	/// let view = FormView::render(&FormState::default());
	/// match view {
	///     FormView::Editing { banner, fields, submit, .. } => {
	///         assert!(banner.is_none());
	///         assert_eq!(fields.len(), 3);
	///         assert_eq!(submit.label, "Submit");
	///         assert!(!submit.disabled);
	///     }
	///     FormView::Completed { .. } => unreachable!(),
	/// }
	/// ```
	pub fn render(state: &FormState) -> Self {
		if state.is_completed() {
			return FormView::Completed {
				message: SUCCESS_MESSAGE,
			};
		}

		let fields = FieldName::ALL
			.into_iter()
			.map(|name| {
				let bound = BoundField::new(name, state.field(name), state.submission_attempts);
				FieldView {
					name,
					id: bound.id_for_label(),
					label: bound.label(),
					value: bound.value().to_string(),
					error: bound.error_text(),
					indicator: bound.is_validating().then_some(VALIDATING_INDICATOR),
				}
			})
			.collect();

		let banner = (state.submit_state == SubmitState::Error).then_some(SERVER_ERROR_MESSAGE);

		let submit = SubmitButton {
			label: if state.is_submitting { "..." } else { "Submit" },
			disabled: state.is_submitting || state.is_validating(),
		};

		// Serializing plain data into a String cannot fail
		let debug = state.to_snapshot().to_pretty_json().unwrap_or_default();

		FormView::Editing {
			title: FORM_TITLE,
			banner,
			fields,
			submit,
			debug,
		}
	}

	pub fn is_completed(&self) -> bool {
		matches!(self, FormView::Completed { .. })
	}
}
