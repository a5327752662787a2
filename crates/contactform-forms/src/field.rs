//! Per-field state
//!
//! [`FieldState`] owns one input's value, touched/validating flags and its
//! error map. Errors live in separate slots so that a synchronous re-run never
//! overwrites the result of the asynchronous check, and a server-injected
//! error can be told apart from validation results.

use crate::issue::{FieldName, ValidationIssue};
use crate::schema::ValidationTrigger;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Storage slot of a field error, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSlot {
	/// Result of the synchronous schema
	Schema,
	/// Result of the debounced asynchronous validator
	Async,
	/// Error injected from outside the validation pipeline
	Injected,
}

impl ErrorSlot {
	/// Whether the slot belongs to the form-level aggregate error view.
	/// Injected errors are visible on the field only.
	pub fn is_aggregated(&self) -> bool {
		!matches!(self, ErrorSlot::Injected)
	}
}

/// Handle for one dispatched asynchronous check.
///
/// Only the ticket matching the field's latest request may resolve it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckTicket {
	pub field: FieldName,
	pub seq: u64,
}

/// State of a single form field
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldState<T> {
	value: T,
	touched: bool,
	validating: bool,
	error_map: BTreeMap<ErrorSlot, ValidationIssue>,
	revalidate_on: ValidationTrigger,
	#[serde(skip)]
	check_seq: u64,
}

impl<T: Default> Default for FieldState<T> {
	fn default() -> Self {
		Self::new(T::default())
	}
}

impl<T> FieldState<T> {
	/// Create an untouched field holding `value`
	///
	/// # Examples
	///
	/// ```
	/// use contactform_forms::FieldState;
	///
	/// let field = FieldState::new(String::new());
	/// assert!(!field.is_touched());
	/// assert!(!field.is_validating());
	/// assert!(field.errors().is_empty());
	/// ```
	pub fn new(value: T) -> Self {
		Self {
			value,
			touched: false,
			validating: false,
			error_map: BTreeMap::new(),
			revalidate_on: ValidationTrigger::Blur,
			check_seq: 0,
		}
	}

	pub fn value(&self) -> &T {
		&self.value
	}

	pub fn is_touched(&self) -> bool {
		self.touched
	}

	pub fn is_validating(&self) -> bool {
		self.validating
	}

	/// The trigger that currently re-runs the schema for this field
	pub fn revalidate_on(&self) -> ValidationTrigger {
		self.revalidate_on
	}

	pub fn error_map(&self) -> &BTreeMap<ErrorSlot, ValidationIssue> {
		&self.error_map
	}

	/// All current errors in slot order
	pub fn errors(&self) -> Vec<&ValidationIssue> {
		self.error_map.values().collect()
	}

	/// Errors that count towards the form-level aggregate view
	pub fn aggregated_errors(&self) -> Vec<&ValidationIssue> {
		self.error_map
			.iter()
			.filter(|(slot, _)| slot.is_aggregated())
			.map(|(_, issue)| issue)
			.collect()
	}

	pub fn has_errors(&self) -> bool {
		!self.error_map.is_empty()
	}

	pub fn error(&self, slot: ErrorSlot) -> Option<&ValidationIssue> {
		self.error_map.get(&slot)
	}

	/// Replace the value.
	///
	/// A new value invalidates whatever the server said about the old one: the
	/// injected error and the async result are dropped and any pending async
	/// check is cancelled.
	pub fn set_value(&mut self, value: T) {
		self.value = value;
		self.error_map.remove(&ErrorSlot::Injected);
		self.error_map.remove(&ErrorSlot::Async);
		self.cancel_check();
	}

	pub fn mark_touched(&mut self) {
		self.touched = true;
	}

	/// Whether the schema should re-run for `trigger`
	pub fn should_validate_on(&self, trigger: ValidationTrigger) -> bool {
		match trigger {
			ValidationTrigger::Change => self.revalidate_on == ValidationTrigger::Change,
			ValidationTrigger::Blur | ValidationTrigger::Submit => true,
		}
	}

	/// Store the outcome of a schema run.
	///
	/// With `switch_to_change` set, a failure moves the field to change-time
	/// revalidation for the rest of the session.
	pub fn apply_schema_result(&mut self, issue: Option<ValidationIssue>, switch_to_change: bool) {
		match issue {
			Some(issue) => {
				if switch_to_change {
					self.revalidate_on = ValidationTrigger::Change;
				}
				self.error_map.insert(ErrorSlot::Schema, issue);
			}
			None => {
				self.error_map.remove(&ErrorSlot::Schema);
			}
		}
	}

	/// Attach an error that bypasses the schema pipeline
	pub fn set_external_error(&mut self, issue: ValidationIssue) {
		self.error_map.insert(ErrorSlot::Injected, issue);
	}

	pub fn clear_external_error(&mut self) {
		self.error_map.remove(&ErrorSlot::Injected);
	}

	/// Dispatch a new asynchronous check, superseding any pending one
	pub fn begin_check(&mut self, field: FieldName) -> CheckTicket {
		self.check_seq += 1;
		self.validating = true;
		self.error_map.remove(&ErrorSlot::Async);
		CheckTicket {
			field,
			seq: self.check_seq,
		}
	}

	/// Whether `ticket` still belongs to the latest dispatched check
	pub fn is_current(&self, ticket: CheckTicket) -> bool {
		ticket.seq == self.check_seq
	}

	/// Drop any pending check; its result will be discarded on arrival
	pub fn cancel_check(&mut self) {
		if self.validating {
			self.check_seq += 1;
			self.validating = false;
		}
	}

	/// Apply the result of an asynchronous check.
	///
	/// Returns `false` and leaves the state untouched when the ticket is stale.
	///
	/// # Examples
	///
	/// ```
	/// use contactform_forms::{FieldName, FieldState};
	///
	/// let mut field = FieldState::new("jane@example.com".to_string());
	/// let stale = field.begin_check(FieldName::Email);
	/// let latest = field.begin_check(FieldName::Email);
	///
	/// assert!(!field.resolve_check(stale, None));
	/// assert!(field.is_validating());
	/// assert!(field.resolve_check(latest, None));
	/// assert!(!field.is_validating());
	/// ```
	pub fn resolve_check(&mut self, ticket: CheckTicket, issue: Option<ValidationIssue>) -> bool {
		if !self.is_current(ticket) {
			return false;
		}
		self.validating = false;
		match issue {
			Some(issue) => {
				self.error_map.insert(ErrorSlot::Async, issue);
			}
			None => {
				self.error_map.remove(&ErrorSlot::Async);
			}
		}
		true
	}
}
