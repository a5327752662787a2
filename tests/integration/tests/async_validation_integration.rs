//! Debounced duplicate-email check integration tests
//!
//! Timings follow the simulator defaults: 300 ms debounce, then a 1 s check.

use contactform::forms::ValidationTrigger;
use contactform::forms::view::VALIDATING_INDICATOR;
use contactform::{
	AsyncCheck, FieldName, FormSettings, FormView, IssueKind, IssueSource, Markers,
	SimulatorConfig, SubmitAttempt, simulated_form, simulated_form_with_settings,
};
use contactform_integration_tests::{fill_valid, spawn_blur as blur};
use rstest::rstest;
use std::time::Duration;

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_duplicate_email_reported_after_check() {
	let form = simulated_form(SimulatorConfig::default().with_email_is_dupe(true)).unwrap();
	form.set_value(FieldName::Email, "ada@example.com").unwrap();

	let pending = blur(&form, FieldName::Email);
	tokio::time::sleep(Duration::from_millis(100)).await;

	// Pending for the whole debounce + check window
	assert!(form.state().is_validating());
	match form.view() {
		FormView::Editing { fields, submit, .. } => {
			assert_eq!(fields[1].indicator, Some(VALIDATING_INDICATOR));
			assert!(submit.disabled);
		}
		FormView::Completed { .. } => panic!("Expected an editable form"),
	}

	let check = pending.await.unwrap();

	let AsyncCheck::Applied(Some(issue)) = check else {
		panic!("Expected a duplicate issue");
	};
	assert_eq!(issue.kind, IssueKind::AlreadyInUse);
	assert_eq!(issue.source, IssueSource::Server);
	assert_eq!(issue.message, "Email already in use");
	assert!(!form.state().is_validating());
	assert_eq!(form.snapshot().errors, vec![issue]);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_fresh_email_passes_check() {
	let form = simulated_form(SimulatorConfig::default()).unwrap();
	form.set_value(FieldName::Email, "ada@example.com").unwrap();

	let check = form.handle_blur(FieldName::Email).await.unwrap();

	assert_eq!(check, AsyncCheck::Applied(None));
	assert!(!form.state().email.has_errors());
}

#[rstest]
#[case("", IssueKind::Required)]
#[case("not-an-email", IssueKind::InvalidEmail)]
#[case("dupe@", IssueKind::InvalidEmail)]
#[tokio::test(start_paused = true)]
async fn test_schema_failure_skips_duplicate_check(#[case] email: &str, #[case] kind: IssueKind) {
	// Test: the grammar is checked before any duplicate check runs
	let form = simulated_form(
		SimulatorConfig::default()
			.with_email_is_dupe(true)
			.with_markers(Markers::default()),
	)
	.unwrap();
	form.set_value(FieldName::Email, email).unwrap();

	let check = form.handle_blur(FieldName::Email).await.unwrap();

	assert_eq!(check, AsyncCheck::Skipped);
	assert!(!form.state().is_validating());
	let errors = form.state().email.errors().into_iter().cloned().collect::<Vec<_>>();
	assert_eq!(errors.len(), 1);
	assert_eq!(errors[0].kind, kind);
	assert_eq!(errors[0].source, IssueSource::Schema);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_edit_during_check_discards_result() {
	let form = simulated_form(SimulatorConfig::default().with_email_is_dupe(true)).unwrap();
	form.set_value(FieldName::Email, "ada@example.com").unwrap();

	let pending = blur(&form, FieldName::Email);
	// Past the debounce, inside the check
	tokio::time::sleep(Duration::from_millis(800)).await;
	form.set_value(FieldName::Email, "grace@example.com").unwrap();
	assert!(!form.state().is_validating());

	let check = pending.await.unwrap();

	assert_eq!(check, AsyncCheck::Superseded);
	assert!(!form.state().email.has_errors());
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_rapid_blurs_apply_only_latest() {
	let form = simulated_form(SimulatorConfig::default().with_markers(Markers::default())).unwrap();
	form.set_value(FieldName::Email, "ada@dupe.com").unwrap();

	let first = blur(&form, FieldName::Email);
	tokio::time::sleep(Duration::from_millis(100)).await;
	form.set_value(FieldName::Email, "ada@example.com").unwrap();
	let second = blur(&form, FieldName::Email);

	assert_eq!(first.await.unwrap(), AsyncCheck::Superseded);
	assert_eq!(second.await.unwrap(), AsyncCheck::Applied(None));
	assert!(!form.state().email.has_errors());
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_duplicate_survives_schema_rerun() {
	// Test: synchronous validation only writes its own slot
	let form = simulated_form(SimulatorConfig::default().with_email_is_dupe(true)).unwrap();
	form.set_value(FieldName::Email, "ada@example.com").unwrap();
	form.handle_blur(FieldName::Email).await.unwrap();

	let passed = form
		.validate_field(FieldName::Email, ValidationTrigger::Blur)
		.unwrap();

	assert!(passed);
	assert_eq!(
		form.state().email.errors()[0].kind,
		IssueKind::AlreadyInUse
	);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_duplicate_blocks_submission() {
	let form = simulated_form(SimulatorConfig::default().with_email_is_dupe(true)).unwrap();
	fill_valid(&form);
	form.handle_blur(FieldName::Email).await.unwrap();

	let attempt = form.submit().await.unwrap();

	assert_eq!(attempt, SubmitAttempt::Invalid { first_error: FieldName::Email });
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_change_revalidation_after_blur_failure() {
	let form = simulated_form(SimulatorConfig::default()).unwrap();
	form.set_value(FieldName::Email, "ada").unwrap();
	form.handle_blur(FieldName::Email).await.unwrap();
	assert!(form.state().email.has_errors());

	// Field now revalidates on every keystroke
	form.set_value(FieldName::Email, "ada@example.com").unwrap();

	assert!(!form.state().email.has_errors());
	assert!(!form.state().is_validating());
}

#[rstest]
#[case("not-an-email")]
#[case("")]
#[tokio::test(start_paused = true)]
async fn test_invalid_email_never_checked_without_blur_validation(#[case] email: &str) {
	// Test: the grammar gates the duplicate check even when blur results are not stored
	let form = simulated_form_with_settings(
		SimulatorConfig::default().with_email_is_dupe(true),
		FormSettings::default().with_blur_validation(false),
	)
	.unwrap();
	form.set_value(FieldName::Email, email).unwrap();

	let check = form.handle_blur(FieldName::Email).await.unwrap();

	assert_eq!(check, AsyncCheck::Skipped);
	assert!(!form.state().is_validating());
	assert!(!form.state().email.has_errors());
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_abandoned_blur_clears_validating() {
	// Test: a blur future dropped mid-check leaves no pending indicator behind
	let form = simulated_form(SimulatorConfig::default().with_email_is_dupe(true)).unwrap();
	form.set_value(FieldName::Email, "ada@example.com").unwrap();

	let timed_out =
		tokio::time::timeout(Duration::from_millis(100), form.handle_blur(FieldName::Email)).await;
	assert!(timed_out.is_err());
	tokio::time::sleep(Duration::from_secs(10)).await;

	assert!(!form.state().is_validating());
	assert!(!form.state().email.has_errors());
	match form.view() {
		FormView::Editing { fields, submit, .. } => {
			assert_eq!(fields[1].indicator, None);
			assert!(!submit.disabled);
		}
		FormView::Completed { .. } => panic!("Expected an editable form"),
	}
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_check_finishing_after_success_is_ignored() {
	// Test: a duplicate answer arriving after a successful submit leaves the final state alone
	let form = simulated_form(
		SimulatorConfig::default()
			.with_email_is_dupe(true)
			.with_submit_latency_ms(100),
	)
	.unwrap();
	fill_valid(&form);

	let pending = blur(&form, FieldName::Email);
	tokio::time::sleep(Duration::from_millis(10)).await;
	let attempt = form.submit().await.unwrap();
	assert_eq!(
		attempt,
		SubmitAttempt::Sent(contactform::SubmissionOutcome::Success)
	);

	assert_eq!(pending.await.unwrap(), AsyncCheck::Superseded);
	assert!(form.view().is_completed());
	assert!(!form.state().email.has_errors());
	assert!(form.snapshot().errors.is_empty());
}
