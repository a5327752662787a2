//! Contact form submission flow integration tests
//!
//! Drives the form against the simulated server on a paused clock: empty
//! submission, success, server failure, recaptcha rejection and duplicate
//! submit calls.

use contactform::forms::SnapshotExt;
use contactform::forms::view::{SERVER_ERROR_MESSAGE, SUCCESS_MESSAGE};
use contactform::{
	ContactForm, FieldName, FormError, FormEvent, FormSettings, FormView, IssueKind, Markers,
	ScrollPolicy, SimulatorConfig, SubmissionOutcome, SubmissionSimulator, SubmitAttempt,
	SubmitState, simulated_form, simulated_form_with_settings,
};
use contactform_integration_tests::{editing_fields, fill_valid};
use rstest::rstest;
use std::sync::Arc;
use std::time::Duration;

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_empty_submission_shows_every_error() {
	// Test: submitting an untouched form counts the attempt and blocks it
	let form = simulated_form(SimulatorConfig::default()).unwrap();
	let mut events = form.subscribe();

	let attempt = form.submit().await.unwrap();

	assert_eq!(attempt, SubmitAttempt::Invalid { first_error: FieldName::Name });
	let state = form.state();
	assert_eq!(state.submission_attempts, 1);
	assert_eq!(state.submit_state, SubmitState::Idle);
	assert!(!state.is_submitting);

	let (banner, fields) = editing_fields(form.view());
	assert!(banner.is_none());
	let errors: Vec<_> = fields.iter().map(|f| f.error.as_deref()).collect();
	assert_eq!(
		errors,
		vec![
			Some("Name is required"),
			Some("Email address is required"),
			Some("ReCAPTCHA is required"),
		]
	);
	assert_eq!(
		events.try_recv().unwrap(),
		FormEvent::ScrollToFirstError { field: FieldName::Name }
	);
}

#[rstest]
#[case("", "Name is required")]
#[case("   ", "Name is required")]
#[case("  Al  ", "Name must be at least 3 characters")]
#[tokio::test(start_paused = true)]
async fn test_name_rules_on_blur(#[case] name: &str, #[case] message: &str) {
	let form = simulated_form(SimulatorConfig::default()).unwrap();

	form.set_value(FieldName::Name, name).unwrap();
	form.handle_blur(FieldName::Name).await.unwrap();

	let (_, fields) = editing_fields(form.view());
	assert_eq!(fields[0].error.as_deref(), Some(message));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_successful_submission() {
	// Test: isSubmitting is true strictly while the server is answering
	let form = simulated_form(SimulatorConfig::default()).unwrap();
	fill_valid(&form);
	assert!(!form.state().is_submitting);

	let pending = tokio::spawn({
		let form = form.clone();
		async move { form.submit().await }
	});
	tokio::time::sleep(Duration::from_millis(500)).await;

	assert!(form.state().is_submitting);
	match form.view() {
		FormView::Editing { submit, .. } => {
			assert_eq!(submit.label, "...");
			assert!(submit.disabled);
		}
		FormView::Completed { .. } => panic!("Completed before the server answered"),
	}

	let attempt = pending.await.unwrap().unwrap();

	assert_eq!(attempt, SubmitAttempt::Sent(SubmissionOutcome::Success));
	let state = form.state();
	assert!(!state.is_submitting);
	assert_eq!(state.submit_state, SubmitState::Success);
	assert_eq!(
		form.view(),
		FormView::Completed {
			message: SUCCESS_MESSAGE
		}
	);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_success_is_terminal() {
	let form = simulated_form(SimulatorConfig::default()).unwrap();
	fill_valid(&form);
	form.submit().await.unwrap();

	assert_eq!(form.set_value(FieldName::Name, "Bob"), Err(FormError::Completed));
	assert_eq!(form.set_recaptcha_checked(false), Err(FormError::Completed));
	assert_eq!(form.submit().await, Err(FormError::Completed));
	assert_eq!(form.state().submission_attempts, 1);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_server_crash_shows_banner() {
	let form = simulated_form(SimulatorConfig::default().with_server_crashed(true)).unwrap();
	let mut events = form.subscribe();
	fill_valid(&form);

	let attempt = form.submit().await.unwrap();

	assert_eq!(attempt, SubmitAttempt::Sent(SubmissionOutcome::ServerError));
	assert_eq!(form.state().submit_state, SubmitState::Error);
	let (banner, fields) = editing_fields(form.view());
	assert_eq!(banner, Some(SERVER_ERROR_MESSAGE));
	assert!(fields.iter().all(|f| f.error.is_none()));
	assert_eq!(
		events.try_recv().unwrap(),
		FormEvent::Submitted { outcome: SubmissionOutcome::ServerError }
	);
	assert_eq!(events.try_recv().unwrap(), FormEvent::ScrollToServerError);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_retry_after_server_recovers() {
	// Test: an error state is left on the next attempt
	let server =
		SubmissionSimulator::new(SimulatorConfig::default().with_server_crashed(true)).unwrap();
	let form = ContactForm::builder(Arc::new(server.clone())).build();
	fill_valid(&form);
	form.submit().await.unwrap();
	assert_eq!(form.state().submit_state, SubmitState::Error);

	server
		.update_config(|config| config.server_crashed = false)
		.unwrap();
	let attempt = form.submit().await.unwrap();

	assert_eq!(attempt, SubmitAttempt::Sent(SubmissionOutcome::Success));
	assert_eq!(form.state().submission_attempts, 2);
	assert!(form.view().is_completed());
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_recaptcha_rejection_stays_on_field() {
	let form =
		simulated_form(SimulatorConfig::default().with_recaptcha_code_rejected(true)).unwrap();
	fill_valid(&form);

	let attempt = form.submit().await.unwrap();

	assert_eq!(attempt, SubmitAttempt::Sent(SubmissionOutcome::RecaptchaRejected));
	let state = form.state();
	assert_eq!(state.submit_state, SubmitState::Idle);
	assert_eq!(
		state.recaptcha_code.errors()[0].kind,
		IssueKind::InvalidCode
	);

	let (banner, fields) = editing_fields(form.view());
	assert!(banner.is_none());
	assert_eq!(fields[2].error.as_deref(), Some("ReCAPTCHA is invalid"));

	let snapshot = state.to_snapshot();
	assert!(snapshot.error_map.is_empty());
	assert!(snapshot.errors.is_empty());
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_new_recaptcha_code_clears_rejection() {
	let form =
		simulated_form(SimulatorConfig::default().with_recaptcha_code_rejected(true)).unwrap();
	fill_valid(&form);
	form.submit().await.unwrap();

	form.set_recaptcha_checked(false).unwrap();
	form.set_recaptcha_checked(true).unwrap();

	assert!(!form.state().recaptcha_code.has_errors());
}

#[rstest]
#[case("Mr google", SubmissionOutcome::RecaptchaRejected)]
#[case("Agent 500", SubmissionOutcome::ServerError)]
#[case("google 500", SubmissionOutcome::RecaptchaRejected)]
#[case("Ada Lovelace", SubmissionOutcome::Success)]
#[tokio::test(start_paused = true)]
async fn test_marker_triggers(#[case] name: &str, #[case] expected: SubmissionOutcome) {
	let form = simulated_form(SimulatorConfig::default().with_markers(Markers::default())).unwrap();
	fill_valid(&form);
	form.set_value(FieldName::Name, name).unwrap();

	assert_eq!(form.submit().await.unwrap(), SubmitAttempt::Sent(expected));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_submit_while_submitting_has_no_effect() {
	let form = simulated_form(SimulatorConfig::default()).unwrap();
	fill_valid(&form);

	let pending = tokio::spawn({
		let form = form.clone();
		async move { form.submit().await }
	});
	tokio::time::sleep(Duration::from_millis(100)).await;
	let before = form.snapshot();

	let second = form.submit().await.unwrap();

	assert_eq!(second, SubmitAttempt::Ignored);
	assert_eq!(form.snapshot(), before);
	assert_eq!(
		pending.await.unwrap().unwrap(),
		SubmitAttempt::Sent(SubmissionOutcome::Success)
	);
	assert_eq!(form.state().submission_attempts, 1);
}

#[rstest]
#[case(ScrollPolicy::EveryAttempt, 2)]
#[case(ScrollPolicy::FirstAttemptOnly, 1)]
#[tokio::test(start_paused = true)]
async fn test_scroll_policy(#[case] policy: ScrollPolicy, #[case] expected_scrolls: usize) {
	let form = simulated_form_with_settings(
		SimulatorConfig::default(),
		FormSettings::default().with_scroll_policy(policy),
	)
	.unwrap();
	let mut events = form.subscribe();

	form.submit().await.unwrap();
	form.submit().await.unwrap();

	let mut scrolls = 0;
	while let Ok(event) = events.try_recv() {
		if matches!(event, FormEvent::ScrollToFirstError { .. }) {
			scrolls += 1;
		}
	}
	assert_eq!(scrolls, expected_scrolls);
	assert_eq!(form.state().submission_attempts, 2);
}

#[rstest]
fn test_invalid_simulator_config_rejected() {
	let config = SimulatorConfig::default().with_markers(Markers {
		recaptcha_rejected: String::new(),
		..Markers::default()
	});

	assert!(simulated_form(config).is_err());
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_debug_panel_json() {
	// Test: the debug panel lists aggregated errors under camelCase keys
	let form = simulated_form(SimulatorConfig::default()).unwrap();
	form.set_value(FieldName::Name, "Ada Lovelace").unwrap();
	form.submit().await.unwrap();

	let json: serde_json::Value =
		serde_json::from_str(&form.snapshot().to_pretty_json().unwrap()).unwrap();

	assert_eq!(json["values"]["name"], "Ada Lovelace");
	assert_eq!(json["submissionAttempts"], 1);
	assert_eq!(json["isSubmitting"], false);
	assert_eq!(json["submitState"], "idle");
	let error_map = json["errorMap"].as_object().unwrap();
	assert!(!error_map.contains_key("name"));
	assert_eq!(error_map["email"][0]["message"], "Email address is required");
	assert_eq!(error_map["recaptchaCode"][0]["code"], "required");
	assert_eq!(json["errors"].as_array().unwrap().len(), 2);
}
