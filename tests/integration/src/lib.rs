//! Shared helpers for the contact form integration tests

use contactform::forms::FieldView;
use contactform::{AsyncCheck, ContactForm, FieldName, FormView};
use tokio::task::JoinHandle;

/// Fill every field with values that pass the schema
pub fn fill_valid(form: &ContactForm) {
	form.set_value(FieldName::Name, "Ada Lovelace")
		.expect("name is editable");
	form.set_value(FieldName::Email, "ada@example.com")
		.expect("email is editable");
	form.set_recaptcha_checked(true)
		.expect("recaptcha is editable");
}

/// Banner and field views of an editable form
pub fn editing_fields(view: FormView) -> (Option<&'static str>, Vec<FieldView>) {
	match view {
		FormView::Editing { banner, fields, .. } => (banner, fields),
		FormView::Completed { .. } => panic!("Expected an editable form"),
	}
}

/// Blur `field` on a separate task
pub fn spawn_blur(form: &ContactForm, field: FieldName) -> JoinHandle<AsyncCheck> {
	let form = form.clone();
	tokio::spawn(async move {
		form.handle_blur(field)
			.await
			.expect("blur on an editable form")
	})
}
