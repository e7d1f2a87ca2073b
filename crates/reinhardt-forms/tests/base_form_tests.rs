//! Base form integration tests
//!
//! Builds forms the way the field factory layer does: an ordered list of
//! named fields, then keyword data processing.

use reinhardt_forms::{
	BaseForm, BooleanField, CharField, FormError, FormField, FormMeta, IntegerField,
};
use rstest::rstest;
use serde_json::json;
use std::collections::HashMap;

fn named(name: &str, field: impl FormField + 'static) -> (String, Box<dyn FormField>) {
	(name.to_string(), Box::new(field))
}

#[rstest]
fn test_labels_and_order_survive_construction() {
	// Arrange
	let fields = vec![
		named("test", CharField::labeled("test")),
		named("test2", CharField::labeled("test2")),
		named("accept_terms", BooleanField::new()),
	];

	// Act
	let form = BaseForm::new(fields, "", FormMeta::default()).unwrap();

	// Assert
	let labels: Vec<_> = form.bound_fields().map(|b| b.label().into_owned()).collect();
	assert_eq!(labels, ["test", "test2", "Accept terms"]);
}

#[rstest]
fn test_duplicate_names_are_rejected_by_the_form() {
	// Arrange
	let fields = vec![
		named("age", IntegerField::new()),
		named("name", CharField::new()),
		named("age", IntegerField::new()),
	];

	// Act
	let err = BaseForm::new(fields, "", FormMeta::default()).unwrap_err();

	// Assert
	assert!(matches!(err, FormError::DuplicateField(ref name) if name == "age"));
	assert_eq!(err.to_string(), "Duplicate field name: age");
}

#[rstest]
fn test_prefixed_form_round_trip() {
	// Arrange
	let meta = FormMeta::from_toml("locales = [\"en\"]\nid_prefix = \"field-\"").unwrap();
	let mut form = BaseForm::new(
		vec![
			named("username", CharField::new().required().with_max_length(10)),
			named("age", IntegerField::new().with_min_value(18)),
		],
		"signup",
		meta,
	)
	.unwrap();
	let mut data = HashMap::new();
	data.insert("signup-username".to_string(), json!("alice"));
	data.insert("signup-age".to_string(), json!("17"));

	// Act
	form.process(data);
	let valid = form.validate();

	// Assert
	assert!(!valid);
	assert!(form.errors().contains_key("age"));
	let username = form.get_bound_field("username").unwrap();
	assert_eq!(username.html_name(), "signup-username");
	assert_eq!(username.id_for_label(), "field-signup-username");
	assert_eq!(username.value(), Some(&json!("alice")));
	assert_eq!(form.meta().locales, ["en".to_string()]);
}

#[rstest]
fn test_locales_are_carried_without_changing_the_form() {
	// Arrange
	let plain = FormMeta::new().with_id_prefix("f-");
	let localized = plain.clone().with_locales(["de_DE", "en"]);

	// Act
	let without = BaseForm::new(vec![named("first_name", CharField::new())], "", plain).unwrap();
	let with = BaseForm::new(vec![named("first_name", CharField::new())], "", localized).unwrap();

	// Assert
	let expected = without.get_bound_field("first_name").unwrap();
	let bound = with.get_bound_field("first_name").unwrap();
	assert_eq!(bound.label(), expected.label());
	assert_eq!(bound.id_for_label(), "f-first_name");
	assert_eq!(bound.id_for_label(), expected.id_for_label());
	assert_eq!(with.meta().locales, ["de_DE".to_string(), "en".to_string()]);
	assert!(with.meta().options.is_empty());
}
