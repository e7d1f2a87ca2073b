//! `#[field_factories]` integration tests

#![cfg(feature = "macros")]

use reinhardt_forms::{BooleanField, CharField};
use reinhardt_forms_factory::{
	CallKind, FactoryArgs, FactoryForm, FormClass, LazyForm, field_factories, registry_for,
};
use rstest::rstest;

struct SignupForm {
	arg: bool,
}

impl SignupForm {
	const NEWSLETTER: bool = false;

	fn wants_terms(&self, _args: &FactoryArgs) -> bool {
		self.arg
	}
}

#[field_factories]
impl SignupForm {
	#[field(name = "username")]
	fn username_field(args: &FactoryArgs) -> anyhow::Result<CharField> {
		Ok(CharField::labeled(args.get_str(0).unwrap_or("Username")).required())
	}

	#[field(name = "terms", enable_if = Self::wants_terms)]
	fn terms_field(&self, _args: &FactoryArgs) -> anyhow::Result<BooleanField> {
		Ok(BooleanField::new().required())
	}

	#[field(name = "newsletter", enable_if = |_: &FormClass, _: &FactoryArgs| SignupForm::NEWSLETTER)]
	fn newsletter_field(_class: &FormClass, _args: &FactoryArgs) -> anyhow::Result<BooleanField> {
		Ok(BooleanField::new())
	}

	#[field(name = "source")]
	fn source_field(class: &FormClass, _args: &FactoryArgs) -> anyhow::Result<CharField> {
		Ok(CharField::labeled(class.name()))
	}

	fn not_a_factory(&self) -> u8 {
		1
	}
}

#[rstest]
fn test_macro_registers_in_declaration_order() {
	// Act
	let registry = registry_for::<SignupForm>();

	// Assert
	assert_eq!(
		registry.names().collect::<Vec<_>>(),
		["username", "terms", "newsletter", "source"]
	);
	let kinds: Vec<_> = registry.entries().iter().map(|e| e.call_kind()).collect();
	assert_eq!(
		kinds,
		[CallKind::Plain, CallKind::Instance, CallKind::Class, CallKind::Class]
	);
}

#[rstest]
#[case(true, vec!["username", "terms", "source"])]
#[case(false, vec!["username", "source"])]
fn test_macro_predicates(#[case] arg: bool, #[case] expected: Vec<&str>) {
	// Act
	let form = LazyForm::new(SignupForm { arg }).unwrap();

	// Assert
	assert_eq!(form.field_names().collect::<Vec<_>>(), expected);
	assert_eq!(form.state().not_a_factory(), 1);
}

#[rstest]
fn test_macro_factories_receive_arguments_and_class() {
	// Act
	let form =
		LazyForm::with_args(SignupForm { arg: false }, FactoryArgs::new().arg("Login")).unwrap();

	// Assert
	assert_eq!(form.field("username").unwrap().label(), "Login");
	assert_eq!(form.field("source").unwrap().label(), "SignupForm");
}

struct RenamedForm;

#[field_factories(class_name = "Renamed")]
impl RenamedForm {
	#[field(name = "kind")]
	fn kind(class: &FormClass, _args: &FactoryArgs) -> anyhow::Result<CharField> {
		Ok(CharField::labeled(class.name()))
	}

	#[field(name = "strict", try_enable_if = Self::strict_enabled)]
	fn strict(_args: &FactoryArgs) -> anyhow::Result<BooleanField> {
		Ok(BooleanField::new())
	}

	fn strict_enabled(args: &FactoryArgs) -> anyhow::Result<bool> {
		match args.kwarg_value("strict") {
			None => Ok(false),
			Some(value) => value
				.as_bool()
				.ok_or_else(|| anyhow::anyhow!("`strict` must be a boolean")),
		}
	}
}

#[rstest]
fn test_macro_class_name_override() {
	// Act
	let form = LazyForm::new(RenamedForm).unwrap();

	// Assert
	assert_eq!(RenamedForm::class_name(), "Renamed");
	assert_eq!(form.field("kind").unwrap().label(), "Renamed");
	assert!(!form.has_field("strict"));
}

#[rstest]
fn test_macro_fallible_predicate() {
	// Act
	let enabled =
		LazyForm::with_args(RenamedForm, FactoryArgs::new().kwarg("strict", true)).unwrap();
	let err = LazyForm::with_args(RenamedForm, FactoryArgs::new().kwarg("strict", "yes"))
		.unwrap_err();

	// Assert
	assert!(enabled.has_field("strict"));
	assert_eq!(err.field_name(), Some("strict"));
}
