//! `#[field_factories]` through the facade crate

#![cfg(feature = "macros")]

use reinhardt_field_factory::{
	BooleanField, CharField, FactoryArgs, FactoryForm, FormClass, LazyForm, field_factories,
};
use rstest::rstest;

struct ContactForm {
	wants_reply: bool,
}

#[field_factories(class_name = "Contact")]
impl ContactForm {
	#[field(name = "message")]
	fn message(_args: &FactoryArgs) -> anyhow::Result<CharField> {
		Ok(CharField::labeled("Message").required())
	}

	#[field(name = "reply_to", enable_if = |form: &Self, _: &FactoryArgs| form.wants_reply)]
	fn reply_to(&self, _args: &FactoryArgs) -> anyhow::Result<CharField> {
		Ok(CharField::labeled("Reply to"))
	}

	#[field(name = "copy_me")]
	fn copy_me(class: &FormClass, _args: &FactoryArgs) -> anyhow::Result<BooleanField> {
		Ok(BooleanField::new().with_label(class.name()))
	}
}

#[rstest]
#[case(true, vec!["message", "reply_to", "copy_me"])]
#[case(false, vec!["message", "copy_me"])]
fn test_facade_macro_builds_enabled_fields(
	#[case] wants_reply: bool,
	#[case] expected: Vec<&str>,
) {
	// Arrange
	let form = ContactForm { wants_reply };

	// Act
	let form = LazyForm::new(form).unwrap();

	// Assert
	assert_eq!(ContactForm::class_name(), "Contact");
	assert_eq!(form.field_names().collect::<Vec<_>>(), expected);
	assert_eq!(form.field("copy_me").unwrap().label(), "Contact");
}
