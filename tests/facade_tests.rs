//! Facade re-export tests

use reinhardt_field_factory::{
	BooleanField, CharField, ConstructionStage, FactoryArgs, FactoryError, FactoryForm,
	FieldRegistry, FormMeta, LazyForm,
};
use rstest::rstest;

struct NewsletterForm {
	logged_in: bool,
}

impl FactoryForm for NewsletterForm {
	fn register_fields(registry: &mut FieldRegistry<Self>) {
		registry
			.instance("email", |_, _| Ok(CharField::labeled("Email").required()))
			.enable_if(|form, _| !form.logged_in);
		registry.plain("consent", |args| {
			let required = args
				.kwarg_value("require_consent")
				.and_then(|v| v.as_bool())
				.ok_or_else(|| anyhow::anyhow!("require_consent must be set"))?;
			let field = BooleanField::new();
			Ok(if required { field.required() } else { field })
		});
	}
}

#[rstest]
fn test_facade_builds_factory_forms() {
	// Arrange
	let args = FactoryArgs::new().kwarg("require_consent", true);
	let meta = FormMeta::new().with_id_prefix("nl-");

	// Act
	let mut form = LazyForm::builder(NewsletterForm { logged_in: true })
		.set_factory_args(args)
		.meta(meta)
		.datum("consent", true)
		.build()
		.unwrap();

	// Assert
	assert_eq!(form.field_names().collect::<Vec<_>>(), ["consent"]);
	assert_eq!(form.field("consent").unwrap().id_for_label(), "nl-consent");
	assert!(form.validate());
}

#[rstest]
fn test_facade_reports_factory_failures() {
	// Act
	let err = LazyForm::new(NewsletterForm { logged_in: false }).unwrap_err();

	// Assert
	assert!(matches!(
		err,
		FactoryError::Factory { ref name, stage: ConstructionStage::FieldsBuilt, .. } if name == "consent"
	));
}
