//! Conditional field factories for Reinhardt forms
//!
//! Instead of a fixed list of fields, a form type registers named *field
//! factories*. Each factory has an enablement predicate; when a form is
//! built, every enabled factory is called with the construction's
//! [`FactoryArgs`] and the resulting fields become the form's fields, in
//! registration order.
//!
//! ## Quick start
//!
//! ```
//! use reinhardt_forms::CharField;
//! use reinhardt_forms_factory::{FactoryArgs, FactoryForm, FieldRegistry, LazyForm};
//!
//! struct AddressForm {
//!     international: bool,
//! }
//!
//! impl FactoryForm for AddressForm {
//!     fn register_fields(registry: &mut FieldRegistry<Self>) {
//!         registry.plain("street", |_| Ok(CharField::new().required()));
//!         registry
//!             .instance("country", |_, args| {
//!                 Ok(CharField::labeled(args.kwarg_str("country_label").unwrap_or("Country")))
//!             })
//!             .enable_if(|form, _| form.international);
//!     }
//! }
//!
//! let args = FactoryArgs::new().kwarg("country_label", "Land");
//! let form = LazyForm::with_args(AddressForm { international: true }, args).unwrap();
//!
//! assert_eq!(form.field_names().collect::<Vec<_>>(), ["street", "country"]);
//! assert_eq!(form.field("country").unwrap().label(), "Land");
//! ```
//!
//! With the `macros` feature, `#[field_factories]` generates the
//! [`FactoryForm`] implementation from annotated methods.

pub mod args;
pub mod error;
pub mod form;
pub mod registry;

pub use args::FactoryArgs;
pub use error::{FactoryError, FactoryResult};
pub use form::{ConstructionStage, FactoryForm, FactoryFormBuilder, LazyForm};
pub use registry::{
	BoxedField, CallKind, ClassRegistration, FactoryEntry, FieldRegistry, FormClass,
	InstanceRegistration, PlainRegistration, registry_for,
};

#[cfg(feature = "macros")]
pub use reinhardt_forms_factory_macros::field_factories;

pub use anyhow;
pub use reinhardt_forms;
