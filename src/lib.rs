//! # Reinhardt Field Factory
//!
//! Forms whose fields are produced at construction time by named, conditional
//! field factories.
//!
//! A form type registers factories instead of declaring fixed fields. Each
//! factory is guarded by an `enable_if` predicate; building a form evaluates
//! the predicates, calls every enabled factory with the same factory
//! arguments, and hands the resulting fields to the form in registration
//! order.
//!
//! ## Feature Flags
//!
//! - `forms` - Form fields and [`BaseForm`](forms::BaseForm)
//! - `factory` - Field factory registry and [`LazyForm`](factory::LazyForm)
//! - `macros` - The `#[field_factories]` attribute macro
//! - `full` (default) - All of the above
//!
//! ## Example
//!
//! ```rust
//! use reinhardt_field_factory::{CharField, FactoryArgs, FactoryForm, FieldRegistry, LazyForm};
//!
//! struct SearchForm {
//!     advanced: bool,
//! }
//!
//! impl FactoryForm for SearchForm {
//!     fn register_fields(registry: &mut FieldRegistry<Self>) {
//!         registry.plain("query", |_| Ok(CharField::labeled("Search")));
//!         registry
//!             .instance("exclude", |_, _| Ok(CharField::labeled("Exclude words")))
//!             .enable_if(|form, _| form.advanced);
//!     }
//! }
//!
//! let simple = LazyForm::new(SearchForm { advanced: false }).unwrap();
//! assert!(simple.field("exclude").is_err());
//!
//! let advanced = LazyForm::with_args(SearchForm { advanced: true }, FactoryArgs::new()).unwrap();
//! assert_eq!(advanced.field_names().collect::<Vec<_>>(), ["query", "exclude"]);
//! ```

#[cfg(feature = "forms")]
pub mod forms;

#[cfg(feature = "factory")]
pub mod factory;

// Re-export forms (forms feature)
#[cfg(feature = "forms")]
pub use reinhardt_forms::{
	BaseForm, BooleanField, BoundField, CharField, FieldError, FormError, FormField, FormMeta,
	FormResult, IntegerField,
};

// Re-export field factories (factory feature)
#[cfg(feature = "factory")]
pub use reinhardt_forms_factory::{
	CallKind, ConstructionStage, FactoryArgs, FactoryError, FactoryForm, FactoryFormBuilder,
	FactoryResult, FieldRegistry, FormClass, LazyForm,
};

#[cfg(feature = "macros")]
pub use reinhardt_forms_factory::field_factories;
