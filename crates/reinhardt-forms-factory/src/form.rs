//! Forms whose fields are created at construction time
//!
//! ## Construction
//!
//! [`FactoryFormBuilder::build`] runs the whole construction in one go:
//!
//! 1. look up the form type's [`FieldRegistry`](crate::FieldRegistry)
//! 2. for each entry, in registration order, evaluate its predicate and,
//!    if enabled, call its factory before moving to the next entry
//! 3. hand the `(name, field)` pairs to [`BaseForm::new`]
//! 4. process the input data
//!
//! Factory arguments are set on the builder, so they are fixed before any
//! factory runs and are dropped once the form exists.

use crate::args::FactoryArgs;
use crate::error::{FactoryError, FactoryResult};
use crate::registry::{BoxedField, FieldRegistry, FormClass, registry_for, short_type_name};
use reinhardt_forms::{BaseForm, BoundField, FormMeta};
use std::collections::HashMap;
use std::fmt;
use std::ops::{Deref, DerefMut, Index};

/// A form type that declares its fields through factories
///
/// Usually implemented by the `#[field_factories]` attribute macro. A manual
/// implementation registers factories in the order they should appear:
///
/// ```
/// use reinhardt_forms::CharField;
/// use reinhardt_forms_factory::{FactoryForm, FieldRegistry, LazyForm};
///
/// struct CommentForm {
///     allow_name: bool,
/// }
///
/// impl FactoryForm for CommentForm {
///     fn register_fields(registry: &mut FieldRegistry<Self>) {
///         registry
///             .instance("name", |_, _| Ok(CharField::labeled("Your name")))
///             .enable_if(|form, _| form.allow_name);
///         registry.plain("body", |_| Ok(CharField::new().required()));
///     }
/// }
///
/// let form = LazyForm::new(CommentForm { allow_name: false }).unwrap();
/// assert!(form.field("name").is_err());
/// assert_eq!(form.field_names().collect::<Vec<_>>(), ["body"]);
/// ```
pub trait FactoryForm: Sized + 'static {
	/// Register this form's field factories
	fn register_fields(registry: &mut FieldRegistry<Self>);

	/// Name seen by class-bound factories through [`FormClass::name`]
	fn class_name() -> &'static str {
		short_type_name(std::any::type_name::<Self>())
	}
}

/// Steps of a form construction, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConstructionStage {
	Uninitialized,
	ArgumentsSet,
	FieldsDiscovered,
	FieldsFiltered,
	FieldsBuilt,
	FieldsBound,
	DataProcessed,
}

impl fmt::Display for ConstructionStage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			ConstructionStage::Uninitialized => "uninitialized",
			ConstructionStage::ArgumentsSet => "arguments set",
			ConstructionStage::FieldsDiscovered => "field discovery",
			ConstructionStage::FieldsFiltered => "field filtering",
			ConstructionStage::FieldsBuilt => "field building",
			ConstructionStage::FieldsBound => "field binding",
			ConstructionStage::DataProcessed => "data processing",
		};
		f.write_str(name)
	}
}

/// Collects everything a [`LazyForm`] needs before its fields are created
#[must_use = "a form builder does nothing until `build` is called"]
pub struct FactoryFormBuilder<F> {
	state: F,
	args: FactoryArgs,
	prefix: String,
	meta: FormMeta,
	data: HashMap<String, serde_json::Value>,
	stage: ConstructionStage,
}

impl<F: FactoryForm> FactoryFormBuilder<F> {
	fn new(state: F) -> Self {
		Self {
			state,
			args: FactoryArgs::default(),
			prefix: String::new(),
			meta: FormMeta::default(),
			data: HashMap::new(),
			stage: ConstructionStage::Uninitialized,
		}
	}

	/// Set the arguments passed to every factory and predicate
	///
	/// Replaces arguments set earlier on this builder.
	pub fn set_factory_args(mut self, args: FactoryArgs) -> Self {
		self.args = args;
		self.stage = ConstructionStage::ArgumentsSet;
		self
	}

	pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = prefix.into();
		self
	}

	pub fn meta(mut self, meta: FormMeta) -> Self {
		self.meta = meta;
		self
	}

	/// Input data processed once the fields exist
	pub fn data(mut self, data: HashMap<String, serde_json::Value>) -> Self {
		self.data = data;
		self
	}

	pub fn datum(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
		self.data.insert(key.into(), value.into());
		self
	}

	/// Current construction stage, `Uninitialized` or `ArgumentsSet`
	pub fn stage(&self) -> ConstructionStage {
		self.stage
	}

	/// Create the fields and the form
	///
	/// # Errors
	///
	/// Returns the first predicate or factory failure, or the base form's
	/// error for duplicate or empty field names. No partially built form is
	/// ever returned.
	pub fn build(self) -> FactoryResult<LazyForm<F>> {
		let Self {
			state,
			args,
			prefix,
			meta,
			data,
			stage: _,
		} = self;
		let class = FormClass::of::<F>();

		let registry = registry_for::<F>();
		tracing::debug!(
			form = class.name(),
			stage = %ConstructionStage::FieldsDiscovered,
			factories = registry.len(),
			"discovered field factories"
		);

		let mut fields: Vec<(String, BoxedField)> = Vec::with_capacity(registry.len());
		for entry in registry.entries() {
			let is_enabled = entry.is_enabled(&state, &class, &args).map_err(|source| {
				FactoryError::Predicate {
					name: entry.name().to_string(),
					stage: ConstructionStage::FieldsFiltered,
					source,
				}
			})?;
			if !is_enabled {
				tracing::trace!(
					form = class.name(),
					field = entry.name(),
					kind = %entry.call_kind(),
					"field factory disabled"
				);
				continue;
			}

			let field = entry.build(&state, &class, &args).map_err(|source| {
				FactoryError::Factory {
					name: entry.name().to_string(),
					stage: ConstructionStage::FieldsBuilt,
					source,
				}
			})?;
			fields.push((entry.name().to_string(), field));
		}
		tracing::debug!(
			form = class.name(),
			stage = %ConstructionStage::FieldsBuilt,
			enabled = fields.len(),
			"built enabled fields"
		);
		drop(args);

		let mut base = BaseForm::new(fields, prefix, meta).map_err(|source| FactoryError::Form {
			stage: ConstructionStage::FieldsBound,
			source,
		})?;
		tracing::debug!(
			form = class.name(),
			stage = %ConstructionStage::FieldsBound,
			fields = base.len(),
			"bound form fields"
		);

		base.process(data);
		tracing::debug!(
			form = class.name(),
			stage = %ConstructionStage::DataProcessed,
			bound = base.is_bound(),
			"processed form data"
		);

		Ok(LazyForm { state, base })
	}
}

/// A form whose fields were produced by its factories
///
/// Dereferences to the underlying [`BaseForm`] for validation and data access.
pub struct LazyForm<F> {
	state: F,
	base: BaseForm,
}

impl<F: FactoryForm> LazyForm<F> {
	pub fn builder(state: F) -> FactoryFormBuilder<F> {
		FactoryFormBuilder::new(state)
	}

	/// Build with no factory arguments, no prefix and no input data
	pub fn new(state: F) -> FactoryResult<Self> {
		Self::builder(state).build()
	}

	/// Build with the given factory arguments
	pub fn with_args(state: F, args: FactoryArgs) -> FactoryResult<Self> {
		Self::builder(state).set_factory_args(args).build()
	}
}

impl<F> LazyForm<F> {
	/// Access a field by name
	///
	/// # Errors
	///
	/// [`FactoryError::FieldNotFound`] if the field's factory was disabled for
	/// this form or never registered.
	pub fn field(&self, name: &str) -> FactoryResult<BoundField<'_>> {
		self.base
			.get_bound_field(name)
			.ok_or_else(|| FactoryError::FieldNotFound(name.to_string()))
	}

	pub fn get(&self, name: &str) -> Option<BoundField<'_>> {
		self.base.get_bound_field(name)
	}

	pub fn has_field(&self, name: &str) -> bool {
		self.base.contains(name)
	}

	pub fn field_names(&self) -> impl Iterator<Item = &str> {
		self.base.field_names()
	}

	pub fn fields(&self) -> impl Iterator<Item = BoundField<'_>> {
		self.base.bound_fields()
	}

	/// The user state the factories were called with
	pub fn state(&self) -> &F {
		&self.state
	}

	pub fn state_mut(&mut self) -> &mut F {
		&mut self.state
	}

	pub fn base(&self) -> &BaseForm {
		&self.base
	}

	pub fn into_parts(self) -> (F, BaseForm) {
		(self.state, self.base)
	}
}

impl<F> Deref for LazyForm<F> {
	type Target = BaseForm;

	fn deref(&self) -> &Self::Target {
		&self.base
	}
}

impl<F> DerefMut for LazyForm<F> {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.base
	}
}

impl<F> Index<&str> for LazyForm<F> {
	type Output = dyn reinhardt_forms::FormField;

	fn index(&self, name: &str) -> &Self::Output {
		self.base
			.get_field(name)
			.unwrap_or_else(|| panic!("Field '{}' not found", name))
	}
}

impl<F> fmt::Debug for LazyForm<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LazyForm")
			.field("base", &self.base)
			.finish_non_exhaustive()
	}
}
