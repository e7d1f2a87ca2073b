//! Field factory registration
//!
//! A form type declares its field factories once, in
//! [`FactoryForm::register_fields`](crate::FactoryForm::register_fields). Each
//! registration records the field name, how the factory expects to be called
//! ([`CallKind`]) and an enablement predicate. The resulting [`FieldRegistry`]
//! is built on first use and shared by every instance of the form type.
//!
//! ## Receivers
//!
//! | Kind | Factory signature | Predicate signature |
//! |------|-------------------|---------------------|
//! | [`CallKind::Plain`] | `Fn(&FactoryArgs)` | `Fn(&FactoryArgs)` |
//! | [`CallKind::Instance`] | `Fn(&F, &FactoryArgs)` | `Fn(&F, &FactoryArgs)` |
//! | [`CallKind::Class`] | `Fn(&FormClass, &FactoryArgs)` | `Fn(&FormClass, &FactoryArgs)` |
//!
//! Instance and class predicates always get the receiver as their leading
//! argument, exactly like the factory they guard. Plain predicates never do.

use crate::args::FactoryArgs;
use crate::form::FactoryForm;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use reinhardt_forms::FormField;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Field produced by a factory, before it is given a name by the form
pub type BoxedField = Box<dyn FormField>;

type PlainFn<T> = dyn Fn(&FactoryArgs) -> anyhow::Result<T> + Send + Sync;
type InstanceFn<F, T> = dyn Fn(&F, &FactoryArgs) -> anyhow::Result<T> + Send + Sync;
type ClassFn<T> = dyn Fn(&FormClass, &FactoryArgs) -> anyhow::Result<T> + Send + Sync;

/// How a factory and its predicate are invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// No receiver, only the factory arguments
	Plain,
	/// The form instance's state is passed first
	Instance,
	/// The form's [`FormClass`] is passed first
	Class,
}

impl fmt::Display for CallKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			CallKind::Plain => write!(f, "plain"),
			CallKind::Instance => write!(f, "instance"),
			CallKind::Class => write!(f, "class"),
		}
	}
}

/// Class-level receiver for [`CallKind::Class`] factories
///
/// Describes the concrete form type being constructed. Factories inherited
/// from a parent form see the child's class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormClass {
	name: &'static str,
	type_name: &'static str,
	type_id: TypeId,
}

impl FormClass {
	pub fn of<F: FactoryForm>() -> Self {
		Self {
			name: F::class_name(),
			type_name: std::any::type_name::<F>(),
			type_id: TypeId::of::<F>(),
		}
	}

	/// Short name of the form type, e.g. `SignupForm`
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Fully qualified type name
	pub fn type_name(&self) -> &'static str {
		self.type_name
	}

	pub fn is<F: 'static>(&self) -> bool {
		self.type_id == TypeId::of::<F>()
	}
}

/// Last path segment of a type name, without generic parameters
///
/// # Examples
///
/// ```
/// use reinhardt_forms_factory::registry::short_type_name;
///
/// assert_eq!(short_type_name("app::forms::SignupForm"), "SignupForm");
/// assert_eq!(short_type_name("app::Wrapper<app::Inner>"), "Wrapper");
/// assert_eq!(short_type_name("Plain"), "Plain");
/// ```
pub fn short_type_name(type_name: &'static str) -> &'static str {
	let base = type_name.split('<').next().unwrap_or(type_name);
	base.rsplit("::").next().unwrap_or(base)
}

enum Callable<F, T> {
	Plain(Arc<PlainFn<T>>),
	Instance(Arc<InstanceFn<F, T>>),
	Class(Arc<ClassFn<T>>),
}

impl<F, T> Clone for Callable<F, T> {
	fn clone(&self) -> Self {
		match self {
			Callable::Plain(f) => Callable::Plain(Arc::clone(f)),
			Callable::Instance(f) => Callable::Instance(Arc::clone(f)),
			Callable::Class(f) => Callable::Class(Arc::clone(f)),
		}
	}
}

impl<F: 'static, T: 'static> Callable<F, T> {
	fn call(&self, form: &F, class: &FormClass, args: &FactoryArgs) -> anyhow::Result<T> {
		match self {
			Callable::Plain(f) => f(args),
			Callable::Instance(f) => f(form, args),
			Callable::Class(f) => f(class, args),
		}
	}

	fn project<C, Pr>(&self, project: Arc<Pr>) -> Callable<C, T>
	where
		C: 'static,
		Pr: Fn(&C) -> &F + Send + Sync + 'static,
	{
		match self {
			Callable::Plain(f) => Callable::Plain(Arc::clone(f)),
			Callable::Class(f) => Callable::Class(Arc::clone(f)),
			Callable::Instance(f) => {
				let f = Arc::clone(f);
				Callable::Instance(Arc::new(move |form: &C, args: &FactoryArgs| {
					f(project(form), args)
				}))
			}
		}
	}
}

fn always_enabled<F>() -> Callable<F, bool> {
	Callable::Plain(Arc::new(|_: &FactoryArgs| Ok(true)))
}

/// One registered field factory
///
/// An entry always carries both its name and its predicate; registering a
/// factory without `enable_if` installs a predicate that always returns `true`.
pub struct FactoryEntry<F> {
	name: String,
	kind: CallKind,
	factory: Callable<F, BoxedField>,
	predicate: Callable<F, bool>,
}

impl<F: 'static> FactoryEntry<F> {
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn call_kind(&self) -> CallKind {
		self.kind
	}

	/// Evaluate the enablement predicate
	pub fn is_enabled(
		&self,
		form: &F,
		class: &FormClass,
		args: &FactoryArgs,
	) -> anyhow::Result<bool> {
		self.predicate.call(form, class, args)
	}

	/// Invoke the factory
	pub fn build(
		&self,
		form: &F,
		class: &FormClass,
		args: &FactoryArgs,
	) -> anyhow::Result<BoxedField> {
		self.factory.call(form, class, args)
	}

	fn project<C, Pr>(&self, project: &Arc<Pr>) -> FactoryEntry<C>
	where
		C: 'static,
		Pr: Fn(&C) -> &F + Send + Sync + 'static,
	{
		FactoryEntry {
			name: self.name.clone(),
			kind: self.kind,
			factory: self.factory.project(Arc::clone(project)),
			predicate: self.predicate.project(Arc::clone(project)),
		}
	}
}

impl<F> fmt::Debug for FactoryEntry<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FactoryEntry")
			.field("name", &self.name)
			.field("kind", &self.kind)
			.finish_non_exhaustive()
	}
}

/// Ordered collection of the field factories of form type `F`
pub struct FieldRegistry<F> {
	entries: Vec<FactoryEntry<F>>,
}

impl<F: 'static> FieldRegistry<F> {
	pub fn new() -> Self {
		Self {
			entries: Vec::new(),
		}
	}

	fn push(
		&mut self,
		name: String,
		kind: CallKind,
		factory: Callable<F, BoxedField>,
	) -> &mut FactoryEntry<F> {
		let index = self.entries.len();
		self.entries.push(FactoryEntry {
			name,
			kind,
			factory,
			predicate: always_enabled(),
		});
		&mut self.entries[index]
	}

	/// Register a factory that only receives the factory arguments
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::CharField;
	/// use reinhardt_forms_factory::{CallKind, FieldRegistry};
	///
	/// struct ContactForm;
	///
	/// let mut registry = FieldRegistry::<ContactForm>::new();
	/// registry
	///     .plain("subject", |args| {
	///         Ok(CharField::labeled(args.get_str(0).unwrap_or("Subject")))
	///     })
	///     .enable_if(|args| !args.is_empty());
	///
	/// assert_eq!(registry.entries()[0].call_kind(), CallKind::Plain);
	/// ```
	pub fn plain<T, Fac>(&mut self, name: impl Into<String>, factory: Fac) -> PlainRegistration<'_, F>
	where
		T: FormField + 'static,
		Fac: Fn(&FactoryArgs) -> anyhow::Result<T> + Send + Sync + 'static,
	{
		let factory = Callable::Plain(Arc::new(move |args: &FactoryArgs| {
			factory(args).map(|field| Box::new(field) as BoxedField)
		}));
		PlainRegistration {
			entry: self.push(name.into(), CallKind::Plain, factory),
		}
	}

	/// Register a factory that receives the form instance's state
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::CharField;
	/// use reinhardt_forms_factory::FieldRegistry;
	///
	/// struct ProfileForm {
	///     show_bio: bool,
	/// }
	///
	/// let mut registry = FieldRegistry::<ProfileForm>::new();
	/// registry
	///     .instance("bio", |_form, _args| Ok(CharField::new()))
	///     .enable_if(|form, _args| form.show_bio);
	///
	/// assert_eq!(registry.names().collect::<Vec<_>>(), ["bio"]);
	/// ```
	pub fn instance<T, Fac>(
		&mut self,
		name: impl Into<String>,
		factory: Fac,
	) -> InstanceRegistration<'_, F>
	where
		T: FormField + 'static,
		Fac: Fn(&F, &FactoryArgs) -> anyhow::Result<T> + Send + Sync + 'static,
	{
		let factory = Callable::Instance(Arc::new(move |form: &F, args: &FactoryArgs| {
			factory(form, args).map(|field| Box::new(field) as BoxedField)
		}));
		InstanceRegistration {
			entry: self.push(name.into(), CallKind::Instance, factory),
		}
	}

	/// Register a factory that receives the form's [`FormClass`]
	pub fn class<T, Fac>(&mut self, name: impl Into<String>, factory: Fac) -> ClassRegistration<'_, F>
	where
		T: FormField + 'static,
		Fac: Fn(&FormClass, &FactoryArgs) -> anyhow::Result<T> + Send + Sync + 'static,
	{
		let factory = Callable::Class(Arc::new(move |class: &FormClass, args: &FactoryArgs| {
			factory(class, args).map(|field| Box::new(field) as BoxedField)
		}));
		ClassRegistration {
			entry: self.push(name.into(), CallKind::Class, factory),
		}
	}

	/// Append every factory of parent form `P`, in `P`'s order
	///
	/// Instance factories of `P` are called with the part of `F` returned by
	/// `project`. Class factories of `P` receive `F`'s [`FormClass`].
	pub fn inherit<P, Pr>(&mut self, project: Pr) -> &mut Self
	where
		P: FactoryForm,
		Pr: Fn(&F) -> &P + Send + Sync + 'static,
	{
		let parent = registry_for::<P>();
		let project = Arc::new(project);
		self.entries
			.extend(parent.entries.iter().map(|entry| entry.project(&project)));
		self
	}

	pub fn entries(&self) -> &[FactoryEntry<F>] {
		&self.entries
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|e| e.name.as_str())
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl<F: 'static> Default for FieldRegistry<F> {
	fn default() -> Self {
		Self::new()
	}
}

impl<F> fmt::Debug for FieldRegistry<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(&self.entries).finish()
	}
}

/// Handle returned by [`FieldRegistry::plain`]
pub struct PlainRegistration<'r, F> {
	entry: &'r mut FactoryEntry<F>,
}

impl<F: 'static> PlainRegistration<'_, F> {
	/// Only create the field when `predicate` returns `true`
	pub fn enable_if<P>(self, predicate: P) -> Self
	where
		P: Fn(&FactoryArgs) -> bool + Send + Sync + 'static,
	{
		self.try_enable_if(move |args| Ok(predicate(args)))
	}

	/// Like [`PlainRegistration::enable_if`], for predicates that can fail
	pub fn try_enable_if<P>(self, predicate: P) -> Self
	where
		P: Fn(&FactoryArgs) -> anyhow::Result<bool> + Send + Sync + 'static,
	{
		self.entry.predicate = Callable::Plain(Arc::new(predicate));
		self
	}
}

/// Handle returned by [`FieldRegistry::instance`]
pub struct InstanceRegistration<'r, F> {
	entry: &'r mut FactoryEntry<F>,
}

impl<F: 'static> InstanceRegistration<'_, F> {
	pub fn enable_if<P>(self, predicate: P) -> Self
	where
		P: Fn(&F, &FactoryArgs) -> bool + Send + Sync + 'static,
	{
		self.try_enable_if(move |form, args| Ok(predicate(form, args)))
	}

	pub fn try_enable_if<P>(self, predicate: P) -> Self
	where
		P: Fn(&F, &FactoryArgs) -> anyhow::Result<bool> + Send + Sync + 'static,
	{
		self.entry.predicate = Callable::Instance(Arc::new(predicate));
		self
	}
}

/// Handle returned by [`FieldRegistry::class`]
pub struct ClassRegistration<'r, F> {
	entry: &'r mut FactoryEntry<F>,
}

impl<F: 'static> ClassRegistration<'_, F> {
	pub fn enable_if<P>(self, predicate: P) -> Self
	where
		P: Fn(&FormClass, &FactoryArgs) -> bool + Send + Sync + 'static,
	{
		self.try_enable_if(move |class, args| Ok(predicate(class, args)))
	}

	pub fn try_enable_if<P>(self, predicate: P) -> Self
	where
		P: Fn(&FormClass, &FactoryArgs) -> anyhow::Result<bool> + Send + Sync + 'static,
	{
		self.entry.predicate = Callable::Class(Arc::new(predicate));
		self
	}
}

type RegistryCache = RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>;

static REGISTRIES: Lazy<RegistryCache> = Lazy::new(|| RwLock::new(HashMap::new()));

/// Shared registry of form type `F`, built on first use
///
/// The registry is built outside the cache lock so that `register_fields`
/// may itself look up parent registries. If two threads race, the first
/// inserted registry wins and both get it.
pub fn registry_for<F: FactoryForm>() -> Arc<FieldRegistry<F>> {
	let type_id = TypeId::of::<F>();

	let cached = REGISTRIES.read().get(&type_id).cloned();
	let any = match cached {
		Some(any) => any,
		None => {
			let mut registry = FieldRegistry::new();
			F::register_fields(&mut registry);
			tracing::debug!(
				form = F::class_name(),
				factories = registry.len(),
				"built field registry"
			);
			let built: Arc<dyn Any + Send + Sync> = Arc::new(registry);
			REGISTRIES
				.write()
				.entry(type_id)
				.or_insert(built)
				.clone()
		}
	};

	match any.downcast::<FieldRegistry<F>>() {
		Ok(registry) => registry,
		Err(_) => unreachable!(
			"field registry cached under the TypeId of {} has another type",
			std::any::type_name::<F>()
		),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use reinhardt_forms::CharField;
	use rstest::rstest;
	use serde_json::json;

	struct Plainly;

	#[rstest]
	fn test_registration_defaults_to_enabled() {
		// Arrange
		let mut registry = FieldRegistry::<Plainly>::new();
		registry.plain("a", |_| Ok(CharField::new()));
		let class = FormClass {
			name: "Plainly",
			type_name: "Plainly",
			type_id: TypeId::of::<Plainly>(),
		};

		// Act
		let enabled = registry.entries()[0]
			.is_enabled(&Plainly, &class, &FactoryArgs::new())
			.unwrap();

		// Assert
		assert!(enabled);
		assert_eq!(registry.entries()[0].call_kind(), CallKind::Plain);
	}

	#[rstest]
	fn test_registration_keeps_declaration_order() {
		// Arrange
		let mut registry = FieldRegistry::<Plainly>::new();

		// Act
		registry.plain("zeta", |_| Ok(CharField::new()));
		registry.instance("alpha", |_, _| Ok(CharField::new()));
		registry.class("mid", |_, _| Ok(CharField::new()));

		// Assert
		assert_eq!(registry.names().collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);
		let kinds: Vec<_> = registry.entries().iter().map(|e| e.call_kind()).collect();
		assert_eq!(kinds, [CallKind::Plain, CallKind::Instance, CallKind::Class]);
	}

	#[rstest]
	fn test_enable_if_replaces_default_predicate() {
		// Arrange
		let mut registry = FieldRegistry::<Plainly>::new();
		registry
			.plain("a", |_| Ok(CharField::new()))
			.enable_if(|args| args.get(0) == Some(&json!(true)));
		let class = FormClass {
			name: "Plainly",
			type_name: "Plainly",
			type_id: TypeId::of::<Plainly>(),
		};
		let entry = &registry.entries()[0];

		// Act & Assert
		assert!(!entry.is_enabled(&Plainly, &class, &FactoryArgs::new()).unwrap());
		assert!(
			entry
				.is_enabled(&Plainly, &class, &FactoryArgs::new().arg(true))
				.unwrap()
		);
	}

	#[rstest]
	#[case("forms::SignupForm", "SignupForm")]
	#[case("a::b::Generic<a::Inner<u8>>", "Generic")]
	#[case("Bare", "Bare")]
	fn test_short_type_name(#[case] input: &'static str, #[case] expected: &str) {
		assert_eq!(short_type_name(input), expected);
	}

	#[rstest]
	fn test_call_kind_display() {
		assert_eq!(CallKind::Plain.to_string(), "plain");
		assert_eq!(CallKind::Instance.to_string(), "instance");
		assert_eq!(CallKind::Class.to_string(), "class");
	}

	struct CachedOne;

	impl FactoryForm for CachedOne {
		fn register_fields(registry: &mut FieldRegistry<Self>) {
			registry.plain("one", |_| Ok(CharField::new()));
		}
	}

	struct CachedTwo;

	impl FactoryForm for CachedTwo {
		fn register_fields(registry: &mut FieldRegistry<Self>) {
			registry.plain("two", |_| Ok(CharField::new()));
			registry.plain("three", |_| Ok(CharField::new()));
		}
	}

	#[rstest]
	fn test_registry_for_returns_the_cached_registry_of_each_type() {
		// Act
		let first = registry_for::<CachedOne>();
		let again = registry_for::<CachedOne>();
		let other = registry_for::<CachedTwo>();

		// Assert
		assert!(Arc::ptr_eq(&first, &again));
		assert_eq!(first.names().collect::<Vec<_>>(), ["one"]);
		assert_eq!(other.names().collect::<Vec<_>>(), ["two", "three"]);
	}
}
