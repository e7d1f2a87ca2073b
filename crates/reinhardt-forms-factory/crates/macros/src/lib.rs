//! Procedural macros for Reinhardt field factories
//!
//! This crate provides:
//! - `#[field_factories]` - Turn the `#[field(...)]` methods of an impl block into field factories

use proc_macro::TokenStream;
use syn::{ItemImpl, parse_macro_input};

mod crate_paths;
mod field_factories;

/// Register the `#[field(...)]` methods of an inherent impl block as field factories
///
/// Implements `FactoryForm` for the impl's self type. Factories are
/// registered in declaration order. How a factory is called depends on its
/// signature:
///
/// - `fn(&self, &FactoryArgs)` - instance factory
/// - `fn(&FormClass, &FactoryArgs)` - class factory
/// - `fn(&FactoryArgs)` - plain factory
///
/// Generated code goes through `reinhardt-forms-factory` when the calling
/// crate depends on it, and through `reinhardt_field_factory::factory`
/// otherwise.
///
/// # Example
///
/// ```ignore
/// use reinhardt_forms::CharField;
/// use reinhardt_forms_factory::{FactoryArgs, FormClass, field_factories};
///
/// struct ProfileForm {
///     show_bio: bool,
/// }
///
/// #[field_factories(class_name = "Profile")]
/// impl ProfileForm {
///     #[field(name = "bio", enable_if = |form: &Self, _: &FactoryArgs| form.show_bio)]
///     fn bio(&self, _args: &FactoryArgs) -> anyhow::Result<CharField> {
///         Ok(CharField::labeled("Bio"))
///     }
///
///     #[field(name = "kind")]
///     fn kind(class: &FormClass, _args: &FactoryArgs) -> anyhow::Result<CharField> {
///         Ok(CharField::labeled(class.name()))
///     }
/// }
/// ```
///
/// # Attributes
///
/// - `#[field_factories(class_name = "...")]` - Override the name seen by class factories
/// - `#[field(name = "...")]` - Field name (required)
/// - `#[field(enable_if = expr)]` - Predicate with the same receiver as the factory, returning `bool`
/// - `#[field(try_enable_if = expr)]` - Same, returning `anyhow::Result<bool>`
#[proc_macro_attribute]
pub fn field_factories(args: TokenStream, input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as ItemImpl);

	crate_paths::get_reinhardt_forms_factory_crate()
		.and_then(|krate| field_factories::field_factories_impl(args.into(), input, &krate))
		.unwrap_or_else(|e| e.to_compile_error())
		.into()
}
