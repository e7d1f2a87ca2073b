//! Crate path resolution using proc_macro_crate
//!
//! Generated code must name `FactoryForm` and `FieldRegistry` through
//! whichever crate the calling package actually depends on.

use proc_macro2::{Span, TokenStream};
use quote::quote;

/// Resolves the path to the reinhardt_forms_factory crate.
///
/// # Strategy
///
/// 1. `reinhardt-forms-factory` is a dependency (or the crate itself): use it directly
/// 2. Only the `reinhardt-field-factory` facade is a dependency: use `::<facade>::factory`
/// 3. Neither: report an error at the attribute
pub(crate) fn get_reinhardt_forms_factory_crate() -> syn::Result<TokenStream> {
	use proc_macro_crate::{FoundCrate, crate_name};

	match crate_name("reinhardt-forms-factory") {
		Ok(FoundCrate::Itself) => return Ok(quote!(::reinhardt_forms_factory)),
		Ok(FoundCrate::Name(name)) => return Ok(crate_ident_path(&name)),
		Err(_) => {}
	}

	match crate_name("reinhardt-field-factory") {
		Ok(FoundCrate::Itself) => Ok(quote!(::reinhardt_field_factory::factory)),
		Ok(FoundCrate::Name(name)) => {
			let facade = crate_ident_path(&name);
			Ok(quote!(#facade::factory))
		}
		Err(e) => Err(syn::Error::new(
			Span::call_site(),
			format!(
				"failed to resolve `reinhardt-forms-factory` crate: {}. Ensure `reinhardt-forms-factory` or `reinhardt-field-factory` is listed in Cargo.toml dependencies.",
				e
			),
		)),
	}
}

fn crate_ident_path(name: &str) -> TokenStream {
	let ident = syn::Ident::new(name, Span::call_site());
	quote!(::#ident)
}
