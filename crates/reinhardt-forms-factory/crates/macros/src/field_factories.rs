//! Implementation of the `#[field_factories]` macro

use proc_macro2::TokenStream;
use quote::quote;
use syn::{
	Attribute, Expr, FnArg, ImplItem, ImplItemFn, ItemImpl, LitStr, Result, Type,
	parse::Parser, spanned::Spanned,
};

/// How a factory method is invoked, derived from its signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallKind {
	Plain,
	Instance,
	Class,
}

/// Options from `#[field_factories(...)]`
#[derive(Default)]
struct FactoriesAttr {
	class_name: Option<LitStr>,
}

impl FactoriesAttr {
	fn parse(args: TokenStream) -> Result<Self> {
		let mut attr = Self::default();
		if args.is_empty() {
			return Ok(attr);
		}

		let parser = syn::meta::parser(|meta| {
			if meta.path.is_ident("class_name") {
				let value: LitStr = meta.value()?.parse()?;
				if value.value().is_empty() {
					return Err(syn::Error::new_spanned(&value, "class_name cannot be empty"));
				}
				attr.class_name = Some(value);
				Ok(())
			} else {
				Err(meta.error("unsupported field_factories attribute"))
			}
		});
		parser.parse2(args)?;

		Ok(attr)
	}
}

/// Configuration from one `#[field(...)]` attribute
struct FieldAttr {
	name: LitStr,
	enable_if: Option<Expr>,
	try_enable_if: Option<Expr>,
}

impl FieldAttr {
	fn from_attr(attr: &Attribute, method: &ImplItemFn) -> Result<Self> {
		let mut name = None;
		let mut enable_if = None;
		let mut try_enable_if = None;

		attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("name") {
				let value: LitStr = meta.value()?.parse()?;
				name = Some(value);
				Ok(())
			} else if meta.path.is_ident("enable_if") {
				let value: Expr = meta.value()?.parse()?;
				enable_if = Some(value);
				Ok(())
			} else if meta.path.is_ident("try_enable_if") {
				let value: Expr = meta.value()?.parse()?;
				try_enable_if = Some(value);
				Ok(())
			} else {
				Err(meta.error("unsupported field attribute"))
			}
		})?;

		let name = name.ok_or_else(|| {
			syn::Error::new_spanned(&method.sig.ident, "field attribute requires 'name' parameter")
		})?;
		if name.value().is_empty() {
			return Err(syn::Error::new_spanned(&name, "field name cannot be empty"));
		}
		if enable_if.is_some() && try_enable_if.is_some() {
			return Err(syn::Error::new_spanned(
				attr,
				"field attribute cannot have both 'enable_if' and 'try_enable_if'",
			));
		}

		Ok(Self {
			name,
			enable_if,
			try_enable_if,
		})
	}
}

/// Whether `ty` is `&FormClass` (any path ending in `FormClass`)
fn is_form_class_ref(ty: &Type) -> bool {
	let Type::Reference(reference) = ty else {
		return false;
	};
	if reference.mutability.is_some() {
		return false;
	}
	match reference.elem.as_ref() {
		Type::Path(path) => path
			.path
			.segments
			.last()
			.is_some_and(|segment| segment.ident == "FormClass"),
		_ => false,
	}
}

fn call_kind(method: &ImplItemFn) -> Result<CallKind> {
	let inputs: Vec<&FnArg> = method.sig.inputs.iter().collect();

	match inputs.as_slice() {
		[FnArg::Receiver(receiver), _] => {
			if receiver.reference.is_none() || receiver.mutability.is_some() {
				return Err(syn::Error::new_spanned(
					receiver,
					"instance field factories must take `&self`",
				));
			}
			Ok(CallKind::Instance)
		}
		[FnArg::Typed(first), _] if is_form_class_ref(&first.ty) => Ok(CallKind::Class),
		[FnArg::Typed(_)] => Ok(CallKind::Plain),
		_ => Err(syn::Error::new(
			method.sig.inputs.span(),
			"field factories take `(&self, &FactoryArgs)`, `(&FormClass, &FactoryArgs)` or `(&FactoryArgs)`",
		)),
	}
}

fn is_field_attr(attr: &Attribute) -> bool {
	attr.path().is_ident("field")
}

/// Implementation of the `#[field_factories]` attribute macro
///
/// This macro:
/// 1. Collects the methods marked with `#[field(...)]`, in declaration order
/// 2. Strips those attributes from the impl block
/// 3. Implements `FactoryForm` for the self type, registering each method
///
/// `krate` is the path generated code uses to reach `reinhardt_forms_factory`.
pub(crate) fn field_factories_impl(
	args: TokenStream,
	mut input: ItemImpl,
	krate: &TokenStream,
) -> Result<TokenStream> {
	let options = FactoriesAttr::parse(args)?;

	if let Some((_, path, _)) = &input.trait_ {
		return Err(syn::Error::new_spanned(
			path,
			"#[field_factories] can only be applied to inherent impl blocks",
		));
	}

	let mut registrations = Vec::new();
	for item in &mut input.items {
		let ImplItem::Fn(method) = item else {
			continue;
		};

		let mut field_attrs = method.attrs.iter().filter(|attr| is_field_attr(attr));
		let Some(attr) = field_attrs.next() else {
			continue;
		};
		if let Some(extra) = field_attrs.next() {
			return Err(syn::Error::new_spanned(
				extra,
				"a method can only have one #[field] attribute",
			));
		}

		let field = FieldAttr::from_attr(attr, method)?;
		let kind = call_kind(method)?;
		let method_name = &method.sig.ident;
		let field_name = &field.name;

		let register = match kind {
			CallKind::Plain => quote! { registry.plain(#field_name, Self::#method_name) },
			CallKind::Instance => quote! { registry.instance(#field_name, Self::#method_name) },
			CallKind::Class => quote! { registry.class(#field_name, Self::#method_name) },
		};
		let predicate = match (&field.enable_if, &field.try_enable_if) {
			(Some(expr), _) => quote! { .enable_if(#expr) },
			(_, Some(expr)) => quote! { .try_enable_if(#expr) },
			(None, None) => quote! {},
		};
		registrations.push(quote! {
			#register #predicate;
		});

		method.attrs.retain(|attr| !is_field_attr(attr));
	}

	let self_ty = &input.self_ty;
	let (impl_generics, _, where_clause) = input.generics.split_for_impl();
	let class_name = options.class_name.map(|name| {
		quote! {
			fn class_name() -> &'static str {
				#name
			}
		}
	});

	Ok(quote! {
		#input

		#[automatically_derived]
		impl #impl_generics #krate::FactoryForm for #self_ty #where_clause {
			fn register_fields(registry: &mut #krate::FieldRegistry<Self>) {
				#(#registrations)*
			}

			#class_name
		}
	})
}
