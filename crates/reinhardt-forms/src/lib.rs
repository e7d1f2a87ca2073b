//! Form fields and form construction for Reinhardt
//!
//! This crate provides the form layer that field factories build on:
//! - Unbound fields ([`CharField`], [`IntegerField`], [`BooleanField`]) implementing [`FormField`]
//! - [`BaseForm`], built from an ordered list of named fields, with data processing and validation
//! - [`BoundField`] for per-form access to a field's name, label, data and errors
//! - [`FormMeta`] for form-wide options

pub mod bound_field;
pub mod field;
pub mod fields;
pub mod form;
pub mod meta;

pub use bound_field::BoundField;
pub use field::{FieldError, FieldResult, FormField, Widget};
pub use fields::{BooleanField, CharField, IntegerField};
pub use form::{BaseForm, FormError, FormResult};
pub use meta::FormMeta;
