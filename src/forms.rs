//! Forms module.
//!
//! This module provides form fields, form construction and validation.
//!
//! # Examples
//!
//! ```rust
//! use reinhardt_field_factory::forms::{BaseForm, CharField, FormField, FormMeta};
//!
//! let fields: Vec<(String, Box<dyn FormField>)> =
//!     vec![("email".to_string(), Box::new(CharField::new().required()))];
//! let form = BaseForm::new(fields, "", FormMeta::default()).unwrap();
//! assert!(form.contains("email"));
//! ```

pub use reinhardt_forms::*;
