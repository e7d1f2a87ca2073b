//! Field factories module.
//!
//! This module provides forms whose fields are created by conditional
//! factories when the form is constructed.
//!
//! The `#[field_factories]` attribute resolves its paths through this module
//! when the calling crate depends only on `reinhardt-field-factory`.

pub use reinhardt_forms_factory::*;
