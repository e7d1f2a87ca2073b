//! Field abstraction shared by every concrete form field.
//!
//! Fields are *unbound*: a field knows how to clean a value and what it looks
//! like, but not what it is called. The name is supplied by the form when the
//! field is added to its field mapping.

use std::fmt::Debug;

/// Error produced while cleaning a single field value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
	#[error("This field is required.")]
	Required,
	#[error("Invalid value: {0}")]
	Invalid(String),
	#[error("{0}")]
	Validation(String),
}

pub type FieldResult<T> = Result<T, FieldError>;

/// Input widget used to render a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Widget {
	#[default]
	TextInput,
	TextArea,
	PasswordInput,
	NumberInput,
	CheckboxInput,
	HiddenInput,
}

impl Widget {
	/// HTML `type` attribute for `<input>` based widgets.
	///
	/// Returns `None` for widgets that are not rendered as `<input>`.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::Widget;
	///
	/// assert_eq!(Widget::NumberInput.input_type(), Some("number"));
	/// assert_eq!(Widget::TextArea.input_type(), None);
	/// ```
	pub fn input_type(&self) -> Option<&'static str> {
		match self {
			Widget::TextInput => Some("text"),
			Widget::TextArea => None,
			Widget::PasswordInput => Some("password"),
			Widget::NumberInput => Some("number"),
			Widget::CheckboxInput => Some("checkbox"),
			Widget::HiddenInput => Some("hidden"),
		}
	}

	pub fn is_hidden(&self) -> bool {
		matches!(self, Widget::HiddenInput)
	}
}

/// A single form input element
pub trait FormField: Debug + Send + Sync {
	fn label(&self) -> Option<&str>;

	fn required(&self) -> bool;

	fn help_text(&self) -> Option<&str> {
		None
	}

	fn widget(&self) -> &Widget;

	fn initial(&self) -> Option<&serde_json::Value> {
		None
	}

	/// Validate and normalize a raw value
	fn clean(&self, value: Option<&serde_json::Value>) -> FieldResult<serde_json::Value>;

	/// Whether the submitted value differs from the initial one
	fn has_changed(
		&self,
		initial: Option<&serde_json::Value>,
		data: Option<&serde_json::Value>,
	) -> bool {
		match (initial, data) {
			(None, None) => false,
			(Some(i), Some(d)) => i != d,
			(None, Some(d)) => !d.is_null(),
			(Some(i), None) => !i.is_null(),
		}
	}
}
