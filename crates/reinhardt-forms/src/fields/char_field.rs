//! Character field for text input

use crate::field::{FieldError, FieldResult, FormField, Widget};

/// Text field with optional length bounds
#[derive(Debug, Clone)]
pub struct CharField {
	pub label: Option<String>,
	pub required: bool,
	pub help_text: Option<String>,
	pub widget: Widget,
	pub initial: Option<serde_json::Value>,
	pub max_length: Option<usize>,
	pub min_length: Option<usize>,
	pub strip: bool,
}

impl CharField {
	/// Create a new optional text field
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::CharField;
	///
	/// let field = CharField::new();
	/// assert!(!field.required);
	/// assert!(field.strip);
	/// assert_eq!(field.label, None);
	/// ```
	pub fn new() -> Self {
		Self {
			label: None,
			required: false,
			help_text: None,
			widget: Widget::TextInput,
			initial: None,
			max_length: None,
			min_length: None,
			strip: true,
		}
	}

	/// Create a text field with the given label
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::{CharField, FormField};
	///
	/// let field = CharField::labeled("Username");
	/// assert_eq!(field.label(), Some("Username"));
	/// ```
	pub fn labeled(label: impl Into<String>) -> Self {
		Self::new().with_label(label)
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
		self.help_text = Some(help_text.into());
		self
	}

	pub fn with_initial(mut self, initial: impl Into<String>) -> Self {
		self.initial = Some(serde_json::Value::String(initial.into()));
		self
	}

	/// Set the maximum length in characters
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::CharField;
	///
	/// let field = CharField::new().with_max_length(100);
	/// assert_eq!(field.max_length, Some(100));
	/// ```
	pub fn with_max_length(mut self, max_length: usize) -> Self {
		self.max_length = Some(max_length);
		self
	}

	pub fn with_min_length(mut self, min_length: usize) -> Self {
		self.min_length = Some(min_length);
		self
	}

	pub fn no_strip(mut self) -> Self {
		self.strip = false;
		self
	}

	pub fn with_widget(mut self, widget: Widget) -> Self {
		self.widget = widget;
		self
	}
}

impl Default for CharField {
	fn default() -> Self {
		Self::new()
	}
}

impl FormField for CharField {
	fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	fn required(&self) -> bool {
		self.required
	}

	fn help_text(&self) -> Option<&str> {
		self.help_text.as_deref()
	}

	fn widget(&self) -> &Widget {
		&self.widget
	}

	fn initial(&self) -> Option<&serde_json::Value> {
		self.initial.as_ref()
	}

	fn clean(&self, value: Option<&serde_json::Value>) -> FieldResult<serde_json::Value> {
		let raw = match value {
			None | Some(serde_json::Value::Null) => None,
			Some(serde_json::Value::String(s)) => Some(s.as_str()),
			Some(_) => {
				return Err(FieldError::Invalid("Value must be a string".to_string()));
			}
		};

		let text = raw.map(|s| if self.strip { s.trim() } else { s });
		let text = match text {
			Some(t) if !t.is_empty() => t,
			_ => {
				if self.required {
					return Err(FieldError::Required);
				}
				return Ok(serde_json::Value::String(String::new()));
			}
		};

		// Character count, not byte count, so multi-byte input is measured correctly
		let char_count = text.chars().count();
		if let Some(max_length) = self.max_length
			&& char_count > max_length
		{
			return Err(FieldError::Validation(format!(
				"Ensure this value has at most {} characters (it has {})",
				max_length, char_count
			)));
		}

		if let Some(min_length) = self.min_length
			&& char_count < min_length
		{
			return Err(FieldError::Validation(format!(
				"Ensure this value has at least {} characters (it has {})",
				min_length, char_count
			)));
		}

		Ok(serde_json::Value::String(text.to_string()))
	}
}
