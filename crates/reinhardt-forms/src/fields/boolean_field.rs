use crate::field::{FieldError, FieldResult, FormField, Widget};

/// Checkbox input
///
/// A required boolean field only accepts a checked (`true`) value, which is how
/// "I agree" style checkboxes are usually expressed.
#[derive(Debug, Clone)]
pub struct BooleanField {
	pub label: Option<String>,
	pub required: bool,
	pub help_text: Option<String>,
	pub widget: Widget,
	pub initial: Option<serde_json::Value>,
}

impl BooleanField {
	pub fn new() -> Self {
		Self {
			label: None,
			required: false,
			help_text: None,
			widget: Widget::CheckboxInput,
			initial: None,
		}
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

	pub fn with_initial(mut self, initial: bool) -> Self {
		self.initial = Some(serde_json::Value::Bool(initial));
		self
	}
}

impl Default for BooleanField {
	fn default() -> Self {
		Self::new()
	}
}

fn truthy(value: &serde_json::Value) -> FieldResult<bool> {
	match value {
		serde_json::Value::Null => Ok(false),
		serde_json::Value::Bool(b) => Ok(*b),
		serde_json::Value::Number(n) => Ok(n.as_f64().is_some_and(|f| f != 0.0)),
		serde_json::Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
			"" | "false" | "0" | "off" | "no" => Ok(false),
			_ => Ok(true),
		},
		_ => Err(FieldError::Invalid("Expected a boolean".to_string())),
	}
}

impl FormField for BooleanField {
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
		let checked = match value {
			Some(v) => truthy(v)?,
			None => false,
		};
		if self.required && !checked {
			return Err(FieldError::Required);
		}
		Ok(serde_json::Value::Bool(checked))
	}

	// Unchecked and missing are the same thing for a checkbox
	fn has_changed(
		&self,
		initial: Option<&serde_json::Value>,
		data: Option<&serde_json::Value>,
	) -> bool {
		let initial = initial.map(truthy).and_then(Result::ok).unwrap_or(false);
		let data = data.map(truthy).and_then(Result::ok).unwrap_or(false);
		initial != data
	}
}
