use crate::field::{FieldError, FieldResult, FormField, Widget};

/// Whole-number input with optional bounds
#[derive(Debug, Clone)]
pub struct IntegerField {
	pub label: Option<String>,
	pub required: bool,
	pub help_text: Option<String>,
	pub widget: Widget,
	pub initial: Option<serde_json::Value>,
	pub max_value: Option<i64>,
	pub min_value: Option<i64>,
}

impl IntegerField {
	/// Create a new optional integer field
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::{FormField, IntegerField, Widget};
	///
	/// let field = IntegerField::new().with_min_value(0);
	/// assert_eq!(field.min_value, Some(0));
	/// assert_eq!(field.widget(), &Widget::NumberInput);
	/// ```
	pub fn new() -> Self {
		Self {
			label: None,
			required: false,
			help_text: None,
			widget: Widget::NumberInput,
			initial: None,
			max_value: None,
			min_value: None,
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

	pub fn with_initial(mut self, initial: i64) -> Self {
		self.initial = Some(serde_json::json!(initial));
		self
	}

	pub fn with_max_value(mut self, max_value: i64) -> Self {
		self.max_value = Some(max_value);
		self
	}

	pub fn with_min_value(mut self, min_value: i64) -> Self {
		self.min_value = Some(min_value);
		self
	}
}

impl Default for IntegerField {
	fn default() -> Self {
		Self::new()
	}
}

impl FormField for IntegerField {
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
		let num = match value {
			None | Some(serde_json::Value::Null) => None,
			Some(v) => {
				if let Some(i) = v.as_i64() {
					Some(i)
				} else if let Some(s) = v.as_str() {
					let s = s.trim();
					if s.is_empty() {
						None
					} else {
						Some(
							s.parse::<i64>()
								.map_err(|_| FieldError::Invalid("Enter a whole number".to_string()))?,
						)
					}
				} else {
					return Err(FieldError::Invalid("Enter a whole number".to_string()));
				}
			}
		};

		let Some(num) = num else {
			if self.required {
				return Err(FieldError::Required);
			}
			return Ok(serde_json::Value::Null);
		};

		if let Some(max) = self.max_value
			&& num > max
		{
			return Err(FieldError::Validation(format!(
				"Ensure this value is less than or equal to {}",
				max
			)));
		}

		if let Some(min) = self.min_value
			&& num < min
		{
			return Err(FieldError::Validation(format!(
				"Ensure this value is greater than or equal to {}",
				min
			)));
		}

		Ok(serde_json::json!(num))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(json!(42), Ok(json!(42)))]
	#[case(json!(" 7 "), Ok(json!(7)))]
	#[case(json!(""), Ok(json!(null)))]
	#[case(json!(1.5), Err(FieldError::Invalid("Enter a whole number".to_string())))]
	#[case(json!("abc"), Err(FieldError::Invalid("Enter a whole number".to_string())))]
	fn test_integer_field_parsing(
		#[case] input: serde_json::Value,
		#[case] expected: FieldResult<serde_json::Value>,
	) {
		// Arrange
		let field = IntegerField::new();

		// Act
		let result = field.clean(Some(&input));

		// Assert
		assert_eq!(result, expected);
	}

	#[rstest]
	fn test_integer_field_bounds() {
		// Arrange
		let field = IntegerField::new().with_min_value(0).with_max_value(150);

		// Act & Assert
		assert!(field.clean(Some(&json!(30))).is_ok());
		assert!(field.clean(Some(&json!(-1))).is_err());
		assert!(field.clean(Some(&json!(151))).is_err());
	}

	#[rstest]
	fn test_integer_field_required() {
		// Arrange
		let field = IntegerField::new().required();

		// Act & Assert
		assert_eq!(field.clean(None), Err(FieldError::Required));
		assert_eq!(field.clean(Some(&json!("  "))), Err(FieldError::Required));
	}
}
