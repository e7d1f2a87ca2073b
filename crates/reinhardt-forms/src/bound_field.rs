use crate::field::{FormField, Widget};
use crate::meta::FormMeta;
use std::borrow::Cow;

/// A field together with the name, data and errors it has inside one form
#[derive(Debug, Clone, Copy)]
pub struct BoundField<'a> {
	name: &'a str,
	field: &'a dyn FormField,
	data: Option<&'a serde_json::Value>,
	errors: &'a [String],
	prefix: &'a str,
	meta: &'a FormMeta,
}

/// Turn a field name into a label: `first_name` becomes `First name`
///
/// # Examples
///
/// ```
/// use reinhardt_forms::bound_field::pretty_name;
///
/// assert_eq!(pretty_name("first_name"), "First name");
/// assert_eq!(pretty_name("email"), "Email");
/// assert_eq!(pretty_name(""), "");
/// ```
pub fn pretty_name(name: &str) -> String {
	let spaced = name.replace('_', " ");
	let mut chars = spaced.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

impl<'a> BoundField<'a> {
	pub fn new(
		name: &'a str,
		field: &'a dyn FormField,
		data: Option<&'a serde_json::Value>,
		errors: &'a [String],
		prefix: &'a str,
		meta: &'a FormMeta,
	) -> Self {
		Self {
			name,
			field,
			data,
			errors,
			prefix,
			meta,
		}
	}

	pub fn name(&self) -> &'a str {
		self.name
	}

	/// The underlying unbound field
	pub fn field(&self) -> &'a dyn FormField {
		self.field
	}

	/// HTML `name` attribute, including the form prefix
	pub fn html_name(&self) -> String {
		if self.prefix.is_empty() {
			self.name.to_string()
		} else {
			format!("{}-{}", self.prefix, self.name)
		}
	}

	/// HTML `id` attribute, using the form meta's id prefix
	pub fn id_for_label(&self) -> String {
		format!("{}{}", self.meta.id_prefix(), self.html_name())
	}

	/// The field's explicit label, or one derived from the field name
	pub fn label(&self) -> Cow<'a, str> {
		match self.field.label() {
			Some(label) => Cow::Borrowed(label),
			None => Cow::Owned(pretty_name(self.name)),
		}
	}

	/// Bound data, falling back to the field's initial value
	pub fn value(&self) -> Option<&'a serde_json::Value> {
		self.data.or_else(|| self.field.initial())
	}

	pub fn errors(&self) -> &'a [String] {
		self.errors
	}

	pub fn has_errors(&self) -> bool {
		!self.errors.is_empty()
	}

	pub fn widget(&self) -> &'a Widget {
		self.field.widget()
	}

	pub fn help_text(&self) -> Option<&'a str> {
		self.field.help_text()
	}

	pub fn is_required(&self) -> bool {
		self.field.required()
	}

	pub fn is_hidden(&self) -> bool {
		self.widget().is_hidden()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fields::CharField;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_bound_field_basic() {
		// Arrange
		let field = CharField::new();
		let data = json!("John Doe");
		let meta = FormMeta::default();

		// Act
		let bound = BoundField::new("name", &field, Some(&data), &[], "", &meta);

		// Assert
		assert_eq!(bound.name(), "name");
		assert_eq!(bound.html_name(), "name");
		assert_eq!(bound.id_for_label(), "id_name");
		assert_eq!(bound.value(), Some(&data));
		assert_eq!(bound.label(), "Name");
		assert!(!bound.has_errors());
	}

	#[rstest]
	fn test_bound_field_with_prefix_and_id_prefix() {
		// Arrange
		let field = CharField::new();
		let meta = FormMeta::default().with_id_prefix("f-");

		// Act
		let bound = BoundField::new("name", &field, None, &[], "profile", &meta);

		// Assert
		assert_eq!(bound.html_name(), "profile-name");
		assert_eq!(bound.id_for_label(), "f-profile-name");
	}

	#[rstest]
	fn test_bound_field_explicit_label_wins() {
		// Arrange
		let field = CharField::labeled("Full name");
		let meta = FormMeta::default();

		// Act
		let bound = BoundField::new("name", &field, None, &[], "", &meta);

		// Assert
		assert_eq!(bound.label(), "Full name");
	}

	#[rstest]
	fn test_bound_field_value_falls_back_to_initial() {
		// Arrange
		let field = CharField::new().with_initial("Alice");
		let meta = FormMeta::default();

		// Act
		let bound = BoundField::new("name", &field, None, &[], "", &meta);

		// Assert
		assert_eq!(bound.value(), Some(&json!("Alice")));
	}

	#[rstest]
	fn test_bound_field_with_errors() {
		// Arrange
		let field = CharField::new().required();
		let errors = vec!["This field is required.".to_string()];
		let meta = FormMeta::default();

		// Act
		let bound = BoundField::new("name", &field, None, &errors, "", &meta);

		// Assert
		assert!(bound.has_errors());
		assert!(bound.is_required());
		assert_eq!(bound.errors(), ["This field is required.".to_string()]);
	}
}
