//! Arguments shared by every field factory of one form

use indexmap::IndexMap;
use serde_json::Value;

/// Positional and keyword arguments handed to every factory and predicate
///
/// One set of arguments is stored per form construction; factories read it but
/// cannot change it.
///
/// # Examples
///
/// ```
/// use reinhardt_forms_factory::FactoryArgs;
/// use serde_json::json;
///
/// let args = FactoryArgs::new()
///     .arg("test1")
///     .arg(3)
///     .kwarg("locale", "de");
///
/// assert_eq!(args.get_str(0), Some("test1"));
/// assert_eq!(args.get(1), Some(&json!(3)));
/// assert_eq!(args.kwarg_str("locale"), Some("de"));
/// assert!(args.get(2).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactoryArgs {
	positional: Vec<Value>,
	keyword: IndexMap<String, Value>,
}

impl FactoryArgs {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_parts(positional: Vec<Value>, keyword: IndexMap<String, Value>) -> Self {
		Self {
			positional,
			keyword,
		}
	}

	/// Append a positional argument
	pub fn arg(mut self, value: impl Into<Value>) -> Self {
		self.positional.push(value.into());
		self
	}

	/// Set a keyword argument, replacing an earlier one with the same name
	pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.keyword.insert(name.into(), value.into());
		self
	}

	pub fn positional(&self) -> &[Value] {
		&self.positional
	}

	pub fn keyword(&self) -> &IndexMap<String, Value> {
		&self.keyword
	}

	pub fn get(&self, index: usize) -> Option<&Value> {
		self.positional.get(index)
	}

	pub fn get_str(&self, index: usize) -> Option<&str> {
		self.get(index).and_then(Value::as_str)
	}

	pub fn kwarg_value(&self, name: &str) -> Option<&Value> {
		self.keyword.get(name)
	}

	pub fn kwarg_str(&self, name: &str) -> Option<&str> {
		self.kwarg_value(name).and_then(Value::as_str)
	}

	pub fn is_empty(&self) -> bool {
		self.positional.is_empty() && self.keyword.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_default_args_are_empty() {
		let args = FactoryArgs::default();

		assert!(args.is_empty());
		assert!(args.positional().is_empty());
		assert!(args.keyword().is_empty());
	}

	#[rstest]
	fn test_kwarg_keeps_insertion_order_and_replaces() {
		// Arrange & Act
		let args = FactoryArgs::new()
			.kwarg("b", 1)
			.kwarg("a", 2)
			.kwarg("b", json!({"nested": true}));

		// Assert
		assert_eq!(args.keyword().keys().collect::<Vec<_>>(), ["b", "a"]);
		assert_eq!(args.kwarg_value("b"), Some(&json!({"nested": true})));
		assert_eq!(args.kwarg_str("b"), None);
		assert!(!args.is_empty());
	}

	#[rstest]
	fn test_from_parts() {
		// Arrange
		let mut keyword = IndexMap::new();
		keyword.insert("user_id".to_string(), json!(7));

		// Act
		let args = FactoryArgs::from_parts(vec![json!("x")], keyword);

		// Assert
		assert_eq!(args.get_str(0), Some("x"));
		assert_eq!(args.kwarg_value("user_id"), Some(&json!(7)));
	}
}
