use crate::bound_field::BoundField;
use crate::field::FormField;
use crate::meta::FormMeta;
use indexmap::IndexMap;
use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum FormError {
	#[error("Duplicate field name: {0}")]
	DuplicateField(String),
	#[error("Invalid field name: {0:?}")]
	InvalidFieldName(String),
	#[error("Invalid form meta: {0}")]
	Meta(String),
}

pub type FormResult<T> = Result<T, FormError>;

/// A form built from an ordered list of named fields
///
/// Construction and data processing are separate steps: [`BaseForm::new`]
/// takes ownership of the fields and builds the name to field mapping, then
/// [`BaseForm::process`] binds input data to it.
#[derive(Debug)]
pub struct BaseForm {
	fields: IndexMap<String, Box<dyn FormField>>,
	data: HashMap<String, serde_json::Value>,
	errors: HashMap<String, Vec<String>>,
	is_bound: bool,
	prefix: String,
	meta: FormMeta,
}

impl BaseForm {
	/// Build a form from `(name, field)` pairs, keeping their order
	///
	/// # Errors
	///
	/// Fails with [`FormError::DuplicateField`] if two fields share a name and
	/// with [`FormError::InvalidFieldName`] for the empty name. Any other string,
	/// whitespace included, is accepted as a name.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::{BaseForm, CharField, FormField, FormMeta};
	///
	/// let fields: Vec<(String, Box<dyn FormField>)> = vec![
	///     ("first_name".to_string(), Box::new(CharField::new())),
	///     ("last_name".to_string(), Box::new(CharField::new())),
	/// ];
	/// let form = BaseForm::new(fields, "", FormMeta::default()).unwrap();
	///
	/// assert_eq!(form.field_names().collect::<Vec<_>>(), ["first_name", "last_name"]);
	/// assert!(!form.is_bound());
	/// ```
	pub fn new<I>(fields: I, prefix: impl Into<String>, meta: FormMeta) -> FormResult<Self>
	where
		I: IntoIterator<Item = (String, Box<dyn FormField>)>,
	{
		let mut mapping = IndexMap::new();
		for (name, field) in fields {
			if name.is_empty() {
				return Err(FormError::InvalidFieldName(name));
			}
			if mapping.contains_key(&name) {
				return Err(FormError::DuplicateField(name));
			}
			mapping.insert(name, field);
		}

		Ok(Self {
			fields: mapping,
			data: HashMap::new(),
			errors: HashMap::new(),
			is_bound: false,
			prefix: prefix.into(),
			meta,
		})
	}

	/// Bind keyword input data to the fields
	///
	/// Every field takes its value from the prefixed key first, then from the
	/// bare field name, and falls back to its initial value. Keys that match no
	/// field are dropped. Passing a non-empty map marks the form as bound.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::{BaseForm, CharField, FormField, FormMeta};
	/// use serde_json::json;
	/// use std::collections::HashMap;
	///
	/// let fields: Vec<(String, Box<dyn FormField>)> =
	///     vec![("email".to_string(), Box::new(CharField::new()))];
	/// let mut form = BaseForm::new(fields, "user", FormMeta::default()).unwrap();
	///
	/// let mut data = HashMap::new();
	/// data.insert("user-email".to_string(), json!("a@example.com"));
	/// form.process(data);
	///
	/// assert!(form.is_bound());
	/// assert_eq!(form.data().get("email"), Some(&json!("a@example.com")));
	/// ```
	pub fn process(&mut self, data: HashMap<String, serde_json::Value>) {
		self.is_bound = !data.is_empty();
		self.errors.clear();
		self.data.clear();

		for (name, field) in &self.fields {
			let value = data
				.get(&self.add_prefix(name))
				.or_else(|| data.get(name))
				.or_else(|| field.initial());
			if let Some(value) = value {
				self.data.insert(name.clone(), value.clone());
			}
		}
	}

	/// Clean every field and record errors; returns `true` if none failed
	///
	/// Unbound forms are never valid.
	pub fn validate(&mut self) -> bool {
		if !self.is_bound {
			return false;
		}

		self.errors.clear();
		let mut cleaned = HashMap::with_capacity(self.fields.len());

		for (name, field) in &self.fields {
			match field.clean(self.data.get(name)) {
				Ok(value) => {
					cleaned.insert(name.clone(), value);
				}
				Err(e) => {
					self.errors
						.entry(name.clone())
						.or_default()
						.push(e.to_string());
				}
			}
		}

		self.data.extend(cleaned);
		self.errors.is_empty()
	}

	pub fn is_bound(&self) -> bool {
		self.is_bound
	}

	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	pub fn meta(&self) -> &FormMeta {
		&self.meta
	}

	pub fn data(&self) -> &HashMap<String, serde_json::Value> {
		&self.data
	}

	/// Cleaned values, only meaningful after a successful [`BaseForm::validate`]
	pub fn cleaned_data(&self) -> &HashMap<String, serde_json::Value> {
		&self.data
	}

	pub fn errors(&self) -> &HashMap<String, Vec<String>> {
		&self.errors
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.fields.contains_key(name)
	}

	pub fn field_names(&self) -> impl Iterator<Item = &str> {
		self.fields.keys().map(String::as_str)
	}

	pub fn get_field(&self, name: &str) -> Option<&(dyn FormField + 'static)> {
		self.fields.get(name).map(|f| f.as_ref())
	}

	/// Whether any field's data differs from its initial value
	pub fn has_changed(&self) -> bool {
		self.is_bound
			&& self
				.fields
				.iter()
				.any(|(name, field)| field.has_changed(field.initial(), self.data.get(name)))
	}

	pub fn add_prefix(&self, field_name: &str) -> String {
		if self.prefix.is_empty() {
			field_name.to_string()
		} else {
			format!("{}-{}", self.prefix, field_name)
		}
	}

	pub fn get_bound_field<'a>(&'a self, name: &str) -> Option<BoundField<'a>> {
		let (key, field) = self.fields.get_key_value(name)?;
		Some(self.bind(key, field.as_ref()))
	}

	/// All fields in declaration order
	pub fn bound_fields(&self) -> impl Iterator<Item = BoundField<'_>> {
		self.fields
			.iter()
			.map(|(name, field)| self.bind(name, field.as_ref()))
	}

	fn bind<'a>(&'a self, name: &'a str, field: &'a dyn FormField) -> BoundField<'a> {
		let errors = self.errors.get(name).map(|e| e.as_slice()).unwrap_or(&[]);
		BoundField::new(
			name,
			field,
			self.data.get(name),
			errors,
			&self.prefix,
			&self.meta,
		)
	}
}
