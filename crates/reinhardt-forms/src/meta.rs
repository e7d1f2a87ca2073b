//! Form-wide configuration

use crate::form::{FormError, FormResult};
use serde::{Deserialize, Serialize};

/// Options shared by every field of a form
///
/// Only `id_prefix` has a meaning to the form itself. `locales` is a typed
/// slot the form carries without reading it, and any other key is kept as-is
/// in [`FormMeta::options`], so applications can keep their own settings next
/// to the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormMeta {
	/// Locales the application renders the form in; passed through untouched
	#[serde(default)]
	pub locales: Vec<String>,
	/// Overrides the `id_` prefix used for `id` attributes
	#[serde(default)]
	pub id_prefix: Option<String>,
	#[serde(flatten)]
	pub options: serde_json::Map<String, serde_json::Value>,
}

impl FormMeta {
	pub fn new() -> Self {
		Self::default()
	}

	/// Load form options from a TOML document
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::FormMeta;
	///
	/// let meta = FormMeta::from_toml(r#"
	/// locales = ["de_DE", "en"]
	/// csrf = true
	/// "#).unwrap();
	///
	/// assert_eq!(meta.locales, vec!["de_DE".to_string(), "en".to_string()]);
	/// assert_eq!(meta.option("csrf"), Some(&serde_json::json!(true)));
	/// ```
	pub fn from_toml(source: &str) -> FormResult<Self> {
		toml::from_str(source).map_err(|e| FormError::Meta(e.to_string()))
	}

	pub fn from_json(value: serde_json::Value) -> FormResult<Self> {
		serde_json::from_value(value).map_err(|e| FormError::Meta(e.to_string()))
	}

	pub fn with_locales<I, S>(mut self, locales: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.locales = locales.into_iter().map(Into::into).collect();
		self
	}

	pub fn with_id_prefix(mut self, id_prefix: impl Into<String>) -> Self {
		self.id_prefix = Some(id_prefix.into());
		self
	}

	pub fn with_option(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
		self.options.insert(key.into(), value);
		self
	}

	pub fn option(&self, key: &str) -> Option<&serde_json::Value> {
		self.options.get(key)
	}

	pub(crate) fn id_prefix(&self) -> &str {
		self.id_prefix.as_deref().unwrap_or("id_")
	}
}
