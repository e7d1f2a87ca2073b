use crate::form::ConstructionStage;
use reinhardt_forms::FormError;

/// Errors raised while assembling a form from its field factories
///
/// Errors returned by user factories and predicates are kept untouched as the
/// `source`, so callers can downcast them back to their own types.
#[derive(Debug, thiserror::Error)]
pub enum FactoryError {
	#[error("enable_if predicate of field `{name}` failed during {stage}: {source}")]
	Predicate {
		name: String,
		stage: ConstructionStage,
		#[source]
		source: anyhow::Error,
	},
	#[error("factory of field `{name}` failed during {stage}: {source}")]
	Factory {
		name: String,
		stage: ConstructionStage,
		#[source]
		source: anyhow::Error,
	},
	#[error("form construction failed during {stage}: {source}")]
	Form {
		stage: ConstructionStage,
		#[source]
		source: FormError,
	},
	#[error("form has no field named `{0}`")]
	FieldNotFound(String),
}

impl FactoryError {
	/// Name of the field whose factory or predicate failed, if any
	pub fn field_name(&self) -> Option<&str> {
		match self {
			FactoryError::Predicate { name, .. }
			| FactoryError::Factory { name, .. }
			| FactoryError::FieldNotFound(name) => Some(name),
			FactoryError::Form { .. } => None,
		}
	}

	pub fn is_not_found(&self) -> bool {
		matches!(self, FactoryError::FieldNotFound(_))
	}
}

pub type FactoryResult<T> = Result<T, FactoryError>;
