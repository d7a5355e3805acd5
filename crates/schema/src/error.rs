use thiserror::Error;

/// Errors surfaced by the schema layer.
///
/// Lookup failures inside the cache are deliberately absent: they degrade to
/// empty results. What remains are contract violations by the caller and
/// broken configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
	/// A flat schema name did not split into two or three components.
	#[error("schema name {name:?} is invalid: expected 2 or 3 components, found {parts}")]
	InvalidName { name: String, parts: usize },
	/// The content instance has no portal type set.
	#[error("content has no portal type")]
	MissingPortalType,
	/// Neither a context nor a portal type was supplied.
	#[error("either a context or a portal type is required")]
	MissingSource,
	/// The cache configuration could not be parsed.
	#[error("invalid schema cache configuration: {0}")]
	Config(String),
}
