use thiserror::Error;

/// Failure of a descriptor's primary-schema lookup.
///
/// Both classes are recoverable: the schema cache treats either one as
/// "this type has no primary schema".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
	/// The descriptor lacks the attribute needed to locate its schema.
	#[error("attribute error: {0}")]
	Attribute(String),
	/// The descriptor names a schema that cannot be produced.
	#[error("value error: {0}")]
	Value(String),
}

/// Failure to resolve a dotted name to a live interface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
	/// The dotted name was empty.
	#[error("empty dotted name")]
	Empty,
	/// Nothing is bound to the dotted name.
	#[error("cannot resolve {0:?}")]
	NotFound(String),
}
