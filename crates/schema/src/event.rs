use crate::cache::{SchemaCache, schema_cache};

/// Notification that the schema of one type, or of every type, changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaInvalidated {
	/// The changed type, or `None` when every type must be recomputed.
	pub portal_type: Option<String>,
}

impl SchemaInvalidated {
	pub fn for_type(portal_type: impl Into<String>) -> Self {
		Self {
			portal_type: Some(portal_type.into()),
		}
	}

	pub fn all() -> Self {
		Self::default()
	}
}

impl SchemaCache {
	/// Applies a [`SchemaInvalidated`] event.
	///
	/// A named type is invalidated; an absent or empty name clears the cache.
	pub fn handle(&self, event: &SchemaInvalidated) {
		match event.portal_type.as_deref() {
			Some(portal_type) if !portal_type.is_empty() => {
				self.invalidate(portal_type);
			}
			_ => self.clear(),
		}
	}
}

/// Routes `event` to the process-wide cache.
///
/// Returns false if no cache has been installed.
pub fn invalidate_schema(event: &SchemaInvalidated) -> bool {
	match schema_cache() {
		Some(cache) => {
			cache.handle(event);
			true
		}
		None => false,
	}
}
