use std::sync::Arc;

use strata_components::{BehaviorAssignable, BehaviorRef, InterfaceRef};

use crate::cache::SchemaCache;

/// Behavior assignability backed by the behaviors declared on a type.
///
/// This is the stock adapter for content whose behaviors are fixed by its
/// type. Enumeration goes through the schema cache, so it reflects type edits
/// as soon as the descriptor mtime changes.
pub struct TypeBehaviorAssignable {
	cache: Arc<SchemaCache>,
	portal_type: String,
}

impl TypeBehaviorAssignable {
	pub fn new(cache: Arc<SchemaCache>, portal_type: impl Into<String>) -> Self {
		Self {
			cache,
			portal_type: portal_type.into(),
		}
	}

	pub fn portal_type(&self) -> &str {
		&self.portal_type
	}
}

impl BehaviorAssignable for TypeBehaviorAssignable {
	/// True if a behavior's form schema or marker is, or extends, `interface`.
	fn supports(&self, interface: &InterfaceRef) -> bool {
		self.cache
			.behavior_registrations(self.portal_type.as_str())
			.iter()
			.flat_map(|reg| [reg.interface.as_ref(), reg.marker.as_ref()])
			.flatten()
			.any(|provided| provided.is_or_extends(interface))
	}

	fn enumerate_behaviors(&self) -> Vec<BehaviorRef> {
		self.cache
			.behavior_registrations(self.portal_type.as_str())
			.to_vec()
	}
}
