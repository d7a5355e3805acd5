use std::sync::Arc;

use crate::behavior::BehaviorRef;
use crate::interface::InterfaceRef;

/// Per-instance view of which behaviors are enabled.
pub trait BehaviorAssignable: Send + Sync {
	/// True if content using this assignment provides `interface` through one
	/// of its behaviors.
	fn supports(&self, interface: &InterfaceRef) -> bool;

	/// Behaviors enabled for the instance, in application order.
	fn enumerate_behaviors(&self) -> Vec<BehaviorRef>;
}

/// A content instance as seen by schema resolution.
pub trait Content: Send + Sync {
	/// The identifier of the instance's type descriptor.
	fn portal_type(&self) -> Option<&str>;

	/// Behavior assignability adapter, if the concept applies to this
	/// instance.
	fn behavior_assignable(&self) -> Option<Arc<dyn BehaviorAssignable>> {
		None
	}
}

/// Minimal [`Content`] carrying only a portal type and an optional
/// assignability adapter.
#[derive(Clone, Default)]
pub struct ContentItem {
	portal_type: Option<String>,
	assignable: Option<Arc<dyn BehaviorAssignable>>,
}

impl ContentItem {
	pub fn new(portal_type: impl Into<String>) -> Self {
		Self {
			portal_type: Some(portal_type.into()),
			assignable: None,
		}
	}

	/// Content whose portal type has not been set yet.
	pub fn untyped() -> Self {
		Self::default()
	}

	pub fn with_assignable(mut self, assignable: Arc<dyn BehaviorAssignable>) -> Self {
		self.assignable = Some(assignable);
		self
	}
}

impl Content for ContentItem {
	fn portal_type(&self) -> Option<&str> {
		self.portal_type.as_deref()
	}

	fn behavior_assignable(&self) -> Option<Arc<dyn BehaviorAssignable>> {
		self.assignable.clone()
	}
}

impl std::fmt::Debug for ContentItem {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ContentItem")
			.field("portal_type", &self.portal_type)
			.field("assignable", &self.assignable.is_some())
			.finish()
	}
}
