use std::sync::Arc;

use crate::interface::InterfaceRef;

/// Shared handle to a [`BehaviorRegistration`].
pub type BehaviorRef = Arc<BehaviorRegistration>;

/// A named capability module that types and instances can opt into.
///
/// A behavior may contribute a form schema ([`interface`](Self::interface)),
/// a marker applied to content ([`marker`](Self::marker)), and a factory for
/// an adapter storing its fields elsewhere.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BehaviorRegistration {
	/// Registration name (the key in the registry), if registered by name.
	pub name: Option<String>,
	pub title: String,
	pub description: String,
	/// Form schema contributed to types using this behavior.
	pub interface: Option<InterfaceRef>,
	/// Marker interface applied to content using this behavior.
	pub marker: Option<InterfaceRef>,
	/// Dotted name of the adapter factory.
	pub factory: Option<String>,
}

impl BehaviorRegistration {
	pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
		Self {
			name: Some(name.into()),
			title: title.into(),
			..Self::default()
		}
	}

	/// Placeholder registration for a behavior named by the dotted name of
	/// its schema instead of by a registered name.
	pub fn fallback(behavior_name: &str, schema: InterfaceRef) -> Self {
		Self {
			name: None,
			title: behavior_name.to_owned(),
			description: "bbb fallback lookup".to_owned(),
			interface: Some(schema),
			marker: None,
			factory: None,
		}
	}

	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = description.into();
		self
	}

	pub fn with_interface(mut self, interface: InterfaceRef) -> Self {
		self.interface = Some(interface);
		self
	}

	pub fn with_marker(mut self, marker: InterfaceRef) -> Self {
		self.marker = Some(marker);
		self
	}

	pub fn with_factory(mut self, factory: impl Into<String>) -> Self {
		self.factory = Some(factory.into());
		self
	}

	pub fn into_ref(self) -> BehaviorRef {
		Arc::new(self)
	}

	/// True if this registration was synthesized by [`fallback`](Self::fallback).
	pub fn is_fallback(&self) -> bool {
		self.name.is_none()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Interface;

	#[test]
	fn test_builder_fills_every_field() {
		let schema = Interface::new("behaviors.IDated").into_ref();
		let marker = Interface::new("markers.IDated").into_ref();
		let reg = BehaviorRegistration::new("dated", "Dated")
			.with_description("Effective and expiration dates")
			.with_interface(schema.clone())
			.with_marker(marker.clone())
			.with_factory("pkg.behaviors.Dated");

		assert_eq!(reg.name.as_deref(), Some("dated"));
		assert_eq!(reg.description, "Effective and expiration dates");
		assert!(Arc::ptr_eq(reg.interface.as_ref().unwrap(), &schema));
		assert!(Arc::ptr_eq(reg.marker.as_ref().unwrap(), &marker));
		assert_eq!(reg.factory.as_deref(), Some("pkg.behaviors.Dated"));
		assert!(!reg.is_fallback());
	}

	#[test]
	fn test_fallback_has_no_name() {
		let schema = Interface::new("pkg.behaviors.ILegacy").into_ref();
		let reg = BehaviorRegistration::fallback("pkg.behaviors.ILegacy", schema);

		assert!(reg.is_fallback());
		assert_eq!(reg.title, "pkg.behaviors.ILegacy");
		assert!(reg.factory.is_none());
	}
}
