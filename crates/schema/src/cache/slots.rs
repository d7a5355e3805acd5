use std::sync::{Arc, Weak};

use strata_components::{BehaviorRef, DescriptorRef, InterfaceRef, Mtime, TypeDescriptor};

/// Names of the values cached per descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheEntry {
	Get,
	BehaviorRegistrations,
	Subtypes,
	BehaviorSchemaInterfaces,
	SchemaInterfaces,
	Modified,
}

impl CacheEntry {
	pub const fn key(self) -> &'static str {
		match self {
			Self::Get => "get",
			Self::BehaviorRegistrations => "behavior_registrations",
			Self::Subtypes => "subtypes",
			Self::BehaviorSchemaInterfaces => "behavior_schema_interfaces",
			Self::SchemaInterfaces => "schema_interfaces",
			Self::Modified => "modified",
		}
	}
}

impl std::fmt::Display for CacheEntry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.key())
	}
}

/// A cached value with the descriptor mtime it was computed under.
pub(super) struct Stamped<T> {
	pub mtime: Option<Mtime>,
	pub value: T,
}

/// Typed selector for one per-descriptor slot.
pub(super) trait Slot {
	type Value: Clone + Default;
	const ENTRY: CacheEntry;

	fn select(slots: &mut Slots) -> &mut Option<Stamped<Self::Value>>;
}

macro_rules! define_slots {
	($($marker:ident => $field:ident: $value:ty;)*) => {
		/// Every cached value of one descriptor.
		pub(super) struct Slots {
			owner: Weak<dyn TypeDescriptor>,
			$( $field: Option<Stamped<$value>>, )*
		}

		impl Slots {
			pub fn new(owner: &DescriptorRef) -> Self {
				Self {
					owner: Arc::downgrade(owner),
					$( $field: None, )*
				}
			}
		}

		$(
			pub(super) struct $marker;

			impl Slot for $marker {
				type Value = $value;
				const ENTRY: CacheEntry = CacheEntry::$marker;

				fn select(slots: &mut Slots) -> &mut Option<Stamped<$value>> {
					&mut slots.$field
				}
			}
		)*
	};
}

define_slots! {
	Get => get: Option<InterfaceRef>;
	BehaviorRegistrations => behavior_registrations: Arc<[BehaviorRef]>;
	Subtypes => subtypes: Arc<[InterfaceRef]>;
	BehaviorSchemaInterfaces => behavior_schema_interfaces: Arc<[InterfaceRef]>;
	SchemaInterfaces => schema_interfaces: Arc<[InterfaceRef]>;
	Modified => modified: Option<Mtime>;
}

impl Slots {
	/// True if these slots were filled from `descriptor` itself rather than
	/// from another descriptor registered under the same identifier.
	pub fn is_owned_by(&self, descriptor: &DescriptorRef) -> bool {
		std::ptr::addr_eq(self.owner.as_ptr(), Arc::as_ptr(descriptor))
	}
}
