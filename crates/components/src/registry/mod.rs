//! Component registry contract and an in-memory implementation.
//!
//! [`MemoryRegistry`] publishes immutable snapshots through [`ArcSwap`]:
//! lookups never block, and registrations clone the current snapshot, apply
//! the change, and compare-and-swap it back in, retrying on contention.

use std::sync::Arc;

use arc_swap::ArcSwap;
use rustc_hash::FxHashMap as HashMap;

use crate::behavior::BehaviorRef;
use crate::descriptor::DescriptorRef;
use crate::interface::InterfaceRef;

#[cfg(test)]
mod tests;

/// Service locator consumed by the schema layer.
pub trait ComponentRegistry: Send + Sync {
	/// Looks up a type descriptor by identifier.
	fn type_descriptor(&self, id: &str) -> Option<DescriptorRef>;

	/// All registered type descriptors.
	fn type_descriptors(&self) -> Vec<DescriptorRef>;

	/// Looks up a behavior registration by name.
	fn behavior(&self, name: &str) -> Option<BehaviorRef>;

	/// Adapts a behavior schema to its form-field presentation.
	///
	/// Returns `None` for schemata that contribute no form fields.
	fn form_fields(&self, schema: &InterfaceRef) -> Option<InterfaceRef>;
}

#[derive(Clone, Default)]
struct RegistrySnapshot {
	types: HashMap<Box<str>, DescriptorRef>,
	type_order: Vec<Box<str>>,
	behaviors: HashMap<Box<str>, BehaviorRef>,
	form_fields: HashMap<Box<str>, InterfaceRef>,
}

/// Snapshot-backed [`ComponentRegistry`].
pub struct MemoryRegistry {
	snap: ArcSwap<RegistrySnapshot>,
}

impl Default for MemoryRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryRegistry {
	pub fn new() -> Self {
		Self {
			snap: ArcSwap::from_pointee(RegistrySnapshot::default()),
		}
	}

	/// Registers a type descriptor under its own identifier.
	///
	/// Returns the descriptor previously registered under that identifier.
	pub fn register_type(&self, descriptor: DescriptorRef) -> Option<DescriptorRef> {
		self.update(|snap| {
			let id: Box<str> = Box::from(descriptor.id());
			let prev = snap.types.insert(id.clone(), descriptor.clone());
			if prev.is_none() {
				snap.type_order.push(id);
			}
			prev
		})
	}

	pub fn unregister_type(&self, id: &str) -> Option<DescriptorRef> {
		self.update(|snap| {
			let prev = snap.types.remove(id);
			if prev.is_some() {
				snap.type_order.retain(|known| &**known != id);
			}
			prev
		})
	}

	/// Registers a behavior under `name`, replacing any previous one.
	pub fn register_behavior(&self, name: &str, registration: BehaviorRef) -> Option<BehaviorRef> {
		self.update(|snap| snap.behaviors.insert(Box::from(name), registration.clone()))
	}

	/// Marks `schema` as its own form-field provider.
	pub fn provide_form_fields(&self, schema: &InterfaceRef) {
		self.register_form_fields(schema, schema.clone());
	}

	/// Presents `schema` as `presented` in forms.
	pub fn register_form_fields(&self, schema: &InterfaceRef, presented: InterfaceRef) {
		self.update(|snap| {
			snap.form_fields
				.insert(Box::from(schema.name()), presented.clone());
		});
	}

	pub fn len(&self) -> usize {
		self.snap.load().types.len()
	}

	pub fn is_empty(&self) -> bool {
		self.snap.load().types.is_empty()
	}

	fn update<R>(&self, mut apply: impl FnMut(&mut RegistrySnapshot) -> R) -> R {
		loop {
			let cur = self.snap.load_full();
			let mut next = (*cur).clone();
			let out = apply(&mut next);

			let prev = self.snap.compare_and_swap(&cur, Arc::new(next));
			if Arc::ptr_eq(&prev, &cur) {
				return out;
			}
			tracing::trace!("registry snapshot contended; retrying");
		}
	}
}

impl ComponentRegistry for MemoryRegistry {
	fn type_descriptor(&self, id: &str) -> Option<DescriptorRef> {
		self.snap.load().types.get(id).cloned()
	}

	fn type_descriptors(&self) -> Vec<DescriptorRef> {
		let snap = self.snap.load();
		snap.type_order
			.iter()
			.filter_map(|id| snap.types.get(id).cloned())
			.collect()
	}

	fn behavior(&self, name: &str) -> Option<BehaviorRef> {
		self.snap.load().behaviors.get(name).cloned()
	}

	fn form_fields(&self, schema: &InterfaceRef) -> Option<InterfaceRef> {
		self.snap.load().form_fields.get(schema.name()).cloned()
	}
}
