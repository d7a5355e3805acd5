use std::sync::Arc;
use std::thread;

use pretty_assertions::assert_eq;

use super::*;
use crate::{BehaviorRegistration, Interface, MemoryTypeDescriptor};

#[test]
fn test_type_lookup_and_order() {
	let registry = MemoryRegistry::new();
	registry.register_type(MemoryTypeDescriptor::new("page").into_ref());
	registry.register_type(MemoryTypeDescriptor::new("folder").into_ref());

	assert_eq!(registry.len(), 2);
	assert_eq!(registry.type_descriptor("page").unwrap().id(), "page");
	assert!(registry.type_descriptor("news").is_none());

	let ids: Vec<_> = registry
		.type_descriptors()
		.iter()
		.map(|d| d.id().to_owned())
		.collect();
	assert_eq!(ids, vec!["page", "folder"]);
}

#[test]
fn test_replace_type_keeps_position() {
	let registry = MemoryRegistry::new();
	let first = MemoryTypeDescriptor::new("page").into_ref();
	registry.register_type(first.clone());
	registry.register_type(MemoryTypeDescriptor::new("folder").into_ref());

	let prev = registry.register_type(MemoryTypeDescriptor::new("page").into_ref());
	assert!(Arc::ptr_eq(&prev.unwrap(), &first));
	assert_eq!(registry.len(), 2);
	assert_eq!(registry.type_descriptors()[0].id(), "page");
	assert!(!Arc::ptr_eq(&registry.type_descriptor("page").unwrap(), &first));
}

#[test]
fn test_unregister_type() {
	let registry = MemoryRegistry::new();
	registry.register_type(MemoryTypeDescriptor::new("page").into_ref());

	assert!(registry.unregister_type("page").is_some());
	assert!(registry.unregister_type("page").is_none());
	assert!(registry.is_empty());
	assert!(registry.type_descriptors().is_empty());
}

#[test]
fn test_behavior_lookup() {
	let registry = MemoryRegistry::new();
	let reg = BehaviorRegistration::new("dublin_core", "Dublin Core").into_ref();
	assert!(registry.register_behavior("dublin_core", reg.clone()).is_none());

	assert!(Arc::ptr_eq(&registry.behavior("dublin_core").unwrap(), &reg));
	assert!(registry.behavior("missing").is_none());
}

#[test]
fn test_form_fields_adaptation() {
	let registry = MemoryRegistry::new();
	let own = Interface::new("behaviors.IOwn").into_ref();
	let raw = Interface::new("behaviors.IRaw").into_ref();
	let presented = Interface::new("behaviors.IRawForm").into_ref();
	let none = Interface::new("behaviors.INone").into_ref();

	registry.provide_form_fields(&own);
	registry.register_form_fields(&raw, presented.clone());

	assert!(Arc::ptr_eq(&registry.form_fields(&own).unwrap(), &own));
	assert!(Arc::ptr_eq(&registry.form_fields(&raw).unwrap(), &presented));
	assert!(registry.form_fields(&none).is_none());
}

#[test]
fn test_concurrent_registration_loses_nothing() {
	let registry = Arc::new(MemoryRegistry::new());
	let handles: Vec<_> = (0..8)
		.map(|t| {
			let registry = registry.clone();
			thread::spawn(move || {
				for i in 0..25 {
					let id = format!("type-{t}-{i}");
					registry.register_type(MemoryTypeDescriptor::new(id).into_ref());
				}
			})
		})
		.collect();
	for handle in handles {
		handle.join().unwrap();
	}

	assert_eq!(registry.len(), 200);
	assert_eq!(registry.type_descriptors().len(), 200);
}
