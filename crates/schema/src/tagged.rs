//! Merging tagged values across schemata.
//!
//! Form hints, fieldsets and similar annotations are stored as tagged-value
//! dictionaries on schema interfaces. A form built from several schemata
//! needs one merged view: bases are applied before the interfaces extending
//! them, and later entries override earlier ones key by key.

use serde_json::Map;
use strata_components::{Interface, InterfaceRef, TaggedDict};

/// Tagged value `key` of `iface`, merged over its bases.
pub fn merged_tagged_value_dict(iface: &Interface, key: &str) -> TaggedDict {
	let mut merged = Map::new();
	for level in iface.resolution_order().into_iter().rev() {
		if let Some(dict) = level.tagged_value(key) {
			merged.extend(dict.iter().map(|(k, v)| (k.clone(), v.clone())));
		}
	}
	merged
}

/// Tagged value `key` merged over every interface in `ifaces`, in order.
pub fn all_merged_tagged_values_dict<'a, I>(ifaces: I, key: &str) -> TaggedDict
where
	I: IntoIterator<Item = &'a InterfaceRef>,
{
	let mut info = Map::new();
	for iface in ifaces {
		info.extend(merged_tagged_value_dict(iface, key));
	}
	info
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use serde_json::{Value, json};

	use super::*;

	fn dict(value: Value) -> TaggedDict {
		match value {
			Value::Object(map) => map,
			other => panic!("expected an object, got {other}"),
		}
	}

	#[test]
	fn test_no_tagged_values() {
		let ifaces = [Interface::new("IOne").into_ref(), Interface::new("ITwo").into_ref()];
		assert!(all_merged_tagged_values_dict(&ifaces, "foo").is_empty());
	}

	#[test]
	fn test_later_interfaces_override() {
		let one = Interface::new("IOne")
			.with_tagged_value("foo", dict(json!({"a": 10})))
			.with_tagged_value("bar", dict(json!({"a": 11})))
			.into_ref();
		let two = Interface::new("ITwo").into_ref();
		assert_eq!(
			all_merged_tagged_values_dict([&one, &two], "foo"),
			dict(json!({"a": 10}))
		);

		let two = Interface::new("ITwo")
			.with_tagged_value("foo", dict(json!({"a": 12})))
			.into_ref();
		assert_eq!(
			all_merged_tagged_values_dict([&one, &two], "foo"),
			dict(json!({"a": 12}))
		);

		let two = Interface::new("ITwo")
			.with_tagged_value("foo", dict(json!({"a": 13, "b": 14})))
			.into_ref();
		assert_eq!(
			all_merged_tagged_values_dict([&one, &two], "foo"),
			dict(json!({"a": 13, "b": 14}))
		);
	}

	#[test]
	fn test_derived_interface_overrides_base() {
		let base = Interface::new("IBase")
			.with_tagged_value("widgets", dict(json!({"title": "text", "body": "rich"})))
			.into_ref();
		let derived = Interface::new("IDerived")
			.with_base(base)
			.with_tagged_value("widgets", dict(json!({"body": "plain"})));

		assert_eq!(
			merged_tagged_value_dict(&derived, "widgets"),
			dict(json!({"title": "text", "body": "plain"}))
		);
	}

	#[test]
	fn test_shared_base_does_not_override_extending_interface() {
		let root = Interface::new("IRoot")
			.with_tagged_value("widgets", dict(json!({"body": "root", "title": "root"})))
			.into_ref();
		let left = Interface::new("ILeft").with_base(root.clone()).into_ref();
		let right = Interface::new("IRight")
			.with_base(root)
			.with_tagged_value("widgets", dict(json!({"body": "right"})))
			.into_ref();
		let leaf = Interface::new("ILeaf").with_base(left).with_base(right);

		assert_eq!(
			merged_tagged_value_dict(&leaf, "widgets"),
			dict(json!({"body": "right", "title": "root"}))
		);
	}
}
