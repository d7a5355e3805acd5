use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};

/// Shared handle to an [`Interface`].
pub type InterfaceRef = Arc<Interface>;

/// Dictionary stored under a tagged-value key.
pub type TaggedDict = Map<String, Value>;

/// A named schema or marker interface.
///
/// Schemata carry field names; markers usually carry none. Both may extend
/// base interfaces and carry tagged values (form hints, fieldsets, and so on)
/// which [`resolution_order`](Self::resolution_order) exposes in lookup order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Interface {
	name: String,
	fields: Vec<String>,
	bases: Vec<InterfaceRef>,
	tagged: BTreeMap<String, TaggedDict>,
}

impl Interface {
	/// Creates an interface with the given dotted name and nothing else.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	pub fn with_field(mut self, field: impl Into<String>) -> Self {
		self.fields.push(field.into());
		self
	}

	pub fn with_fields<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.fields.extend(fields.into_iter().map(Into::into));
		self
	}

	pub fn with_base(mut self, base: InterfaceRef) -> Self {
		self.bases.push(base);
		self
	}

	/// Stores `dict` under `key`, replacing any previous value.
	pub fn with_tagged_value(mut self, key: impl Into<String>, dict: TaggedDict) -> Self {
		self.tagged.insert(key.into(), dict);
		self
	}

	pub fn into_ref(self) -> InterfaceRef {
		Arc::new(self)
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Field names declared directly on this interface.
	pub fn fields(&self) -> &[String] {
		&self.fields
	}

	pub fn bases(&self) -> &[InterfaceRef] {
		&self.bases
	}

	/// Tagged value declared directly on this interface, ignoring bases.
	pub fn tagged_value(&self, key: &str) -> Option<&TaggedDict> {
		self.tagged.get(key)
	}

	/// This interface followed by its bases, depth first.
	///
	/// A base reached along several paths is listed at its last occurrence,
	/// so it always follows every interface extending it.
	pub fn resolution_order(&self) -> Vec<&Interface> {
		let mut walk: Vec<&Interface> = Vec::new();
		let mut stack = vec![self];
		while let Some(iface) = stack.pop() {
			walk.push(iface);
			stack.extend(iface.bases.iter().rev().map(|base| base.as_ref()));
		}

		let mut order: Vec<&Interface> = Vec::with_capacity(walk.len());
		for (i, iface) in walk.iter().enumerate() {
			if !walk[i + 1..].iter().any(|later| later.name == iface.name) {
				order.push(*iface);
			}
		}
		order
	}

	/// True if `other` is this interface or one of its (transitive) bases.
	pub fn is_or_extends(&self, other: &Interface) -> bool {
		self.resolution_order()
			.iter()
			.any(|iface| iface.name == other.name)
	}
}

impl std::fmt::Display for Interface {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "<Interface {}>", self.name)
	}
}
