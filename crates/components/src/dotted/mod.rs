//! Dotted-name resolution.
//!
//! [`DottedNames`] memoizes successful resolutions for the lifetime of the
//! memo, which for the installed schema cache is the lifetime of the process.
//! Bindings are assumed immutable once resolved; rebinding a name at runtime
//! is not observed. Failures are never memoized.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap as HashMap;

use crate::error::ResolveError;
use crate::interface::InterfaceRef;


/// Resolves a fully qualified dotted name to the interface it names.
pub trait NameResolver: Send + Sync {
	fn resolve(&self, dotted: &str) -> Result<InterfaceRef, ResolveError>;
}

/// Memoizing front for a [`NameResolver`].
pub struct DottedNames {
	resolver: Arc<dyn NameResolver>,
	memo: RwLock<HashMap<Box<str>, InterfaceRef>>,
}

impl DottedNames {
	pub fn new(resolver: Arc<dyn NameResolver>) -> Self {
		Self {
			resolver,
			memo: RwLock::new(HashMap::default()),
		}
	}

	pub fn resolve(&self, dotted: &str) -> Result<InterfaceRef, ResolveError> {
		if let Some(hit) = self.memo.read().get(dotted) {
			return Ok(hit.clone());
		}

		let resolved = self.resolver.resolve(dotted)?;
		Ok(self
			.memo
			.write()
			.entry(Box::from(dotted))
			.or_insert(resolved)
			.clone())
	}

	/// Number of memoized bindings.
	pub fn len(&self) -> usize {
		self.memo.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.memo.read().is_empty()
	}
}

impl Default for DottedNames {
	fn default() -> Self {
		Self::new(Arc::new(MemoryResolver::new()))
	}
}

/// [`NameResolver`] over an explicit table of interfaces keyed by name.
#[derive(Default)]
pub struct MemoryResolver {
	by_name: RwLock<HashMap<Box<str>, InterfaceRef>>,
}

impl MemoryResolver {
	pub fn new() -> Self {
		Self::default()
	}

	/// Binds `interface` under its own name.
	pub fn insert(&self, interface: InterfaceRef) {
		self.by_name
			.write()
			.insert(Box::from(interface.name()), interface);
	}

	pub fn remove(&self, dotted: &str) -> Option<InterfaceRef> {
		self.by_name.write().remove(dotted)
	}
}

impl NameResolver for MemoryResolver {
	fn resolve(&self, dotted: &str) -> Result<InterfaceRef, ResolveError> {
		if dotted.is_empty() {
			return Err(ResolveError::Empty);
		}
		self.by_name
			.read()
			.get(dotted)
			.cloned()
			.ok_or_else(|| ResolveError::NotFound(dotted.to_owned()))
	}
}
