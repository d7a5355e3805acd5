//! Schema cache keyed by type descriptor.
//!
//! Every value derived from a descriptor (primary schema, behavior
//! registrations, markers, combined schema list, mtime) is stored with the
//! descriptor mtime it was computed under and served only while that mtime is
//! unchanged. Invalidation drops a descriptor's entries outright.
//!
//! # Concurrency
//!
//! One [`Mutex`] guards all entries and counters, held for the whole duration
//! of each public operation, recomputation included. Nested lookups
//! (`schema_interfaces` reading `get`) run against the already locked state.
//! With a single installed cache per process this is the process-wide lock.

mod slots;

use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use rustc_hash::FxHashMap as HashMap;
use strata_components::{
	BehaviorRef, BehaviorRegistration, ComponentRegistry, DescriptorRef, DottedNames, InterfaceRef, Mtime,
	NameResolver,
};
use tracing::{debug, error, trace, warn};

pub use self::slots::CacheEntry;
use self::slots::{Slot, Slots, Stamped};
use crate::config::SchemaCacheConfig;

/// A type descriptor, or the identifier to resolve one through the registry.
#[derive(Debug, Clone, Copy)]
pub enum TypeRef<'a> {
	Id(&'a str),
	Descriptor(&'a DescriptorRef),
}

impl<'a> From<&'a str> for TypeRef<'a> {
	fn from(id: &'a str) -> Self {
		Self::Id(id)
	}
}

impl<'a> From<&'a String> for TypeRef<'a> {
	fn from(id: &'a String) -> Self {
		Self::Id(id)
	}
}

impl<'a> From<&'a DescriptorRef> for TypeRef<'a> {
	fn from(descriptor: &'a DescriptorRef) -> Self {
		Self::Descriptor(descriptor)
	}
}

/// Counters exposed for observability. None of them affects correctness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
	pub hits: u64,
	pub misses: u64,
	pub invalidations: u64,
}

#[derive(Default)]
struct CacheState {
	entries: HashMap<Box<str>, Slots>,
	stats: CacheStats,
}

impl CacheState {
	fn slots_for(&mut self, descriptor: &DescriptorRef) -> &mut Slots {
		let slots = self
			.entries
			.entry(Box::from(descriptor.id()))
			.or_insert_with(|| Slots::new(descriptor));
		if !slots.is_owned_by(descriptor) {
			*slots = Slots::new(descriptor);
		}
		slots
	}
}

/// Cache of schema information derived from type descriptors.
///
/// Prefer asking the descriptor directly unless lookups are hot:
///
/// ```rust,ignore
/// let schema = registry.type_descriptor("page").and_then(|d| d.lookup_schema().ok());
/// ```
///
/// The cache pays off when the same types are resolved on every request:
///
/// ```rust,ignore
/// let schema = strata_schema::schema_cache().and_then(|cache| cache.get("page"));
/// ```
///
/// # Re-entrancy
///
/// The cache lock is not reentrant and stays held while collaborators run:
/// [`TypeDescriptor::lookup_schema`], [`TypeDescriptor::activate`],
/// [`ComponentRegistry::behavior`], [`ComponentRegistry::type_descriptors`]
/// and [`NameResolver::resolve`]. None of them may call back into the same
/// cache (including the installed one); doing so deadlocks.
///
/// [`TypeDescriptor::lookup_schema`]: strata_components::TypeDescriptor::lookup_schema
/// [`TypeDescriptor::activate`]: strata_components::TypeDescriptor::activate
pub struct SchemaCache {
	registry: Arc<dyn ComponentRegistry>,
	dotted: DottedNames,
	config: SchemaCacheConfig,
	state: Mutex<CacheState>,
}

impl SchemaCache {
	pub fn new(registry: Arc<dyn ComponentRegistry>) -> Self {
		Self {
			registry,
			dotted: DottedNames::default(),
			config: SchemaCacheConfig::default(),
			state: Mutex::new(CacheState::default()),
		}
	}

	pub fn with_config(mut self, config: SchemaCacheConfig) -> Self {
		self.config = config;
		self
	}

	/// Resolver used for behavior names that have no registration.
	pub fn with_resolver(mut self, resolver: Arc<dyn NameResolver>) -> Self {
		self.dotted = DottedNames::new(resolver);
		self
	}

	pub fn registry(&self) -> &Arc<dyn ComponentRegistry> {
		&self.registry
	}

	pub fn config(&self) -> SchemaCacheConfig {
		self.config
	}

	pub fn cache_enabled(&self) -> bool {
		self.config.cache_enabled
	}

	/// Primary schema of a type.
	///
	/// A failing schema lookup is logged at debug level and reported as no
	/// schema.
	pub fn get<'a>(&self, ty: impl Into<TypeRef<'a>>) -> Option<InterfaceRef> {
		let mut state = self.state.lock();
		let descriptor = self.resolve(ty.into());
		self.get_locked(&mut state, descriptor.as_ref())
	}

	/// Behavior registrations of a type, in declaration order.
	///
	/// Names without a registration are retried as dotted names of a schema
	/// (when [`SchemaCacheConfig::behavior_fallback`] is set) and skipped if
	/// that fails too.
	pub fn behavior_registrations<'a>(&self, ty: impl Into<TypeRef<'a>>) -> Arc<[BehaviorRef]> {
		let mut state = self.state.lock();
		let descriptor = self.resolve(ty.into());
		self.behavior_registrations_locked(&mut state, descriptor.as_ref())
	}

	/// Marker interfaces of a type's behaviors.
	pub fn subtypes<'a>(&self, ty: impl Into<TypeRef<'a>>) -> Arc<[InterfaceRef]> {
		let mut state = self.state.lock();
		let descriptor = self.resolve(ty.into());
		self.cached::<slots::Subtypes>(&mut state, descriptor.as_ref(), |cache, state, descriptor| {
			cache.behavior_registrations_locked(state, Some(descriptor))
				.iter()
				.filter_map(|reg| reg.marker.clone())
				.collect()
		})
	}

	/// Form schemata of a type's behaviors.
	pub fn behavior_schema_interfaces<'a>(&self, ty: impl Into<TypeRef<'a>>) -> Arc<[InterfaceRef]> {
		let mut state = self.state.lock();
		let descriptor = self.resolve(ty.into());
		self.behavior_schema_interfaces_locked(&mut state, descriptor.as_ref())
	}

	/// Primary schema (if any) followed by the behavior schemata.
	pub fn schema_interfaces<'a>(&self, ty: impl Into<TypeRef<'a>>) -> Arc<[InterfaceRef]> {
		let mut state = self.state.lock();
		let descriptor = self.resolve(ty.into());
		self.cached::<slots::SchemaInterfaces>(&mut state, descriptor.as_ref(), |cache, state, descriptor| {
			let main = cache.get_locked(state, Some(descriptor));
			let behaviors = cache.behavior_schema_interfaces_locked(state, Some(descriptor));
			main.into_iter().chain(behaviors.iter().cloned()).collect()
		})
	}

	/// Current mtime of a type's descriptor.
	pub fn modified<'a>(&self, ty: impl Into<TypeRef<'a>>) -> Option<Mtime> {
		let mut state = self.state.lock();
		let descriptor = self.resolve(ty.into());
		self.cached::<slots::Modified>(&mut state, descriptor.as_ref(), |_, _, descriptor| descriptor.modified())
	}

	/// Drops every cached value of a type.
	///
	/// Returns false if the type does not resolve to a descriptor.
	pub fn invalidate<'a>(&self, ty: impl Into<TypeRef<'a>>) -> bool {
		let mut state = self.state.lock();
		match self.resolve(ty.into()) {
			Some(descriptor) => {
				Self::invalidate_locked(&mut state, &descriptor);
				true
			}
			None => false,
		}
	}

	/// Invalidates every registered type and forgets types no longer
	/// registered.
	pub fn clear(&self) {
		let mut state = self.state.lock();
		let descriptors = self.registry.type_descriptors();
		for descriptor in &descriptors {
			Self::invalidate_locked(&mut state, descriptor);
		}
		let orphaned = state.entries.len();
		state.entries.clear();
		debug!(types = descriptors.len(), orphaned, "schema cache cleared");
	}

	/// Number of invalidations performed so far.
	pub fn invalidations(&self) -> u64 {
		self.state.lock().stats.invalidations
	}

	pub fn stats(&self) -> CacheStats {
		self.state.lock().stats
	}

	fn resolve(&self, ty: TypeRef<'_>) -> Option<DescriptorRef> {
		match ty {
			TypeRef::Descriptor(descriptor) => Some(descriptor.clone()),
			TypeRef::Id(id) => self.registry.type_descriptor(id),
		}
	}

	fn invalidate_locked(state: &mut CacheState, descriptor: &DescriptorRef) {
		descriptor.activate();
		state.entries.remove(descriptor.id());
		state.stats.invalidations += 1;
		debug!(portal_type = descriptor.id(), "schema cache invalidated");
	}

	/// Serves slot `S` of `descriptor` if its stamp matches the live mtime,
	/// otherwise recomputes and stores it.
	///
	/// An unresolved descriptor yields the empty value and is never cached.
	fn cached<S: Slot>(
		&self,
		state: &mut CacheState,
		descriptor: Option<&DescriptorRef>,
		compute: impl FnOnce(&Self, &mut CacheState, &DescriptorRef) -> S::Value,
	) -> S::Value {
		let Some(descriptor) = descriptor else {
			return S::Value::default();
		};
		if !self.config.cache_enabled {
			state.stats.misses += 1;
			return compute(self, state, descriptor);
		}

		let mtime = descriptor.modified();
		if let Some(stamped) = S::select(state.slots_for(descriptor))
			&& stamped.mtime == mtime
		{
			let value = stamped.value.clone();
			state.stats.hits += 1;
			trace!(portal_type = descriptor.id(), entry = %S::ENTRY, "schema cache hit");
			return value;
		}

		state.stats.misses += 1;
		trace!(portal_type = descriptor.id(), entry = %S::ENTRY, "schema cache miss");
		let value = compute(self, state, descriptor);
		*S::select(state.slots_for(descriptor)) = Some(Stamped {
			mtime,
			value: value.clone(),
		});
		value
	}

	fn get_locked(&self, state: &mut CacheState, descriptor: Option<&DescriptorRef>) -> Option<InterfaceRef> {
		self.cached::<slots::Get>(state, descriptor, |_, _, descriptor| match descriptor.lookup_schema() {
			Ok(schema) => Some(schema),
			Err(err) => {
				debug!(portal_type = descriptor.id(), %err, "primary schema lookup failed");
				None
			}
		})
	}

	fn behavior_registrations_locked(
		&self,
		state: &mut CacheState,
		descriptor: Option<&DescriptorRef>,
	) -> Arc<[BehaviorRef]> {
		self.cached::<slots::BehaviorRegistrations>(state, descriptor, |cache, _, descriptor| {
			descriptor
				.behaviors()
				.iter()
				.filter_map(|name| cache.behavior_registration(descriptor, name))
				.collect()
		})
	}

	fn behavior_schema_interfaces_locked(
		&self,
		state: &mut CacheState,
		descriptor: Option<&DescriptorRef>,
	) -> Arc<[InterfaceRef]> {
		self.cached::<slots::BehaviorSchemaInterfaces>(state, descriptor, |cache, state, descriptor| {
			cache.behavior_registrations_locked(state, Some(descriptor))
				.iter()
				.filter_map(|reg| reg.interface.clone())
				.collect()
		})
	}

	fn behavior_registration(&self, descriptor: &DescriptorRef, name: &str) -> Option<BehaviorRef> {
		if let Some(registration) = self.registry.behavior(name) {
			return Some(registration);
		}

		warn!(
			portal_type = descriptor.id(),
			behavior = name,
			fallback = self.config.behavior_fallback,
			"no behavior registration found"
		);
		if !self.config.behavior_fallback {
			return None;
		}

		match self.dotted.resolve(name) {
			Ok(schema) => Some(BehaviorRegistration::fallback(name, schema).into_ref()),
			Err(err) => {
				error!(portal_type = descriptor.id(), behavior = name, %err, "error resolving behavior");
				None
			}
		}
	}
}

static SCHEMA_CACHE: OnceLock<Arc<SchemaCache>> = OnceLock::new();

/// Installs the process-wide schema cache.
///
/// Only the first call succeeds; later calls hand their cache back.
pub fn install(cache: Arc<SchemaCache>) -> Result<(), Arc<SchemaCache>> {
	SCHEMA_CACHE.set(cache)
}

/// The process-wide schema cache, if one was installed.
pub fn schema_cache() -> Option<&'static Arc<SchemaCache>> {
	SCHEMA_CACHE.get()
}
