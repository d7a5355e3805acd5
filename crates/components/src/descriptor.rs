use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use parking_lot::RwLock;

use crate::error::LookupError;
use crate::interface::InterfaceRef;

/// Persistence modification stamp of a type descriptor.
///
/// Stamps are opaque: consumers only compare them for equality. A changed
/// stamp means the descriptor was edited and every value derived from it is
/// stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mtime(pub u64);

impl Mtime {
	/// Returns a stamp strictly greater than every stamp issued before it in
	/// this process.
	pub fn next() -> Self {
		static CLOCK: AtomicU64 = AtomicU64::new(1);
		Self(CLOCK.fetch_add(1, Ordering::Relaxed))
	}

	#[inline]
	pub fn as_u64(self) -> u64 {
		self.0
	}
}

impl fmt::Display for Mtime {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "mtime:{}", self.0)
	}
}

/// Shared handle to a type descriptor owned by the component registry.
pub type DescriptorRef = Arc<dyn TypeDescriptor>;

/// One content-type definition.
///
/// Implementations are owned by the registry and typically backed by a
/// persistent object. Readers must treat everything except [`id`](Self::id)
/// as changing whenever [`modified`](Self::modified) changes.
pub trait TypeDescriptor: Send + Sync + fmt::Debug {
	/// Stable identifier (the portal type).
	fn id(&self) -> &str;

	/// Name of the factory used to construct content of this type.
	///
	/// Schema resolution never reads it; it is carried for the content layer.
	fn factory(&self) -> &str;

	/// Behavior names in declaration order.
	fn behaviors(&self) -> Vec<String>;

	/// Resolves the primary schema of this type.
	fn lookup_schema(&self) -> Result<InterfaceRef, LookupError>;

	/// Last-modified stamp, or `None` if the descriptor was never stored.
	fn modified(&self) -> Option<Mtime>;

	/// Ensures the descriptor state is loaded and current.
	fn activate(&self) {}
}

#[derive(Debug)]
struct DescriptorState {
	behaviors: Vec<String>,
	schema: Option<InterfaceRef>,
	mtime: Option<Mtime>,
}

/// In-memory [`TypeDescriptor`].
///
/// Every edit issues a fresh [`Mtime`], mirroring a committed transaction on
/// a persistent descriptor.
#[derive(Debug)]
pub struct MemoryTypeDescriptor {
	id: String,
	factory: String,
	state: RwLock<DescriptorState>,
	activations: AtomicUsize,
	lookups: AtomicUsize,
}

impl MemoryTypeDescriptor {
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			factory: String::new(),
			state: RwLock::new(DescriptorState {
				behaviors: Vec::new(),
				schema: None,
				mtime: Some(Mtime::next()),
			}),
			activations: AtomicUsize::new(0),
			lookups: AtomicUsize::new(0),
		}
	}

	pub fn with_factory(mut self, factory: impl Into<String>) -> Self {
		self.factory = factory.into();
		self
	}

	pub fn with_schema(self, schema: InterfaceRef) -> Self {
		self.state.write().schema = Some(schema);
		self
	}

	pub fn with_behaviors<I, S>(self, behaviors: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.state.write().behaviors = behaviors.into_iter().map(Into::into).collect();
		self
	}

	pub fn into_ref(self) -> DescriptorRef {
		Arc::new(self)
	}

	/// Replaces the primary schema and bumps the mtime.
	pub fn set_schema(&self, schema: Option<InterfaceRef>) {
		let mut state = self.state.write();
		state.schema = schema;
		state.mtime = Some(Mtime::next());
	}

	/// Replaces the behavior list and bumps the mtime.
	pub fn set_behaviors<I, S>(&self, behaviors: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut state = self.state.write();
		state.behaviors = behaviors.into_iter().map(Into::into).collect();
		state.mtime = Some(Mtime::next());
	}

	/// Bumps the mtime without changing content.
	pub fn touch(&self) {
		self.state.write().mtime = Some(Mtime::next());
	}

	/// Number of [`activate`](TypeDescriptor::activate) calls so far.
	pub fn activations(&self) -> usize {
		self.activations.load(Ordering::Relaxed)
	}

	/// Number of [`lookup_schema`](TypeDescriptor::lookup_schema) calls so far.
	pub fn lookups(&self) -> usize {
		self.lookups.load(Ordering::Relaxed)
	}
}

impl TypeDescriptor for MemoryTypeDescriptor {
	fn id(&self) -> &str {
		&self.id
	}

	fn factory(&self) -> &str {
		&self.factory
	}

	fn behaviors(&self) -> Vec<String> {
		self.state.read().behaviors.clone()
	}

	fn lookup_schema(&self) -> Result<InterfaceRef, LookupError> {
		self.lookups.fetch_add(1, Ordering::Relaxed);
		self.state
			.read()
			.schema
			.clone()
			.ok_or_else(|| LookupError::Value(format!("type {:?} has no schema", self.id)))
	}

	fn modified(&self) -> Option<Mtime> {
		self.state.read().mtime
	}

	fn activate(&self) {
		self.activations.fetch_add(1, Ordering::Relaxed);
	}
}
