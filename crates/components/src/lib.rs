//! Collaborator contracts for content-type schema resolution.
//!
//! The schema layer never owns type definitions, behaviors or content. It
//! talks to them through the seams defined here:
//! - [`TypeDescriptor`]: one content-type definition with a persistence mtime
//! - [`BehaviorRegistration`]: a named capability contributing schemata
//! - [`ComponentRegistry`]: lookup of descriptors, behaviors and form adapters
//! - [`NameResolver`]: dotted-name resolution, memoized by [`DottedNames`]
//! - [`Content`] / [`BehaviorAssignable`]: per-instance behavior enumeration
//!
//! In-memory implementations ([`MemoryRegistry`], [`MemoryTypeDescriptor`],
//! [`MemoryResolver`], [`ContentItem`]) back tests and embedders that do not
//! bring their own substrate.

/// Behavior registrations.
pub mod behavior;
/// Content instances and per-instance behavior assignability.
pub mod content;
/// Type descriptors and persistence timestamps.
pub mod descriptor;
/// Dotted-name resolution with a process-lifetime memo.
pub mod dotted;
/// Error types shared by the collaborator seams.
pub mod error;
/// Schema and marker interfaces.
pub mod interface;
/// Component registry contract and snapshot-backed implementation.
pub mod registry;

pub use behavior::{BehaviorRef, BehaviorRegistration};
pub use content::{BehaviorAssignable, Content, ContentItem};
pub use descriptor::{DescriptorRef, MemoryTypeDescriptor, Mtime, TypeDescriptor};
pub use dotted::{DottedNames, MemoryResolver, NameResolver};
pub use error::{LookupError, ResolveError};
pub use interface::{Interface, InterfaceRef, TaggedDict};
pub use registry::{ComponentRegistry, MemoryRegistry};
