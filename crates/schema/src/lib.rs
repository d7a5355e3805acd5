//! Schema resolution for through-the-web content types.
//!
//! A content type is a [`TypeDescriptor`](strata_components::TypeDescriptor)
//! carrying a primary schema and a list of behaviors. This crate answers
//! "which schemata are in effect" for a type or an instance, fast and never
//! stale:
//!
//! ```text
//! schemata_for_instance / schemata_for_type     ← facade, lazy sequences
//!     │
//! SchemaCache                                   ← mtime-stamped entries, one lock
//!     │
//! ComponentRegistry / TypeDescriptor / NameResolver
//! ```
//!
//! Generated schemata are named with [`name::SchemaNameEncoder`]; type edits
//! reach the cache through [`SchemaInvalidated`] events or descriptor mtimes.

/// Type-level behavior assignability.
pub mod assignable;
/// The schema cache and the process-wide instance.
pub mod cache;
/// Cache configuration.
pub mod config;
/// Error types.
pub mod error;
/// Schema invalidation events.
pub mod event;
/// Flat names for generated schemata.
pub mod name;
/// Lazy schema sequences for types and instances.
pub mod schemata;
/// Tagged-value merging.
pub mod tagged;

pub use assignable::TypeBehaviorAssignable;
pub use cache::{CacheEntry, CacheStats, SchemaCache, TypeRef, install, schema_cache};
pub use config::SchemaCacheConfig;
pub use error::SchemaError;
pub use event::{SchemaInvalidated, invalidate_schema};
pub use name::{
	SchemaName, SchemaNameEncoder, portal_type_to_schema_name, schema_name_to_portal_type, split_schema_name,
};
pub use schemata::{AdditionalSchemata, Schemata, additional_schemata, schemata_for_instance, schemata_for_type};
pub use tagged::{all_merged_tagged_values_dict, merged_tagged_value_dict};
