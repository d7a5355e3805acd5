use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Schema cache configuration.
///
/// Loaded from the `[schema_cache]` table of a TOML document:
///
/// ```toml
/// [schema_cache]
/// cache_enabled = true
/// behavior_fallback = false
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaCacheConfig {
	/// Serve lookups from the cache while the descriptor mtime is unchanged.
	/// When false, every lookup recomputes.
	pub cache_enabled: bool,
	/// Resolve behavior names with no registration as dotted names of their
	/// schema (deprecated spelling of behavior lists).
	pub behavior_fallback: bool,
}

impl Default for SchemaCacheConfig {
	fn default() -> Self {
		Self {
			cache_enabled: true,
			behavior_fallback: true,
		}
	}
}

#[derive(Deserialize)]
struct ConfigDocument {
	#[serde(default)]
	schema_cache: SchemaCacheConfig,
}

impl SchemaCacheConfig {
	/// Configuration with caching switched off.
	pub fn uncached() -> Self {
		Self {
			cache_enabled: false,
			..Self::default()
		}
	}

	/// Parses the `[schema_cache]` table of a TOML document.
	///
	/// A document without that table yields the defaults; other tables are
	/// ignored.
	pub fn from_toml_str(source: &str) -> Result<Self, SchemaError> {
		toml::from_str::<ConfigDocument>(source)
			.map(|doc| doc.schema_cache)
			.map_err(|e| SchemaError::Config(e.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = SchemaCacheConfig::default();
		assert!(config.cache_enabled);
		assert!(config.behavior_fallback);
		assert!(!SchemaCacheConfig::uncached().cache_enabled);
	}

	#[test]
	fn test_from_toml_partial_table() {
		let config = SchemaCacheConfig::from_toml_str(
			r#"
			[server]
			port = 8080

			[schema_cache]
			behavior_fallback = false
			"#,
		)
		.unwrap();
		assert_eq!(
			config,
			SchemaCacheConfig {
				cache_enabled: true,
				behavior_fallback: false,
			}
		);
	}

	#[test]
	fn test_from_toml_missing_table() {
		assert_eq!(SchemaCacheConfig::from_toml_str("").unwrap(), SchemaCacheConfig::default());
	}

	#[test]
	fn test_from_toml_rejects_unknown_key() {
		let err = SchemaCacheConfig::from_toml_str("[schema_cache]\ncache_enable = false\n").unwrap_err();
		assert!(matches!(err, SchemaError::Config(_)));
	}
}
