//! Flat, reversible names for generated schemata.
//!
//! A generated schema is identified by `prefix · portal type · suffix`. The
//! components are joined into one identifier safe for use as a registry key:
//! space, dot, hyphen and slash become `_1_` .. `_4_`, a literal underscore
//! becomes `__`, and components are separated by `_0_`.
//!
//! Decoding walks the name codeword by codeword instead of replacing
//! substrings, so a token can never be recognized across the boundary of two
//! adjacent codewords (`".1-"` encodes to `_2_1_3_`, which contains `_1_`).
//! A lone underscore that starts no codeword is kept verbatim, so names
//! written without underscore escaping still decode.

use std::fmt;
use std::str::FromStr;

use crate::error::SchemaError;

#[cfg(test)]
mod tests;

/// Prefix used when a schema name is built without one.
pub const DEFAULT_SCHEMA_PREFIX: &str = "plone";

/// Component separator.
pub const SEPARATOR: &str = "_0_";

const ESCAPE: char = '_';
const ESCAPED_ESCAPE: &str = "__";

/// Substitutions for reserved characters, applied in this order.
const RESERVED: [(char, &str); 4] = [(' ', "_1_"), ('.', "_2_"), ('-', "_3_"), ('/', "_4_")];

/// Encoder for flat schema names.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaNameEncoder;

impl SchemaNameEncoder {
	pub fn encode(&self, s: &str) -> String {
		let mut out = String::with_capacity(s.len());
		for ch in s.chars() {
			if ch == ESCAPE {
				out.push_str(ESCAPED_ESCAPE);
				continue;
			}
			match RESERVED.iter().find(|(reserved, _)| *reserved == ch) {
				Some((_, token)) => out.push_str(token),
				None => out.push(ch),
			}
		}
		out
	}

	pub fn decode(&self, s: &str) -> String {
		let mut out = String::with_capacity(s.len());
		for word in Codewords::new(s) {
			match word {
				Codeword::Char(ch) => out.push(ch),
				Codeword::Separator => out.push_str(SEPARATOR),
			}
		}
		out
	}

	/// Encodes each non-empty part and joins them with [`SEPARATOR`].
	pub fn join<I, S>(&self, parts: I) -> String
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut out = String::new();
		for part in parts {
			let part = part.as_ref();
			if part.is_empty() {
				continue;
			}
			if !out.is_empty() {
				out.push_str(SEPARATOR);
			}
			out.push_str(&self.encode(part));
		}
		out
	}

	/// Splits on [`SEPARATOR`] and decodes each piece.
	pub fn split(&self, s: &str) -> Vec<String> {
		let mut parts = vec![String::new()];
		for word in Codewords::new(s) {
			match word {
				Codeword::Char(ch) => {
					if let Some(last) = parts.last_mut() {
						last.push(ch);
					}
				}
				Codeword::Separator => parts.push(String::new()),
			}
		}
		parts
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Codeword {
	Char(char),
	Separator,
}

struct Codewords<'a> {
	rest: &'a str,
}

impl<'a> Codewords<'a> {
	fn new(s: &'a str) -> Self {
		Self { rest: s }
	}
}

impl Iterator for Codewords<'_> {
	type Item = Codeword;

	fn next(&mut self) -> Option<Codeword> {
		let mut chars = self.rest.chars();
		let ch = chars.next()?;
		if ch == ESCAPE {
			if let Some(rest) = self.rest.strip_prefix(ESCAPED_ESCAPE) {
				self.rest = rest;
				return Some(Codeword::Char(ESCAPE));
			}
			if let Some(rest) = self.rest.strip_prefix(SEPARATOR) {
				self.rest = rest;
				return Some(Codeword::Separator);
			}
			for (reserved, token) in RESERVED {
				if let Some(rest) = self.rest.strip_prefix(token) {
					self.rest = rest;
					return Some(Codeword::Char(reserved));
				}
			}
		}
		self.rest = chars.as_str();
		Some(Codeword::Char(ch))
	}
}

/// A parsed schema name.
///
/// `prefix` and `portal_type` must be non-empty for the name to survive a
/// round trip: [`SchemaNameEncoder::join`] drops empty components. An empty
/// `schema` denotes the type's default schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaName {
	pub prefix: String,
	pub portal_type: String,
	pub schema: String,
}

impl fmt::Display for SchemaName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = SchemaNameEncoder.join([&self.prefix, &self.portal_type, &self.schema]);
		f.write_str(&name)
	}
}

impl FromStr for SchemaName {
	type Err = SchemaError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		split_schema_name(s)
	}
}

/// Parses a flat schema name into prefix, portal type and schema suffix.
pub fn split_schema_name(name: &str) -> Result<SchemaName, SchemaError> {
	let mut items = SchemaNameEncoder.split(name).into_iter();
	match (items.next(), items.next(), items.next(), items.len()) {
		(Some(prefix), Some(portal_type), schema, 0) => Ok(SchemaName {
			prefix,
			portal_type,
			schema: schema.unwrap_or_default(),
		}),
		(first, second, third, rest) => {
			let parts = [first, second, third].iter().flatten().count() + rest;
			Err(SchemaError::InvalidName {
				name: name.to_owned(),
				parts,
			})
		}
	}
}

/// Returns the portal-type component of a flat schema name.
pub fn schema_name_to_portal_type(name: &str) -> Result<String, SchemaError> {
	split_schema_name(name).map(|parsed| parsed.portal_type)
}

/// Builds the flat name of a generated schema for `portal_type`.
///
/// An empty or absent `prefix` falls back to [`DEFAULT_SCHEMA_PREFIX`].
pub fn portal_type_to_schema_name(portal_type: &str, schema: &str, prefix: Option<&str>) -> String {
	let prefix = prefix
		.filter(|p| !p.is_empty())
		.unwrap_or(DEFAULT_SCHEMA_PREFIX);
	SchemaName {
		prefix: prefix.to_owned(),
		portal_type: portal_type.to_owned(),
		schema: schema.to_owned(),
	}
	.to_string()
}
