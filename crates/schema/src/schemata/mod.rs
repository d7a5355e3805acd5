//! Effective schemata of a type or a content instance.
//!
//! The sequence is the primary schema first, then the form-field schema of
//! every behavior in effect. Behaviors come from the instance's
//! [`BehaviorAssignable`] when it has one, and from the type otherwise.
//! Sequences are lazy: nothing is looked up before the first `next()`, and
//! each behavior schema is adapted only when reached. Cloning an unstarted
//! sequence yields an independent one.

use std::sync::Arc;

use strata_components::{BehaviorAssignable, Content, InterfaceRef};
use tracing::debug;

use crate::cache::SchemaCache;
use crate::error::SchemaError;


/// Where additional schemata come from.
#[derive(Clone)]
enum Source {
	Assignable(Arc<dyn BehaviorAssignable>),
	Type(String),
}

impl Source {
	fn load(self, cache: &SchemaCache) -> std::vec::IntoIter<InterfaceRef> {
		match self {
			Self::Assignable(assignable) => assignable
				.enumerate_behaviors()
				.into_iter()
				.filter_map(|reg| reg.interface.clone())
				.collect::<Vec<_>>()
				.into_iter(),
			Self::Type(portal_type) => cache
				.behavior_schema_interfaces(portal_type.as_str())
				.to_vec()
				.into_iter(),
		}
	}
}

#[derive(Clone)]
enum Stage {
	Pending(Source),
	Running(std::vec::IntoIter<InterfaceRef>),
	Done,
}

/// Lazy sequence of behavior form schemata.
#[derive(Clone)]
pub struct AdditionalSchemata<'a> {
	cache: &'a SchemaCache,
	stage: Stage,
}

impl<'a> AdditionalSchemata<'a> {
	fn new(cache: &'a SchemaCache, source: Source) -> Self {
		Self {
			cache,
			stage: Stage::Pending(source),
		}
	}

	fn start(&mut self) {
		self.stage = match std::mem::replace(&mut self.stage, Stage::Done) {
			Stage::Pending(source) => Stage::Running(source.load(self.cache)),
			other => other,
		};
	}
}

impl Iterator for AdditionalSchemata<'_> {
	type Item = InterfaceRef;

	fn next(&mut self) -> Option<InterfaceRef> {
		if matches!(self.stage, Stage::Pending(_)) {
			self.start();
		}
		let registry = self.cache.registry();
		let Stage::Running(schemata) = &mut self.stage else {
			return None;
		};
		schemata.find_map(|schema| registry.form_fields(&schema))
	}
}

/// Lazy sequence of a primary schema followed by additional schemata.
#[derive(Clone)]
pub struct Schemata<'a> {
	cache: &'a SchemaCache,
	primary: Option<String>,
	additional: AdditionalSchemata<'a>,
}

impl Iterator for Schemata<'_> {
	type Item = InterfaceRef;

	fn next(&mut self) -> Option<InterfaceRef> {
		if let Some(portal_type) = self.primary.take()
			&& let Some(main) = self.cache.get(portal_type.as_str())
		{
			return Some(main);
		}
		self.additional.next()
	}
}

/// Schemata of `portal_type`: its primary schema, then the form schemata of
/// the behaviors declared on the type.
pub fn schemata_for_type<'a>(cache: &'a SchemaCache, portal_type: &str) -> Schemata<'a> {
	Schemata {
		cache,
		primary: Some(portal_type.to_owned()),
		additional: AdditionalSchemata::new(cache, Source::Type(portal_type.to_owned())),
	}
}

/// Schemata of a content instance: the primary schema of its type, then the
/// form schemata of the behaviors enabled for this instance.
pub fn schemata_for_instance<'a>(cache: &'a SchemaCache, content: &dyn Content) -> Result<Schemata<'a>, SchemaError> {
	let portal_type = content.portal_type().ok_or(SchemaError::MissingPortalType)?;
	Ok(Schemata {
		cache,
		primary: Some(portal_type.to_owned()),
		additional: additional_schemata(cache, Some(content), None)?,
	})
}

/// Form schemata contributed by behaviors, for an instance or a type.
///
/// Edit views pass the context; add views, which have no instance yet, pass
/// the portal type. When both are given the context wins: its assignability
/// adapter if it has one, else its own portal type, and only if the context
/// has no portal type the explicit one.
pub fn additional_schemata<'a>(
	cache: &'a SchemaCache,
	context: Option<&dyn Content>,
	portal_type: Option<&str>,
) -> Result<AdditionalSchemata<'a>, SchemaError> {
	let source = match (context, portal_type) {
		(Some(content), explicit) => match content.behavior_assignable() {
			Some(assignable) => {
				debug!("behavior assignable found for context");
				Source::Assignable(assignable)
			}
			None => {
				let portal_type = content
					.portal_type()
					.or(explicit)
					.ok_or(SchemaError::MissingPortalType)?;
				debug!(portal_type, "no behavior assignable found; using type behaviors");
				Source::Type(portal_type.to_owned())
			}
		},
		(None, Some(portal_type)) => Source::Type(portal_type.to_owned()),
		(None, None) => return Err(SchemaError::MissingSource),
	};
	Ok(AdditionalSchemata::new(cache, source))
}
