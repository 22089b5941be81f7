//! The contract a surface-syntax reader uses to drive a [`World`]/[`Model`] pair.
//!
//! A reader (Turtle, TriG, N-Quads, ...) is an external collaborator: this crate does
//! not parse RDF syntax. What it does own is the policy for resolving a prefixed name
//! (`ex:Alice`) or a relative IRI reference against the base URI and prefix bindings a
//! reader accumulates while it scans a document, since that policy determines which
//! [`NamedNode`] ends up interned and must therefore live on the [`World`] side of the
//! boundary, not the reader's.
//!
//! A reader is expected to call [`PrefixEnvironment::set_base_uri`] and
//! [`PrefixEnvironment::set_prefix`] as it encounters `@base`/`@prefix` (or `BASE`/
//! `PREFIX`) directives, then [`World::expand_prefixed_name`] per qualified name it
//! needs turned into a [`NamedNode`], before finally building a [`Quad`](crate::Quad)
//! and calling [`Model::add`](crate::Model::add).

use crate::named_node::NamedNode;
use crate::world::{NodeError, World};
use oxiri::{Iri, IriParseError};
use std::cell::RefCell;
use std::collections::HashMap;

/// Accumulates the `@base`/`@prefix` bindings a reader observes while scanning one
/// document, so that prefixed names and relative references can be resolved to
/// absolute IRIs before being handed to [`World::new_uri`].
///
/// Bindings recorded here are never interned or stored by a [`World`]; only the
/// resolved, absolute IRI strings are.
#[derive(Debug, Default)]
pub struct PrefixEnvironment {
    base: RefCell<Option<String>>,
    prefixes: RefCell<HashMap<String, String>>,
}

/// Why [`PrefixEnvironment::resolve`] or [`World::expand_prefixed_name`] could not
/// produce an absolute IRI.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrefixResolutionError {
    #[error("prefix {0:?} is not bound")]
    UnboundPrefix(String),
    #[error("{0:?} is not a valid prefixed name (expected \"prefix:local\")")]
    NotPrefixedName(String),
}

impl PrefixEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `uri` as the base URI used to resolve relative references. Never
    /// validated or stored by a [`World`]; a reader remains the source of truth for
    /// its own base.
    pub fn set_base_uri(&self, uri: impl Into<String>) {
        *self.base.borrow_mut() = Some(uri.into());
    }

    pub fn base_uri(&self) -> Option<String> {
        self.base.borrow().clone()
    }

    /// Binds `name` (the part before `:` in a prefixed name, empty string for the
    /// default prefix) to `uri`.
    pub fn set_prefix(&self, name: impl Into<String>, uri: impl Into<String>) {
        self.prefixes.borrow_mut().insert(name.into(), uri.into());
    }

    /// Expands `prefixed` (`"name:local"`) into an absolute IRI string using this
    /// environment's bindings. Does not validate the result as an IRI; callers
    /// typically pass it straight to [`World::new_uri`], which does.
    pub fn resolve(&self, prefixed: &str) -> Result<String, PrefixResolutionError> {
        let (name, local) = prefixed
            .split_once(':')
            .ok_or_else(|| PrefixResolutionError::NotPrefixedName(prefixed.to_owned()))?;
        let namespace = self
            .prefixes
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| PrefixResolutionError::UnboundPrefix(name.to_owned()))?;
        Ok(format!("{namespace}{local}"))
    }

    /// Resolves `reference` against the recorded base URI, per RFC 3986. A reference
    /// that is already an absolute IRI is returned unchanged (modulo normalization).
    pub fn resolve_reference(&self, reference: &str) -> Result<String, IriParseError> {
        match &*self.base.borrow() {
            Some(base) => Ok(Iri::parse(base.as_str())?.resolve(reference)?.into_inner()),
            None => {
                Iri::parse(reference)?;
                Ok(reference.to_owned())
            }
        }
    }
}

impl World {
    /// Expands `prefixed` (`"name:local"`) using `env`'s bindings and interns the
    /// result, the policy §4.1 assigns to the `World` rather than to a reader: a
    /// reader only ever sees the canonical [`NamedNode`] it gets back, never the
    /// intermediate string.
    pub fn expand_prefixed_name(
        &self,
        env: &PrefixEnvironment,
        prefixed: &str,
    ) -> Result<NamedNode, ExpandError> {
        let iri = env.resolve(prefixed)?;
        Ok(self.new_uri(&iri)?)
    }

    /// Resolves `reference` against `env`'s base URI and interns the result.
    pub fn new_uri_relative(
        &self,
        env: &PrefixEnvironment,
        reference: &str,
    ) -> Result<NamedNode, NodeError> {
        let absolute = env
            .resolve_reference(reference)
            .map_err(NodeError::Iri)?;
        self.new_uri(&absolute)
    }
}

/// Failure of [`World::expand_prefixed_name`]: either the prefixed name could not be
/// resolved against `env`, or the resulting string is not a valid absolute IRI.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpandError {
    #[error(transparent)]
    Prefix(#[from] PrefixResolutionError),
    #[error(transparent)]
    Node(#[from] NodeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_bound_prefix() {
        let env = PrefixEnvironment::new();
        env.set_prefix("ex", "http://example.com/");
        assert_eq!(env.resolve("ex:Alice").unwrap(), "http://example.com/Alice");
    }

    #[test]
    fn rejects_unbound_prefix() {
        let env = PrefixEnvironment::new();
        assert_eq!(
            env.resolve("ex:Alice").unwrap_err(),
            PrefixResolutionError::UnboundPrefix("ex".to_owned())
        );
    }

    #[test]
    fn expand_prefixed_name_interns_through_world() {
        let world = World::new();
        let env = PrefixEnvironment::new();
        env.set_prefix("ex", "http://example.com/");
        let a = world.expand_prefixed_name(&env, "ex:Alice").unwrap();
        let b = world.new_uri("http://example.com/Alice").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn resolve_reference_uses_base() {
        let env = PrefixEnvironment::new();
        env.set_base_uri("http://example.com/base/");
        assert_eq!(
            env.resolve_reference("foo").unwrap(),
            "http://example.com/base/foo"
        );
    }
}
