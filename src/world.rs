use crate::blank_node::BlankNode;
use crate::error::{default_error_sink, CoreError, ErrorSink};
use crate::literal::{Literal, LiteralData, LiteralTag};
use crate::named_node::NamedNode;
use crate::node::Node;
use oxiri::{Iri, IriParseError};
use oxilangtag::{LanguageTag, LanguageTagParseError};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// Failure modes of [`World::new_uri`]/[`World::new_literal`] that the caller must handle,
/// as opposed to the soft [`CoreError`]s reported through the error sink.
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    #[error(transparent)]
    Iri(#[from] IriParseError),
    #[error(transparent)]
    LanguageTag(#[from] LanguageTagParseError),
}

/// The canonicalizing authority for every [`NamedNode`], [`BlankNode`] and [`Literal`]
/// used with a particular [`Model`](crate::Model).
///
/// A `World` owns a handful of interning tables, keyed by content rather than by
/// pointer, so that two calls with the same lexical form always return the same
/// allocation. Uniqueness is what lets [`Node`] comparisons reduce to pointer
/// comparisons everywhere else in this crate: the expensive content comparison happens
/// once, here, at creation time.
///
/// Like the rest of this crate, `World` is single-threaded: it stores its tables in
/// [`RefCell`]s, so the type is neither `Sync` nor (usefully) shareable across an
/// `Arc` boundary. Share one `World` across the `Model`s that need to compare nodes
/// with each other; unrelated stores should each get their own.
pub struct World {
    uris: RefCell<HashSet<Rc<str>>>,
    blanks: RefCell<HashSet<Rc<str>>>,
    languages: RefCell<HashSet<Rc<str>>>,
    literals: RefCell<HashSet<Rc<LiteralData>>>,
    error_sink: RefCell<ErrorSink>,
}

impl World {
    pub fn new() -> Self {
        Self {
            uris: RefCell::new(HashSet::new()),
            blanks: RefCell::new(HashSet::new()),
            languages: RefCell::new(HashSet::new()),
            literals: RefCell::new(HashSet::new()),
            error_sink: RefCell::new(default_error_sink()),
        }
    }

    /// Installs a callback invoked whenever this `World` detects a [`CoreError`].
    ///
    /// The default sink writes a one-line message to standard error; pass a no-op
    /// closure to silence it.
    pub fn set_error_sink(&self, sink: ErrorSink) {
        *self.error_sink.borrow_mut() = sink;
    }

    pub(crate) fn report(&self, error: CoreError) {
        (self.error_sink.borrow_mut())(&error);
    }

    /// Returns the canonical [`NamedNode`] for `iri`, interning it on first use.
    ///
    /// `iri` must be an absolute IRI; relative references are rejected the same way the
    /// reference store refuses to hold a "may not be null" precondition violation, except
    /// here it is a type-checked `Result` instead of a debug assertion.
    pub fn new_uri(&self, iri: &str) -> Result<NamedNode, NodeError> {
        Iri::parse(iri)?;
        let mut uris = self.uris.borrow_mut();
        if let Some(existing) = uris.get(iri) {
            return Ok(NamedNode::from_rc(existing.clone()));
        }
        let rc: Rc<str> = Rc::from(iri);
        uris.insert(rc.clone());
        Ok(NamedNode::from_rc(rc))
    }

    /// Returns the canonical [`BlankNode`] for `id`, interning it on first use.
    pub fn new_blank(&self, id: &str) -> BlankNode {
        let mut blanks = self.blanks.borrow_mut();
        if let Some(existing) = blanks.get(id) {
            return BlankNode::from_rc(existing.clone());
        }
        let rc: Rc<str> = Rc::from(id);
        blanks.insert(rc.clone());
        BlankNode::from_rc(rc)
    }

    /// Mints a blank node with a fresh, randomly chosen identifier.
    ///
    /// The id is a random `u128` rendered as lowercase hex, retried until it both
    /// starts with `a`..`f` (so it stays valid even embedded in RDF/XML, which forbids
    /// a blank node id starting with a digit) and does not already name a blank node
    /// this `World` has interned.
    pub fn new_blank_id(&self) -> BlankNode {
        loop {
            let id: u128 = rand::random();
            let label = format!("{id:x}");
            if !matches!(label.as_bytes().first(), Some(b'a'..=b'f')) {
                continue;
            }
            if !self.blanks.borrow().contains(label.as_str()) {
                return self.new_blank(&label);
            }
        }
    }

    /// Returns the canonical [`Literal`] for the given value, optional datatype and
    /// optional language tag, interning it on first use.
    ///
    /// A datatype and a language tag may not both be given. If both are present, a
    /// [`CoreError::DatatypeAndLanguageBothGiven`] is reported to the error sink and the
    /// language tag wins, matching how the reference library resolves the conflict
    /// rather than rejecting the call outright.
    pub fn new_literal(
        &self,
        value: &str,
        datatype: Option<&NamedNode>,
        language: Option<&str>,
    ) -> Result<Literal, NodeError> {
        let tag = match (datatype, language) {
            (Some(_), Some(lang)) => {
                self.report(CoreError::DatatypeAndLanguageBothGiven);
                LiteralTag::Language(self.intern_language(lang)?)
            }
            (None, Some(lang)) => LiteralTag::Language(self.intern_language(lang)?),
            (Some(dt), None) => LiteralTag::Datatype(dt.clone()),
            (None, None) => LiteralTag::None,
        };
        let candidate = LiteralData {
            value: Box::from(value),
            tag,
        };
        let mut literals = self.literals.borrow_mut();
        if let Some(existing) = literals.get(&candidate) {
            return Ok(Literal::from_rc(existing.clone()));
        }
        let rc = Rc::new(candidate);
        literals.insert(rc.clone());
        Ok(Literal::from_rc(rc))
    }

    fn intern_language(&self, language: &str) -> Result<Rc<str>, NodeError> {
        let normalized = LanguageTag::parse(language.to_ascii_lowercase())?.into_inner();
        let mut languages = self.languages.borrow_mut();
        if let Some(existing) = languages.get(normalized.as_str()) {
            return Ok(existing.clone());
        }
        let rc: Rc<str> = Rc::from(normalized.as_str());
        languages.insert(rc.clone());
        Ok(rc)
    }

    /// Drops this `World`'s own canonical handle to `node`'s backing allocation if
    /// nothing else references it any longer.
    ///
    /// A [`Model`](crate::Model) calls this after removing a quad from every index that
    /// held one of its terms, so that a term used nowhere else in the store is freed
    /// instead of living in the interning table forever. It is a no-op when the node is
    /// still referenced elsewhere (another live quad, or a `Node` a caller is still
    /// holding), since that extra strong reference keeps the count above the baseline
    /// of one.
    pub(crate) fn maybe_evict(&self, node: &Node) {
        match node {
            Node::Named(n) => {
                if Rc::strong_count(&n.0) == 2 {
                    self.uris.borrow_mut().remove(n.as_str());
                }
            }
            Node::Blank(b) => {
                if Rc::strong_count(&b.0) == 2 {
                    self.blanks.borrow_mut().remove(b.as_str());
                }
            }
            Node::Literal(l) => {
                if Rc::strong_count(&l.0) == 2 {
                    match &l.0.tag {
                        LiteralTag::Language(tag) if Rc::strong_count(tag) == 2 => {
                            self.languages.borrow_mut().remove(tag.as_ref());
                        }
                        LiteralTag::Datatype(dt) if Rc::strong_count(&dt.0) == 2 => {
                            self.uris.borrow_mut().remove(dt.as_str());
                        }
                        _ => {}
                    }
                    self.literals.borrow_mut().remove(&*l.0);
                }
            }
        }
    }

    pub fn uri_count(&self) -> usize {
        self.uris.borrow().len()
    }

    pub fn blank_count(&self) -> usize {
        self.blanks.borrow().len()
    }

    pub fn literal_count(&self) -> usize {
        self.literals.borrow().len()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
