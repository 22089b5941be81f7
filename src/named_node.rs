use oxiri::{Iri, IriParseError};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// An RDF [IRI](https://www.w3.org/TR/rdf11-concepts/#dfn-iri), canonicalized by a
/// [`World`](crate::World).
///
/// Two `NamedNode`s obtained from the same `World` for the same lexical form always
/// point at the same allocation: equality, ordering and hashing all reduce to a pointer
/// comparison, never to a byte-for-byte string comparison.
///
/// The default string formatter returns an N-Triples/N-Quads compatible representation:
/// ```
/// use quadstore::World;
///
/// let world = World::new();
/// let ex = world.new_uri("http://example.com/foo").unwrap();
/// assert_eq!("<http://example.com/foo>", ex.to_string());
/// ```
#[derive(Clone)]
pub struct NamedNode(pub(crate) Rc<str>);

impl NamedNode {
    pub(crate) fn from_rc(iri: Rc<str>) -> Self {
        Self(iri)
    }

    /// Validates `iri` as an absolute IRI without interning it.
    ///
    /// Interning only happens through [`World::new_uri`](crate::World::new_uri); this is
    /// exposed so callers (e.g. a syntax reader validating a base URI) can check
    /// well-formedness before committing to a `World`.
    pub fn validate(iri: &str) -> Result<(), IriParseError> {
        Iri::parse(iri).map(|_| ())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub(crate) fn ptr_id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const u8 as usize
    }
}

impl fmt::Debug for NamedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NamedNode({:?})", self.as_str())
    }
}

impl fmt::Display for NamedNode {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.as_str())
    }
}

impl PartialEq for NamedNode {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_id() == other.ptr_id()
    }
}

impl Eq for NamedNode {}

impl PartialOrd for NamedNode {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NamedNode {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.ptr_id().cmp(&other.ptr_id())
    }
}

impl Hash for NamedNode {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ptr_id().hash(state);
    }
}
