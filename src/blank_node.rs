use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// An RDF [blank node](https://www.w3.org/TR/rdf11-concepts/#dfn-blank-node), canonicalized
/// by a [`World`](crate::World).
///
/// Like [`NamedNode`](crate::NamedNode), equality and ordering are pointer comparisons
/// against the canonical allocation held by the `World`.
///
/// The default string formatter returns an N-Triples/N-Quads compatible representation:
/// ```
/// use quadstore::World;
///
/// let world = World::new();
/// let b = world.new_blank("b0");
/// assert_eq!("_:b0", b.to_string());
/// ```
#[derive(Clone)]
pub struct BlankNode(pub(crate) Rc<str>);

impl BlankNode {
    pub(crate) fn from_rc(id: Rc<str>) -> Self {
        Self(id)
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

impl fmt::Debug for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlankNode({:?})", self.as_str())
    }
}

impl fmt::Display for BlankNode {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.as_str())
    }
}

impl PartialEq for BlankNode {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_id() == other.ptr_id()
    }
}

impl Eq for BlankNode {}

impl PartialOrd for BlankNode {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BlankNode {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.ptr_id().cmp(&other.ptr_id())
    }
}

impl Hash for BlankNode {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ptr_id().hash(state);
    }
}
