use crate::named_node::NamedNode;
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Write as _;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Structural key used by `World` to look up a canonical [`LiteralData`] by content
/// instead of by pointer. `Rc<LiteralData>` delegates its own `Hash`/`Eq` to these impls,
/// which is what lets `HashSet<Rc<LiteralData>>::get` find an existing allocation given
/// only a freshly built, not-yet-interned candidate.

/// An RDF [literal](https://www.w3.org/TR/rdf11-concepts/#dfn-literal), canonicalized by a
/// [`World`](crate::World).
///
/// A literal carries a lexical value plus, mutually exclusively, a datatype or a
/// language tag ([`LiteralTag`]). Literals with the same lexical form but a different
/// datatype or language tag are distinct nodes.
///
/// The default string formatter returns an N-Triples/N-Quads compatible representation:
/// ```
/// use quadstore::World;
///
/// let world = World::new();
/// let en = world.new_literal("hello", None, Some("en")).unwrap();
/// assert_eq!("\"hello\"@en", en.to_string());
/// ```
#[derive(Clone)]
pub struct Literal(pub(crate) Rc<LiteralData>);

#[derive(Debug)]
pub(crate) struct LiteralData {
    pub value: Box<str>,
    pub tag: LiteralTag,
}

/// The mutually exclusive datatype-or-language annotation of a [`Literal`].
///
/// Modeling this as a sum type, rather than the two optional fields the reference C
/// library stores side by side, makes "datatype and language both set" unrepresentable
/// instead of a runtime invariant callers must remember to check.
#[derive(Debug, Clone)]
pub enum LiteralTag {
    /// A plain literal with no datatype or language tag.
    None,
    /// A language-tagged string; the tag is interned by the owning `World` so two
    /// literals sharing it share the same allocation.
    Language(Rc<str>),
    /// A typed literal; the datatype is itself an interned [`NamedNode`].
    Datatype(NamedNode),
}

impl PartialEq for LiteralData {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
            && match (&self.tag, &other.tag) {
                (LiteralTag::None, LiteralTag::None) => true,
                (LiteralTag::Language(a), LiteralTag::Language(b)) => a == b,
                (LiteralTag::Datatype(a), LiteralTag::Datatype(b)) => a == b,
                _ => false,
            }
    }
}

impl Eq for LiteralData {}

impl Hash for LiteralData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
        match &self.tag {
            LiteralTag::None => 0u8.hash(state),
            LiteralTag::Language(tag) => {
                1u8.hash(state);
                tag.hash(state);
            }
            LiteralTag::Datatype(dt) => {
                2u8.hash(state);
                dt.as_str().hash(state);
            }
        }
    }
}

impl Literal {
    pub(crate) fn from_rc(data: Rc<LiteralData>) -> Self {
        Self(data)
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.0.value
    }

    /// The language tag of this literal, if it is a language-tagged string.
    #[inline]
    pub fn language(&self) -> Option<&str> {
        match &self.0.tag {
            LiteralTag::Language(tag) => Some(tag),
            _ => None,
        }
    }

    /// The datatype of this literal, if one was given explicitly.
    ///
    /// Plain and language-tagged literals return `None` here; callers that need the RDF
    /// 1.1 convention of treating those as `xsd:string` / `rdf:langString` apply it
    /// themselves at the boundary (e.g. in a writer), rather than this type silently
    /// inventing one.
    #[inline]
    pub fn datatype(&self) -> Option<&NamedNode> {
        match &self.0.tag {
            LiteralTag::Datatype(dt) => Some(dt),
            _ => None,
        }
    }

    #[inline]
    pub fn is_plain(&self) -> bool {
        matches!(self.0.tag, LiteralTag::None)
    }

    #[inline]
    pub(crate) fn ptr_id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const LiteralData as usize
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Literal({self})")
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('"')?;
        print_quoted_str(self.value(), f)?;
        f.write_char('"')?;
        match &self.0.tag {
            LiteralTag::None => Ok(()),
            LiteralTag::Language(tag) => write!(f, "@{tag}"),
            LiteralTag::Datatype(dt) => write!(f, "^^{dt}"),
        }
    }
}

impl PartialEq for Literal {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_id() == other.ptr_id()
    }
}

impl Eq for Literal {}

impl PartialOrd for Literal {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Literal {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.ptr_id().cmp(&other.ptr_id())
    }
}

impl Hash for Literal {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ptr_id().hash(state);
    }
}

/// Escapes `value` the way N-Triples/N-Quads require inside a quoted literal.
pub(crate) fn print_quoted_str(value: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for c in value.chars() {
        match c {
            '\u{08}' => f.write_str("\\b"),
            '\t' => f.write_str("\\t"),
            '\n' => f.write_str("\\n"),
            '\u{0C}' => f.write_str("\\f"),
            '\r' => f.write_str("\\r"),
            '"' => f.write_str("\\\""),
            '\\' => f.write_str("\\\\"),
            c => f.write_char(c),
        }?;
    }
    Ok(())
}
