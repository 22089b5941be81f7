use crate::node::Node;
use std::fmt;

/// A single RDF statement in its default graph: subject, predicate, object.
///
/// Node kind constraints (subjects and predicates are never literals, predicates are
/// never blank nodes) are enforced where a `Quad` is built from caller-supplied `Node`s
/// — see [`Quad::new`] — rather than at the type level, since the fourth field,
/// `graph`, legitimately widens to "no graph" in a way a plain `Node` cannot express.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quad {
    pub subject: Node,
    pub predicate: Node,
    pub object: Node,
    pub graph: Option<Node>,
}

/// Why a candidate (subject, predicate, object, graph) tuple was rejected by
/// [`Quad::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QuadShapeError {
    #[error("a literal cannot appear as a subject")]
    LiteralSubject,
    #[error("only a named node can appear as a predicate")]
    NonNamedPredicate,
    #[error("a literal cannot name a graph")]
    LiteralGraphName,
}

impl Quad {
    /// Validates that `subject`/`predicate`/`object`/`graph` obey RDF's node-position
    /// constraints and assembles them into a `Quad`.
    ///
    /// This is the boundary every public quad-insertion path funnels through; once a
    /// `Quad` exists, its fields are known-good and no other code in this crate
    /// re-checks them.
    pub fn new(
        subject: Node,
        predicate: Node,
        object: Node,
        graph: Option<Node>,
    ) -> Result<Self, QuadShapeError> {
        if subject.is_literal() {
            return Err(QuadShapeError::LiteralSubject);
        }
        if !predicate.is_named() {
            return Err(QuadShapeError::NonNamedPredicate);
        }
        if let Some(g) = &graph {
            if g.is_literal() {
                return Err(QuadShapeError::LiteralGraphName);
            }
        }
        Ok(Self {
            subject,
            predicate,
            object,
            graph,
        })
    }

    /// The four fixed positions of a quad, in `S, P, O, G` order, as used by
    /// [`Ordering`](crate::ordering::Ordering) to index into a permuted key.
    pub(crate) fn into_slots(self) -> [Option<Node>; 4] {
        [
            Some(self.subject),
            Some(self.predicate),
            Some(self.object),
            self.graph,
        ]
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)?;
        if let Some(graph) = &self.graph {
            write!(f, " {graph}")?;
        }
        write!(f, " .")
    }
}

/// A query over a [`Model`](crate::Model): `subject`/`predicate`/`object` are each
/// either a concrete [`Node`] to match exactly, or `None` as a wildcard. The graph
/// position is constrained separately by [`GraphPattern`]:
/// [`GraphPattern::Any`] matches a quad in any graph, default graph included;
/// [`GraphPattern::DefaultGraph`] matches only the default graph; and
/// [`GraphPattern::Named`] matches only the given named graph.
#[derive(Debug, Clone, Default)]
pub struct Pattern {
    pub subject: Option<Node>,
    pub predicate: Option<Node>,
    pub object: Option<Node>,
    pub graph: GraphPattern,
    /// Requests that results be deduplicated by `(subject, predicate, object)`,
    /// collapsing a statement asserted in several graphs into a single result.
    ///
    /// This only has an effect — and [`Model`](crate::Model) only honors it — when the
    /// index chosen for the pattern already orders graph last, since that is the only
    /// layout where same-`(S, P, O)` entries across graphs are contiguous and cheap to
    /// collapse with a running "seen" comparison. Asking for `distinct` is always safe;
    /// it is simply ignored rather than triggering a more expensive index choice.
    pub distinct: bool,
}

/// How a [`Pattern`] constrains the graph position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GraphPattern {
    /// Match a quad in any graph, default graph included.
    #[default]
    Any,
    /// Match only quads asserted in the default graph.
    DefaultGraph,
    /// Match only quads asserted in the named graph.
    Named(Node),
}

/// Tests whether `quad`'s slots satisfy `pattern`, ignoring [`Pattern::distinct`] (which
/// is a post-processing concern handled by the caller, not a per-quad predicate).
pub fn quad_matches(quad: &Quad, pattern: &Pattern) -> bool {
    if let Some(s) = &pattern.subject {
        if *s != quad.subject {
            return false;
        }
    }
    if let Some(p) = &pattern.predicate {
        if *p != quad.predicate {
            return false;
        }
    }
    if let Some(o) = &pattern.object {
        if *o != quad.object {
            return false;
        }
    }
    match &pattern.graph {
        GraphPattern::Any => {}
        GraphPattern::DefaultGraph => {
            if quad.graph.is_some() {
                return false;
            }
        }
        GraphPattern::Named(g) => {
            if quad.graph.as_ref() != Some(g) {
                return false;
            }
        }
    }
    true
}
