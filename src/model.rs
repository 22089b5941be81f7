use crate::error::CoreError;
use crate::index::Index;
use crate::iter::{QuadIter, SearchMode};
use crate::node::Node;
use crate::ordering::{ordering_for, Slot, ORDERINGS};
use crate::quad::{GraphPattern, Pattern, Quad, QuadShapeError};
use crate::world::World;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Requested a `Model` be built with no orderings at all, which can never answer a
/// query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a model needs at least one index ordering")]
pub struct NoOrderingsError;

/// An in-memory, single-threaded quad store: a set of [`Quad`]s, held in one or more
/// redundant sorted [`Index`]es so that a [`Pattern`] with any mix of bound and
/// wildcard fields can be answered by a contiguous range scan instead of a linear
/// filter over every quad.
///
/// A `Model` borrows a [`World`] to canonicalize the nodes it stores; several `Model`s
/// may share one `World` so that nodes compare correctly across them. Like `World`,
/// `Model` uses interior mutability ([`RefCell`], [`Cell`]) so lookups and range scans
/// take `&self`, and is neither `Sync` nor `Send`: sharing one across threads would
/// let two mutations race on the same `BTreeSet`, so the type system simply refuses.
pub struct Model {
    world: Rc<World>,
    indices: RefCell<Vec<Index>>,
    num_quads: Cell<usize>,
}

impl Model {
    /// Builds a `Model` maintaining all twelve index orderings.
    ///
    /// This is the natural default: every pattern shape gets a range scan, at the cost
    /// of twelve-fold memory and insertion overhead per quad. Use
    /// [`Model::with_orderings`] to trade some query shapes for a smaller footprint.
    pub fn new(world: Rc<World>) -> Self {
        Self::with_orderings(world, &(0..12).collect::<Vec<_>>()).expect("0..12 is non-empty")
    }

    /// Builds a `Model` maintaining the given index orderings (each `0..12`, see
    /// [`crate::ordering`]) plus the default SPO ordering (id `0`), which is always
    /// materialized regardless of what the caller asks for — per `spec.md` §4.3, so
    /// that naive insertion is never O(N) for want of any ordering at all. Patterns
    /// that no other maintained ordering serves well still work, falling back to a
    /// full scan filtered in memory; they are simply slower.
    pub fn with_orderings(world: Rc<World>, ordering_ids: &[u8]) -> Result<Self, NoOrderingsError> {
        if ordering_ids.is_empty() {
            return Err(NoOrderingsError);
        }
        let mut ids: Vec<u8> = ordering_ids.to_vec();
        ids.push(0);
        ids.sort_unstable();
        ids.dedup();
        let indices = ids.into_iter().map(|id| Index::new(ordering_for(id))).collect();
        Ok(Self {
            world,
            indices: RefCell::new(indices),
            num_quads: Cell::new(0),
        })
    }

    pub fn world(&self) -> &Rc<World> {
        &self.world
    }

    pub fn num_quads(&self) -> usize {
        self.num_quads.get()
    }

    pub fn is_empty(&self) -> bool {
        self.num_quads.get() == 0
    }

    /// Adds `subject predicate object [graph]` to the store. Returns `Ok(false)` without
    /// reporting an error if the quad is already present — insertion is idempotent.
    pub fn add(
        &self,
        subject: Node,
        predicate: Node,
        object: Node,
        graph: Option<Node>,
    ) -> Result<bool, QuadShapeError> {
        let quad = Quad::new(subject, predicate, object, graph)?;
        Ok(self.insert(quad))
    }

    fn insert(&self, quad: Quad) -> bool {
        let natural = quad.into_slots();
        let mut indices = self.indices.borrow_mut();
        let mut inserted = false;
        for index in indices.iter_mut() {
            inserted |= index.insert(&natural);
        }
        if inserted {
            self.num_quads.set(self.num_quads.get() + 1);
        }
        inserted
    }

    /// Removes the single quad `subject predicate object [graph]` if present. Returns
    /// whether it was present.
    pub fn remove(
        &self,
        subject: &Node,
        predicate: &Node,
        object: &Node,
        graph: Option<&Node>,
    ) -> bool {
        let natural = [
            Some(subject.clone()),
            Some(predicate.clone()),
            Some(object.clone()),
            graph.cloned(),
        ];
        self.remove_natural(natural)
    }

    pub(crate) fn remove_natural(&self, natural: [Option<Node>; 4]) -> bool {
        let mut indices = self.indices.borrow_mut();
        let mut removed = false;
        for index in indices.iter_mut() {
            removed |= index.remove(&natural);
        }
        drop(indices);
        if removed {
            self.num_quads.set(self.num_quads.get() - 1);
            for slot in natural.into_iter().flatten() {
                self.world.maybe_evict(&slot);
            }
        }
        removed
    }

    /// Whether `subject predicate object [graph]` is present. Answered with a single
    /// point lookup when an index covers all four fields, which it always does.
    pub fn contains(&self, subject: &Node, predicate: &Node, object: &Node, graph: Option<&Node>) -> bool {
        let natural = [
            Some(subject.clone()),
            Some(predicate.clone()),
            Some(object.clone()),
            graph.cloned(),
        ];
        self.indices.borrow()[0].contains(&natural)
    }

    /// Whether any quad matches `pattern`.
    pub fn ask(&self, pattern: &Pattern) -> bool {
        self.find(pattern.clone()).next().is_some()
    }

    /// Counts the quads matching `pattern`. This still performs a scan (possibly
    /// restricted to a contiguous range); there is no maintained cardinality cache.
    pub fn count(&self, pattern: &Pattern) -> usize {
        self.find(pattern.clone()).count()
    }

    /// Resolves the one wildcard slot of `pattern` against the first matching quad.
    ///
    /// `pattern` must leave exactly one of `subject`/`predicate`/`object` as `None`;
    /// any other shape is a precondition violation reported through the `World`'s
    /// error sink, and the call returns `None` without searching. `graph` may be
    /// bound or left as [`GraphPattern::Any`] either way.
    pub fn get(&self, pattern: &Pattern) -> Option<Node> {
        let wildcards = [
            pattern.subject.is_none(),
            pattern.predicate.is_none(),
            pattern.object.is_none(),
        ];
        if wildcards.iter().filter(|w| **w).count() != 1 {
            self.world.report(CoreError::Other(
                "Model::get requires exactly one of subject/predicate/object to be unset".to_owned(),
            ));
            return None;
        }
        let quad = self.find(pattern.clone()).next()?;
        if wildcards[0] {
            Some(quad.subject)
        } else if wildcards[1] {
            Some(quad.predicate)
        } else {
            Some(quad.object)
        }
    }

    /// Removes every quad asserted in `graph` (`None` for the default graph).
    ///
    /// Implemented as a scan-and-erase over [`Model::find`] rather than a bulk index
    /// operation: the reference library's own "remove a graph" entry point was never
    /// fully implemented, so this follows the resolution recorded in `DESIGN.md`
    /// (enumerate the graph's quads and erase each one through its iterator, which
    /// keeps every maintained index consistent without a bespoke bulk-removal path).
    /// Returns the number of quads removed.
    pub fn remove_graph(&self, graph: Option<&Node>) -> usize {
        let pattern = Pattern {
            graph: match graph {
                Some(g) => GraphPattern::Named(g.clone()),
                None => GraphPattern::DefaultGraph,
            },
            ..Pattern::default()
        };
        let mut iter = self.find(pattern);
        let mut removed = 0;
        while iter.next().is_some() {
            if iter.erase() {
                removed += 1;
            }
        }
        removed
    }

    /// Whether `node` is a good candidate for inline (anonymous) abbreviation by a
    /// writer: it appears as the object of exactly one statement and never as a
    /// subject. Backs the writer contract in §6 of the design notes; this crate
    /// itself never abbreviates anything.
    pub fn node_is_inline_object(&self, node: &Node) -> bool {
        let as_subject = Pattern {
            subject: Some(node.clone()),
            ..Pattern::default()
        };
        if self.ask(&as_subject) {
            return false;
        }
        let as_object = Pattern {
            object: Some(node.clone()),
            ..Pattern::default()
        };
        self.count(&as_object) == 1
    }

    /// Starts iterating the quads matching `pattern`, choosing whichever maintained
    /// index gives the longest contiguous range for the pattern's bound fields.
    pub fn find(&self, pattern: Pattern) -> QuadIter<'_> {
        let (ordering_id, mode, prefix_len) = self.best_index_for(&pattern);
        QuadIter::new(self, ordering_id, mode, prefix_len, pattern)
    }

    /// Same as [`Model::find`] but evaluates `pattern` against a caller-supplied
    /// template rather than building one field by field; kept for call sites that
    /// already hold a `Pattern` value (e.g. a re-issued query).
    pub fn begin(&self, pattern: &Pattern) -> QuadIter<'_> {
        self.find(pattern.clone())
    }

    pub(crate) fn indices(&self) -> &RefCell<Vec<Index>> {
        &self.indices
    }

    /// Picks the maintained ordering whose storage order groups the most bound
    /// leading fields together for `pattern`, so the resulting range scan is as tight
    /// as possible.
    ///
    /// Graph handling: a pattern bound to a specific graph ([`GraphPattern::Named`] or
    /// [`GraphPattern::DefaultGraph`]) treats the graph slot as bound for this scoring;
    /// [`GraphPattern::Any`] treats it as unbound, since no single index can restrict
    /// to "any graph but not this subject" more cheaply than scanning subject alone.
    fn best_index_for(&self, pattern: &Pattern) -> (u8, SearchMode, usize) {
        let bound = [
            pattern.subject.is_some(),
            pattern.predicate.is_some(),
            pattern.object.is_some(),
            !matches!(pattern.graph, GraphPattern::Any),
        ];
        let all_bound = bound.iter().all(|b| *b);
        let none_bound = bound.iter().all(|b| !b);

        let indices = self.indices.borrow();
        let mut best: Option<(u8, usize)> = None;
        for index in indices.iter() {
            let prefix_len = prefix_bound_len(&index.ordering.slots, &bound);
            let better = match best {
                None => true,
                Some((_, len)) => prefix_len > len,
            };
            if better {
                best = Some((index.ordering.id, prefix_len));
            }
        }
        let (ordering_id, prefix_len) = best.expect("at least one index is always maintained");

        let mode = if all_bound {
            SearchMode::Point
        } else if none_bound {
            SearchMode::FullScan
        } else if prefix_len == bound.iter().filter(|b| **b).count() {
            SearchMode::PrefixRange
        } else {
            SearchMode::FilterRange
        };
        (ordering_id, mode, prefix_len)
    }
}

/// Length of the leading run of `slots` that are marked bound in `bound`.
fn prefix_bound_len(slots: &[Slot; 4], bound: &[bool; 4]) -> usize {
    let mut len = 0;
    for slot in slots {
        if bound[*slot as usize] {
            len += 1;
        } else {
            break;
        }
    }
    len
}

#[cfg(test)]
mod prefix_tests {
    use super::*;

    #[test]
    fn full_prefix_when_all_bound() {
        let slots = ORDERINGS[0].slots;
        assert_eq!(prefix_bound_len(&slots, &[true, true, true, true]), 4);
    }

    #[test]
    fn stops_at_first_unbound_slot() {
        let slots = ORDERINGS[0].slots; // S, P, O, G
        assert_eq!(prefix_bound_len(&slots, &[true, false, true, true]), 1);
    }
}
