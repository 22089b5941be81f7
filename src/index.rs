use crate::node::Node;
use crate::ordering::Ordering;
use std::collections::BTreeSet;

/// One of the twelve redundant sorted views a [`Model`](crate::Model) maintains over
/// the same set of quads.
///
/// Every `Index` holds the exact same logical quads as every other index attached to
/// the same `Model`; they differ only in which field permutation of `[S, P, O, G]` is
/// used as the `BTreeSet` key, which in turn determines which patterns it can answer
/// with a contiguous range scan instead of a full scan.
pub(crate) struct Index {
    pub ordering: &'static Ordering,
    entries: BTreeSet<[Option<Node>; 4]>,
}

impl Index {
    pub fn new(ordering: &'static Ordering) -> Self {
        Self {
            ordering,
            entries: BTreeSet::new(),
        }
    }

    /// Inserts a quad given in natural `[S, P, O, G]` order, permuting it to this
    /// index's storage order first. Returns `true` if the quad was not already present.
    pub fn insert(&mut self, natural: &[Option<Node>; 4]) -> bool {
        self.entries.insert(self.ordering.permute(natural))
    }

    /// Removes a quad given in natural order. Returns `true` if it was present.
    pub fn remove(&mut self, natural: &[Option<Node>; 4]) -> bool {
        self.entries.remove(&self.ordering.permute(natural))
    }

    pub fn contains(&self, natural: &[Option<Node>; 4]) -> bool {
        self.entries.contains(&self.ordering.permute(natural))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The smallest key in this index's own storage order at or after (or strictly
    /// after, if `inclusive` is `false`) `start_permuted`, cloned out immediately so the
    /// caller never has to hold a borrow of this index across a mutation.
    ///
    /// [`crate::iter::QuadIter`] calls this once per step, passing its own storage-order
    /// cursor back in as `start_permuted`, rather than holding a live `BTreeSet` range
    /// iterator across calls to [`Model::add`](crate::Model::add)/
    /// [`Model::remove`](crate::Model::remove) in between.
    pub fn first_permuted_from(
        &self,
        start_permuted: &[Option<Node>; 4],
        inclusive: bool,
    ) -> Option<[Option<Node>; 4]> {
        use std::ops::Bound;
        let lower = if inclusive {
            Bound::Included(start_permuted.clone())
        } else {
            Bound::Excluded(start_permuted.clone())
        };
        self.entries.range((lower, Bound::Unbounded)).next().cloned()
    }
}
