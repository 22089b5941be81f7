use crate::model::Model;
use crate::node::Node;
use crate::ordering::{ordering_for, Ordering};
use crate::quad::{GraphPattern, Pattern, Quad};

/// Which of the four access strategies [`Model::find`](crate::Model::find) picked for a
/// particular pattern, kept on [`QuadIter`] for introspection and tests rather than
/// changing the iteration algorithm itself — every mode is really the same bounded
/// range scan, just over a prefix of different length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// No field is bound: every entry of the chosen index is visited.
    FullScan,
    /// Every field is bound: at most one quad can match.
    Point,
    /// A leading run of the chosen index's fields is bound and none of the rest are
    /// filtered after the fact.
    PrefixRange,
    /// A leading run is bound, but further fields beyond the matched prefix still need
    /// per-entry filtering because the index couldn't place them contiguously.
    FilterRange,
}

/// A cursor over the quads of a [`Model`] matching a [`Pattern`], obtained from
/// [`Model::find`](crate::Model::find).
///
/// `QuadIter` never holds a borrow of the `Model` across two calls: every step
/// re-borrows its index, reads the next candidate key, and drops the borrow again
/// before returning. That is what makes [`QuadIter::erase`] safe to call mid-iteration
/// — removing the current quad and continuing from the next one — without the
/// iterator itself ever observing a `RefCell` borrow conflict. Mutating the `Model`
/// through any *other* handle while an iterator from it is still live is not
/// recommended: the iterator has no special knowledge of quads another call added or
/// removed, so results mid-scan are a snapshot-ish best effort, not a guarantee.
pub struct QuadIter<'a> {
    model: &'a Model,
    ordering: &'static Ordering,
    mode: SearchMode,
    pattern: Pattern,
    lower_bound: [Option<Node>; 4],
    prefix_len: usize,
    cursor: Option<[Option<Node>; 4]>,
    last_yielded: Option<[Option<Node>; 4]>,
    prev_spo: Option<(Node, Node, Node)>,
    finished: bool,
}

impl<'a> QuadIter<'a> {
    pub(crate) fn new(
        model: &'a Model,
        ordering_id: u8,
        mode: SearchMode,
        prefix_len: usize,
        pattern: Pattern,
    ) -> Self {
        let ordering = ordering_for(ordering_id);
        let natural_bound = pattern_lower_bound(&pattern);
        let lower_bound = ordering.permute(&natural_bound);
        Self {
            model,
            ordering,
            mode,
            pattern,
            lower_bound,
            prefix_len,
            cursor: None,
            last_yielded: None,
            prev_spo: None,
            finished: false,
        }
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Removes the quad most recently returned by [`Iterator::next`] and advances past
    /// it. Returns `false` if `next` has not yet been called, or has returned `None`.
    pub fn erase(&mut self) -> bool {
        match self.last_yielded.take() {
            Some(natural) => self.model.remove_natural(natural),
            None => false,
        }
    }
}

impl Iterator for QuadIter<'_> {
    type Item = Quad;

    fn next(&mut self) -> Option<Quad> {
        if self.finished {
            return None;
        }
        loop {
            let (start, inclusive) = match &self.cursor {
                None => (self.lower_bound.clone(), true),
                Some(c) => (c.clone(), false),
            };
            let candidate = {
                let indices = self.model.indices().borrow();
                let index = indices
                    .iter()
                    .find(|i| i.ordering.id == self.ordering.id)
                    .expect("QuadIter's chosen ordering stays maintained for its lifetime");
                index.first_permuted_from(&start, inclusive)
            };
            let permuted = match candidate {
                Some(p) => p,
                None => {
                    self.finished = true;
                    return None;
                }
            };
            if self.prefix_len > 0 && permuted[..self.prefix_len] != self.lower_bound[..self.prefix_len] {
                self.finished = true;
                return None;
            }
            self.cursor = Some(permuted.clone());
            let natural = self.ordering.unpermute(&permuted);

            if self.mode == SearchMode::FilterRange && !natural_matches(&natural, &self.pattern) {
                continue;
            }
            if self.pattern.distinct && !self.ordering.graph_first && self.is_duplicate(&natural) {
                continue;
            }
            self.last_yielded = Some(natural.clone());
            return Some(natural_to_quad(natural));
        }
    }
}

impl QuadIter<'_> {
    fn is_duplicate(&mut self, natural: &[Option<Node>; 4]) -> bool {
        let spo = (
            natural[0].clone().expect("subject is never null"),
            natural[1].clone().expect("predicate is never null"),
            natural[2].clone().expect("object is never null"),
        );
        let duplicate = self.prev_spo.as_ref() == Some(&spo);
        self.prev_spo = Some(spo);
        duplicate
    }
}

/// Builds the natural-order `[S, P, O, G]` key to use as a scan's starting point:
/// bound fields take the pattern's value, unbound fields are `None`, which sorts
/// before every `Some` value and so never excludes a real match.
fn pattern_lower_bound(pattern: &Pattern) -> [Option<Node>; 4] {
    let graph = match &pattern.graph {
        GraphPattern::Any => None,
        GraphPattern::DefaultGraph => None,
        GraphPattern::Named(g) => Some(g.clone()),
    };
    [
        pattern.subject.clone(),
        pattern.predicate.clone(),
        pattern.object.clone(),
        graph,
    ]
}

fn natural_matches(natural: &[Option<Node>; 4], pattern: &Pattern) -> bool {
    if let Some(s) = &pattern.subject {
        if natural[0].as_ref() != Some(s) {
            return false;
        }
    }
    if let Some(p) = &pattern.predicate {
        if natural[1].as_ref() != Some(p) {
            return false;
        }
    }
    if let Some(o) = &pattern.object {
        if natural[2].as_ref() != Some(o) {
            return false;
        }
    }
    match &pattern.graph {
        GraphPattern::Any => {}
        GraphPattern::DefaultGraph => {
            if natural[3].is_some() {
                return false;
            }
        }
        GraphPattern::Named(g) => {
            if natural[3].as_ref() != Some(g) {
                return false;
            }
        }
    }
    true
}

fn natural_to_quad(mut natural: [Option<Node>; 4]) -> Quad {
    let graph = natural[3].take();
    let object = natural[2].take().expect("object is never null");
    let predicate = natural[1].take().expect("predicate is never null");
    let subject = natural[0].take().expect("subject is never null");
    Quad {
        subject,
        predicate,
        object,
        graph,
    }
}
