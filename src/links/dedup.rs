//! Tracking of node pairs that already have a physical link.

use crate::links::types::LinkPair;
use std::collections::HashSet;

/// Unordered node pairs linked so far in one generation run.
///
/// Pairs are keyed without regard to role, so whichever request reaches a
/// pair first decides its creator and loader.
#[derive(Debug, Default)]
pub struct PairDeduplicator {
    linked: HashSet<(String, String)>,
}

fn unordered_key(pair: &LinkPair) -> (String, String) {
    if pair.creator <= pair.loader {
        (pair.creator.clone(), pair.loader.clone())
    } else {
        (pair.loader.clone(), pair.creator.clone())
    }
}

impl PairDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn already_linked(&self, pair: &LinkPair) -> bool {
        self.linked.contains(&unordered_key(pair))
    }

    /// Record `pair` as linked. Returns false if it already was.
    pub fn mark_linked(&mut self, pair: &LinkPair) -> bool {
        self.linked.insert(unordered_key(pair))
    }

    pub fn len(&self) -> usize {
        self.linked.len()
    }
}
