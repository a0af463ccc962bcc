// Copyright 2025 the Quakeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Distinct strata in first-seen order.

use alloc::sync::Arc;
use alloc::vec::Vec;

use hashbrown::HashMap;
use quakeline_core::Observation;

/// Dense indices for the strata present in a batch.
///
/// Rows without a stratum share one "unstratified" level, which takes its own index.
#[derive(Debug, Clone, Default)]
pub struct StratumIndex {
    levels: Vec<Option<Arc<str>>>,
    lookup: HashMap<Arc<str>, usize>,
    shared: Option<usize>,
}

impl StratumIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index over `batch` in first-seen order.
    pub fn from_batch(batch: &[Observation]) -> Self {
        let mut out = Self::new();
        for obs in batch {
            out.insert(obs.stratum.clone());
        }
        out
    }

    /// Inserts a level if not already present and returns its index.
    pub fn insert(&mut self, level: Option<Arc<str>>) -> usize {
        if let Some(i) = self.index_of(level.as_deref()) {
            return i;
        }
        let i = self.levels.len();
        match &level {
            Some(s) => {
                self.lookup.insert(s.clone(), i);
            }
            None => self.shared = Some(i),
        }
        self.levels.push(level);
        i
    }

    /// Returns the index of `level`.
    pub fn index_of(&self, level: Option<&str>) -> Option<usize> {
        match level {
            Some(s) => self.lookup.get(s).copied(),
            None => self.shared,
        }
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Returns whether there are no levels.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Iterates levels in index order.
    pub fn levels(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.levels.iter().map(|l| l.as_deref())
    }

    /// Reorders levels alphabetically, with the unstratified level first.
    pub fn sorted(self) -> Self {
        let mut levels = self.levels;
        levels.sort();
        let mut out = Self::new();
        for level in levels {
            out.insert(level);
        }
        out
    }

    /// Returns the dense group index of every row in `batch`, inserting unseen levels.
    pub fn group_ids(&mut self, batch: &[Observation]) -> Vec<usize> {
        batch.iter().map(|o| self.insert(o.stratum.clone())).collect()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn batch() -> Vec<Observation> {
        vec![
            Observation::new(0, 0.0).with_stratum("MEXICO"),
            Observation::new(1, 0.0).with_stratum("CHILE"),
            Observation::new(2, 0.0),
            Observation::new(3, 0.0).with_stratum("MEXICO"),
        ]
    }

    #[test]
    fn levels_follow_first_seen_order() {
        let idx = StratumIndex::from_batch(&batch());
        let levels: Vec<_> = idx.levels().collect();
        assert_eq!(levels, vec![Some("MEXICO"), Some("CHILE"), None]);
        assert_eq!(idx.index_of(None), Some(2));
        assert_eq!(idx.index_of(Some("PERU")), None);
    }

    #[test]
    fn sorted_puts_shared_first_then_alphabetical() {
        let idx = StratumIndex::from_batch(&batch()).sorted();
        let levels: Vec<_> = idx.levels().collect();
        assert_eq!(levels, vec![None, Some("CHILE"), Some("MEXICO")]);
    }

    #[test]
    fn group_ids_are_dense() {
        let mut idx = StratumIndex::new();
        assert_eq!(idx.group_ids(&batch()), vec![0, 1, 2, 0]);
        assert_eq!(idx.len(), 3);
    }
}
