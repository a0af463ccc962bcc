// Copyright 2025 the Quakeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stable top-N selection.

use alloc::vec;
use alloc::vec::Vec;

use smallvec::SmallVec;

/// Row indices chosen by a ranking, in rank order.
pub type Selection = SmallVec<[usize; 8]>;

/// Sorting order for ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

fn ranked(keys: &[f64], order: SortOrder) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..keys.len()).collect();
    // `sort_by` is stable, so equal keys keep input order.
    match order {
        SortOrder::Asc => idx.sort_by(|&a, &b| keys[a].total_cmp(&keys[b])),
        SortOrder::Desc => idx.sort_by(|&a, &b| keys[b].total_cmp(&keys[a])),
    }
    idx
}

/// Returns the indices of the `n` best keys, best first.
///
/// Ties are broken by input order. Callers are expected to reject `NaN` keys beforehand.
pub fn top_n(keys: &[f64], n: usize, order: SortOrder) -> Selection {
    ranked(keys, order).into_iter().take(n).collect()
}

/// Like [`top_n`], but applies the limit independently inside each group.
///
/// `groups[i]` is the dense group index of row `i`. The result is still in overall rank order.
pub fn top_n_grouped(keys: &[f64], groups: &[usize], n: usize, order: SortOrder) -> Selection {
    debug_assert_eq!(keys.len(), groups.len(), "one group per key");
    let group_count = groups.iter().copied().max().map_or(0, |g| g + 1);
    let mut taken = vec![0_usize; group_count];
    ranked(keys, order)
        .into_iter()
        .filter(|&i| {
            let slot = &mut taken[groups[i]];
            if *slot < n {
                *slot += 1;
                true
            } else {
                false
            }
        })
        .collect()
}
