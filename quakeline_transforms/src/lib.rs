// Copyright 2025 the Quakeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Batch transforms for timeline marks.
//!
//! Every function here takes a borrowed batch and returns a fresh working copy or index list;
//! the source rows are never mutated. The renderers in `quakeline_charts` build on:
//! - [`drop_incomplete`] and [`filter`] for row selection,
//! - [`normalize_by_max`] for batch-relative sizing,
//! - [`top_n`] / [`top_n_grouped`] for stable ranking, and
//! - [`StratumIndex`] for first-seen stratum ordering.

#![no_std]

extern crate alloc;

mod filter;
mod normalize;
mod rank;
mod strata;

pub use filter::{CompareOp, Predicate, drop_incomplete, filter};
pub use normalize::{Normalized, normalize_by_max};
pub use rank::{Selection, SortOrder, top_n, top_n_grouped};
pub use strata::StratumIndex;
