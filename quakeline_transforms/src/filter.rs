// Copyright 2025 the Quakeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row filtering.

use alloc::vec::Vec;

use quakeline_core::{Field, Observation};

/// Comparison operators for numeric predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `==` (exact float equality)
    Eq,
    /// `!=` (exact float inequality)
    Ne,
}

/// A numeric row predicate.
///
/// Rows whose field is missing never satisfy a predicate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Predicate {
    /// Field to read.
    pub field: Field,
    /// Comparison operator.
    pub op: CompareOp,
    /// Right-hand constant.
    pub value: f64,
}

impl Predicate {
    /// Creates a predicate.
    pub fn new(field: Field, op: CompareOp, value: f64) -> Self {
        Self { field, op, value }
    }

    /// Evaluate the predicate for a given numeric value.
    pub fn eval(&self, v: f64) -> bool {
        match self.op {
            CompareOp::Lt => v < self.value,
            CompareOp::Le => v <= self.value,
            CompareOp::Gt => v > self.value,
            CompareOp::Ge => v >= self.value,
            CompareOp::Eq => v == self.value,
            CompareOp::Ne => v != self.value,
        }
    }

    /// Evaluate the predicate against a row.
    pub fn matches(&self, obs: &Observation) -> bool {
        obs.number(self.field).is_some_and(|v| self.eval(v))
    }
}

/// Keeps rows that satisfy every predicate, in input order.
pub fn filter(batch: &[Observation], predicates: &[Predicate]) -> Vec<Observation> {
    batch
        .iter()
        .filter(|obs| predicates.iter().all(|p| p.matches(obs)))
        .cloned()
        .collect()
}

/// Drops rows missing any of `required`, returning the kept rows and the number dropped.
pub fn drop_incomplete(batch: &[Observation], required: &[Field]) -> (Vec<Observation>, usize) {
    let kept: Vec<Observation> = batch
        .iter()
        .filter(|obs| required.iter().all(|&f| obs.has(f)))
        .cloned()
        .collect();
    let dropped = batch.len() - kept.len();
    if dropped > 0 {
        tracing::debug!(dropped, kept = kept.len(), "dropped incomplete rows");
    }
    (kept, dropped)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn position_range_keeps_rows_inside() {
        let batch = vec![
            Observation::new(0, -10.0),
            Observation::new(1, 5.0),
            Observation::new(2, 20.0),
            Observation::new(3, f64::NAN),
        ];
        let out = filter(
            &batch,
            &[
                Predicate::new(Field::Position, CompareOp::Ge, 0.0),
                Predicate::new(Field::Position, CompareOp::Le, 10.0),
            ],
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].row_key, 1);
    }

    #[test]
    fn drop_incomplete_counts_dropped_rows() {
        let batch = vec![
            Observation::new(0, 1.0).with_magnitude(5.0).with_label("A"),
            Observation::new(1, 2.0).with_label("B"),
            Observation::new(2, f64::NAN).with_magnitude(1.0).with_label("C"),
        ];
        let (kept, dropped) = drop_incomplete(
            &batch,
            &[Field::Position, Field::Magnitude, Field::Label],
        );
        assert_eq!(dropped, 2);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].label.as_deref(), Some("A"));
    }

    #[test]
    fn predicate_on_missing_field_is_false() {
        let p = Predicate::new(Field::Magnitude, CompareOp::Gt, 0.0);
        assert!(!p.matches(&Observation::new(0, 0.0)), "no magnitude");
        assert!(p.matches(&Observation::new(0, 0.0).with_magnitude(6.1)), "6.1 > 0");
    }
}
