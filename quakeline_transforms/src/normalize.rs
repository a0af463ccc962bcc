// Copyright 2025 the Quakeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Batch-relative normalization.

use alloc::vec::Vec;

/// The result of [`normalize_by_max`].
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Normalized values, aligned with the input.
    pub values: Vec<f64>,
    /// The batch maximum used as divisor, or `None` when normalization was degenerate.
    pub max: Option<f64>,
}

impl Normalized {
    /// Returns whether the batch had no usable positive maximum.
    pub fn is_degenerate(&self) -> bool {
        self.max.is_none()
    }
}

/// Divides every value by the batch maximum.
///
/// Non-finite values are ignored when finding the maximum. If no finite positive maximum
/// exists (empty input, all zeros, all `NaN`), every value normalizes to the constant `1.0`
/// instead of dividing by zero.
pub fn normalize_by_max(values: &[f64]) -> Normalized {
    let max = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    if !(max.is_finite() && max > 0.0) {
        if !values.is_empty() {
            tracing::debug!(rows = values.len(), "degenerate size normalization");
        }
        return Normalized {
            values: alloc::vec![1.0; values.len()],
            max: None,
        };
    }
    Normalized {
        values: values.iter().map(|v| v / max).collect(),
        max: Some(max),
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn sizes_normalize_against_batch_max() {
        let n = normalize_by_max(&[2.0, 4.0, 8.0]);
        assert_eq!(n.values, alloc::vec![0.25, 0.5, 1.0]);
        assert_eq!(n.max, Some(8.0));
    }

    #[test]
    fn all_zero_sizes_normalize_to_constant() {
        let n = normalize_by_max(&[0.0, 0.0]);
        assert!(n.is_degenerate(), "zero max is degenerate");
        assert_eq!(n.values, alloc::vec![1.0, 1.0]);
    }

    #[test]
    fn empty_input_is_empty() {
        let n = normalize_by_max(&[]);
        assert!(n.values.is_empty(), "no rows, no values");
    }
}
