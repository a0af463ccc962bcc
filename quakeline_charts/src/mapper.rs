// Copyright 2025 the Quakeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A concrete coordinate mapper for one timeline panel.

use quakeline_core::{Axis, CoordinateMapper, DataValue, Field, Observation};
use quakeline_transforms::StratumIndex;

use crate::scale::{ScaleContinuous, ScalePoint, ScaleTime, infer_domain};

/// Maps positions through a continuous x scale and strata through a point scale.
///
/// Both axes map into normalized panel space `0..1`. Strata are placed bottom to top in index
/// order; values the mapper has never seen (and missing x values) map to `NaN`.
#[derive(Clone, Debug)]
pub struct PanelMapper {
    x: ScaleContinuous,
    strata: StratumIndex,
    y: ScalePoint,
}

impl PanelMapper {
    /// Creates a mapper from an x scale (whose range should be `0..1`) and a stratum index.
    pub fn new(x: impl Into<ScaleContinuous>, strata: StratumIndex) -> Self {
        let y = ScalePoint::new((0.0, 1.0), strata.len());
        Self {
            x: x.into(),
            strata,
            y,
        }
    }

    /// Fits a time x scale to the batch's position range (with `pad` of the span added on each
    /// side) and indexes its strata in first-seen order.
    pub fn fit(batch: &[Observation], pad: f64) -> Self {
        let (d0, d1) = infer_domain(batch, Field::Position).unwrap_or((0.0, 1.0));
        let span = d1 - d0;
        let margin = if span > 0.0 { span * pad } else { 1.0 };
        let x = ScaleTime::new((d0 - margin, d1 + margin), (0.0, 1.0));
        Self::new(x, StratumIndex::from_batch(batch))
    }

    /// Sets the outer padding (in line steps) of the stratum axis.
    pub fn with_stratum_padding(mut self, padding: f64) -> Self {
        self.y = self.y.with_padding(padding);
        self
    }

    /// Returns the x scale.
    pub fn x_scale(&self) -> ScaleContinuous {
        self.x
    }

    /// Returns the stratum index.
    pub fn strata(&self) -> &StratumIndex {
        &self.strata
    }
}

impl CoordinateMapper for PanelMapper {
    fn map(&self, value: DataValue<'_>, axis: Axis) -> f64 {
        match (axis, value) {
            (Axis::X, DataValue::Number(v)) => self.x.map(v),
            (Axis::X, _) => f64::NAN,
            (Axis::Y, DataValue::Category(s)) => self
                .strata
                .index_of(Some(s))
                .map_or(f64::NAN, |i| self.y.position(i)),
            (Axis::Y, DataValue::Missing) => self
                .strata
                .index_of(None)
                .map_or(self.y.position(0), |i| self.y.position(i)),
            (Axis::Y, DataValue::Number(_)) => f64::NAN,
        }
    }
}
