// Copyright 2025 the Quakeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The timeline label annotation.
//!
//! For the largest events in a batch this draws a short vertical tick rising from the point,
//! and a rotated label at the top of the tick.

use alloc::vec::Vec;

use kurbo::{Line, Point, Vec2};
use peniko::Color;
use peniko::color::palette::css;
use quakeline_core::{
    CoordinateMapper, DrawOp, Field, LineOp, MarkId, Observation, RenderError, Renderer,
    TextAnchor, TextOp,
};
use quakeline_transforms::{Selection, SortOrder, StratumIndex, top_n, top_n_grouped};

use crate::validate::check_required;

/// Which rows compete for the label limit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RankScope {
    /// The limit applies to the whole batch, even when rows are stratified.
    #[default]
    Global,
    /// The limit applies independently inside each stratum.
    PerStratum,
}

/// Tick + rotated label for the top `n_max` observations by magnitude.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineLabelSpec {
    /// Mark id namespace.
    pub namespace: u32,
    /// Maximum number of labels.
    pub n_max: usize,
    /// Selection scope for `n_max`.
    pub scope: RankScope,
    /// Tick height in normalized panel units.
    pub offset: f64,
    /// Label rotation in degrees (counter-clockwise).
    pub angle: f64,
    /// Font size per unit of `size`.
    pub font_scale: f64,
    /// Whether labels carry the skip-if-overlapping hint.
    pub check_overlap: bool,
    /// Color for rows without one.
    pub color: Color,
    /// Size for rows without one.
    pub size: f64,
    /// Opacity for rows without one.
    pub alpha: f32,
    /// Tick width for rows without one.
    pub stroke: f64,
}

impl TimelineLabelSpec {
    const REQUIRED: &'static [Field] = &[Field::Position, Field::Magnitude, Field::Label];

    /// Creates a spec labelling the top three rows with 45° text.
    pub fn new(namespace: u32) -> Self {
        Self {
            namespace,
            n_max: 3,
            scope: RankScope::Global,
            offset: 0.15,
            angle: 45.0,
            font_scale: 1.5,
            check_overlap: true,
            color: css::GRAY,
            size: 8.0,
            alpha: 1.0,
            stroke: 0.5,
        }
    }

    /// Sets the label limit.
    pub fn with_n_max(mut self, n_max: usize) -> Self {
        self.n_max = n_max;
        self
    }

    /// Sets the selection scope.
    pub fn with_scope(mut self, scope: RankScope) -> Self {
        self.scope = scope;
        self
    }

    /// Sets the tick height.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the label rotation.
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Sets the font size per unit of `size`.
    pub fn with_font_scale(mut self, font_scale: f64) -> Self {
        self.font_scale = font_scale;
        self
    }

    /// Sets the overlap hint.
    pub fn with_check_overlap(mut self, check_overlap: bool) -> Self {
        self.check_overlap = check_overlap;
        self
    }

    /// Sets the default color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Sets the default size.
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Sets the default opacity.
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the default tick width.
    pub fn with_stroke(mut self, stroke: f64) -> Self {
        self.stroke = stroke;
        self
    }

    /// Returns the indices of the rows that get a label, largest magnitude first.
    ///
    /// The batch must already be validated.
    pub fn select(&self, batch: &[Observation]) -> Selection {
        let keys: Vec<f64> = batch
            .iter()
            .map(|o| o.magnitude.unwrap_or(f64::NEG_INFINITY))
            .collect();
        match self.scope {
            RankScope::Global => top_n(&keys, self.n_max, SortOrder::Desc),
            RankScope::PerStratum => {
                let groups = StratumIndex::new().group_ids(batch);
                top_n_grouped(&keys, &groups, self.n_max, SortOrder::Desc)
            }
        }
    }
}

impl Default for TimelineLabelSpec {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Renderer for TimelineLabelSpec {
    fn render(
        &self,
        batch: &[Observation],
        mapper: &dyn CoordinateMapper,
    ) -> Result<Vec<DrawOp>, RenderError> {
        check_required(batch, Self::REQUIRED)?;

        let selected = self.select(batch);
        let mut out = Vec::with_capacity(2 * selected.len());
        for &i in &selected {
            let obs = &batch[i];
            let base: Point = mapper.point(obs);
            let top = base + Vec2::new(0.0, self.offset);
            let color = obs.color.unwrap_or(self.color);
            let opacity = obs.alpha.filter(|a| !a.is_nan()).unwrap_or(self.alpha);
            let text = obs.label.clone().ok_or(RenderError::MissingRequiredField {
                row: i,
                field: Field::Label,
            })?;
            out.push(DrawOp::Line(LineOp {
                id: MarkId::for_row_part(self.namespace, obs.row_key, 0),
                line: Line::new(base, top),
                color,
                width: obs.number(Field::Stroke).unwrap_or(self.stroke),
                opacity,
            }));
            out.push(DrawOp::Text(TextOp {
                id: MarkId::for_row_part(self.namespace, obs.row_key, 1),
                anchor: top,
                text,
                angle: self.angle,
                justify: TextAnchor::Start,
                font_size: obs.size.filter(|s| s.is_finite()).unwrap_or(self.size)
                    * self.font_scale,
                color,
                opacity,
                check_overlap: self.check_overlap,
            }));
        }
        tracing::debug!(
            rows = batch.len(),
            labelled = selected.len(),
            n_max = self.n_max,
            "rendered timeline labels"
        );
        Ok(out)
    }

    fn required_fields(&self) -> &'static [Field] {
        Self::REQUIRED
    }
}
