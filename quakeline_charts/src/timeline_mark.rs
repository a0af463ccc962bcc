// Copyright 2025 the Quakeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The timeline point mark.

use alloc::vec::Vec;

use kurbo::{Circle, Line, Point};
use peniko::Color;
use peniko::color::palette::css;
use quakeline_core::{
    Axis, CircleOp, CoordinateMapper, DataValue, DrawOp, Field, LineOp, MarkId, Observation,
    RenderError, Renderer,
};
use quakeline_transforms::{StratumIndex, normalize_by_max};

use crate::axis::StrokeStyle;
use crate::validate::check_required;

/// One circle per observation along a (possibly stratified) time axis.
///
/// Sizes are normalized against the largest size in the batch, so the biggest event in each
/// draw call always gets a radius of `radius_scale`.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineMarkSpec {
    /// Mark id namespace.
    pub namespace: u32,
    /// Radius, in normalized panel units, of a row whose normalized size is `1.0`.
    pub radius_scale: f64,
    /// Color for rows without one.
    pub color: Color,
    /// Size for rows without one.
    pub size: f64,
    /// Opacity for rows without one.
    pub alpha: f32,
    /// Outline width for rows without one.
    pub stroke: f64,
    /// Optional style for one horizontal baseline per stratum, drawn below the points.
    pub baselines: Option<StrokeStyle>,
}

impl TimelineMarkSpec {
    const REQUIRED: &'static [Field] = &[Field::Position];

    /// Creates a spec with gray, half-transparent, unit-size points.
    pub fn new(namespace: u32) -> Self {
        Self {
            namespace,
            radius_scale: 1.0 / 25.0,
            color: css::GRAY,
            size: 1.0,
            alpha: 0.5,
            stroke: 1.0,
            baselines: None,
        }
    }

    /// Sets the radius of the largest point.
    pub fn with_radius_scale(mut self, radius_scale: f64) -> Self {
        self.radius_scale = radius_scale;
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

    /// Sets the default outline width.
    pub fn with_stroke(mut self, stroke: f64) -> Self {
        self.stroke = stroke;
        self
    }

    /// Enables per-stratum baselines.
    pub fn with_baselines(mut self, style: StrokeStyle) -> Self {
        self.baselines = Some(style);
        self
    }

    fn baseline_ops(&self, batch: &[Observation], mapper: &dyn CoordinateMapper) -> Vec<DrawOp> {
        let Some(style) = &self.baselines else {
            return Vec::new();
        };
        StratumIndex::from_batch(batch)
            .levels()
            .enumerate()
            .map(|(i, level)| {
                let value = level.map_or(DataValue::Missing, DataValue::Category);
                let y = mapper.map(value, Axis::Y);
                DrawOp::Line(LineOp {
                    id: MarkId::for_row_part(self.namespace, i as u64, 1),
                    line: Line::new((0.0, y), (1.0, y)),
                    color: style.color,
                    width: style.width,
                    opacity: 1.0,
                })
            })
            .collect()
    }
}

impl Default for TimelineMarkSpec {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Renderer for TimelineMarkSpec {
    fn render(
        &self,
        batch: &[Observation],
        mapper: &dyn CoordinateMapper,
    ) -> Result<Vec<DrawOp>, RenderError> {
        check_required(batch, Self::REQUIRED)?;

        let sizes: Vec<f64> = batch
            .iter()
            .map(|o| o.size.filter(|s| s.is_finite()).unwrap_or(self.size))
            .collect();
        let normalized = normalize_by_max(&sizes);

        let mut out = self.baseline_ops(batch, mapper);
        out.reserve(batch.len());
        for (obs, &n) in batch.iter().zip(&normalized.values) {
            let center: Point = mapper.point(obs);
            let color = obs.color.unwrap_or(self.color);
            out.push(DrawOp::Circle(CircleOp {
                id: MarkId::for_row(self.namespace, obs.row_key),
                circle: Circle::new(center, (n * self.radius_scale).max(0.0)),
                fill: color,
                stroke: color,
                stroke_width: obs.number(Field::Stroke).unwrap_or(self.stroke),
                opacity: obs.alpha.filter(|a| !a.is_nan()).unwrap_or(self.alpha),
            }));
        }
        tracing::debug!(rows = batch.len(), ops = out.len(), "rendered timeline");
        Ok(out)
    }

    fn required_fields(&self) -> &'static [Field] {
        Self::REQUIRED
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::mapper::PanelMapper;

    fn circles(ops: &[DrawOp]) -> Vec<&CircleOp> {
        ops.iter()
            .filter_map(|op| match op {
                DrawOp::Circle(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn one_circle_per_row_with_batch_relative_radii() {
        let batch = vec![
            Observation::new(0, 0.0).with_size(2.0),
            Observation::new(1, 1.0).with_size(4.0),
            Observation::new(2, 2.0).with_size(8.0),
        ];
        let mapper = PanelMapper::fit(&batch, 0.0);
        let spec = TimelineMarkSpec::new(1).with_radius_scale(1.0);
        let ops = spec.render(&batch, &mapper).unwrap();
        assert_eq!(ops.len(), 3);
        let radii: Vec<f64> = circles(&ops).iter().map(|c| c.circle.radius).collect();
        assert_eq!(radii, vec![0.25, 0.5, 1.0]);
    }

    #[test]
    fn default_radius_is_one_twenty_fifth() {
        let batch = vec![Observation::new(0, 0.0).with_size(3.0)];
        let mapper = PanelMapper::fit(&batch, 0.1);
        let ops = TimelineMarkSpec::default().render(&batch, &mapper).unwrap();
        let c = circles(&ops)[0];
        assert!((c.circle.radius - 0.04).abs() < 1e-12, "radius {}", c.circle.radius);
    }

    #[test]
    fn defaults_fill_missing_attributes() {
        let batch = vec![
            Observation::new(0, 0.0),
            Observation::new(1, 1.0)
                .with_color(css::RED)
                .with_alpha(0.9)
                .with_stroke(2.0),
        ];
        let mapper = PanelMapper::fit(&batch, 0.0);
        let ops = TimelineMarkSpec::new(0).render(&batch, &mapper).unwrap();
        let cs = circles(&ops);
        assert_eq!(cs[0].fill, css::GRAY);
        assert_eq!(cs[0].opacity, 0.5);
        assert_eq!(cs[0].stroke_width, 1.0);
        assert_eq!(cs[1].fill, css::RED);
        assert_eq!(cs[1].stroke, css::RED);
        assert_eq!(cs[1].opacity, 0.9);
        assert_eq!(cs[1].stroke_width, 2.0);
    }

    #[test]
    fn all_zero_sizes_do_not_divide_by_zero() {
        let batch = vec![
            Observation::new(0, 0.0).with_size(0.0),
            Observation::new(1, 1.0).with_size(0.0),
        ];
        let mapper = PanelMapper::fit(&batch, 0.0);
        let ops = TimelineMarkSpec::new(0).render(&batch, &mapper).unwrap();
        for c in circles(&ops) {
            assert!(c.circle.radius.is_finite(), "finite radius");
            assert!((c.circle.radius - 0.04).abs() < 1e-12, "constant radius");
        }
    }

    #[test]
    fn empty_batch_renders_nothing() {
        let mapper = PanelMapper::fit(&[], 0.0);
        let ops = TimelineMarkSpec::new(0).render(&[], &mapper).unwrap();
        assert!(ops.is_empty(), "no rows, no ops");
    }

    #[test]
    fn missing_position_fails_the_call() {
        let batch = vec![Observation::new(0, 1.0), Observation::new(1, f64::NAN)];
        let mapper = PanelMapper::fit(&batch, 0.0);
        let err = TimelineMarkSpec::new(0).render(&batch, &mapper).unwrap_err();
        assert_eq!(
            err,
            RenderError::MissingRequiredField {
                row: 1,
                field: Field::Position
            }
        );
    }

    #[test]
    fn infinite_position_fails_the_call() {
        let batch = vec![Observation::new(0, 0.0), Observation::new(1, f64::INFINITY)];
        let mapper = PanelMapper::fit(&batch, 0.0);
        let err = TimelineMarkSpec::new(0).render(&batch, &mapper).unwrap_err();
        assert_eq!(
            err,
            RenderError::MissingRequiredField {
                row: 1,
                field: Field::Position
            }
        );
    }

    #[test]
    fn nan_attributes_fall_back_to_defaults() {
        let batch = vec![
            Observation::new(0, 0.0)
                .with_size(f64::NAN)
                .with_stroke(f64::NAN)
                .with_alpha(f32::NAN),
        ];
        let mapper = PanelMapper::fit(&batch, 0.0);
        let ops = TimelineMarkSpec::new(0).render(&batch, &mapper).unwrap();
        let c = circles(&ops)[0];
        assert_eq!(c.stroke_width, 1.0);
        assert_eq!(c.opacity, 0.5);
        assert!(
            (c.circle.radius - 0.04).abs() < 1e-12,
            "default size, radius {}",
            c.circle.radius
        );
    }

    #[test]
    fn rendering_twice_is_identical() {
        let batch = vec![
            Observation::new(10, 3.0).with_stratum("PERU").with_size(6.0),
            Observation::new(11, 5.0).with_stratum("CHILE").with_size(8.8),
        ];
        let mapper = PanelMapper::fit(&batch, 0.05);
        let spec = TimelineMarkSpec::new(4).with_baselines(StrokeStyle::default());
        let a = spec.render(&batch, &mapper).unwrap();
        let b = spec.render(&batch, &mapper).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn baselines_precede_points_one_per_stratum() {
        let batch = vec![
            Observation::new(0, 0.0).with_stratum("PERU"),
            Observation::new(1, 1.0).with_stratum("CHILE"),
            Observation::new(2, 2.0).with_stratum("PERU"),
        ];
        let mapper = PanelMapper::fit(&batch, 0.0);
        let ops = TimelineMarkSpec::new(0)
            .with_baselines(StrokeStyle::default())
            .render(&batch, &mapper)
            .unwrap();
        assert_eq!(ops.len(), 5);
        let DrawOp::Line(first) = &ops[0] else {
            panic!("expected a baseline first, got {:?}", ops[0]);
        };
        assert_eq!(first.line.p0.x, 0.0);
        assert_eq!(first.line.p1.x, 1.0);
        assert_eq!(first.line.p0.y, mapper.point(&batch[0]).y);
        assert_eq!(circles(&ops).len(), 3);
    }
}
