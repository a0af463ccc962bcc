// Copyright 2025 the Quakeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single-panel timeline chart composed of layers.

use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::Line;
use quakeline_core::{
    Axis, CoordinateMapper, DataValue, DrawOp, Field, LineOp, MarkId, Observation, RenderError,
    Renderer, TableData,
};
use quakeline_transforms::{CompareOp, Predicate, StratumIndex, filter};

use crate::axis::{StrokeStyle, TimeAxisSpec};
use crate::layer::Layer;
use crate::mapper::PanelMapper;
use crate::mapping::Mapping;
use crate::scale::{ScaleTime, infer_domain};
use crate::validate::check_required;

/// Mark id namespace of the stratum baselines.
const BASELINE_NAMESPACE: u32 = u32::MAX;

/// Plot-level data and mapping plus the layers drawn over them.
///
/// All layers share one [`PanelMapper`], fitted over the union of their bound rows so points
/// and labels line up.
#[derive(Clone, Debug)]
pub struct TimelineChartSpec {
    /// Plot data inherited by layers without their own.
    pub data: Option<Arc<dyn TableData + Send + Sync>>,
    /// Plot mapping inherited by layers with `inherit_aes`.
    pub mapping: Mapping,
    /// Layers, drawn in order.
    pub layers: Vec<Layer>,
    /// Lower bound of the visible position window.
    pub xmin: Option<f64>,
    /// Upper bound of the visible position window.
    pub xmax: Option<f64>,
    /// Fraction of the x span added on each side.
    pub pad: f64,
    /// One horizontal rule per stratum, drawn first.
    pub baselines: Option<StrokeStyle>,
    /// Bottom time axis.
    pub axis: Option<TimeAxisSpec>,
}

impl TimelineChartSpec {
    /// Creates a chart over `data` with the given plot mapping.
    pub fn new(data: Arc<dyn TableData + Send + Sync>, mapping: Mapping) -> Self {
        Self {
            data: Some(data),
            mapping,
            layers: Vec::new(),
            xmin: None,
            xmax: None,
            pad: 0.05,
            baselines: None,
            axis: None,
        }
    }

    /// Appends a layer.
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Restricts the chart to positions in `xmin..=xmax`.
    pub fn with_window(mut self, xmin: Option<f64>, xmax: Option<f64>) -> Self {
        self.xmin = xmin;
        self.xmax = xmax;
        self
    }

    /// Sets the x padding fraction.
    pub fn with_pad(mut self, pad: f64) -> Self {
        self.pad = pad;
        self
    }

    /// Draws a rule under each stratum.
    pub fn with_baselines(mut self, style: StrokeStyle) -> Self {
        self.baselines = Some(style);
        self
    }

    /// Adds a time axis.
    pub fn with_axis(mut self, axis: TimeAxisSpec) -> Self {
        self.axis = Some(axis);
        self
    }

    fn window(&self) -> Vec<Predicate> {
        let mut out = Vec::new();
        if let Some(min) = self.xmin {
            out.push(Predicate::new(Field::Position, CompareOp::Ge, min));
        }
        if let Some(max) = self.xmax {
            out.push(Predicate::new(Field::Position, CompareOp::Le, max));
        }
        out
    }

    /// Binds every layer, fits the shared mapper and returns it with each layer's rows.
    ///
    /// Rows are validated before the position window applies, so a row with a missing
    /// position fails the call instead of falling outside the window.
    pub fn prepare(&self) -> Result<(PanelMapper, Vec<Vec<Observation>>), RenderError> {
        let plot_data = self.data.as_deref().map(|d| d as &dyn TableData);
        let window = self.window();
        let mut batches = Vec::with_capacity(self.layers.len());
        for layer in &self.layers {
            let rows = layer.observations(plot_data, &self.mapping)?;
            check_required(&rows, layer.geom.required_fields())?;
            batches.push(if window.is_empty() {
                rows
            } else {
                filter(&rows, &window)
            });
        }

        let all: Vec<Observation> = batches.iter().flatten().cloned().collect();
        let (d0, d1) = match (self.xmin, self.xmax) {
            (Some(a), Some(b)) if a < b => (a, b),
            _ => infer_domain(&all, Field::Position).unwrap_or((0.0, 1.0)),
        };
        let span = d1 - d0;
        let margin = if span > 0.0 { span * self.pad } else { 1.0 };
        let x = ScaleTime::new((d0 - margin, d1 + margin), (0.0, 1.0));
        let mapper = PanelMapper::new(x, StratumIndex::from_batch(&all).sorted());
        Ok((mapper, batches))
    }

    /// Binds, fits and renders baselines, every layer and the axis.
    pub fn marks(&self) -> Result<Vec<DrawOp>, RenderError> {
        let (mapper, batches) = self.prepare()?;
        self.render(&mapper, &batches)
    }

    /// Renders the output of [`TimelineChartSpec::prepare`].
    ///
    /// `batches` holds one batch per layer, in layer order.
    pub fn render(
        &self,
        mapper: &PanelMapper,
        batches: &[Vec<Observation>],
    ) -> Result<Vec<DrawOp>, RenderError> {
        let mut out = self.baseline_ops(mapper);
        for (layer, rows) in self.layers.iter().zip(batches) {
            out.extend(layer.geom.render(rows, mapper)?);
        }
        if let Some(axis) = &self.axis {
            out.extend(axis.marks(&mapper.x_scale()));
        }
        tracing::debug!(
            layers = self.layers.len(),
            strata = mapper.strata().len(),
            ops = out.len(),
            "rendered timeline chart"
        );
        Ok(out)
    }

    fn baseline_ops(&self, mapper: &PanelMapper) -> Vec<DrawOp> {
        let Some(style) = self.baselines else {
            return Vec::new();
        };
        mapper
            .strata()
            .levels()
            .enumerate()
            .map(|(i, level)| {
                let value = level.map_or(DataValue::Missing, DataValue::Category);
                let y = mapper.map(value, Axis::Y);
                DrawOp::Line(LineOp {
                    id: MarkId::for_row_part(BASELINE_NAMESPACE, i as u64, 0),
                    line: Line::new((0.0, y), (1.0, y)),
                    color: style.color,
                    width: style.width,
                    opacity: 1.0,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use peniko::color::palette::css;
    use quakeline_core::ColumnTable;

    use super::*;
    use crate::layer::{LayerOptions, geom_timeline, geom_timeline_label};

    fn catalog() -> Arc<dyn TableData + Send + Sync> {
        Arc::new(
            ColumnTable::new()
                .with_numeric("date", vec![0.0, 100.0, 200.0, 300.0, 400.0])
                .with_text(
                    "country",
                    [Some("USA"), Some("CHINA"), Some("USA"), Some("CHINA"), Some("USA")],
                )
                .with_numeric("eq_primary", vec![5.0, 7.5, 6.1, 8.0, 4.2])
                .with_text(
                    "location",
                    [Some("A"), Some("B"), Some("C"), Some("D"), Some("E")],
                ),
        )
    }

    fn chart() -> TimelineChartSpec {
        let mapping = Mapping::new()
            .x("date")
            .y("country")
            .magnitude("eq_primary")
            .size("eq_primary")
            .label("location");
        TimelineChartSpec::new(catalog(), mapping)
            .with_layer(geom_timeline(LayerOptions::default()))
            .with_layer(geom_timeline_label(LayerOptions::default().with_n_max(2)))
    }

    fn texts(ops: &[DrawOp]) -> Vec<&str> {
        ops.iter()
            .filter_map(|op| match op {
                DrawOp::Text(t) => Some(&*t.text),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn layers_share_one_mapper() {
        let ops = chart().marks().unwrap();
        let circles = ops.iter().filter(|op| matches!(op, DrawOp::Circle(_))).count();
        assert_eq!(circles, 5);
        assert_eq!(texts(&ops), vec!["D", "B"]);

        // The label tick starts at its point's center.
        let d_circle = ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Circle(c) if c.id == MarkId::for_row(1, 3) => Some(c.circle.center),
                _ => None,
            })
            .unwrap();
        let d_tick = ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Line(l) if l.id == MarkId::for_row_part(2, 3, 0) => Some(l.line.p0),
                _ => None,
            })
            .unwrap();
        assert_eq!(d_circle, d_tick);
    }

    #[test]
    fn strata_are_sorted() {
        let (mapper, _) = chart().prepare().unwrap();
        let levels: Vec<Option<&str>> = mapper.strata().levels().collect();
        assert_eq!(levels, vec![Some("CHINA"), Some("USA")]);
    }

    #[test]
    fn window_filters_before_ranking() {
        let ops = chart().with_window(Some(150.0), None).marks().unwrap();
        let circles = ops.iter().filter(|op| matches!(op, DrawOp::Circle(_))).count();
        assert_eq!(circles, 3);
        assert_eq!(texts(&ops), vec!["D", "C"]);
    }

    #[test]
    fn baselines_and_axis_are_added() {
        let ops = chart()
            .with_baselines(StrokeStyle::solid(css::LIGHT_GRAY, 1.0))
            .with_axis(TimeAxisSpec::new(9))
            .marks()
            .unwrap();
        assert!(
            matches!(&ops[0], DrawOp::Line(l) if l.color == css::LIGHT_GRAY),
            "baselines first"
        );
        let rules = ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line(l) if l.color == css::LIGHT_GRAY))
            .count();
        assert_eq!(rules, 2, "one per stratum");
        assert!(texts(&ops).iter().any(|t| *t == "1970"), "year tick label");
    }

    #[test]
    fn window_does_not_hide_missing_positions() {
        let data: Arc<dyn TableData + Send + Sync> =
            Arc::new(ColumnTable::new().with_numeric("date", vec![10.0, f64::NAN, 20.0]));
        let spec = TimelineChartSpec::new(data, Mapping::new().x("date"))
            .with_layer(geom_timeline(LayerOptions::default()));
        let expected = RenderError::MissingRequiredField {
            row: 1,
            field: Field::Position,
        };
        assert_eq!(spec.marks().unwrap_err(), expected);
        let windowed = spec.clone().with_window(Some(0.0), None);
        assert_eq!(windowed.marks().unwrap_err(), expected);

        let dropped = TimelineChartSpec {
            layers: vec![geom_timeline(LayerOptions::default().with_na_rm(true))],
            ..windowed
        };
        assert_eq!(dropped.marks().unwrap().len(), 2, "na_rm drops the row instead");
    }

    #[test]
    fn prepared_batches_render_like_marks() {
        let spec = chart().with_axis(TimeAxisSpec::new(9));
        let (mapper, batches) = spec.prepare().unwrap();
        assert_eq!(batches.len(), 2);
        assert_eq!(spec.render(&mapper, &batches).unwrap(), spec.marks().unwrap());
    }

    #[test]
    fn missing_plot_data_is_reported() {
        let mut spec = chart();
        spec.data = None;
        assert_eq!(spec.marks().unwrap_err(), RenderError::MissingData);
    }
}
