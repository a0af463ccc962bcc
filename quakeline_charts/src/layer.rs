// Copyright 2025 the Quakeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer registration: `geom_timeline` and `geom_timeline_label`.
//!
//! A [`Layer`] pairs a geom (one of the two renderers) with the options a plotting front-end
//! passes through: mapping, data override, missing-value policy and constant style overrides.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use peniko::Color;
use quakeline_core::{
    CoordinateMapper, DrawOp, Field, Observation, RenderError, Renderer, TableData,
};
use quakeline_transforms::drop_incomplete;

use crate::mapping::Mapping;
use crate::timeline_label::TimelineLabelSpec;
use crate::timeline_mark::TimelineMarkSpec;

/// Constant aesthetics that override mapped values for every row.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StyleOverrides {
    /// Constant color.
    pub color: Option<Color>,
    /// Constant opacity.
    pub alpha: Option<f32>,
    /// Constant size.
    pub size: Option<f64>,
    /// Constant outline / tick width.
    pub stroke: Option<f64>,
}

impl StyleOverrides {
    fn apply(&self, obs: &mut Observation) {
        if let Some(c) = self.color {
            obs.color = Some(c);
        }
        if let Some(a) = self.alpha {
            obs.alpha = Some(a);
        }
        if let Some(s) = self.size {
            obs.size = Some(s);
        }
        if let Some(s) = self.stroke {
            obs.stroke = Some(s);
        }
    }
}

/// Options accepted by [`geom_timeline`] and [`geom_timeline_label`].
#[derive(Clone, Debug)]
pub struct LayerOptions {
    /// Layer aesthetic mapping.
    pub mapping: Mapping,
    /// Row source overriding the plot's data.
    pub data: Option<Arc<dyn TableData + Send + Sync>>,
    /// Statistical transform name, passed through (`"identity"`).
    pub stat: String,
    /// Position adjustment name, passed through (`"identity"`).
    pub position: String,
    /// Drop rows missing required fields instead of failing the draw call.
    pub na_rm: bool,
    /// Legend visibility: `None` means "if any aesthetic is mapped".
    pub show_legend: Option<bool>,
    /// Merge the plot mapping under this layer's mapping.
    pub inherit_aes: bool,
    /// Constant style overrides.
    pub style: StyleOverrides,
    /// Label limit (label layers only; defaults to 3).
    pub n_max: Option<usize>,
}

impl Default for LayerOptions {
    fn default() -> Self {
        Self {
            mapping: Mapping::new(),
            data: None,
            stat: "identity".into(),
            position: "identity".into(),
            na_rm: false,
            show_legend: None,
            inherit_aes: true,
            style: StyleOverrides::default(),
            n_max: None,
        }
    }
}

impl LayerOptions {
    /// Options with the given mapping and everything else defaulted.
    pub fn new(mapping: Mapping) -> Self {
        Self {
            mapping,
            ..Self::default()
        }
    }

    /// Sets the data override.
    pub fn with_data(mut self, data: Arc<dyn TableData + Send + Sync>) -> Self {
        self.data = Some(data);
        self
    }

    /// Sets the missing-value policy.
    pub fn with_na_rm(mut self, na_rm: bool) -> Self {
        self.na_rm = na_rm;
        self
    }

    /// Sets legend visibility.
    pub fn with_show_legend(mut self, show_legend: Option<bool>) -> Self {
        self.show_legend = show_legend;
        self
    }

    /// Sets whether the plot mapping is inherited.
    pub fn with_inherit_aes(mut self, inherit_aes: bool) -> Self {
        self.inherit_aes = inherit_aes;
        self
    }

    /// Sets constant style overrides.
    pub fn with_style(mut self, style: StyleOverrides) -> Self {
        self.style = style;
        self
    }

    /// Sets the label limit.
    pub fn with_n_max(mut self, n_max: usize) -> Self {
        self.n_max = Some(n_max);
        self
    }
}

/// The renderer behind a layer.
#[derive(Clone, Debug, PartialEq)]
pub enum Geom {
    /// Points along a timeline.
    Timeline(TimelineMarkSpec),
    /// Ticks and rotated labels for the largest events.
    TimelineLabel(TimelineLabelSpec),
}

impl Renderer for Geom {
    fn render(
        &self,
        batch: &[Observation],
        mapper: &dyn CoordinateMapper,
    ) -> Result<Vec<DrawOp>, RenderError> {
        match self {
            Self::Timeline(g) => g.render(batch, mapper),
            Self::TimelineLabel(g) => g.render(batch, mapper),
        }
    }

    fn required_fields(&self) -> &'static [Field] {
        match self {
            Self::Timeline(g) => g.required_fields(),
            Self::TimelineLabel(g) => g.required_fields(),
        }
    }
}

/// A geom plus its layer options.
#[derive(Clone, Debug)]
pub struct Layer {
    /// The renderer.
    pub geom: Geom,
    /// Pass-through options.
    pub options: LayerOptions,
}

/// Creates a timeline point layer.
pub fn geom_timeline(options: LayerOptions) -> Layer {
    Layer {
        geom: Geom::Timeline(TimelineMarkSpec::new(1)),
        options,
    }
}

/// Creates a timeline label layer.
pub fn geom_timeline_label(options: LayerOptions) -> Layer {
    let mut spec = TimelineLabelSpec::new(2);
    if let Some(n_max) = options.n_max {
        spec = spec.with_n_max(n_max);
    }
    Layer {
        geom: Geom::TimelineLabel(spec),
        options,
    }
}

impl Layer {
    /// Replaces the geom's mark id namespace (needed when a chart has several layers of the
    /// same geom).
    pub fn with_namespace(mut self, namespace: u32) -> Self {
        match &mut self.geom {
            Geom::Timeline(g) => g.namespace = namespace,
            Geom::TimelineLabel(g) => g.namespace = namespace,
        }
        self
    }

    /// Whether this layer contributes to the legend.
    pub fn shows_legend(&self, plot_mapping: &Mapping) -> bool {
        self.options.show_legend.unwrap_or_else(|| {
            let m = self.effective_mapping(plot_mapping);
            [Field::Size, Field::Color, Field::Alpha]
                .into_iter()
                .any(|f| m.get(f).is_some())
        })
    }

    fn effective_mapping(&self, plot_mapping: &Mapping) -> Mapping {
        if self.options.inherit_aes {
            self.options.mapping.merged_over(plot_mapping)
        } else {
            self.options.mapping.clone()
        }
    }

    /// Binds this layer's rows: picks the data source, merges mappings, applies style overrides
    /// and the `na_rm` policy.
    pub fn observations(
        &self,
        plot_data: Option<&dyn TableData>,
        plot_mapping: &Mapping,
    ) -> Result<Vec<Observation>, RenderError> {
        let data: &dyn TableData = match (&self.options.data, plot_data) {
            (Some(own), _) => &**own,
            (None, Some(inherited)) => inherited,
            (None, None) => return Err(RenderError::MissingData),
        };
        let mut rows = self.effective_mapping(plot_mapping).bind(data)?;
        for obs in &mut rows {
            self.options.style.apply(obs);
        }
        if self.options.na_rm {
            let (kept, _dropped) = drop_incomplete(&rows, self.geom.required_fields());
            rows = kept;
        }
        Ok(rows)
    }

    /// Binds rows and renders them through `mapper`.
    pub fn render(
        &self,
        plot_data: Option<&dyn TableData>,
        plot_mapping: &Mapping,
        mapper: &dyn CoordinateMapper,
    ) -> Result<Vec<DrawOp>, RenderError> {
        let rows = self.observations(plot_data, plot_mapping)?;
        self.geom.render(&rows, mapper)
    }
}
