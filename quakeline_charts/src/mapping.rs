// Copyright 2025 the Quakeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Aesthetic mappings: which table column feeds which observation field.

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;

use peniko::Color;
use quakeline_core::{ColumnKind, Field, Observation, RenderError, TableData};
use quakeline_transforms::StratumIndex;

use crate::color::{AlphaScale, ColorScale};
use crate::scale::ScaleLinear;

/// Column bindings per aesthetic, plus the scales used for `colour` and `alpha`.
///
/// Numeric columns bound to `colour` use [`Mapping::color_scale`] (a gradient by default)
/// over the column's finite range; text columns use the default palette in first-seen order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mapping {
    bindings: BTreeMap<Field, Arc<str>>,
    /// Color scale for numeric `colour` columns. Defaults to a blue gradient.
    pub color_scale: Option<ColorScale>,
    /// Alpha scale for `alpha` columns. Defaults to `0.1..=1.0`.
    pub alpha_scale: Option<AlphaScale>,
}

impl Mapping {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `field` to column `col`.
    pub fn with(mut self, field: Field, col: impl Into<Arc<str>>) -> Self {
        self.bindings.insert(field, col.into());
        self
    }

    /// Binds the position (`x`) column.
    pub fn x(self, col: impl Into<Arc<str>>) -> Self {
        self.with(Field::Position, col)
    }

    /// Binds the stratum (`y`) column.
    pub fn y(self, col: impl Into<Arc<str>>) -> Self {
        self.with(Field::Stratum, col)
    }

    /// Binds the magnitude column.
    pub fn magnitude(self, col: impl Into<Arc<str>>) -> Self {
        self.with(Field::Magnitude, col)
    }

    /// Binds the size column.
    pub fn size(self, col: impl Into<Arc<str>>) -> Self {
        self.with(Field::Size, col)
    }

    /// Binds the colour column.
    pub fn colour(self, col: impl Into<Arc<str>>) -> Self {
        self.with(Field::Color, col)
    }

    /// Binds the alpha column.
    pub fn alpha(self, col: impl Into<Arc<str>>) -> Self {
        self.with(Field::Alpha, col)
    }

    /// Binds the stroke column.
    pub fn stroke(self, col: impl Into<Arc<str>>) -> Self {
        self.with(Field::Stroke, col)
    }

    /// Binds the label column.
    pub fn label(self, col: impl Into<Arc<str>>) -> Self {
        self.with(Field::Label, col)
    }

    /// Sets the color scale.
    pub fn with_color_scale(mut self, scale: ColorScale) -> Self {
        self.color_scale = Some(scale);
        self
    }

    /// Sets the alpha scale.
    pub fn with_alpha_scale(mut self, scale: AlphaScale) -> Self {
        self.alpha_scale = Some(scale);
        self
    }

    /// Returns the column bound to `field`.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.bindings.get(&field).map(|c| &**c)
    }

    /// Returns this mapping layered over `parent`: bindings and scales set here win.
    pub fn merged_over(&self, parent: &Self) -> Self {
        let mut bindings = parent.bindings.clone();
        bindings.extend(self.bindings.iter().map(|(f, c)| (*f, c.clone())));
        Self {
            bindings,
            color_scale: self.color_scale.clone().or_else(|| parent.color_scale.clone()),
            alpha_scale: self.alpha_scale.or(parent.alpha_scale),
        }
    }

    /// Binds every row of `data` into an observation.
    ///
    /// Missing cells become missing fields; whether that is an error is up to the renderer.
    pub fn bind(&self, data: &dyn TableData) -> Result<Vec<Observation>, RenderError> {
        let Some(x) = self.get(Field::Position) else {
            return Err(RenderError::UnboundAesthetic {
                field: Field::Position,
            });
        };
        for (field, col) in &self.bindings {
            if data.column_kind(col).is_none() {
                tracing::warn!(aesthetic = field.name(), column = &**col, "unknown column");
            }
        }

        let n = data.row_count();
        let colors = self.bind_colors(data, n);
        let alphas = self.bind_alphas(data, n);
        let number = |field: Field, row: usize| {
            self.get(field)
                .and_then(|c| data.f64(row, c))
                .filter(|v| !v.is_nan())
        };
        let text = |field: Field, row: usize| self.get(field).and_then(|c| cell_text(data, row, c));

        let out = (0..n)
            .map(|row| Observation {
                row_key: data.row_key(row),
                position: data.f64(row, x).unwrap_or(f64::NAN),
                stratum: text(Field::Stratum, row),
                magnitude: number(Field::Magnitude, row),
                size: number(Field::Size, row),
                color: colors.get(row).copied().flatten(),
                alpha: alphas.get(row).copied().flatten(),
                stroke: number(Field::Stroke, row),
                label: text(Field::Label, row),
            })
            .collect();
        Ok(out)
    }

    fn bind_colors(&self, data: &dyn TableData, n: usize) -> Vec<Option<Color>> {
        let Some(col) = self.get(Field::Color) else {
            return Vec::new();
        };
        match data.column_kind(col) {
            Some(ColumnKind::Numeric) => {
                let scale = self
                    .color_scale
                    .clone()
                    .unwrap_or_else(ColorScale::default_gradient);
                let Some(unit) = unit_scale(data, n, col) else {
                    return Vec::new();
                };
                (0..n)
                    .map(|row| {
                        data.f64(row, col)
                            .filter(|v| v.is_finite())
                            .map(|v| scale.continuous(unit.map(v)))
                    })
                    .collect()
            }
            Some(ColumnKind::Text) => {
                let scale = match &self.color_scale {
                    Some(s @ ColorScale::Palette(_)) => s.clone(),
                    _ => ColorScale::default_palette(),
                };
                let (levels, ids) = level_ids(data, n, col);
                ids.into_iter()
                    .map(|id| id.map(|i| scale.discrete(i, levels)))
                    .collect()
            }
            None => Vec::new(),
        }
    }

    fn bind_alphas(&self, data: &dyn TableData, n: usize) -> Vec<Option<f32>> {
        let Some(col) = self.get(Field::Alpha) else {
            return Vec::new();
        };
        let scale = self.alpha_scale.unwrap_or_default();
        match data.column_kind(col) {
            Some(ColumnKind::Numeric) => {
                let Some(unit) = unit_scale(data, n, col) else {
                    return Vec::new();
                };
                (0..n)
                    .map(|row| {
                        data.f64(row, col)
                            .filter(|v| v.is_finite())
                            .map(|v| scale.continuous(unit.map(v)))
                    })
                    .collect()
            }
            Some(ColumnKind::Text) => {
                let (levels, ids) = level_ids(data, n, col);
                ids.into_iter()
                    .map(|id| id.map(|i| scale.discrete(i, levels)))
                    .collect()
            }
            None => Vec::new(),
        }
    }
}

fn cell_text(data: &dyn TableData, row: usize, col: &str) -> Option<Arc<str>> {
    match data.column_kind(col)? {
        ColumnKind::Text => data.text(row, col),
        ColumnKind::Numeric => data
            .f64(row, col)
            .filter(|v| !v.is_nan())
            .map(|v| alloc::format!("{v}").into()),
    }
}

/// A scale from the column's finite range onto `0..1`.
fn unit_scale(data: &dyn TableData, n: usize, col: &str) -> Option<ScaleLinear> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in (0..n).filter_map(|row| data.f64(row, col)) {
        if v.is_finite() {
            min = min.min(v);
            max = max.max(v);
        }
    }
    (min <= max).then(|| ScaleLinear::new((min, max), (0.0, 1.0)))
}

/// Level count and per-row level index for a text column, in first-seen order.
fn level_ids(data: &dyn TableData, n: usize, col: &str) -> (usize, Vec<Option<usize>>) {
    let mut levels = StratumIndex::new();
    let ids = (0..n)
        .map(|row| data.text(row, col).map(|t| levels.insert(Some(t))))
        .collect();
    (levels.len(), ids)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use peniko::color::palette::css;
    use quakeline_core::ColumnTable;

    use super::*;

    fn catalog() -> ColumnTable {
        ColumnTable::new()
            .with_numeric("date", vec![100.0, 200.0, f64::NAN])
            .with_text("country", [Some("JAPAN"), Some("CHILE"), Some("JAPAN")])
            .with_numeric("eq_primary", vec![9.0, 8.8, 7.0])
            .with_numeric("deaths", vec![10.0, 20.0, 30.0])
            .with_text("location", [Some("Honshu"), None, Some("Kobe")])
    }

    #[test]
    fn binds_columns_into_observations() {
        let m = Mapping::new()
            .x("date")
            .y("country")
            .size("eq_primary")
            .magnitude("eq_primary")
            .label("location");
        let rows = m.bind(&catalog()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].position, 100.0);
        assert_eq!(rows[1].stratum.as_deref(), Some("CHILE"));
        assert_eq!(rows[1].label, None);
        assert_eq!(rows[2].size, Some(7.0));
        assert!(rows[2].position.is_nan(), "missing date stays missing");
        assert_eq!(rows[0].color, None, "colour unbound");
    }

    #[test]
    fn unbound_x_is_an_error() {
        let err = Mapping::new().y("country").bind(&catalog()).unwrap_err();
        assert_eq!(
            err,
            RenderError::UnboundAesthetic {
                field: Field::Position
            }
        );
    }

    #[test]
    fn numeric_colour_spans_the_gradient() {
        let m = Mapping::new()
            .x("date")
            .colour("deaths")
            .with_color_scale(ColorScale::Gradient {
                low: css::BLACK,
                high: css::WHITE,
            });
        let rows = m.bind(&catalog()).unwrap();
        assert_eq!(rows[0].color, Some(css::BLACK));
        assert_eq!(rows[2].color, Some(css::WHITE));
    }

    #[test]
    fn text_colour_and_alpha_use_levels() {
        let m = Mapping::new()
            .x("date")
            .colour("country")
            .alpha("country")
            .with_color_scale(ColorScale::Palette(vec![css::RED, css::BLUE]));
        let rows = m.bind(&catalog()).unwrap();
        assert_eq!(rows[0].color, Some(css::RED));
        assert_eq!(rows[1].color, Some(css::BLUE));
        assert_eq!(rows[2].color, Some(css::RED));
        let a0 = rows[0].alpha.unwrap();
        let a1 = rows[1].alpha.unwrap();
        assert!((a0 - 0.1).abs() < 1e-6 && (a1 - 1.0).abs() < 1e-6, "{a0} {a1}");
    }

    #[test]
    fn layer_bindings_win_when_merged() {
        let plot = Mapping::new().x("date").label("location");
        let layer = Mapping::new().label("country");
        let merged = layer.merged_over(&plot);
        assert_eq!(merged.get(Field::Position), Some("date"));
        assert_eq!(merged.get(Field::Label), Some("country"));
    }
}
