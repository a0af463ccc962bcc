// Copyright 2025 the Quakeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The typed observation row.

use alloc::sync::Arc;

use peniko::Color;

use crate::Field;

/// One observation (for example one earthquake event).
///
/// Only `position` is always present; every other attribute is optional and falls back to the
/// consuming renderer's defaults. A `NaN` position marks a missing value.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    /// Stable row key, used for mark identity.
    pub row_key: u64,
    /// Horizontal data-space position.
    pub position: f64,
    /// Optional stratum; rows without one share a single line.
    pub stratum: Option<Arc<str>>,
    /// Ranking key for labels.
    pub magnitude: Option<f64>,
    /// Size attribute (batch-normalized by the point renderer).
    pub size: Option<f64>,
    /// Already-scaled color.
    pub color: Option<Color>,
    /// Already-scaled opacity in `0..=1`.
    pub alpha: Option<f32>,
    /// Outline / tick width.
    pub stroke: Option<f64>,
    /// Label text.
    pub label: Option<Arc<str>>,
}

impl Observation {
    /// Creates a row with only a position.
    pub fn new(row_key: u64, position: f64) -> Self {
        Self {
            row_key,
            position,
            stratum: None,
            magnitude: None,
            size: None,
            color: None,
            alpha: None,
            stroke: None,
            label: None,
        }
    }

    /// Sets the stratum.
    pub fn with_stratum(mut self, stratum: impl Into<Arc<str>>) -> Self {
        self.stratum = Some(stratum.into());
        self
    }

    /// Sets the magnitude.
    pub fn with_magnitude(mut self, magnitude: f64) -> Self {
        self.magnitude = Some(magnitude);
        self
    }

    /// Sets the size.
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Sets the opacity.
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// Sets the outline width.
    pub fn with_stroke(mut self, stroke: f64) -> Self {
        self.stroke = Some(stroke);
        self
    }

    /// Sets the label text.
    pub fn with_label(mut self, label: impl Into<Arc<str>>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns whether `field` carries a usable value.
    ///
    /// Numeric fields must be present and not `NaN`; position and magnitude must also be
    /// finite, since they are mapped and ranked.
    pub fn has(&self, field: Field) -> bool {
        match field {
            Field::Position => self.position.is_finite(),
            Field::Stratum => self.stratum.is_some(),
            Field::Magnitude => self.magnitude.is_some_and(f64::is_finite),
            Field::Size => self.size.is_some_and(|s| !s.is_nan()),
            Field::Color => self.color.is_some(),
            Field::Alpha => self.alpha.is_some_and(|a| !a.is_nan()),
            Field::Stroke => self.stroke.is_some_and(|s| !s.is_nan()),
            Field::Label => self.label.is_some(),
        }
    }

    /// Returns the numeric value of `field`, if it is a numeric field and present.
    pub fn number(&self, field: Field) -> Option<f64> {
        match field {
            Field::Position => Some(self.position),
            Field::Magnitude => self.magnitude,
            Field::Size => self.size,
            Field::Alpha => self.alpha.map(f64::from),
            Field::Stroke => self.stroke,
            Field::Stratum | Field::Color | Field::Label => None,
        }
        .filter(|v| !v.is_nan())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn nan_counts_as_missing() {
        let obs = Observation::new(0, f64::NAN).with_magnitude(f64::NAN);
        assert!(!obs.has(Field::Position), "NaN position is missing");
        assert!(!obs.has(Field::Magnitude), "NaN magnitude is missing");
        assert_eq!(obs.number(Field::Position), None);
    }

    #[test]
    fn infinite_position_and_magnitude_are_unusable() {
        let obs = Observation::new(0, f64::INFINITY).with_magnitude(f64::NEG_INFINITY);
        assert!(!obs.has(Field::Position), "infinite position cannot be mapped");
        assert!(!obs.has(Field::Magnitude), "infinite magnitude cannot be ranked");
        let obs = Observation::new(1, 2.0).with_size(f64::INFINITY);
        assert!(obs.has(Field::Size), "size only rejects NaN");
    }

    #[test]
    fn builders_populate_fields() {
        let obs = Observation::new(3, 10.0)
            .with_stratum("Chile")
            .with_magnitude(8.8)
            .with_label("Maule");
        assert!(obs.has(Field::Stratum), "stratum set");
        assert_eq!(obs.number(Field::Magnitude), Some(8.8));
        assert_eq!(obs.label.as_deref(), Some("Maule"));
        assert!(!obs.has(Field::Size), "size unset");
    }
}
