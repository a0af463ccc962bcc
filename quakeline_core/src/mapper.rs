// Copyright 2025 the Quakeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The coordinate-mapping capability supplied by the host.

use kurbo::Point;

use crate::Observation;

/// A panel axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

/// A data-space value handed to a [`CoordinateMapper`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DataValue<'a> {
    /// A continuous value (dates are days since 1970-01-01).
    Number(f64),
    /// A categorical value.
    Category(&'a str),
    /// No value; for the stratum axis this selects the shared line.
    Missing,
}

/// Maps data-space values into normalized panel coordinates for the current panel.
pub trait CoordinateMapper {
    /// Maps `value` along `axis` into normalized panel space (`0..1`, y up).
    fn map(&self, value: DataValue<'_>, axis: Axis) -> f64;

    /// Maps an observation's `(position, stratum)` pair to a panel point.
    fn point(&self, obs: &Observation) -> Point {
        let y = match obs.stratum.as_deref() {
            Some(s) => DataValue::Category(s),
            None => DataValue::Missing,
        };
        Point::new(
            self.map(DataValue::Number(obs.position), Axis::X),
            self.map(y, Axis::Y),
        )
    }
}

impl<M: CoordinateMapper + ?Sized> CoordinateMapper for &M {
    fn map(&self, value: DataValue<'_>, axis: Axis) -> f64 {
        (**self).map(value, axis)
    }
}
