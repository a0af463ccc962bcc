// Copyright 2025 the Quakeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw-call errors.

use core::fmt;

/// An observation field (aesthetic) that a renderer or mapping refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Horizontal data-space position (`x`).
    Position,
    /// Categorical stratum placing rows on parallel lines (`y`).
    Stratum,
    /// Ranking key for labels.
    Magnitude,
    /// Size attribute.
    Size,
    /// Color attribute.
    Color,
    /// Opacity attribute.
    Alpha,
    /// Outline / tick width.
    Stroke,
    /// Label text.
    Label,
}

impl Field {
    /// Returns the aesthetic name used in mappings and messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Position => "x",
            Self::Stratum => "y",
            Self::Magnitude => "magnitude",
            Self::Size => "size",
            Self::Color => "colour",
            Self::Alpha => "alpha",
            Self::Stroke => "stroke",
            Self::Label => "label",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors returned by a draw call.
///
/// An empty batch is not an error (it renders nothing), and an all-zero size column is not an
/// error either (sizes normalize to a constant).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderError {
    /// A row lacks a field the renderer needs.
    MissingRequiredField {
        /// Index of the offending row within the batch.
        row: usize,
        /// The missing field.
        field: Field,
    },
    /// A layer's mapping has no column bound to a required aesthetic.
    UnboundAesthetic {
        /// The unbound aesthetic.
        field: Field,
    },
    /// A layer has neither its own data nor inherited plot data.
    MissingData,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequiredField { row, field } => {
                write!(f, "row {row} is missing required field `{field}`")
            }
            Self::UnboundAesthetic { field } => {
                write!(f, "required aesthetic `{field}` is not mapped to a column")
            }
            Self::MissingData => f.write_str("layer has no data and none to inherit"),
        }
    }
}

impl core::error::Error for RenderError {}
