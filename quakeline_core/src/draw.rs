// Copyright 2025 the Quakeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing instructions emitted by renderers.
//!
//! Coordinates are normalized panel coordinates: `x` and `y` both run `0..1`, with `y`
//! increasing upward. Hosts that draw in a y-down pixel space flip `y` when rasterizing.

use alloc::sync::Arc;

use kurbo::{Circle, Line, Point, Rect};
use peniko::Color;

use crate::MarkId;

/// Horizontal justification of a text run relative to its anchor point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the anchor (left-justified).
    #[default]
    Start,
    /// Text is centered on the anchor.
    Middle,
    /// Text ends at the anchor (right-justified).
    End,
}

/// A filled, outlined circle.
#[derive(Clone, Debug, PartialEq)]
pub struct CircleOp {
    /// Stable mark id.
    pub id: MarkId,
    /// Center and radius in normalized panel units.
    pub circle: Circle,
    /// Fill color.
    pub fill: Color,
    /// Outline color.
    pub stroke: Color,
    /// Outline width.
    pub stroke_width: f64,
    /// Opacity applied to both fill and outline.
    pub opacity: f32,
}

/// A stroked line segment.
#[derive(Clone, Debug, PartialEq)]
pub struct LineOp {
    /// Stable mark id.
    pub id: MarkId,
    /// Segment endpoints in normalized panel units.
    pub line: Line,
    /// Stroke color.
    pub color: Color,
    /// Stroke width.
    pub width: f64,
    /// Stroke opacity.
    pub opacity: f32,
}

/// A single line of (unshaped) text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextOp {
    /// Stable mark id.
    pub id: MarkId,
    /// Anchor point in normalized panel units.
    pub anchor: Point,
    /// Text content.
    pub text: Arc<str>,
    /// Counter-clockwise rotation about the anchor, in degrees.
    pub angle: f64,
    /// Justification relative to the anchor.
    pub justify: TextAnchor,
    /// Font size in points.
    pub font_size: f64,
    /// Fill color.
    pub color: Color,
    /// Fill opacity.
    pub opacity: f32,
    /// Hint that the host may skip this text when it overlaps text already drawn.
    pub check_overlap: bool,
}

/// A primitive drawing instruction.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// A circle.
    Circle(CircleOp),
    /// A line segment.
    Line(LineOp),
    /// A text run.
    Text(TextOp),
}

impl DrawOp {
    /// Returns the stable id of this instruction.
    pub fn id(&self) -> MarkId {
        match self {
            Self::Circle(c) => c.id,
            Self::Line(l) => l.id,
            Self::Text(t) => t.id,
        }
    }

    /// Returns the geometric bounds, if they are known without text measurement.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Circle(c) => {
                let r = c.circle.radius;
                let p = c.circle.center;
                Some(Rect::new(p.x - r, p.y - r, p.x + r, p.y + r))
            }
            Self::Line(l) => Some(Rect::from_points(l.line.p0, l.line.p1)),
            Self::Text(_) => None,
        }
    }
}

impl From<CircleOp> for DrawOp {
    fn from(value: CircleOp) -> Self {
        Self::Circle(value)
    }
}

impl From<LineOp> for DrawOp {
    fn from(value: LineOp) -> Self {
        Self::Line(value)
    }
}

impl From<TextOp> for DrawOp {
    fn from(value: TextOp) -> Self {
        Self::Text(value)
    }
}
