// Copyright 2025 the Quakeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A bottom time axis for timeline panels.
//!
//! The axis is emitted in the same normalized panel coordinates as the marks: the domain line
//! sits on `y = 0`, ticks and labels hang below it (negative `y`).

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::{Line, Point};
use peniko::Color;
use peniko::color::palette::css;
use quakeline_core::{DrawOp, LineOp, MarkId, TextAnchor, TextOp};

use crate::scale::ScaleContinuous;
use crate::time::{format_year, year_of};

/// A color + width pair for stroked lines (domain lines, ticks, baselines).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width.
    pub width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// A time axis along the bottom of a panel.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeAxisSpec {
    /// Stable-id namespace for the generated marks.
    pub namespace: u32,
    /// Approximate number of ticks.
    pub tick_count: usize,
    /// Tick length in normalized panel units.
    pub tick_size: f64,
    /// Gap between the tick end and the label anchor.
    pub label_padding: f64,
    /// Domain line and tick style.
    pub rule: StrokeStyle,
    /// Label color.
    pub label_color: Color,
    /// Label font size in points.
    pub label_font_size: f64,
    /// Optional axis title, centered below the labels.
    pub title: Option<String>,
}

impl TimeAxisSpec {
    /// Creates an axis with five ticks and black rules.
    pub fn new(namespace: u32) -> Self {
        Self {
            namespace,
            tick_count: 5,
            tick_size: 0.02,
            label_padding: 0.03,
            rule: StrokeStyle::default(),
            label_color: css::BLACK,
            label_font_size: 10.0,
            title: None,
        }
    }

    /// Sets the approximate tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Sets the domain line and tick style.
    pub fn with_rule(mut self, rule: StrokeStyle) -> Self {
        self.rule = rule;
        self
    }

    /// Sets the axis title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Generates the axis marks for an x scale whose range is `0..1`.
    pub fn marks(&self, scale: &ScaleContinuous) -> Vec<DrawOp> {
        let ticks = scale.ticks(self.tick_count);
        let mut out = Vec::with_capacity(2 * ticks.len() + 2);
        out.push(self.rule_op(0, Line::new((0.0, 0.0), (1.0, 0.0))));

        let label_y = -(self.tick_size + self.label_padding);
        for (i, &t) in ticks.iter().enumerate() {
            let x = scale.map(t);
            if !(0.0..=1.0).contains(&x) {
                continue;
            }
            let i = i as u64 + 1;
            out.push(self.rule_op(i, Line::new((x, 0.0), (x, -self.tick_size))));
            out.push(self.text_op(i, Point::new(x, label_y), format_year(year_of(t)).into()));
        }

        if let Some(title) = &self.title {
            let y = label_y - 2.0 * self.label_padding;
            out.push(self.text_op(u64::MAX, Point::new(0.5, y), Arc::from(title.as_str())));
        }
        out
    }

    fn rule_op(&self, key: u64, line: Line) -> DrawOp {
        DrawOp::Line(LineOp {
            id: MarkId::for_row_part(self.namespace, key, 0),
            line,
            color: self.rule.color,
            width: self.rule.width,
            opacity: 1.0,
        })
    }

    fn text_op(&self, key: u64, anchor: Point, text: Arc<str>) -> DrawOp {
        DrawOp::Text(TextOp {
            id: MarkId::for_row_part(self.namespace, key, 1),
            anchor,
            text,
            angle: 0.0,
            justify: TextAnchor::Middle,
            font_size: self.label_font_size,
            color: self.label_color,
            opacity: 1.0,
            check_overlap: false,
        })
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::scale::ScaleTime;
    use crate::time::days_from_civil;

    fn labels(ops: &[DrawOp]) -> Vec<&str> {
        ops.iter()
            .filter_map(|op| match op {
                DrawOp::Text(t) => Some(&*t.text),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn time_axis_labels_years() {
        let d0 = days_from_civil(2000, 1, 1) as f64;
        let d1 = days_from_civil(2020, 12, 31) as f64;
        let scale = ScaleContinuous::Time(ScaleTime::new((d0, d1), (0.0, 1.0)));
        let ops = TimeAxisSpec::new(9).with_tick_count(4).marks(&scale);
        assert_eq!(labels(&ops), alloc::vec!["2000", "2005", "2010", "2015", "2020"]);
        let DrawOp::Line(domain) = &ops[0] else {
            panic!("domain line comes first");
        };
        assert_eq!(domain.line, Line::new((0.0, 0.0), (1.0, 0.0)));
    }

    #[test]
    fn title_is_centered_below_labels() {
        let scale = ScaleContinuous::Time(ScaleTime::new((0.0, 3650.0), (0.0, 1.0)));
        let ops = TimeAxisSpec::new(9).with_title("DATE").marks(&scale);
        let Some(DrawOp::Text(title)) = ops.last() else {
            panic!("title is the last op");
        };
        assert_eq!(&*title.text, "DATE");
        assert_eq!(title.anchor.x, 0.5);
        assert!(title.anchor.y < 0.0, "below the domain line");
    }
}
