// Copyright 2025 the Quakeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump utilities for `quakeline_demo`.

use kurbo::{Point, Rect};
use peniko::Color;
use quakeline_core::{DrawOp, TextAnchor};

/// Rasterizes normalized panel ops (y up) into an SVG document (y down).
#[derive(Debug)]
pub(crate) struct SvgScene {
    /// Pixel rectangle the normalized `0..1` panel maps onto.
    plot: Rect,
    /// Full canvas, including margins for the axis and labels.
    canvas: Rect,
    ops: Vec<DrawOp>,
}

impl SvgScene {
    pub(crate) fn new(canvas: Rect, plot: Rect) -> Self {
        Self {
            plot,
            canvas,
            ops: Vec::new(),
        }
    }

    pub(crate) fn extend(&mut self, ops: impl IntoIterator<Item = DrawOp>) {
        self.ops.extend(ops);
    }

    fn to_px(&self, p: Point) -> Point {
        Point::new(
            self.plot.x0 + p.x * self.plot.width(),
            self.plot.y1 - p.y * self.plot.height(),
        )
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let view_box = self.canvas;
        let mut out = String::new();

        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        out.push_str(&format!(
            r#"viewBox="{} {} {} {}" width="{}" height="{}" preserveAspectRatio="xMinYMin meet">"#,
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height(),
            view_box.width(),
            view_box.height()
        ));
        out.push('\n');

        // Radii are in normalized units of the shorter panel side.
        let unit = self.plot.width().min(self.plot.height());
        for op in &self.ops {
            match op {
                DrawOp::Circle(c) => {
                    let center = self.to_px(c.circle.center);
                    out.push_str(&format!(
                        r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}""#,
                        center.x,
                        center.y,
                        c.circle.radius * unit,
                    ));
                    write_paint_attr(&mut out, "fill", c.fill, c.opacity);
                    if c.stroke_width > 0.0 {
                        write_paint_attr(&mut out, "stroke", c.stroke, c.opacity);
                        out.push_str(&format!(r#" stroke-width="{}""#, c.stroke_width));
                    }
                    out.push_str("/>\n");
                }
                DrawOp::Line(l) => {
                    let p0 = self.to_px(l.line.p0);
                    let p1 = self.to_px(l.line.p1);
                    out.push_str(&format!(
                        r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke-width="{}""#,
                        p0.x, p0.y, p1.x, p1.y, l.width
                    ));
                    write_paint_attr(&mut out, "stroke", l.color, l.opacity);
                    out.push_str("/>\n");
                }
                DrawOp::Text(t) => {
                    let pos = self.to_px(t.anchor);
                    out.push_str(&format!(
                        r#"<text x="{:.2}" y="{:.2}" font-size="{}""#,
                        pos.x, pos.y, t.font_size
                    ));
                    if t.angle != 0.0 {
                        // Counter-clockwise in y-up space is a negative SVG rotation.
                        out.push_str(&format!(
                            r#" transform="rotate({} {:.2} {:.2})""#,
                            -t.angle, pos.x, pos.y
                        ));
                    }
                    out.push_str(match t.justify {
                        TextAnchor::Start => r#" text-anchor="start""#,
                        TextAnchor::Middle => r#" text-anchor="middle""#,
                        TextAnchor::End => r#" text-anchor="end""#,
                    });
                    write_paint_attr(&mut out, "fill", t.color, t.opacity);
                    out.push('>');
                    out.push_str(&escape_xml(&t.text));
                    out.push_str("</text>\n");
                }
            }
        }

        out.push_str("</svg>\n");
        out
    }
}

fn svg_paint(color: Color, opacity: f32) -> (String, Option<f64>) {
    let rgba = color.to_rgba8();
    let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
    let alpha = f64::from(rgba.a) / 255.0 * f64::from(opacity);
    let fill_opacity = if alpha >= 1.0 { None } else { Some(alpha) };
    (fill, fill_opacity)
}

fn write_paint_attr(out: &mut String, name: &str, color: Color, opacity: f32) {
    let (value, opacity) = svg_paint(color, opacity);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o:.3}""#));
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use kurbo::{Circle, Line};
    use peniko::color::palette::css;
    use quakeline_core::{CircleOp, LineOp, MarkId, TextOp};

    use super::*;

    fn scene() -> SvgScene {
        SvgScene::new(
            Rect::new(0.0, 0.0, 200.0, 120.0),
            Rect::new(0.0, 20.0, 100.0, 120.0),
        )
    }

    #[test]
    fn flips_y_into_pixel_space() {
        let mut s = scene();
        s.extend([DrawOp::Line(LineOp {
            id: MarkId(1),
            line: Line::new((0.0, 0.0), (1.0, 1.0)),
            color: css::BLACK,
            width: 1.0,
            opacity: 1.0,
        })]);
        let svg = s.to_svg_string();
        assert!(
            svg.contains(r#"x1="0.00" y1="120.00" x2="100.00" y2="20.00""#),
            "{svg}"
        );
    }

    #[test]
    fn circles_carry_opacity_and_text_is_escaped() {
        let mut s = scene();
        s.extend([
            DrawOp::Circle(CircleOp {
                id: MarkId(1),
                circle: Circle::new((0.5, 0.5), 0.1),
                fill: css::RED,
                stroke: css::RED,
                stroke_width: 1.0,
                opacity: 0.5,
            }),
            DrawOp::Text(TextOp {
                id: MarkId(2),
                anchor: Point::new(0.5, 0.5),
                text: "Tohoku & <Sendai>".into(),
                angle: 45.0,
                justify: TextAnchor::Start,
                font_size: 12.0,
                color: css::GRAY,
                opacity: 1.0,
                check_overlap: true,
            }),
        ]);
        let svg = s.to_svg_string();
        assert!(svg.contains(r#"r="10.00""#), "{svg}");
        assert!(svg.contains(r#"fill-opacity="0.500""#), "{svg}");
        assert!(svg.contains("rotate(-45 50.00 70.00)"), "{svg}");
        assert!(svg.contains("Tohoku &amp; &lt;Sendai&gt;"), "{svg}");
    }
}
