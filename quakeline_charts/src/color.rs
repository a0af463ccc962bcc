// Copyright 2025 the Quakeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color and opacity scales for the `colour` and `alpha` aesthetics.

use alloc::vec::Vec;

use peniko::Color;

/// Maps a numeric or categorical attribute onto a color.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorScale {
    /// Continuous gradient between two colors, for numeric columns.
    Gradient {
        /// Color at the low end of the domain.
        low: Color,
        /// Color at the high end of the domain.
        high: Color,
    },
    /// Discrete palette indexed by level, for text columns. Levels past the end wrap around.
    Palette(Vec<Color>),
}

impl ColorScale {
    /// The default dark-to-light blue gradient.
    pub fn default_gradient() -> Self {
        Self::Gradient {
            low: Color::from_rgb8(0x13, 0x2b, 0x43),
            high: Color::from_rgb8(0x56, 0xb1, 0xf7),
        }
    }

    /// The default categorical palette.
    pub fn default_palette() -> Self {
        Self::Palette(alloc::vec![
            Color::from_rgb8(0xf8, 0x76, 0x6d),
            Color::from_rgb8(0x7c, 0xae, 0x00),
            Color::from_rgb8(0x00, 0xbf, 0xc4),
            Color::from_rgb8(0xc7, 0x7c, 0xff),
            Color::from_rgb8(0xe7, 0x86, 0x1a),
            Color::from_rgb8(0x00, 0xa9, 0xff),
        ])
    }

    /// Maps a position `t` in `0..=1` along a gradient (clamped).
    ///
    /// Palettes treat `t` as a fraction of their length.
    pub fn continuous(&self, t: f64) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Gradient { low, high } => lerp(*low, *high, t),
            Self::Palette(colors) => {
                if colors.is_empty() {
                    return fallback();
                }
                let last = colors.len() - 1;
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    reason = "t is clamped to 0..=1"
                )]
                let i = (t * last as f64 + 0.5) as usize;
                colors[i.min(last)]
            }
        }
    }

    /// Maps the level at `index` out of `count` levels.
    ///
    /// Gradients spread levels evenly from `low` to `high`.
    pub fn discrete(&self, index: usize, count: usize) -> Color {
        match self {
            Self::Palette(colors) if colors.is_empty() => fallback(),
            Self::Palette(colors) => colors[index % colors.len()],
            Self::Gradient { .. } => {
                let t = if count <= 1 {
                    0.0
                } else {
                    index as f64 / (count - 1) as f64
                };
                self.continuous(t)
            }
        }
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::default_gradient()
    }
}

fn fallback() -> Color {
    peniko::color::palette::css::GRAY
}

fn lerp(a: Color, b: Color, t: f64) -> Color {
    #[allow(clippy::cast_possible_truncation, reason = "t is in 0..=1")]
    let t = t as f32;
    let [a0, a1, a2, a3] = a.components;
    let [b0, b1, b2, b3] = b.components;
    Color::new([
        a0 + (b0 - a0) * t,
        a1 + (b1 - a1) * t,
        a2 + (b2 - a2) * t,
        a3 + (b3 - a3) * t,
    ])
}

/// Maps a numeric or categorical attribute onto an opacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlphaScale {
    /// Opacity at the low and high ends.
    pub range: (f32, f32),
}

impl AlphaScale {
    /// Creates an alpha scale over `range`.
    pub fn new(range: (f32, f32)) -> Self {
        Self { range }
    }

    /// Maps a position `t` in `0..=1` (clamped).
    pub fn continuous(&self, t: f64) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        #[allow(clippy::cast_possible_truncation, reason = "t is in 0..=1")]
        let t = t as f32;
        let (lo, hi) = self.range;
        lo + (hi - lo) * t
    }

    /// Maps the level at `index` out of `count` levels, spread evenly over the range.
    pub fn discrete(&self, index: usize, count: usize) -> f32 {
        if count <= 1 {
            return self.range.1;
        }
        self.continuous(index as f64 / (count - 1) as f64)
    }
}

impl Default for AlphaScale {
    fn default() -> Self {
        Self::new((0.1, 1.0))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn gradient_endpoints_match_low_and_high() {
        let scale = ColorScale::Gradient {
            low: css::BLACK,
            high: css::WHITE,
        };
        assert_eq!(scale.continuous(0.0), css::BLACK);
        assert_eq!(scale.continuous(1.0), css::WHITE);
        let mid = scale.continuous(0.5).components;
        assert!((mid[0] - 0.5).abs() < 1e-6, "midpoint {mid:?}");
        assert_eq!(scale.continuous(2.0), css::WHITE, "clamped");
    }

    #[test]
    fn palette_wraps_levels() {
        let scale = ColorScale::Palette(alloc::vec![css::RED, css::BLUE]);
        assert_eq!(scale.discrete(0, 3), css::RED);
        assert_eq!(scale.discrete(1, 3), css::BLUE);
        assert_eq!(scale.discrete(2, 3), css::RED);
    }

    #[test]
    fn alpha_spreads_over_range() {
        let a = AlphaScale::default();
        assert!((a.continuous(0.0) - 0.1).abs() < 1e-6, "low end");
        assert!((a.continuous(1.0) - 1.0).abs() < 1e-6, "high end");
        assert!((a.discrete(0, 1) - 1.0).abs() < 1e-6, "single level is opaque");
    }
}
