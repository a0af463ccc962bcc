// Copyright 2025 the Quakeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timeline marks for earthquake catalogs, built on `quakeline_core`.
//!
//! This crate provides:
//! - **Renderers**: [`TimelineMarkSpec`] (one point per event along a time axis, optionally
//!   stratified) and [`TimelineLabelSpec`] (a tick and rotated label above the largest events).
//! - **Scales** that map data values into normalized panel coordinates (`0..1`, y up), and a
//!   [`PanelMapper`] combining a time axis with a stratum axis.
//! - **Layers**: [`geom_timeline`] and [`geom_timeline_label`] bind a table through a
//!   [`Mapping`] and hand the rows to a renderer; [`TimelineChartSpec`] composes layers over one
//!   shared mapper with an optional [`TimeAxisSpec`].
//!
//! Positions are days since 1970-01-01; see [`days_from_civil`]. Text shaping is out of scope;
//! text ops carry unshaped strings.

#![no_std]

extern crate alloc;

mod axis;
mod chart;
mod color;
#[cfg(not(feature = "std"))]
mod float;
mod layer;
mod mapper;
mod mapping;
mod scale;
mod time;
mod timeline_label;
mod timeline_mark;
mod validate;

pub use axis::{StrokeStyle, TimeAxisSpec};
pub use chart::TimelineChartSpec;
pub use color::{AlphaScale, ColorScale};
pub use layer::{Geom, Layer, LayerOptions, StyleOverrides, geom_timeline, geom_timeline_label};
pub use mapper::PanelMapper;
pub use mapping::Mapping;
pub use scale::{ScaleContinuous, ScaleLinear, ScalePoint, ScaleTime, infer_domain};
pub use time::{civil_from_days, days_from_civil, format_year, nice_year_ticks, year_of};
pub use timeline_label::{RankScope, TimelineLabelSpec};
pub use timeline_mark::TimelineMarkSpec;
