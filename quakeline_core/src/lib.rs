// Copyright 2025 the Quakeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for timeline marks.
//!
//! This crate is the contract between a host plotting layer and the timeline renderers:
//! - **Observations** are typed rows (one earthquake event each) with a required position and
//!   optional visual attributes.
//! - A **coordinate mapper** translates data-space values into normalized panel coordinates.
//! - **Drawing instructions** ([`DrawOp`]) are the renderer output: circles, line segments and
//!   rotated text, each with a stable [`MarkId`].
//!
//! Scales, renderers and layer registration live in `quakeline_charts`. Nothing here performs
//! I/O or keeps state between draw calls.

#![no_std]

extern crate alloc;

mod draw;
mod error;
mod id;
mod mapper;
mod observation;
mod renderer;
mod table;

pub use draw::{CircleOp, DrawOp, LineOp, TextAnchor, TextOp};
pub use error::{Field, RenderError};
pub use id::MarkId;
pub use mapper::{Axis, CoordinateMapper, DataValue};
pub use observation::Observation;
pub use renderer::Renderer;
pub use table::{Column, ColumnKind, ColumnTable, TableData};
