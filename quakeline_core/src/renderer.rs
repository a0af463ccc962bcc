// Copyright 2025 the Quakeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The renderer seam.

use alloc::vec::Vec;

use crate::{CoordinateMapper, DrawOp, Observation, RenderError};

/// A stateless draw-time transform from a batch of rows to drawing instructions.
///
/// Implementations validate the whole batch before emitting anything: a draw call either
/// returns every instruction or fails without partial output. Calling `render` twice with the
/// same batch and mapper returns equal instruction lists.
pub trait Renderer {
    /// Renders `batch` through `mapper`.
    fn render(
        &self,
        batch: &[Observation],
        mapper: &dyn CoordinateMapper,
    ) -> Result<Vec<DrawOp>, RenderError>;

    /// Fields each row must carry for [`Renderer::render`] to succeed.
    fn required_fields(&self) -> &'static [crate::Field];
}
