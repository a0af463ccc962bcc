// Copyright 2025 the Quakeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use quakeline_core::{Field, Observation, RenderError};

/// Fails on the first row (in input order) that lacks one of `required`.
pub(crate) fn check_required(batch: &[Observation], required: &[Field]) -> Result<(), RenderError> {
    for (row, obs) in batch.iter().enumerate() {
        if let Some(&field) = required.iter().find(|&&f| !obs.has(f)) {
            return Err(RenderError::MissingRequiredField { row, field });
        }
    }
    Ok(())
}
