// Copyright 2025 the Quakeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stable mark identity.

/// A stable identifier for a drawing instruction.
///
/// Identity is derived from a renderer namespace, the source row key, and a part index (a label
/// emits a tick and a text for the same row), so redraws of the same batch produce the same ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Wraps a raw id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Derives the id of the mark drawn for `row_key` inside `namespace`.
    pub fn for_row(namespace: u32, row_key: u64) -> Self {
        Self::for_row_part(namespace, row_key, 0)
    }

    /// Derives the id of one part of a multi-part mark drawn for `row_key`.
    pub fn for_row_part(namespace: u32, row_key: u64, part: u8) -> Self {
        let seed = (u64::from(namespace) << 8) | u64::from(part);
        Self(mix(mix(seed) ^ row_key))
    }
}

// splitmix64 finalizer.
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
