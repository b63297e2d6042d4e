// chat-window — virtualized message windowing for chat transcript views
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Measured heights and the cumulative index derived from them.
//!
//! [`HeightCache`] is the one genuinely mutable piece of state in the crate:
//! a map from message id to the last height the renderer reported for it.
//! [`PrefixIndex`] is derived — `prefix[i]` is the pixel offset of message `i`
//! from the top of the full transcript, `prefix[n]` the total height. Heights
//! of earlier messages can change at any time (a streamed reply keeps
//! growing), so the index is rebuilt in one linear pass instead of patched.

use std::collections::HashMap;

/// Last-measured pixel height per message id. Entries appear lazily as the
/// renderer measures real elements; ids never measured fall back to the
/// configured estimate.
#[derive(Debug, Default)]
pub(crate) struct HeightCache {
    measured: HashMap<String, f32>,
}

impl HeightCache {
    pub(crate) fn new() -> Self {
        Self { measured: HashMap::new() }
    }

    /// Store a measurement. Returns `true` when the stored value changed, so
    /// the caller knows whether the prefix index went stale.
    pub(crate) fn record(&mut self, id: &str, px: f32) -> bool {
        let px = if px.is_finite() && px >= 0.0 {
            px
        } else {
            tracing::warn!(id, px, "ignoring invalid height measurement, clamping to 0");
            0.0
        };
        match self.measured.get(id) {
            Some(&previous) if previous == px => false,
            _ => {
                self.measured.insert(id.to_owned(), px);
                true
            }
        }
    }

    pub(crate) fn height_of(&self, id: &str, estimated: f32) -> f32 {
        self.measured.get(id).copied().unwrap_or(estimated)
    }

    pub(crate) fn contains(&self, id: &str) -> bool {
        self.measured.contains_key(id)
    }

    pub(crate) fn len(&self) -> usize {
        self.measured.len()
    }

    /// Drop measurements for ids that left the session.
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.measured.retain(|id, _| keep(id));
    }
}

/// Cumulative heights over the current message order: `prefix[0] = 0`,
/// `prefix[i] = Σ height(messages[0..i])`, `prefix[n] = total`. Rebuilt
/// whole whenever the order or any height changes.
#[derive(Debug, Default)]
pub(crate) struct PrefixIndex {
    prefix: Vec<f32>,
}

impl PrefixIndex {
    pub(crate) fn rebuild(&mut self, ids: &[String], cache: &HeightCache, estimated: f32) {
        self.prefix.clear();
        self.prefix.reserve(ids.len() + 1);
        self.prefix.push(0.0);
        let mut cursor = 0.0f32;
        for id in ids {
            cursor += cache.height_of(id, estimated);
            self.prefix.push(cursor);
        }
    }

    /// Number of messages covered by the index.
    pub(crate) fn len(&self) -> usize {
        self.prefix.len().saturating_sub(1)
    }

    pub(crate) fn total_height(&self) -> f32 {
        self.prefix.last().copied().unwrap_or(0.0)
    }

    /// Pixel offset of the top edge of message `index` (equals the total
    /// height when `index == len`).
    pub(crate) fn offset_of(&self, index: usize) -> f32 {
        self.prefix.get(index).copied().unwrap_or_else(|| self.total_height())
    }

    /// Largest message index whose top edge sits at or above `y`.
    /// Always valid for a non-empty index since `prefix[0] = 0`.
    pub(crate) fn last_at_or_before(&self, y: f32) -> usize {
        let n = self.len();
        if n == 0 {
            return 0;
        }
        self.prefix[..n].partition_point(|&p| p <= y).saturating_sub(1)
    }

    /// Smallest exclusive end index whose bottom edge clears `y`; `len + 1`
    /// when the whole transcript sits at or above `y` (callers clamp).
    pub(crate) fn first_after(&self, y: f32) -> usize {
        self.prefix.partition_point(|&p| p <= y)
    }
}
