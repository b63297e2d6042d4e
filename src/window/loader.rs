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

//! Backward loading of older history.
//!
//! When the user scrolls up through messages that have scrolled out of the
//! window, the natural evaluator result would snap the window forward again
//! on the very next pass. The loader holds a floor index the window must not
//! contract past; each request retreats the floor by one chunk until it hits
//! the top of the locally known history.

/// Residual state of the incremental loader: the index the retained window
/// is currently pinned to, if any.
#[derive(Debug, Default)]
pub(crate) struct BackfillLoader {
    floor: Option<usize>,
}

impl BackfillLoader {
    /// Retreat the floor by `chunk` messages, starting from `anchor` (the
    /// most recent window start) when no floor is pinned yet. Returns `false`
    /// when the floor cannot move — the top of local history is already
    /// revealed and the caller should fetch more messages from the store.
    pub(crate) fn load_earlier(&mut self, anchor: usize, chunk: usize) -> bool {
        let from = self.floor.unwrap_or(anchor);
        let next = from.saturating_sub(chunk);
        if next == from {
            return false;
        }
        self.floor = Some(next);
        true
    }

    pub(crate) fn floor(&self) -> Option<usize> {
        self.floor
    }

    pub(crate) fn clear(&mut self) {
        self.floor = None;
    }
}
