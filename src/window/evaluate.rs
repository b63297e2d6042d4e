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

//! The pure range evaluator: cumulative heights + viewport in, window out.

use super::heights::PrefixIndex;
use super::{Viewport, WindowConfig, WindowState};

/// Result of one evaluation. `floor_consumed` reports that the backfill
/// floor was reached naturally and no longer needs to be held.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Evaluation {
    pub(crate) state: WindowState,
    pub(crate) floor_consumed: bool,
}

/// Compute the minimal materialized range covering the overscanned viewport.
///
/// The viewport maps to the pixel band `[scroll_top - overscan,
/// scroll_top + height + overscan]` in cumulative-height space; `start` is
/// the largest index whose top edge still covers the band's low end, `end`
/// the smallest exclusive index whose bottom edge clears the high end. Both
/// bounds clamp implicitly: a negative band floor becomes 0 and a band
/// ceiling past the total height yields `end == len`.
pub(crate) fn evaluate(
    index: &PrefixIndex,
    config: &WindowConfig,
    viewport: Viewport,
    floor: Option<usize>,
) -> Evaluation {
    let n = index.len();

    if n == 0 {
        return Evaluation { state: WindowState::default(), floor_consumed: floor.is_some() };
    }

    if n < config.activation_threshold {
        // Short transcript: render everything, no padding.
        let state = WindowState {
            enabled: false,
            start: 0,
            end: n,
            pad_top: 0.0,
            visible_height: index.total_height(),
        };
        return Evaluation { state, floor_consumed: floor.is_some() };
    }

    let low = (viewport.scroll_top - config.overscan).max(0.0);
    let high = viewport.scroll_top + viewport.height + config.overscan;

    let natural_start = index.last_at_or_before(low).min(n - 1);
    let (start, floor_consumed) = match floor {
        // The natural window already reaches the floor: the override is
        // consumed and the natural result stands.
        Some(f) if natural_start <= f => (natural_start, true),
        Some(f) => (f, false),
        None => (natural_start, false),
    };
    let end = index.first_after(high).clamp(start + 1, n);

    let pad_top = index.offset_of(start);
    let state = WindowState {
        enabled: true,
        start,
        end,
        pad_top,
        visible_height: index.offset_of(end) - pad_top,
    };
    Evaluation { state, floor_consumed }
}
