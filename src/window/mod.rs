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

//! The message-window manager: decides which slice of a conversation must be
//! materialized for the current scroll position, tracking per-message heights
//! that are only known once the renderer has measured them.

mod config;
mod evaluate;
mod heights;
mod loader;

pub use config::{
    DEFAULT_ACTIVATION_THRESHOLD, DEFAULT_ESTIMATED_HEIGHT, DEFAULT_LOAD_CHUNK_SIZE,
    DEFAULT_OVERSCAN, WindowConfig,
};

use crate::error::ConfigError;
use heights::{HeightCache, PrefixIndex};
use loader::BackfillLoader;

// ---------------------------------------------------------------------------
// Window state values
// ---------------------------------------------------------------------------

/// The renderer's view of the current scroll container.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    /// Scroll offset of the viewport top, in pixels from the transcript top.
    pub scroll_top: f32,
    /// Visible height of the viewport, in pixels.
    pub height: f32,
}

/// One evaluated window: the slice of messages to materialize and the padding
/// standing in for everything above it.
///
/// `start..end` is a half-open index range into the ordered message list;
/// `end <= start` means nothing to render. When `enabled` is `false` the
/// range covers the whole transcript and `pad_top` is zero — short
/// conversations bypass virtualization entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WindowState {
    pub enabled: bool,
    /// First materialized message index.
    pub start: usize,
    /// One past the last materialized message index.
    pub end: usize,
    /// Cumulative height of the messages above `start`; rendered as a
    /// placeholder so the scrollbar behaves as if the full list existed.
    pub pad_top: f32,
    /// Cumulative height of the materialized slice itself.
    pub visible_height: f32,
}

impl WindowState {
    /// The materialized slice as a range, suitable for `messages[range]`.
    #[must_use]
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Placeholder height below the slice, given the transcript total.
    #[must_use]
    pub fn pad_bottom(&self, total_height: f32) -> f32 {
        (total_height - self.pad_top - self.visible_height).max(0.0)
    }
}

/// Result of a [`WindowManager::refresh`] pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefreshOutcome {
    /// Cumulative height of the whole transcript after the rebuild.
    pub total_height: f32,
    /// Change in `pad_top` versus the previous window. The renderer applies
    /// this to the native scroll offset synchronously so on-screen content
    /// does not jump when an off-screen message grows or shrinks.
    pub pad_delta: f32,
    /// The window recomputed against the last known viewport.
    pub window: WindowState,
}

// ---------------------------------------------------------------------------
// Manager
// ---------------------------------------------------------------------------

/// Virtualized-scrolling engine for one conversation.
///
/// Owns the height cache for exactly one session; switching sessions means
/// constructing a fresh manager (message ids are unique per session, so
/// cross-session height reuse is meaningless). All operations are synchronous
/// and complete before returning — hosts with concurrent height writers must
/// serialize "record height, then refresh" as one unit.
pub struct WindowManager {
    config: WindowConfig,
    messages: Vec<String>,
    cache: HeightCache,
    index: PrefixIndex,
    loader: BackfillLoader,
    viewport: Viewport,
    window: WindowState,
    /// Set when heights or the message order changed since the last prefix
    /// rebuild; cleared by the rebuild in `evaluate`/`refresh`.
    dirty: bool,
}

impl WindowManager {
    /// Build a manager for a new session. Fails fast on invalid knobs rather
    /// than producing silently wrong windows later.
    pub fn new(config: WindowConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        tracing::debug!(
            estimated_height = config.estimated_height,
            overscan = config.overscan,
            activation_threshold = config.activation_threshold,
            load_chunk_size = config.load_chunk_size,
            "window manager created"
        );
        Ok(Self {
            config,
            messages: Vec::new(),
            cache: HeightCache::new(),
            index: PrefixIndex::default(),
            loader: BackfillLoader::default(),
            viewport: Viewport::default(),
            window: WindowState::default(),
            dirty: true,
        })
    }

    /// Replace the retained message order. This is the store's change
    /// notification: appends, removals, and (unexpected) reorders all land
    /// here and are handled as a full rebuild on the next evaluation.
    /// Measurements for ids that left the session are dropped.
    pub fn set_messages<S: Into<String>>(&mut self, ids: impl IntoIterator<Item = S>) {
        self.messages = ids.into_iter().map(Into::into).collect();
        let keep: std::collections::HashSet<&str> =
            self.messages.iter().map(String::as_str).collect();
        self.cache.retain(|id| keep.contains(id));
        self.dirty = true;
        tracing::trace!(messages = self.messages.len(), measured = self.cache.len(), "messages replaced");
    }

    /// Record a measured height for one message. Cheap; the O(n) prefix
    /// rebuild is deferred to the next `evaluate`/`refresh`, so a burst of
    /// streaming deltas between frames costs one rebuild, not one per token.
    pub fn report_height(&mut self, id: &str, px: f32) {
        if self.cache.record(id, px) {
            self.dirty = true;
        }
    }

    /// Convert a scroll position and viewport size into the window to
    /// materialize. Pure over current inputs plus the height cache; calling
    /// it twice with the same inputs yields the same state.
    pub fn evaluate(&mut self, scroll_top: f32, viewport_height: f32) -> WindowState {
        self.viewport = Viewport { scroll_top, height: viewport_height };
        self.ensure_index();
        let eval =
            evaluate::evaluate(&self.index, &self.config, self.viewport, self.loader.floor());
        if eval.floor_consumed {
            self.loader.clear();
        }
        self.window = eval.state;
        tracing::trace!(
            scroll_top,
            viewport_height,
            enabled = eval.state.enabled,
            start = eval.state.start,
            end = eval.state.end,
            "window evaluated"
        );
        eval.state
    }

    /// Rebuild the cumulative index and recompute the window against the last
    /// known viewport. Called after heights change (typically once per frame
    /// while a reply streams). The returned `pad_delta` lets the renderer
    /// compensate the scroll offset in the same frame.
    pub fn refresh(&mut self) -> RefreshOutcome {
        let previous_pad = self.window.pad_top;
        self.ensure_index();
        let eval =
            evaluate::evaluate(&self.index, &self.config, self.viewport, self.loader.floor());
        if eval.floor_consumed {
            self.loader.clear();
        }
        self.window = eval.state;
        let outcome = RefreshOutcome {
            total_height: self.index.total_height(),
            pad_delta: eval.state.pad_top - previous_pad,
            window: eval.state,
        };
        tracing::trace!(
            total_height = outcome.total_height,
            pad_delta = outcome.pad_delta,
            "window refreshed"
        );
        outcome
    }

    /// Allow the retained window to extend one chunk further back in history
    /// than the natural evaluator result, so the user can scroll up through
    /// older messages without the window snapping forward on the next pass.
    ///
    /// Returns `false` when nothing more can be revealed locally — the floor
    /// is already at the first message — signalling the caller to fetch more
    /// history from the store rather than retry.
    pub fn load_earlier(&mut self) -> bool {
        let moved = self.loader.load_earlier(self.window.start, self.config.load_chunk_size);
        tracing::debug!(moved, floor = ?self.loader.floor(), "load earlier requested");
        moved
    }

    /// Drop the pending backfill floor and the retained viewport. Session
    /// switches should construct a fresh manager instead; this covers hosts
    /// that reuse the allocation for the same session.
    pub fn reset(&mut self) {
        self.loader.clear();
        self.viewport = Viewport::default();
        self.window = WindowState::default();
        tracing::debug!("window manager reset");
    }

    /// The last computed window, for hosts that missed a return value.
    #[must_use]
    pub fn window(&self) -> WindowState {
        self.window
    }

    #[must_use]
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub(crate) fn ensure_index(&mut self) {
        if !self.dirty {
            return;
        }
        let _timer = crate::perf::start_with("window::rebuild_prefix", "n", self.messages.len());
        self.index.rebuild(&self.messages, &self.cache, self.config.estimated_height);
        self.dirty = false;
    }
}
