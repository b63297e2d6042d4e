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

//! Virtualized message windowing for chat transcript views.
//!
//! A conversation can accumulate thousands of messages, but only a handful fit
//! on screen. [`WindowManager`] decides which contiguous slice must actually be
//! materialized: the renderer reports scroll position and measured message
//! heights, the manager answers with a [`WindowState`] naming the slice plus
//! the top padding that stands in for everything scrolled out above it.
//!
//! Heights are not known until a message has been measured (they depend on
//! wrapped text, thinking panels, and streaming state), so unmeasured messages
//! fall back to a configured estimate and the cumulative-height index is
//! rebuilt lazily as measurements arrive.
//!
//! The manager is synchronous and single-session: one instance per open
//! conversation, discarded wholesale on session switch.

pub mod error;
pub mod perf;
pub mod window;

pub use error::ConfigError;
pub use window::{RefreshOutcome, Viewport, WindowConfig, WindowManager, WindowState};
