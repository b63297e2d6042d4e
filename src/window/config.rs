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

use crate::error::ConfigError;

pub const DEFAULT_ESTIMATED_HEIGHT: f32 = 96.0;
pub const DEFAULT_OVERSCAN: f32 = 480.0;
pub const DEFAULT_ACTIVATION_THRESHOLD: usize = 60;
pub const DEFAULT_LOAD_CHUNK_SIZE: usize = 30;

/// Tuning knobs for one window manager instance.
///
/// Pixel knobs must be finite and non-negative; [`WindowConfig::validate`]
/// rejects anything else at construction time. The count knobs are unsigned,
/// so the invalid cases are unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowConfig {
    /// Height assumed for a message that has not been measured yet.
    pub estimated_height: f32,
    /// Pixels of slack materialized beyond the viewport on each side, so fast
    /// scrolling does not reveal blank gaps before the next evaluation lands.
    pub overscan: f32,
    /// Message count below which virtualization stays disabled. Short
    /// transcripts render in full; that is cheaper than maintaining a window.
    pub activation_threshold: usize,
    /// How many older messages each `load_earlier` call reveals.
    pub load_chunk_size: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            estimated_height: DEFAULT_ESTIMATED_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
            activation_threshold: DEFAULT_ACTIVATION_THRESHOLD,
            load_chunk_size: DEFAULT_LOAD_CHUNK_SIZE,
        }
    }
}

impl WindowConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_pixels("estimated_height", self.estimated_height)?;
        check_pixels("overscan", self.overscan)?;
        Ok(())
    }
}

fn check_pixels(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidPixels { field, value })
    }
}
