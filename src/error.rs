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

/// Rejected configuration. A window built from bad knobs would silently
/// produce wrong ranges, so construction fails fast instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("`{field}` must be a finite, non-negative pixel value (got {value})")]
    InvalidPixels { field: &'static str, value: f32 },
}

impl ConfigError {
    /// The configuration field that was rejected.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidPixels { field, .. } => field,
        }
    }
}
