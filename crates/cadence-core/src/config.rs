// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Timing context configuration.
//!
//! Settings are plain data with serde support so hosts can ship them as JSON
//! next to their other engine settings. Every field has a default, so a
//! partial document (or `{}`) is valid.

use crate::error::TimingError;
use serde::{Deserialize, Serialize};

/// What happens when a second timing context is initialized while the first
/// one is still alive on the same update thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoubleInitPolicy {
    /// Log a warning and reject the new context. The first one stays authoritative.
    #[default]
    KeepFirst,
    /// Log a warning and make the new context authoritative.
    Replace,
}

/// Configuration for a [`TimingContext`](crate::context::TimingContext).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Default capacity for caches created through the context.
    /// `0` means unbounded.
    pub memo_capacity: usize,
    /// Policy applied on double initialization.
    pub double_init_policy: DoubleInitPolicy,
    /// Whether a tick whose time is earlier than the previous one is logged.
    pub warn_on_backwards_time: bool,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            memo_capacity: 128,
            double_init_policy: DoubleInitPolicy::KeepFirst,
            warn_on_backwards_time: true,
        }
    }
}

impl TimingConfig {
    /// Load configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, TimingError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, TimingError> {
        let content = std::fs::read_to_string(path).map_err(|e| TimingError::ConfigIo {
            path: path.to_string(),
            details: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    /// Save configuration to a JSON file.
    pub fn to_file(&self, path: &str) -> Result<(), TimingError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| TimingError::ConfigIo {
            path: path.to_string(),
            details: e.to_string(),
        })
    }
}
