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

//! Error types for the timing context and its configuration.

use std::fmt;

/// An error raised while setting up or configuring the timing context.
///
/// Registry lookups (`cancel`, `reschedule`) never produce errors; they report
/// their outcome as a `bool`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimingError {
    /// A timing context already owns the scheduler on this update thread and
    /// the configured policy keeps the first instance.
    AlreadyInitialized,
    /// The configuration could not be parsed or holds an invalid value.
    InvalidConfig(String),
    /// The configuration file could not be read or written.
    ConfigIo {
        /// The path that failed.
        path: String,
        /// The underlying I/O error message.
        details: String,
    },
}

impl fmt::Display for TimingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimingError::AlreadyInitialized => {
                write!(f, "A timing context is already initialized on this thread")
            }
            TimingError::InvalidConfig(details) => {
                write!(f, "Invalid timing configuration: {details}")
            }
            TimingError::ConfigIo { path, details } => {
                write!(f, "Failed to access timing configuration '{path}': {details}")
            }
        }
    }
}

impl std::error::Error for TimingError {}

impl From<serde_json::Error> for TimingError {
    fn from(err: serde_json::Error) -> Self {
        TimingError::InvalidConfig(err.to_string())
    }
}
