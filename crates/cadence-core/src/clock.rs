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

//! Host time sources.
//!
//! The scheduler never reads a clock on its own; the host samples one of
//! these once per frame and hands the value to
//! [`TimingContext::update`](crate::context::TimingContext::update).

use crate::utils::timer::Stopwatch;
use std::cell::Cell;

/// A monotonic source of host time in seconds.
pub trait TimeSource {
    /// Returns the current host time in seconds.
    fn now_secs(&self) -> f64;
}

/// Wall-clock time in seconds since the clock was created.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock {
    origin: Stopwatch,
}

impl MonotonicClock {
    /// Creates a clock whose origin is now.
    pub fn new() -> Self {
        Self {
            origin: Stopwatch::new(),
        }
    }
}

impl TimeSource for MonotonicClock {
    fn now_secs(&self) -> f64 {
        self.origin.elapsed_secs_f64()
    }
}

/// A clock advanced explicitly by the host, e.g. a fixed-step simulation or a test.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    /// Creates a clock reading `start` seconds.
    pub fn new(start: f64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Sets the current time.
    pub fn set(&self, secs: f64) {
        self.now.set(secs);
    }

    /// Moves the clock forward by `delta` seconds and returns the new time.
    pub fn advance(&self, delta: f64) -> f64 {
        let next = self.now.get() + delta;
        self.now.set(next);
        next
    }
}

impl TimeSource for ManualClock {
    fn now_secs(&self) -> f64 {
        self.now.get()
    }
}
