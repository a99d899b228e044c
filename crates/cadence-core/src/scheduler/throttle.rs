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

//! Leading-edge throttle driven by the scheduler's host time.

use super::registry::Scheduler;
use std::fmt;

/// Runs `func` at most once per `delay`-second window, on the leading edge.
///
/// Calls arriving inside the window are dropped, not deferred.
pub struct Throttle<F> {
    func: F,
    delay: f64,
    next_allowed: f64,
}

impl<F> Throttle<F>
where
    F: FnMut(),
{
    /// Wraps `func`. The first window opens strictly after the scheduler's current time.
    ///
    /// Negative and NaN delays are treated as zero.
    pub fn new(func: F, delay: f64, scheduler: &Scheduler) -> Self {
        Self {
            func,
            delay: delay.max(0.0),
            next_allowed: scheduler.now(),
        }
    }

    /// Invokes `func` if the window has passed.
    ///
    /// Returns `true` when `func` ran.
    pub fn call(&mut self, scheduler: &Scheduler) -> bool {
        let now = scheduler.now();
        if now > self.next_allowed {
            (self.func)();
            self.next_allowed = now + self.delay;
            true
        } else {
            false
        }
    }

    /// Reopens the window at the scheduler's current time.
    pub fn reset(&mut self, scheduler: &Scheduler) {
        self.next_allowed = scheduler.now();
    }

    /// Returns the throttle window in seconds.
    pub fn delay(&self) -> f64 {
        self.delay
    }

    /// Returns the host time after which the next call is allowed.
    pub fn next_allowed(&self) -> f64 {
        self.next_allowed
    }
}

impl<F> fmt::Debug for Throttle<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throttle")
            .field("delay", &self.delay)
            .field("next_allowed", &self.next_allowed)
            .finish()
    }
}
