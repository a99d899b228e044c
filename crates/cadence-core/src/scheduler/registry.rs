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

//! The delay registry: pending timed callbacks polled once per host tick.

use crate::config::TimingConfig;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;

/// Identifier of a scheduled callback.
///
/// Ids are assigned monotonically starting at 1 and never reused, even after
/// the callback fired or was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Returns the raw numeric value of the id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

struct TimedCallback {
    fire_at: f64,
    action: Box<dyn FnOnce()>,
}

/// Registry of pending delayed callbacks, driven by the host loop.
///
/// All operations take `&self` so that a callback holding an `Rc<Scheduler>`
/// can schedule, cancel or reschedule from inside [`tick`](Scheduler::tick).
/// Time is whatever the host passes to `tick`, in seconds; before the first
/// tick it is `0.0`.
pub struct Scheduler {
    pending: RefCell<HashMap<TimerId, TimedCallback>>,
    next_id: Cell<u64>,
    now: Cell<f64>,
    warn_on_backwards_time: bool,
}

impl Scheduler {
    /// Creates an empty scheduler at time `0.0`.
    pub fn new() -> Self {
        Self::from_config(&TimingConfig::default())
    }

    /// Creates an empty scheduler honouring the relevant settings of `config`.
    pub fn from_config(config: &TimingConfig) -> Self {
        Self {
            pending: RefCell::new(HashMap::new()),
            next_id: Cell::new(1),
            now: Cell::new(0.0),
            warn_on_backwards_time: config.warn_on_backwards_time,
        }
    }

    /// Returns the host time recorded by the most recent tick.
    pub fn now(&self) -> f64 {
        self.now.get()
    }

    /// Schedules `action` to run on the first tick later than `now + delay_secs`.
    ///
    /// Negative and NaN delays are treated as zero.
    pub fn schedule<F>(&self, action: F, delay_secs: f64) -> TimerId
    where
        F: FnOnce() + 'static,
    {
        let id = TimerId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let fire_at = self.now.get() + delay_secs.max(0.0);
        self.pending.borrow_mut().insert(
            id,
            TimedCallback {
                fire_at,
                action: Box::new(action),
            },
        );
        log::trace!("Scheduled {id} to fire after t={fire_at:.3}s");
        id
    }

    /// Removes a pending callback without running it.
    ///
    /// Returns `false` if the id is unknown, already fired or already cancelled.
    pub fn cancel(&self, id: TimerId) -> bool {
        let removed = self.pending.borrow_mut().remove(&id);
        match removed {
            Some(_) => {
                log::trace!("Cancelled {id}");
                true
            }
            None => false,
        }
    }

    /// Moves the fire time of a pending callback to `now + delay_secs`.
    ///
    /// The callback and its id are unchanged. Returns `false` if the id is not pending.
    pub fn reschedule(&self, id: TimerId, delay_secs: f64) -> bool {
        let fire_at = self.now.get() + delay_secs.max(0.0);
        match self.pending.borrow_mut().get_mut(&id) {
            Some(entry) => {
                entry.fire_at = fire_at;
                log::trace!("Rescheduled {id} to fire after t={fire_at:.3}s");
                true
            }
            None => false,
        }
    }

    /// Advances the registry to host time `now` and runs every overdue callback.
    ///
    /// A callback is overdue when its fire time is strictly earlier than `now`.
    /// Overdue entries are removed before any of them runs, so each fires
    /// exactly once; callbacks scheduled while this tick is running wait for a
    /// later tick. Overdue callbacks run ordered by fire time, then by id.
    ///
    /// A non-finite `now` is rejected: nothing fires and the previous time is kept.
    ///
    /// Returns the number of callbacks that fired.
    pub fn tick(&self, now: f64) -> usize {
        let previous = self.now.get();
        if !now.is_finite() {
            log::warn!("Ignoring tick with non-finite time {now}; keeping t={previous:.3}s");
            return 0;
        }
        if now < previous && self.warn_on_backwards_time {
            log::warn!("Scheduler time went backwards: {previous:.3}s -> {now:.3}s");
        }
        self.now.set(now);

        let mut due = {
            let mut pending = self.pending.borrow_mut();
            let due_ids: Vec<TimerId> = pending
                .iter()
                .filter(|(_, entry)| entry.fire_at < now)
                .map(|(id, _)| *id)
                .collect();
            let due: Vec<(TimerId, TimedCallback)> = due_ids
                .into_iter()
                .filter_map(|id| pending.remove(&id).map(|entry| (id, entry)))
                .collect();
            due
        };
        due.sort_by(|(a_id, a), (b_id, b)| {
            a.fire_at.total_cmp(&b.fire_at).then_with(|| a_id.cmp(b_id))
        });

        let fired = due.len();
        for (id, entry) in due {
            log::trace!("Firing {id} at t={now:.3}s");
            (entry.action)();
        }
        fired
    }

    /// Returns the number of pending callbacks.
    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Returns `true` if no callback is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    /// Returns `true` if `id` is scheduled and has not fired or been cancelled.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.borrow().contains_key(&id)
    }

    /// Returns the host time after which `id` fires, if it is pending.
    pub fn fire_time(&self, id: TimerId) -> Option<f64> {
        self.pending.borrow().get(&id).map(|entry| entry.fire_at)
    }

    /// Returns the seconds left before `id` becomes overdue, clamped at zero.
    pub fn time_remaining(&self, id: TimerId) -> Option<f64> {
        self.fire_time(id)
            .map(|fire_at| (fire_at - self.now.get()).max(0.0))
    }

    /// Drops every pending callback without running it.
    ///
    /// Returns how many callbacks were dropped. Ids are not recycled.
    pub fn clear(&self) -> usize {
        // Taken out first: dropping a callback's captures may call back into the registry.
        let taken = std::mem::take(&mut *self.pending.borrow_mut());
        let dropped = taken.len();
        drop(taken);
        if dropped > 0 {
            log::debug!("Cleared {dropped} pending callbacks");
        }
        dropped
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("now", &self.now.get())
            .field("pending", &self.len())
            .field("next_id", &self.next_id.get())
            .finish()
    }
}
