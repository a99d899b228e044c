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

//! Trailing-edge debounce on top of the delay registry.

use super::registry::{Scheduler, TimerId};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

struct DebounceState<F> {
    func: RefCell<F>,
    pending: Cell<Option<TimerId>>,
}

/// Collapses a burst of calls into one invocation of `func`, `delay` seconds
/// after the last call of the burst.
///
/// A burst keeps a single registry entry alive and pushes its fire time
/// forward on every call.
pub struct Debounce<F> {
    state: Rc<DebounceState<F>>,
    delay: f64,
}

impl<F> Debounce<F>
where
    F: FnMut() + 'static,
{
    /// Wraps `func` with a debounce window of `delay` seconds.
    pub fn new(func: F, delay: f64) -> Self {
        Self {
            state: Rc::new(DebounceState {
                func: RefCell::new(func),
                pending: Cell::new(None),
            }),
            delay,
        }
    }

    /// Registers a call.
    ///
    /// Returns the id of the registry entry that will run `func`.
    pub fn call(&self, scheduler: &Scheduler) -> TimerId {
        if let Some(id) = self.state.pending.get() {
            if scheduler.reschedule(id, self.delay) {
                return id;
            }
            // The entry vanished without firing (cleared or cancelled externally).
            log::debug!("Debounced {id} is no longer pending; scheduling a new call");
        }

        let state = Rc::clone(&self.state);
        let own_id = Rc::new(Cell::new(None));
        let fired_id = Rc::clone(&own_id);
        let id = scheduler.schedule(
            move || {
                (state.func.borrow_mut())();
                // `func` may have re-armed the debouncer; keep that newer entry.
                if state.pending.get() == fired_id.get() {
                    state.pending.set(None);
                }
            },
            self.delay,
        );
        own_id.set(Some(id));
        self.state.pending.set(Some(id));
        id
    }

    /// Drops the pending call, if any, without invoking `func`.
    pub fn cancel(&self, scheduler: &Scheduler) -> bool {
        match self.state.pending.take() {
            Some(id) => scheduler.cancel(id),
            None => false,
        }
    }

    /// Returns `true` while a call is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.state.pending.get().is_some()
    }

    /// Returns the debounce window in seconds.
    pub fn delay(&self) -> f64 {
        self.delay
    }
}

impl<F> fmt::Debug for Debounce<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounce")
            .field("delay", &self.delay)
            .field("pending", &self.state.pending.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting_debounce(delay: f64) -> (Rc<Cell<u32>>, Debounce<impl FnMut() + 'static>) {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        (count, Debounce::new(move || c.set(c.get() + 1), delay))
    }

    #[test]
    fn burst_collapses_into_one_call() {
        let scheduler = Scheduler::new();
        let (count, debounced) = counting_debounce(1.0);

        let first = debounced.call(&scheduler);
        for step in 1..=5 {
            scheduler.tick(step as f64 * 0.5);
            let id = debounced.call(&scheduler);
            assert_eq!(id, first, "A burst must reuse the same registry entry");
        }
        assert_eq!(scheduler.len(), 1);
        assert_eq!(count.get(), 0);

        // Last call at t=2.5, so the call fires on the first tick after t=3.5.
        scheduler.tick(3.5);
        assert_eq!(count.get(), 0);
        scheduler.tick(3.6);
        assert_eq!(count.get(), 1);
        assert!(!debounced.is_pending());

        scheduler.tick(10.0);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn new_burst_after_fire_schedules_fresh_entry() {
        let scheduler = Scheduler::new();
        let (count, debounced) = counting_debounce(0.5);

        let first = debounced.call(&scheduler);
        scheduler.tick(1.0);
        assert_eq!(count.get(), 1);

        let second = debounced.call(&scheduler);
        assert_ne!(first, second);
        assert!(debounced.is_pending());
        scheduler.tick(2.0);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn cancel_drops_pending_call() {
        let scheduler = Scheduler::new();
        let (count, debounced) = counting_debounce(1.0);

        debounced.call(&scheduler);
        assert!(debounced.cancel(&scheduler));
        assert!(!debounced.is_pending());
        assert!(!debounced.cancel(&scheduler));

        scheduler.tick(5.0);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn recovers_when_registry_is_cleared() {
        let scheduler = Scheduler::new();
        let (count, debounced) = counting_debounce(1.0);

        let first = debounced.call(&scheduler);
        scheduler.clear();

        let second = debounced.call(&scheduler);
        assert_ne!(first, second);
        scheduler.tick(2.0);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn rearming_from_func_keeps_a_single_entry() {
        type Rearming = Debounce<Box<dyn FnMut()>>;

        let scheduler = Rc::new(Scheduler::new());
        let count = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<Rc<Rearming>>>> = Rc::new(RefCell::new(None));

        let runs = Rc::clone(&count);
        let handle = Rc::clone(&slot);
        let inner_scheduler = Rc::clone(&scheduler);
        let debounced: Rc<Rearming> = Rc::new(Debounce::new(
            Box::new(move || {
                runs.set(runs.get() + 1);
                if runs.get() == 1 {
                    let this = handle.borrow().clone().expect("Debouncer is registered");
                    this.call(&inner_scheduler);
                }
            }),
            1.0,
        ));
        *slot.borrow_mut() = Some(Rc::clone(&debounced));

        debounced.call(&scheduler);
        scheduler.tick(1.5);
        assert_eq!(count.get(), 1);
        assert!(debounced.is_pending(), "The re-armed call must stay tracked");
        assert_eq!(scheduler.len(), 1);

        debounced.call(&scheduler);
        assert_eq!(scheduler.len(), 1, "A burst must not add a second entry");

        scheduler.tick(5.0);
        assert_eq!(count.get(), 2);
        assert!(!debounced.is_pending());

        // Break the debouncer <-> closure cycle.
        slot.borrow_mut().take();
    }
}
