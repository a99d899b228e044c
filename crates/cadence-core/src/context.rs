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

//! The owning controller for the scheduler.
//!
//! The host creates exactly one [`TimingContext`] during start-up, keeps it
//! next to its main loop and calls [`update`](TimingContext::update) once per
//! frame. Code that needs scheduling receives the context (or its
//! `Rc<Scheduler>`) explicitly. [`TimingContext::current`] exists for code
//! that cannot be handed a reference.
//!
//! The scheduler is single-threaded, so "one instance per process" is
//! enforced per host update thread. Live schedulers are registered in a
//! thread-local list; the most recently registered live one is
//! authoritative, so dropping a replacement hands authority back to the
//! instance it replaced.

use crate::clock::TimeSource;
use crate::config::{DoubleInitPolicy, TimingConfig};
use crate::error::TimingError;
use crate::memo::{MemoCache, Memoized};
use crate::scheduler::{Debounce, Scheduler, Throttle};
use std::cell::RefCell;
use std::hash::Hash;
use std::rc::{Rc, Weak};

thread_local! {
    static LIVE: RefCell<Vec<Weak<Scheduler>>> = const { RefCell::new(Vec::new()) };
}

fn authoritative() -> Option<Rc<Scheduler>> {
    LIVE.try_with(|live| live.borrow().iter().rev().find_map(Weak::upgrade))
        .ok()
        .flatten()
}

fn register(scheduler: &Rc<Scheduler>) {
    LIVE.with(|live| {
        let mut live = live.borrow_mut();
        live.retain(|entry| entry.strong_count() > 0);
        live.push(Rc::downgrade(scheduler));
    });
}

fn unregister(scheduler: &Rc<Scheduler>) {
    let _ = LIVE.try_with(|live| {
        live.borrow_mut().retain(|entry| {
            entry.strong_count() > 0 && !std::ptr::eq(entry.as_ptr(), Rc::as_ptr(scheduler))
        });
    });
}

/// Host-owned timing state: the scheduler plus the settings it was built from.
#[derive(Debug)]
pub struct TimingContext {
    scheduler: Rc<Scheduler>,
    config: TimingConfig,
    frame_count: u64,
}

impl TimingContext {
    /// Creates the context and registers its scheduler as authoritative.
    ///
    /// If another context is alive on this thread, the outcome follows
    /// `config.double_init_policy`: `KeepFirst` logs a warning and returns
    /// [`TimingError::AlreadyInitialized`]; `Replace` logs a warning and
    /// makes the new context authoritative.
    pub fn initialize(config: TimingConfig) -> Result<Self, TimingError> {
        if authoritative().is_some() {
            match config.double_init_policy {
                DoubleInitPolicy::KeepFirst => {
                    log::warn!(
                        "Timing context initialized twice; keeping the first instance"
                    );
                    return Err(TimingError::AlreadyInitialized);
                }
                DoubleInitPolicy::Replace => {
                    log::warn!(
                        "Timing context initialized twice; the new instance replaces the first"
                    );
                }
            }
        }

        let scheduler = Rc::new(Scheduler::from_config(&config));
        register(&scheduler);
        log::debug!(
            "Timing context initialized (memo capacity {}, policy {:?})",
            config.memo_capacity,
            config.double_init_policy
        );

        Ok(Self {
            scheduler,
            config,
            frame_count: 0,
        })
    }

    /// Returns the authoritative scheduler for this thread.
    ///
    /// Calling this before [`initialize`](Self::initialize) is a usage error:
    /// it is logged and `None` is returned.
    pub fn current() -> Option<Rc<Scheduler>> {
        let current = authoritative();
        if current.is_none() {
            log::error!("Scheduler accessed before the timing context was initialized");
        }
        current
    }

    /// Returns `true` if a context is alive on this thread. Never logs.
    pub fn is_initialized() -> bool {
        authoritative().is_some()
    }

    /// Returns `true` if this context owns the authoritative scheduler.
    pub fn is_authoritative(&self) -> bool {
        authoritative().is_some_and(|current| Rc::ptr_eq(&current, &self.scheduler))
    }

    /// The scheduler driven by this context.
    pub fn scheduler(&self) -> &Rc<Scheduler> {
        &self.scheduler
    }

    /// The settings this context was created with.
    pub fn config(&self) -> &TimingConfig {
        &self.config
    }

    /// Number of updates performed so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Per-frame hook: ticks the scheduler at host time `now` (seconds).
    ///
    /// Must be called once per frame, after the host's time source advanced.
    /// Returns the number of callbacks that fired.
    pub fn update(&mut self, now: f64) -> usize {
        self.frame_count += 1;
        let fired = self.scheduler.tick(now);
        if fired > 0 {
            log::trace!("Frame {}: {fired} delayed callbacks fired", self.frame_count);
        }
        fired
    }

    /// Samples `source` and performs an [`update`](Self::update).
    pub fn update_from<T: TimeSource + ?Sized>(&mut self, source: &T) -> usize {
        self.update(source.now_secs())
    }

    /// Creates a debouncer for `func`, to be called with this context's scheduler.
    pub fn debounce<F: FnMut() + 'static>(&self, func: F, delay: f64) -> Debounce<F> {
        Debounce::new(func, delay)
    }

    /// Creates a throttle for `func` whose first window starts at the current host time.
    pub fn throttle<F: FnMut()>(&self, func: F, delay: f64) -> Throttle<F> {
        Throttle::new(func, delay, &self.scheduler)
    }

    /// Wraps `func` in a cache sized by the configured `memo_capacity`.
    pub fn memoize<K, V, F>(&self, func: F) -> Memoized<K, V, F>
    where
        K: Hash + Eq,
        V: Clone,
        F: FnMut(&K) -> V,
    {
        Memoized::new(func, self.config.memo_capacity)
    }

    /// Creates an empty cache sized by the configured `memo_capacity`.
    pub fn memo_cache<K: Hash + Eq, V: Clone>(&self) -> MemoCache<K, V> {
        MemoCache::new(self.config.memo_capacity)
    }
}

impl Drop for TimingContext {
    fn drop(&mut self) {
        let was_authoritative = self.is_authoritative();
        unregister(&self.scheduler);
        if was_authoritative {
            log::debug!(
                "Timing context shut down with {} pending callbacks",
                self.scheduler.len()
            );
            if authoritative().is_some() {
                log::debug!("Authority returned to the previously replaced timing context");
            }
        }
    }
}
