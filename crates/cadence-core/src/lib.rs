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

//! # Cadence Core
//!
//! Frame-driven timing helpers for a host update loop: a stopwatch and
//! benchmark helper, a delay registry with debounce and throttle built on
//! top of it, and a bounded memoization cache.
//!
//! ```rust
//! use cadence_core::{TimingConfig, TimingContext};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let mut timing = TimingContext::initialize(TimingConfig::default()).unwrap();
//! let fired = Rc::new(Cell::new(false));
//! let flag = Rc::clone(&fired);
//! timing.scheduler().schedule(move || flag.set(true), 5.0);
//!
//! timing.update(4.0);
//! assert!(!fired.get());
//! timing.update(6.0);
//! assert!(fired.get());
//! ```

#![warn(missing_docs)]

pub mod clock;
pub mod config;
pub mod context;
pub mod error;
pub mod memo;
pub mod scheduler;
pub mod utils;

pub use clock::{ManualClock, MonotonicClock, TimeSource};
pub use config::{DoubleInitPolicy, TimingConfig};
pub use context::TimingContext;
pub use error::TimingError;
pub use memo::{MemoCache, MemoStats, Memoized};
pub use scheduler::{Debounce, Scheduler, Throttle, TimerId};
pub use utils::timer::{measure, Stopwatch};
