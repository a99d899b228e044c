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

use cadence_core::{Debounce, ManualClock, Scheduler, TimeSource, TimingConfig, TimingContext};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[test]
fn test_delayed_call_fires_exactly_once() {
    // --- 1. ARRANGE ---
    let mut timing = TimingContext::initialize(TimingConfig::default()).expect("Init");
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    timing
        .scheduler()
        .schedule(move || counter.set(counter.get() + 1), 5.0);

    // --- 2. ACT & 3. ASSERT ---
    timing.update(4.0);
    assert_eq!(calls.get(), 0, "Must not fire before the delay elapsed");

    timing.update(6.0);
    assert_eq!(calls.get(), 1, "Must fire on the first tick past the delay");

    timing.update(10.0);
    assert_eq!(calls.get(), 1, "Must not fire again");
}

#[test]
fn test_never_fires_early_for_any_delay() {
    let scheduler = Scheduler::new();
    let fired = Rc::new(RefCell::new(Vec::new()));
    let delays = [0.0, 0.1, 0.5, 1.0, 2.25, 3.0];

    for (index, delay) in delays.iter().copied().enumerate() {
        let log = Rc::clone(&fired);
        scheduler.schedule(move || log.borrow_mut().push(index), delay);
    }

    // Step at 100 Hz; record the host time at which each callback fires.
    let mut fired_at = vec![None; delays.len()];
    for frame in 1..=400 {
        let now = frame as f64 * 0.01;
        scheduler.tick(now);
        for index in fired.borrow_mut().drain(..) {
            assert!(fired_at[index].is_none(), "Callback {index} fired twice");
            fired_at[index] = Some(now);
        }
    }

    for (index, delay) in delays.iter().enumerate() {
        let at = fired_at[index].expect("Every callback should eventually fire");
        assert!(at > *delay, "Callback {index} fired at {at}, not after {delay}");
        assert!(at <= *delay + 0.01 + 1e-9, "Callback {index} fired late at {at}");
    }
}

#[test]
fn test_debounced_burst_from_frame_loop() {
    // --- 1. ARRANGE ---
    let mut timing = TimingContext::initialize(TimingConfig::default()).expect("Init");
    let clock = ManualClock::new(0.0);
    let saves = Rc::new(Cell::new(0));
    let save_counter = Rc::clone(&saves);
    let autosave = timing.debounce(move || save_counter.set(save_counter.get() + 1), 0.5);

    // --- 2. ACT ---
    // Typing for one second at 60 fps, an edit every fourth frame.
    let mut last_edit = 0.0;
    for frame in 1..=60 {
        clock.advance(1.0 / 60.0);
        timing.update_from(&clock);
        if frame % 4 == 0 {
            autosave.call(timing.scheduler());
            last_edit = clock.now_secs();
        }
    }
    assert_eq!(saves.get(), 0, "No save while the burst is ongoing");

    // Idle until well past the debounce window.
    let mut saved_at = None;
    for _ in 0..60 {
        clock.advance(1.0 / 60.0);
        timing.update_from(&clock);
        if saved_at.is_none() && saves.get() == 1 {
            saved_at = Some(clock.now_secs());
        }
    }

    // --- 3. ASSERT ---
    assert_eq!(saves.get(), 1, "The whole burst collapses into one save");
    let saved_at = saved_at.expect("Save should have happened");
    assert!(saved_at > last_edit + 0.5);
    assert!(saved_at < last_edit + 0.5 + 2.0 / 60.0);
}

#[test]
fn test_throttle_bounds_call_count() {
    let mut timing = TimingContext::initialize(TimingConfig::default()).expect("Init");
    let fired = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&fired);
    let scheduler = Rc::clone(timing.scheduler());
    let time = Rc::clone(&scheduler);
    let mut fire = timing.throttle(move || log.borrow_mut().push(time.now()), 0.25);

    let duration = 2.0;
    let mut frame = 0;
    loop {
        frame += 1;
        let now = frame as f64 / 144.0;
        if now > duration {
            break;
        }
        timing.update(now);
        fire.call(&scheduler);
    }

    let fired = fired.borrow();
    let bound = (duration / 0.25_f64).ceil() as usize + 1;
    assert!(fired.len() <= bound, "{} calls exceed {bound}", fired.len());
    for pair in fired.windows(2) {
        assert!(pair[1] - pair[0] >= 0.25);
    }
}

#[test]
fn test_callbacks_can_reschedule_themselves_through_current() {
    let mut timing = TimingContext::initialize(TimingConfig::default()).expect("Init");
    let beats = Rc::new(Cell::new(0));

    fn heartbeat(beats: Rc<Cell<u32>>) {
        beats.set(beats.get() + 1);
        if beats.get() < 3 {
            let scheduler = TimingContext::current().expect("Context is alive");
            scheduler.schedule(move || heartbeat(beats), 1.0);
        }
    }

    let first = Rc::clone(&beats);
    timing.scheduler().schedule(move || heartbeat(first), 1.0);

    for step in 1..=10 {
        timing.update(step as f64 * 0.75);
    }
    assert_eq!(beats.get(), 3);
    assert!(timing.scheduler().is_empty());
}

#[test]
fn test_debounce_cancel_then_resume() {
    let scheduler = Scheduler::new();
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let debounced = Debounce::new(move || counter.set(counter.get() + 1), 1.0);

    debounced.call(&scheduler);
    scheduler.tick(0.5);
    assert!(debounced.cancel(&scheduler));
    scheduler.tick(3.0);
    assert_eq!(calls.get(), 0);

    debounced.call(&scheduler);
    scheduler.tick(4.5);
    assert_eq!(calls.get(), 1);
}
