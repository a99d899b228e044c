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

use anyhow::{Context, Result};
use cadence_core::{
    measure, ManualClock, MonotonicClock, TimeSource, TimingConfig, TimingContext,
};
use std::cell::Cell;
use std::rc::Rc;

const FIXED_STEP: f64 = 1.0 / 60.0;
const FRAMES: u32 = 240;

/// Runs `FRAMES` simulated frames against a fixed-step clock.
fn run_frames(timing: &mut TimingContext) {
    let clock = ManualClock::new(0.0);

    let saves = Rc::new(Cell::new(0u32));
    let save_counter = Rc::clone(&saves);
    let autosave = timing.debounce(
        move || {
            save_counter.set(save_counter.get() + 1);
            log::info!("Autosave #{}", save_counter.get());
        },
        0.5,
    );

    let mut footstep = timing.throttle(|| log::debug!("Footstep sound"), 0.3);

    let mut path_cost = timing.memoize(|&(from, to): &(u32, u32)| {
        // Stand-in for an expensive lookup.
        (from as u64 * 31 + to as u64 * 17) % 1000
    });

    timing.scheduler().schedule(|| log::info!("Intro banner dismissed"), 1.0);

    let mut route_total = 0u64;
    for frame in 0..FRAMES {
        clock.advance(FIXED_STEP);
        timing.update_from(&clock);

        // Edits arrive in short bursts during the first second.
        if frame < 60 && frame % 5 == 0 {
            autosave.call(timing.scheduler());
        }
        footstep.call(timing.scheduler());
        route_total += path_cost.call((frame % 8, (frame / 8) % 4));
    }

    let stats = path_cost.cache().stats();
    log::info!(
        "Simulated {:.2}s over {} frames: {} autosave(s), route cost {}, path cache {} hits / {} misses",
        clock.now_secs(),
        timing.frame_count(),
        saves.get(),
        route_total,
        stats.hits,
        stats.misses
    );
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => TimingConfig::from_file(&path)
            .with_context(|| format!("Failed to load timing config from '{path}'"))?,
        None => TimingConfig::default(),
    };

    let wall = MonotonicClock::new();
    let mut timing =
        TimingContext::initialize(config).context("Failed to initialize the timing context")?;

    run_frames(&mut timing);

    let per_iteration = measure(10_000, || {
        timing.scheduler().schedule(|| {}, 1.0);
    }) / 10_000;
    let dropped = timing.scheduler().clear();
    log::info!("schedule(): ~{per_iteration:?} per call ({dropped} entries dropped)");

    log::info!("Sandbox finished in {:.3}s", wall.now_secs());
    Ok(())
}
