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

//! Frame-driven scheduling.
//!
//! Contents:
//! * [`registry`]: the delay registry ([`Scheduler`]) ticked by the host loop
//! * [`debounce`]: trailing-edge debounce built on the registry
//! * [`throttle`]: leading-edge throttle reading the registry's host time

pub mod debounce;
pub mod registry;
pub mod throttle;

pub use debounce::Debounce;
pub use registry::{Scheduler, TimerId};
pub use throttle::Throttle;
