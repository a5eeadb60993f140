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

//! Tunables for the executor and the host-loop driver.

use cadence_core::SuspendPoint;
use serde::Deserialize;

/// Configuration for a [`CoroutineExecutor`](crate::CoroutineExecutor).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Number of execution slots reserved up front.
    pub initial_capacity: usize,
    /// Phase reported to the synchronous first advance of a newly started
    /// coroutine.
    pub warm_start_point: SuspendPoint,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 32,
            warm_start_point: SuspendPoint::Update,
        }
    }
}

/// Configuration for a [`PhaseDriver`](crate::PhaseDriver).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Duration of one fixed step, in seconds.
    pub fixed_timestep: f32,
    /// Upper bound on fixed steps run for a single frame.
    ///
    /// Time beyond this budget is dropped rather than carried into the next
    /// frame, which keeps a slow frame from snowballing.
    pub max_fixed_steps: u32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: 1.0 / 50.0,
            max_fixed_steps: 8,
        }
    }
}
