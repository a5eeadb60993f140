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

//! Translates a variable frame time into the per-phase calls the executor expects.

use crate::config::DriverConfig;
use crate::error::{CoroutineError, Result};
use crate::executor::CoroutineExecutor;
use cadence_core::SuspendPoint;

/// Drives a [`CoroutineExecutor`] through every phase of a host-loop frame.
///
/// Each [`tick`](Self::tick) runs zero or more fixed steps, each one calling
/// `FixedUpdate` then `LateFixedUpdate` with one frame and the fixed timestep,
/// and then `Update` and `LateUpdate` with one frame and the frame time.
#[derive(Debug)]
pub struct PhaseDriver {
    config: DriverConfig,
    fixed_accumulator: f32,
    frames: u64,
}

impl PhaseDriver {
    /// Creates a driver, validating the fixed timestep.
    pub fn new(config: DriverConfig) -> Result<Self> {
        let timestep = config.fixed_timestep;
        if !(timestep.is_finite() && timestep > 0.0) {
            return Err(CoroutineError::InvalidFixedTimestep { timestep });
        }

        log::debug!(
            "PhaseDriver: fixed timestep {:.4}s, at most {} fixed steps per frame",
            timestep,
            config.max_fixed_steps
        );

        Ok(Self {
            config,
            fixed_accumulator: 0.0,
            frames: 0,
        })
    }

    /// Returns the driver configuration.
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Number of frames ticked so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Simulation time owed to the fixed-step phases, in seconds.
    pub fn pending_fixed_time(&self) -> f32 {
        self.fixed_accumulator
    }

    /// Runs one host-loop frame of `frame_time` seconds.
    ///
    /// Returns the number of fixed steps that were run.
    pub fn tick(&mut self, executor: &mut CoroutineExecutor, frame_time: f32) -> u32 {
        let step = self.config.fixed_timestep;
        self.fixed_accumulator += frame_time.max(0.0);

        let mut fixed_steps = 0;
        while self.fixed_accumulator >= step && fixed_steps < self.config.max_fixed_steps {
            executor.continue_at(SuspendPoint::FixedUpdate, 1, step);
            executor.continue_at(SuspendPoint::LateFixedUpdate, 1, step);
            self.fixed_accumulator -= step;
            fixed_steps += 1;
        }

        if self.fixed_accumulator >= step {
            log::warn!(
                "PhaseDriver: frame {} exceeded {} fixed steps, dropping {:.4}s of simulation time",
                self.frames,
                self.config.max_fixed_steps,
                self.fixed_accumulator - self.fixed_accumulator % step
            );
            self.fixed_accumulator %= step;
        }

        executor.continue_at(SuspendPoint::Update, 1, frame_time);
        executor.continue_at(SuspendPoint::LateUpdate, 1, frame_time);
        self.frames += 1;

        fixed_steps
    }
}
