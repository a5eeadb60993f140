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

//! Host-loop phases and the elapsed-time/frame pair delivered with each of them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named point in the host loop at which scheduled work may resume.
///
/// The host calls the executor once per phase per tick. Fixed-step phases may
/// fire zero or several times in a single rendered frame, while the
/// variable-step phases fire exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SuspendPoint {
    /// Variable-step update, once per rendered frame.
    #[default]
    Update,
    /// Runs after every `Update` of the frame has completed.
    LateUpdate,
    /// Fixed-step update, driven by the simulation clock.
    FixedUpdate,
    /// Runs after every `FixedUpdate` of the step has completed.
    LateFixedUpdate,
}

impl SuspendPoint {
    /// Every phase, in the order a typical frame visits them.
    pub const ALL: [SuspendPoint; 4] = [
        SuspendPoint::FixedUpdate,
        SuspendPoint::LateFixedUpdate,
        SuspendPoint::Update,
        SuspendPoint::LateUpdate,
    ];

    /// Returns the canonical name of the phase.
    pub fn name(self) -> &'static str {
        match self {
            SuspendPoint::Update => "update",
            SuspendPoint::LateUpdate => "late_update",
            SuspendPoint::FixedUpdate => "fixed_update",
            SuspendPoint::LateFixedUpdate => "late_fixed_update",
        }
    }

    /// Parses a phase from its canonical name, case-insensitively.
    ///
    /// Both `snake_case` and `PascalCase` spellings are accepted.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "update" => Some(SuspendPoint::Update),
            "lateupdate" => Some(SuspendPoint::LateUpdate),
            "fixedupdate" => Some(SuspendPoint::FixedUpdate),
            "latefixedupdate" => Some(SuspendPoint::LateFixedUpdate),
            _ => None,
        }
    }
}

impl fmt::Display for SuspendPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Elapsed time and frame count, either delivered by the host for one phase
/// call or accumulated by an execution while it waits.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Delta {
    /// Elapsed time in seconds.
    pub time: f32,
    /// Elapsed frame count.
    pub frames: u32,
}

impl Delta {
    /// No elapsed time and no elapsed frames.
    pub const ZERO: Delta = Delta {
        time: 0.0,
        frames: 0,
    };

    /// Creates a new delta.
    pub const fn new(time: f32, frames: u32) -> Self {
        Self { time, frames }
    }

    /// Moves the whole of `other` into `self`, leaving `other` zeroed.
    ///
    /// This is how a waiting step consumes the host delta: once transferred, it
    /// is not applied again to later steps within the same call.
    pub fn absorb(&mut self, other: &mut Delta) {
        self.time += other.time;
        self.frames = self.frames.saturating_add(other.frames);
        *other = Delta::ZERO;
    }
}
