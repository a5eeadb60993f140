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

use anyhow::{ensure, Context, Result};
use cadence_coroutines::{DriverConfig, ExecutorConfig};
use serde::Deserialize;
use std::path::Path;

/// Represents the structure of the optional sandbox JSON configuration.
#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct SandboxConfig {
    /// Upper bound on simulated frames.
    pub max_frames: u32,
    /// Simulated duration of one rendered frame, in seconds.
    pub frame_time: f32,
    /// Sleep for `frame_time` after each frame instead of running flat out.
    pub realtime: bool,
    pub executor: ExecutorConfig,
    pub driver: DriverConfig,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            max_frames: 600,
            frame_time: 1.0 / 60.0,
            realtime: false,
            executor: ExecutorConfig::default(),
            driver: DriverConfig::default(),
        }
    }
}

impl SandboxConfig {
    /// Loads the configuration from `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read sandbox config '{}'", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse sandbox config '{}'", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid sandbox config '{}'", path.display()))?;
        Ok(config)
    }

    /// Checks the values serde cannot constrain.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.frame_time.is_finite() && self.frame_time >= 0.0,
            "frame_time must be finite and non-negative, got {}",
            self.frame_time
        );
        Ok(())
    }
}
