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

//! Lifetime counters and point-in-time statistics of an executor.

/// Lifetime event counters kept by the executor.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Counters {
    pub(crate) started: u64,
    pub(crate) completed: u64,
    pub(crate) canceled: u64,
    pub(crate) rejected: u64,
}

/// A snapshot of an executor's workload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutorStats {
    // --- Current State ---
    /// Executions currently registered, including exhausted ones not yet removed.
    pub live: usize,
    /// Registered executions whose pause flag is set.
    pub paused: usize,

    // --- Lifetime Totals ---
    /// Coroutines successfully started.
    pub started: u64,
    /// Executions removed because their last repeat was exhausted.
    pub completed: u64,
    /// Executions removed through [`cancel`](crate::CoroutineExecutor::cancel).
    pub canceled: u64,
    /// Start requests refused with an error.
    pub rejected: u64,
}

impl ExecutorStats {
    /// Number of live executions that are not paused.
    pub fn running(&self) -> usize {
        self.live - self.paused
    }
}
