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

//! The executor that owns and drives every live coroutine execution.

use crate::builder::Coroutine;
use crate::config::ExecutorConfig;
use crate::error::{CoroutineError, Result};
use crate::execution::{Execution, Progress, Repeats};
use crate::handle::CoroutineHandle;
use crate::stats::{Counters, ExecutorStats};
use cadence_core::{Delta, ExecutorId, IdGenerator, SuspendPoint};

/// Owns the live executions and advances them once per host-loop phase.
///
/// The executor is single-threaded and re-entrancy free: step callbacks run
/// while it is mutably borrowed, so they cannot start, cancel or pause
/// coroutines on the same executor.
///
/// Cancel, pause, resume and the handle queries are linear in the number of
/// live executions.
#[derive(Debug)]
pub struct CoroutineExecutor {
    id: ExecutorId,
    config: ExecutorConfig,
    executions: Vec<Execution>,
    ids: IdGenerator,
    counters: Counters,
}

impl CoroutineExecutor {
    /// Creates an executor with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ExecutorConfig::default())
    }

    /// Creates an executor with the given configuration.
    pub fn with_config(config: ExecutorConfig) -> Self {
        log::debug!(
            "CoroutineExecutor: created (capacity={}, warm start at {})",
            config.initial_capacity,
            config.warm_start_point
        );
        Self {
            id: ExecutorId::next(),
            executions: Vec::with_capacity(config.initial_capacity),
            config,
            ids: IdGenerator::new(),
            counters: Counters::default(),
        }
    }

    /// Returns the configuration this executor was created with.
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Starts a coroutine that runs through its steps once.
    ///
    /// Leading steps that do not block, such as an initial `Run`, execute
    /// before this returns. Time and frame waits only accrue when the executor
    /// is continued at `accumulation_point`.
    pub fn execute_once(
        &mut self,
        coroutine: &Coroutine,
        accumulation_point: SuspendPoint,
    ) -> CoroutineHandle {
        self.dispatch(coroutine, accumulation_point, Repeats::Finite(1))
    }

    /// Starts a coroutine that runs through its steps `repeats` times.
    ///
    /// A non-positive count is logged and rejected; the executor is left
    /// unchanged.
    pub fn execute_repeats(
        &mut self,
        coroutine: &Coroutine,
        accumulation_point: SuspendPoint,
        repeats: i32,
    ) -> Result<CoroutineHandle> {
        let count = match u32::try_from(repeats) {
            Ok(count) if count > 0 => count,
            _ => {
                log::error!(
                    "Coroutine must not be dispatched non-positive number of times! Call to repeat {repeats} times will be ignored."
                );
                self.counters.rejected += 1;
                return Err(CoroutineError::InvalidRepeatCount { repeats });
            }
        };

        Ok(self.dispatch(coroutine, accumulation_point, Repeats::Finite(count)))
    }

    /// Starts a coroutine that loops until canceled.
    pub fn execute_looped(
        &mut self,
        coroutine: &Coroutine,
        accumulation_point: SuspendPoint,
    ) -> CoroutineHandle {
        self.dispatch(coroutine, accumulation_point, Repeats::Infinite)
    }

    fn dispatch(
        &mut self,
        coroutine: &Coroutine,
        accumulation_point: SuspendPoint,
        repeats: Repeats,
    ) -> CoroutineHandle {
        let id = self.ids.generate();
        let mut execution = Execution::new(coroutine.clone(), accumulation_point, id, repeats);

        // Registered even if already exhausted; the next continue removes it.
        let _ = execution.advance(self.config.warm_start_point, Delta::ZERO);
        self.executions.push(execution);
        self.counters.started += 1;

        log::debug!(
            "CoroutineExecutor: started {id} ({} steps, {repeats:?}, accumulating at {accumulation_point})",
            coroutine.len()
        );

        CoroutineHandle::new(id, self.id)
    }

    /// Advances every live execution for one host-loop phase.
    ///
    /// `frames` and `delta_time` are the frame count and seconds elapsed since
    /// the previous call for the same `point`. Executions whose last repeat is
    /// exhausted are removed; the remaining ones keep their enqueue order.
    pub fn continue_at(&mut self, point: SuspendPoint, frames: u32, delta_time: f32) {
        let delta = Delta::new(delta_time, frames);
        let before = self.executions.len();

        self.executions
            .retain_mut(|execution| execution.advance(point, delta) == Progress::Pending);

        let completed = before - self.executions.len();
        if completed > 0 {
            self.counters.completed += completed as u64;
            log::trace!(
                "CoroutineExecutor: {completed} coroutine(s) completed at {point}, {} live",
                self.executions.len()
            );
        }
    }

    /// Returns `true` unless a live execution matches the handle.
    ///
    /// Completed, canceled, unknown and foreign handles are indistinguishable.
    pub fn has_finished(&self, handle: &CoroutineHandle) -> bool {
        self.position(handle).is_none()
    }

    /// Returns `true` if the handle's execution is live and paused.
    pub fn is_paused(&self, handle: &CoroutineHandle) -> bool {
        self.position(handle)
            .is_some_and(|index| self.executions[index].is_paused())
    }

    /// Removes the handle's execution and severs the handle from this executor.
    ///
    /// Returns `false`, and changes nothing, if the execution is not live.
    pub fn cancel(&mut self, handle: &mut CoroutineHandle) -> bool {
        let Some(index) = self.position(handle) else {
            return false;
        };

        self.executions.remove(index);
        handle.sever();
        self.counters.canceled += 1;
        log::debug!("CoroutineExecutor: canceled {}", handle.id());
        true
    }

    /// Pauses the handle's execution.
    ///
    /// Returns `true` only if the execution was live and running.
    pub fn pause(&mut self, handle: &CoroutineHandle) -> bool {
        self.set_paused(handle, true)
    }

    /// Resumes the handle's execution.
    ///
    /// Returns `true` only if the execution was live and paused.
    pub fn resume(&mut self, handle: &CoroutineHandle) -> bool {
        self.set_paused(handle, false)
    }

    fn set_paused(&mut self, handle: &CoroutineHandle, paused: bool) -> bool {
        let Some(index) = self.position(handle) else {
            return false;
        };

        let execution = &mut self.executions[index];
        let changed = execution.is_paused() != paused;
        execution.set_paused(paused);
        changed
    }

    fn position(&self, handle: &CoroutineHandle) -> Option<usize> {
        match handle.executor() {
            Some(owner) if owner == self.id => self
                .executions
                .iter()
                .position(|execution| execution.id() == handle.id()),
            Some(_) => {
                log::warn!(
                    "CoroutineExecutor: handle {} belongs to another executor",
                    handle.id()
                );
                None
            }
            None => None,
        }
    }

    /// Returns the number of registered executions.
    pub fn len(&self) -> usize {
        self.executions.len()
    }

    /// Returns `true` if no execution is registered.
    pub fn is_empty(&self) -> bool {
        self.executions.is_empty()
    }

    /// Takes a snapshot of the executor's workload.
    pub fn stats(&self) -> ExecutorStats {
        ExecutorStats {
            live: self.executions.len(),
            paused: self
                .executions
                .iter()
                .filter(|execution| execution.is_paused())
                .count(),
            started: self.counters.started,
            completed: self.counters.completed,
            canceled: self.counters.canceled,
            rejected: self.counters.rejected,
        }
    }
}

impl Default for CoroutineExecutor {
    fn default() -> Self {
        Self::new()
    }
}
