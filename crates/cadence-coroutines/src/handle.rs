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

//! External, non-owning references to executions.

use crate::executor::CoroutineExecutor;
use cadence_core::{ExecutionId, ExecutorId};

/// A stable reference to one execution, returned when a coroutine is started.
///
/// A handle does not keep its execution alive. Once the execution completes
/// or is canceled, the handle keeps answering queries as "finished", and every
/// control call through it becomes a no-op returning `false`. Execution ids are
/// never reused, so a stale handle can never reach a newer execution.
///
/// The handle remembers which executor issued it. Calls routed to a different
/// executor are refused, and a successful [`cancel`](Self::cancel) severs the
/// link entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoroutineHandle {
    id: ExecutionId,
    executor: Option<ExecutorId>,
}

impl CoroutineHandle {
    pub(crate) fn new(id: ExecutionId, executor: ExecutorId) -> Self {
        Self {
            id,
            executor: Some(executor),
        }
    }

    /// Returns the id of the execution this handle refers to.
    pub fn id(&self) -> ExecutionId {
        self.id
    }

    /// Returns `false` once the handle has been used to cancel its execution.
    pub fn is_bound(&self) -> bool {
        self.executor.is_some()
    }

    pub(crate) fn executor(&self) -> Option<ExecutorId> {
        self.executor
    }

    pub(crate) fn sever(&mut self) {
        self.executor = None;
    }

    /// See [`CoroutineExecutor::cancel`].
    pub fn cancel(&mut self, executor: &mut CoroutineExecutor) -> bool {
        executor.cancel(self)
    }

    /// See [`CoroutineExecutor::pause`].
    pub fn pause(&self, executor: &mut CoroutineExecutor) -> bool {
        executor.pause(self)
    }

    /// See [`CoroutineExecutor::resume`].
    pub fn resume(&self, executor: &mut CoroutineExecutor) -> bool {
        executor.resume(self)
    }

    /// See [`CoroutineExecutor::has_finished`].
    pub fn has_finished(&self, executor: &CoroutineExecutor) -> bool {
        executor.has_finished(self)
    }

    /// See [`CoroutineExecutor::is_paused`].
    pub fn is_paused(&self, executor: &CoroutineExecutor) -> bool {
        executor.is_paused(self)
    }
}
