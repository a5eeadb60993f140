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

//! Identifiers for executions and the executors that own them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of process-wide unique executor identifiers.
static NEXT_EXECUTOR_ID: AtomicU64 = AtomicU64::new(1);

/// A unique identifier for one execution of a coroutine.
///
/// Identifiers are handed out monotonically by an [`IdGenerator`] and are
/// never reused by the generator that produced them. A handle holding a stale
/// id can therefore never address a newer execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExecutionId(u64);

impl ExecutionId {
    /// Returns the raw numeric value of the identifier.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ExecutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifies one executor instance for the lifetime of the process.
///
/// Handles carry it as a non-owning back-reference so control calls can be
/// routed, and refused, without keeping the executor alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExecutorId(u64);

impl ExecutorId {
    /// Allocates a fresh, process-wide unique executor identifier.
    pub fn next() -> Self {
        Self(NEXT_EXECUTOR_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Monotonic generator of [`ExecutionId`]s.
#[derive(Debug)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    /// Creates a generator whose first id is `1`.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Returns a new identifier, strictly greater than every previous one.
    ///
    /// # Panics
    ///
    /// Panics if the 64-bit id space is exhausted.
    pub fn generate(&mut self) -> ExecutionId {
        let id = self.next;
        self.next = self
            .next
            .checked_add(1)
            .expect("execution id space exhausted");
        ExecutionId(id)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
