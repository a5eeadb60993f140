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

//! # Cadence Core
//!
//! Foundational types shared by the coroutine engine and its host loop:
//! the closed set of loop phases, the per-call time/frame delta, and the
//! identifiers used to address executions from the outside.

#![warn(missing_docs)]

pub mod id;
pub mod phase;

pub use id::{ExecutionId, ExecutorId, IdGenerator};
pub use phase::{Delta, SuspendPoint};
