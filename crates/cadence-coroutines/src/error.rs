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

//! Recoverable errors reported by the coroutine executor.

use thiserror::Error;

/// A request the executor rejected without changing any of its state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoroutineError {
    /// A repeating coroutine was dispatched a non-positive number of times.
    #[error("coroutine must not be dispatched a non-positive number of times (got {repeats})")]
    InvalidRepeatCount {
        /// The rejected repeat count.
        repeats: i32,
    },
    /// A host-loop driver was configured with a fixed step that is not a
    /// positive, finite number of seconds.
    #[error("fixed timestep must be positive and finite (got {timestep})")]
    InvalidFixedTimestep {
        /// The rejected timestep, in seconds.
        timestep: f32,
    },
}

/// A specialized `Result` for executor operations.
pub type Result<T> = std::result::Result<T, CoroutineError>;
