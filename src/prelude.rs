// Copyright 2025 Lablup Inc. and Jeongkyu Shin
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

//! The pid2pod prelude.
//!
//! ```rust
//! use pid2pod::prelude::*;
//! ```

// Main client API
pub use crate::client::{lookup_pod, Pid2Pod, Pid2PodConfig};

// Error types
pub use crate::error::{Error, Result};

// Core data types
pub use crate::types::{ContainerId, PodIdentity};

// Kubelet pod list, for callers that fetch once and join many IDs
pub use crate::kubelet::{KubeletClient, PodList};
