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

//! Map Linux process IDs from the host PID namespace to Kubernetes pod
//! metadata.
//!
//! A lookup reads `/proc/<pid>/cgroup` to find the container runtime ID,
//! then asks the local kubelet (`GET http://localhost:10255/pods`) which pod
//! runs that container.

pub mod cgroup;
pub mod cli;
pub mod client;
pub mod error;
pub mod kubelet;
pub mod logging;
pub mod prelude;
pub mod types;

pub mod common {
    pub mod config;
}

pub use client::{lookup_pod, Pid2Pod, Pid2PodConfig};
pub use error::{Error, Result};
pub use types::{ContainerId, PodIdentity};
