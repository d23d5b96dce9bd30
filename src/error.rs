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

//! Unified error types for the pid2pod library.
//!
//! Every variant names the lookup stage that failed. Expected absences
//! (the process already exited, or no pod owns the container) are not
//! errors; they surface as `Ok(None)` from the lookup functions.
//!
//! # Example
//!
//! ```rust,no_run
//! use pid2pod::{Pid2Pod, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let resolver = Pid2Pod::new()?;
//!     if let Some(id) = resolver.lookup_pod(1234).await? {
//!         println!("{}/{}", id.namespace, id.pod_name);
//!     }
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for pid2pod operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The cgroup membership record exists but could not be read.
    ///
    /// A missing record is not reported here: it means the process has
    /// exited and is returned as `Ok(None)`.
    #[error("could not get container ID of process {pid} from {}: {source}", path.display())]
    CgroupRead {
        pid: u32,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The kubelet API could not be reached.
    #[error("could not lookup container ID in kubelet API: {0}")]
    KubeletRequest(#[source] reqwest::Error),

    /// The kubelet API answered with a non-success status.
    #[error("could not lookup container ID in kubelet API: HTTP {status}")]
    KubeletStatus { status: reqwest::StatusCode },

    /// The kubelet response body could not be read.
    #[error("could not read response from kubelet API: {0}")]
    KubeletRead(#[source] reqwest::Error),

    /// The kubelet response body is not a valid pod list.
    #[error("could not unmarshal response from kubelet API: {0}")]
    KubeletDecode(#[source] serde_json::Error),

    /// The configured kubelet endpoint is not a valid URL.
    #[error("invalid kubelet endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// The HTTP client could not be constructed.
    #[error("could not build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// A string that was expected to be a 64 character hex container ID.
    #[error("invalid container ID: {0:?}")]
    InvalidContainerId(String),
}

/// A specialized Result type for pid2pod operations.
pub type Result<T> = std::result::Result<T, Error>;
