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

//! High-level client API for pid2pod.
//!
//! [`Pid2Pod`] composes the two lookup stages: the container ID is read from
//! the process's cgroup record, then joined against the kubelet pod list.
//!
//! # Example
//!
//! ```rust,no_run
//! use pid2pod::{Pid2Pod, Pid2PodConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Pid2PodConfig::new().kubelet_port(10255);
//!     let resolver = Pid2Pod::with_config(config)?;
//!
//!     match resolver.lookup_pod(4321).await? {
//!         Some(id) => println!("PID 4321: {id}"),
//!         None => println!("PID 4321 is not in a pod"),
//!     }
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cgroup;
use crate::common::config::AppConfig;
use crate::error::Result;
use crate::kubelet::KubeletClient;
use crate::types::{ContainerId, PodIdentity};

/// Maps host PIDs to Kubernetes pod identities.
///
/// Lookups are independent and stateless; `Pid2Pod` is `Send + Sync` and can
/// be shared between tasks.
#[derive(Debug, Clone)]
pub struct Pid2Pod {
    proc_root: PathBuf,
    kubelet: KubeletClient,
}

impl Pid2Pod {
    /// Create a resolver for the local kubelet on its default read-only port.
    #[must_use = "Pid2Pod instance must be stored to perform lookups"]
    pub fn new() -> Result<Self> {
        Self::with_config(Pid2PodConfig::default())
    }

    /// Create a resolver with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the kubelet endpoint URL is invalid or the HTTP
    /// client cannot be built.
    #[must_use = "Pid2Pod instance must be stored to perform lookups"]
    pub fn with_config(config: Pid2PodConfig) -> Result<Self> {
        let kubelet = KubeletClient::new(&config.kubelet_host, config.kubelet_port, config.timeout)?;
        Ok(Self {
            proc_root: config.proc_root,
            kubelet,
        })
    }

    pub fn proc_root(&self) -> &Path {
        &self.proc_root
    }

    pub fn kubelet(&self) -> &KubeletClient {
        &self.kubelet
    }

    /// Look up the container runtime ID of a host PID.
    ///
    /// `Ok(None)` means the process has exited or is not in a recognized
    /// container cgroup.
    pub fn lookup_container_id(&self, pid: u32) -> Result<Option<ContainerId>> {
        cgroup::lookup_container_id(&self.proc_root, pid)
    }

    /// Look up the pod identity of a host PID.
    ///
    /// The kubelet is only queried when the process has a container ID. An
    /// absent ID could never match a `docker://` reference anyway.
    pub async fn lookup_pod(&self, pid: u32) -> Result<Option<PodIdentity>> {
        let Some(container_id) = self.lookup_container_id(pid)? else {
            return Ok(None);
        };
        tracing::debug!(pid, container_id = %container_id, "resolving container");

        self.kubelet.resolve(&container_id).await
    }
}

/// Look up the pod identity of a host PID using the default configuration.
pub async fn lookup_pod(pid: u32) -> Result<Option<PodIdentity>> {
    Pid2Pod::new()?.lookup_pod(pid).await
}

/// Configuration options for [`Pid2Pod`].
#[derive(Debug, Clone)]
pub struct Pid2PodConfig {
    /// Kubelet host. Default: `localhost`
    pub kubelet_host: String,
    /// Kubelet read-only port. Default: 10255
    pub kubelet_port: u16,
    /// Mount point of the host procfs. Default: `/proc`
    pub proc_root: PathBuf,
    /// Request timeout for the kubelet query. Default: none
    pub timeout: Option<Duration>,
}

impl Default for Pid2PodConfig {
    fn default() -> Self {
        Self {
            kubelet_host: AppConfig::DEFAULT_KUBELET_HOST.to_string(),
            kubelet_port: AppConfig::DEFAULT_KUBELET_PORT,
            proc_root: PathBuf::from(AppConfig::DEFAULT_PROC_ROOT),
            timeout: None,
        }
    }
}

impl Pid2PodConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kubelet_host(mut self, host: impl Into<String>) -> Self {
        self.kubelet_host = host.into();
        self
    }

    pub fn kubelet_port(mut self, port: u16) -> Self {
        self.kubelet_port = port;
        self
    }

    /// Read cgroup records from another procfs mount, e.g. `/host/proc`
    /// when running inside a monitoring container.
    pub fn proc_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.proc_root = path.into();
        self
    }

    /// Bound the kubelet query.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pid2pod_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Pid2Pod>();
    }

    #[test]
    fn test_config_default() {
        let config = Pid2PodConfig::default();
        assert_eq!(config.kubelet_host, "localhost");
        assert_eq!(config.kubelet_port, 10255);
        assert_eq!(config.proc_root, PathBuf::from("/proc"));
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = Pid2PodConfig::new()
            .kubelet_host("10.0.0.7")
            .kubelet_port(10250)
            .proc_root("/host/proc")
            .timeout(Duration::from_secs(2));
        assert_eq!(config.kubelet_host, "10.0.0.7");
        assert_eq!(config.kubelet_port, 10250);
        assert_eq!(config.proc_root, PathBuf::from("/host/proc"));
        assert_eq!(config.timeout, Some(Duration::from_secs(2)));

        let resolver = Pid2Pod::with_config(config).unwrap();
        assert_eq!(resolver.proc_root(), Path::new("/host/proc"));
        assert_eq!(
            resolver.kubelet().pods_url().as_str(),
            "http://10.0.0.7:10250/pods"
        );
    }

    #[tokio::test]
    async fn test_lookup_pod_skips_kubelet_without_container_id() {
        // Port 9 (discard) is never queried: the process does not exist
        let dir = tempfile::tempdir().unwrap();
        let resolver =
            Pid2Pod::with_config(Pid2PodConfig::new().kubelet_port(9).proc_root(dir.path()))
                .unwrap();

        assert!(resolver.lookup_pod(1).await.unwrap().is_none());
    }
}
