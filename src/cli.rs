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

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::client::Pid2PodConfig;
use crate::common::config::{AppConfig, EnvConfig};

/// List Kubernetes pod metadata for host processes.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Only look up these PIDs. When omitted, every process on the host is listed.
    #[arg(short, long, num_args = 1..)]
    pub pid: Option<Vec<u32>>,
    /// Kubelet host serving the read-only API.
    #[arg(long, env = EnvConfig::KUBELET_HOST, default_value = AppConfig::DEFAULT_KUBELET_HOST)]
    pub kubelet_host: String,
    /// Kubelet read-only port.
    #[arg(long, env = EnvConfig::KUBELET_PORT, default_value_t = AppConfig::DEFAULT_KUBELET_PORT)]
    pub kubelet_port: u16,
    /// Host procfs mount, e.g. /host/proc inside a monitoring container.
    #[arg(long, env = EnvConfig::PROC_ROOT, default_value = AppConfig::DEFAULT_PROC_ROOT)]
    pub proc_root: PathBuf,
    /// Timeout in seconds for each kubelet query. No timeout by default.
    #[arg(short, long)]
    pub timeout: Option<u64>,
    /// Print one JSON object per line instead of text.
    #[arg(long)]
    pub json: bool,
    /// Also print processes that do not belong to a pod.
    #[arg(short, long)]
    pub all: bool,
}

impl Cli {
    pub fn to_config(&self) -> Pid2PodConfig {
        let mut config = Pid2PodConfig::new()
            .kubelet_host(self.kubelet_host.clone())
            .kubelet_port(self.kubelet_port)
            .proc_root(self.proc_root.clone());
        if let Some(secs) = self.timeout {
            config = config.timeout(Duration::from_secs(secs));
        }
        config
    }
}
