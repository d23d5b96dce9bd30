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

/// Application configuration constants
pub struct AppConfig;

impl AppConfig {
    // Kubelet read-only API
    pub const DEFAULT_KUBELET_HOST: &'static str = "localhost";
    pub const DEFAULT_KUBELET_PORT: u16 = 10255;
    pub const KUBELET_PODS_PATH: &'static str = "/pods";

    // Container runtime reference as reported in containerStatuses[].containerID
    pub const RUNTIME_SCHEME_PREFIX: &'static str = "docker://";

    // Filesystem
    pub const DEFAULT_PROC_ROOT: &'static str = "/proc";
    pub const CGROUP_FILE_NAME: &'static str = "cgroup";

    // Logging
    pub const DEFAULT_LOG_FILTER: &'static str = "pid2pod=info,pid2pod_mock_kubelet=info";
}

/// Environment variable names understood by the binaries
pub struct EnvConfig;

impl EnvConfig {
    pub const KUBELET_HOST: &'static str = "PID2POD_KUBELET_HOST";
    pub const KUBELET_PORT: &'static str = "PID2POD_KUBELET_PORT";
    pub const PROC_ROOT: &'static str = "PID2POD_PROC_ROOT";
}
