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

//! Integration tests for the pid2pod library API.

use std::time::Duration;

use pid2pod::prelude::*;

#[test]
fn test_pid2pod_creation() {
    let result = Pid2Pod::new();
    assert!(result.is_ok(), "Pid2Pod::new() should not fail");
}

#[test]
fn test_pid2pod_with_config() {
    let config = Pid2PodConfig::new()
        .kubelet_port(10255)
        .timeout(Duration::from_secs(1));

    let result = Pid2Pod::with_config(config);
    assert!(result.is_ok(), "Pid2Pod::with_config() should not fail");
}

#[test]
fn test_invalid_endpoint_is_reported() {
    let config = Pid2PodConfig::new().kubelet_host("not a host");
    assert!(matches!(
        Pid2Pod::with_config(config),
        Err(Error::InvalidEndpoint(_))
    ));
}

#[cfg(target_os = "linux")]
#[test]
fn test_lookup_container_id_own_process_does_not_fail() {
    let resolver = Pid2Pod::new().expect("Failed to create Pid2Pod");
    // May be Some when the test itself runs in a pod
    let result = resolver.lookup_container_id(std::process::id());
    assert!(result.is_ok());
}

#[test]
fn test_pid2pod_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Pid2Pod>();
    assert_send_sync::<PodIdentity>();
}

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
}

#[test]
fn test_container_id_from_str() {
    let id: ContainerId = "ab".repeat(32).parse().unwrap();
    assert_eq!(id.to_string(), "ab".repeat(32));
    assert!("ab".parse::<ContainerId>().is_err());
}
