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

//! Kubelet read-only API client.
//!
//! The kubelet serves the pods it is running on `GET /pods` (read-only port
//! 10255 by default). We decode only the fields needed to join a container
//! runtime ID back to its pod; everything else in the response is ignored.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::common::config::AppConfig;
use crate::error::{Error, Result};
use crate::types::{ContainerId, PodIdentity};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PodList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Pod>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pod {
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: PodMetadata,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: PodStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PodMetadata {
    #[serde(default, deserialize_with = "null_as_default")]
    pub namespace: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub uid: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodStatus {
    // Pending pods have no statuses yet
    #[serde(default, deserialize_with = "null_as_default")]
    pub container_statuses: Vec<ContainerStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContainerStatus {
    /// Runtime reference, e.g. `docker://<id>`.
    #[serde(rename = "containerID", default, deserialize_with = "null_as_default")]
    pub container_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

// The kubelet emits `null` for empty lists, maps and strings in some versions.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl PodList {
    /// Decode a `/pods` response body.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(Error::KubeletDecode)
    }

    /// Find the pod whose container status references `container_id`.
    ///
    /// Pods and their statuses are scanned in response order; the first
    /// status whose reference equals `docker://<container_id>` wins.
    pub fn find_container(&self, container_id: &ContainerId) -> Option<PodIdentity> {
        let reference = format!("{}{container_id}", AppConfig::RUNTIME_SCHEME_PREFIX);

        self.items.iter().find_map(|pod| {
            let status = pod
                .status
                .container_statuses
                .iter()
                .find(|status| status.container_id == reference)?;

            Some(PodIdentity {
                namespace: pod.metadata.namespace.clone(),
                pod_name: pod.metadata.name.clone(),
                pod_uid: pod.metadata.uid.clone(),
                pod_labels: pod.metadata.labels.clone(),
                container_id: container_id.clone(),
                container_name: status.name.clone(),
            })
        })
    }
}

/// Client for the kubelet `/pods` endpoint.
#[derive(Debug, Clone)]
pub struct KubeletClient {
    client: reqwest::Client,
    pods_url: Url,
}

impl KubeletClient {
    /// Build a client for `http://<host>:<port>/pods`.
    ///
    /// No timeout is applied unless `timeout` is set; a hung kubelet then
    /// blocks the lookup until the connection is closed.
    pub fn new(host: &str, port: u16, timeout: Option<Duration>) -> Result<Self> {
        let base = Url::parse(&format!("http://{host}:{port}"))?;
        let pods_url = base.join(AppConfig::KUBELET_PODS_PATH)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(Error::HttpClient)?;

        Ok(Self { client, pods_url })
    }

    pub fn pods_url(&self) -> &Url {
        &self.pods_url
    }

    /// Fetch and decode the current pod list.
    pub async fn fetch_pods(&self) -> Result<PodList> {
        tracing::debug!(url = %self.pods_url, "querying kubelet");

        let response = self
            .client
            .get(self.pods_url.clone())
            .send()
            .await
            .map_err(Error::KubeletRequest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::KubeletStatus { status });
        }

        let body = response.bytes().await.map_err(Error::KubeletRead)?;
        PodList::from_slice(&body)
    }

    /// Resolve a container ID to the pod that runs it.
    ///
    /// Returns `Ok(None)` if no pod currently reports the container, e.g. it
    /// has not been registered yet or it is a pause/infra container.
    pub async fn resolve(&self, container_id: &ContainerId) -> Result<Option<PodIdentity>> {
        let pods = self.fetch_pods().await?;
        let identity = pods.find_container(container_id);
        if identity.is_none() {
            tracing::debug!(
                container_id = %container_id,
                pods = pods.items.len(),
                "container not reported by kubelet"
            );
        }
        Ok(identity)
    }
}
