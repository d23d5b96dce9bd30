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

//! Stand-in for the kubelet read-only API.
//!
//! Serves a fixed pod list on `GET /pods` so that `pid2pod` can be exercised
//! on a machine without a kubelet.
//!
//! Run with: `cargo run --features mock --bin pid2pod-mock-kubelet -- --pods-file pods.json`

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{extract::State, Router};
use clap::Parser;
use tokio::net::TcpListener;

use pid2pod::common::config::AppConfig;
use pid2pod::kubelet::PodList;

const EMPTY_POD_LIST: &str = r#"{"kind":"PodList","apiVersion":"v1","metadata":{},"items":[]}"#;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value = "127.0.0.1", help = "Address to bind")]
    bind: String,

    #[arg(long, default_value_t = AppConfig::DEFAULT_KUBELET_PORT, help = "Port to listen on")]
    port: u16,

    #[arg(long, help = "JSON pod list to serve (default: empty list)")]
    pods_file: Option<PathBuf>,

    #[arg(
        long,
        default_value_t = 200,
        help = "HTTP status to answer with, e.g. 503 to simulate an unhealthy kubelet"
    )]
    status: u16,
}

struct MockKubelet {
    body: String,
    status: StatusCode,
}

async fn serve_pods(State(state): State<Arc<MockKubelet>>) -> impl IntoResponse {
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    pid2pod::logging::init();
    let args = Args::parse();

    let body = match &args.pods_file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => EMPTY_POD_LIST.to_string(),
    };
    let pods = PodList::from_slice(body.as_bytes())
        .context("pod list is not valid kubelet JSON")?;
    let status = StatusCode::from_u16(args.status).context("invalid --status")?;

    let state = Arc::new(MockKubelet { body, status });
    let app = Router::new()
        .route(AppConfig::KUBELET_PODS_PATH, get(serve_pods))
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.bind, args.port)
        .parse()
        .context("invalid bind address")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, pods = pods.items.len(), "mock kubelet listening");
    axum::serve(listener, app).await?;
    Ok(())
}
