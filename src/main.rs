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

use clap::Parser;
use sysinfo::{Pid, ProcessesToUpdate, System};

use pid2pod::cli::Cli;
use pid2pod::{Pid2Pod, PodIdentity};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    pid2pod::logging::init();

    let resolver = match Pid2Pod::with_config(cli.to_config()) {
        Ok(resolver) => resolver,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };

    for (pid, executable) in list_processes(cli.pid.as_deref()) {
        let identity = match resolver.lookup_pod(pid).await {
            Ok(identity) => identity,
            Err(e) => {
                tracing::error!("could not get ID of process {pid}: {e}");
                std::process::exit(1);
            }
        };

        if identity.is_some() || cli.all {
            print_identity(pid, &executable, identity.as_ref(), cli.json);
        }
    }
}

/// PIDs to look up, with their executable names, sorted by PID.
fn list_processes(only: Option<&[u32]>) -> Vec<(u32, String)> {
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::All, true);

    let name_of = |pid: u32| {
        system
            .process(Pid::from_u32(pid))
            .map(|p| p.name().to_string_lossy().to_string())
            .unwrap_or_else(|| "?".to_string())
    };

    let mut processes: Vec<(u32, String)> = match only {
        Some(pids) => pids.iter().map(|&pid| (pid, name_of(pid))).collect(),
        None => system
            .processes()
            .iter()
            .map(|(pid, p)| (pid.as_u32(), p.name().to_string_lossy().to_string()))
            .collect(),
    };
    processes.sort_by_key(|(pid, _)| *pid);
    processes
}

fn print_identity(pid: u32, executable: &str, identity: Option<&PodIdentity>, json: bool) {
    if json {
        let line = serde_json::json!({
            "pid": pid,
            "executable": executable,
            "pod": identity,
        });
        println!("{line}");
        return;
    }

    match identity {
        Some(id) => println!("PID {pid} ({executable}): {id}"),
        None => println!("PID {pid} ({executable}): -"),
    }
}
