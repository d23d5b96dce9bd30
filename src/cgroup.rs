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

//! Container ID extraction from `/proc/<pid>/cgroup`.
//!
//! Each line of the cgroup membership record has the form
//! `hierarchy-id:controller-list:cgroup-path`. Container runtimes encode the
//! container ID as the last segment of the path, so we only look at the path
//! shape. Recognized layouts are kept as an ordered list of [`CgroupRule`]s;
//! supporting another layout means appending a rule.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::common::config::AppConfig;
use crate::error::{Error, Result};
use crate::types::ContainerId;

/// A recognized cgroup path layout.
pub struct CgroupRule {
    pub name: &'static str,
    pub pattern: Regex,
}

impl CgroupRule {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("invalid cgroup rule pattern"),
        }
    }

    /// The captured container ID, if `line` has this rule's layout.
    pub fn captures(&self, line: &str) -> Option<ContainerId> {
        let caps = self.pattern.captures(line)?;
        ContainerId::parse(caps.get(1)?.as_str()).ok()
    }
}

/// Rules are tried in order on every line.
pub static RULES: Lazy<Vec<CgroupRule>> = Lazy::new(|| {
    vec![
        // 11:memory:/kubepods/burstable/pod<uid>/<id>
        CgroupRule::new(
            "kubepods",
            r"\d+:.+:/kubepods/[^/]+/pod[^/]+/([0-9a-f]{64})(?:/|$)",
        ),
        // 4:cpu:/docker/pod<uid>/<id>
        CgroupRule::new("docker", r"\d+:.+:/docker/pod[^/]+/([0-9a-f]{64})(?:/|$)"),
    ]
});

/// Try every rule against a single cgroup line.
pub fn match_line(line: &str) -> Option<ContainerId> {
    RULES.iter().find_map(|rule| {
        let id = rule.captures(line)?;
        tracing::debug!(rule = rule.name, container_id = %id, "cgroup rule matched");
        Some(id)
    })
}

/// Scan a cgroup membership record and return the first container ID found.
///
/// Cgroup names are arbitrary bytes, so lines are decoded lossily; a line
/// that is not valid UTF-8 is only ever a non-match. I/O errors from the
/// reader are returned as-is.
pub fn parse_cgroup<R: BufRead>(reader: R) -> io::Result<Option<ContainerId>> {
    for line in reader.split(b'\n') {
        let line = line?;
        let line = line.strip_suffix(b"\r").unwrap_or(&line);
        if let Some(id) = match_line(&String::from_utf8_lossy(line)) {
            return Ok(Some(id));
        }
    }
    Ok(None)
}

/// Path of the cgroup membership record for `pid` under `proc_root`.
pub fn cgroup_path(proc_root: &Path, pid: u32) -> PathBuf {
    proc_root
        .join(pid.to_string())
        .join(AppConfig::CGROUP_FILE_NAME)
}

/// Look up the container ID of a process from the host PID namespace.
///
/// Returns `Ok(None)` when the process no longer exists or its cgroup path
/// does not carry a container ID. Other I/O failures are reported as
/// [`Error::CgroupRead`].
pub fn lookup_container_id(proc_root: &Path, pid: u32) -> Result<Option<ContainerId>> {
    let path = cgroup_path(proc_root, pid);

    let result = File::open(&path).and_then(|f| parse_cgroup(BufReader::new(f)));
    match result {
        Ok(None) => {
            tracing::trace!(pid, "no container ID in cgroup record");
            Ok(None)
        }
        Ok(id) => Ok(id),
        Err(e) if is_process_gone(&e) => {
            // Normal: the PID exited between enumeration and lookup
            tracing::trace!(pid, "process no longer exists");
            Ok(None)
        }
        Err(source) => Err(Error::CgroupRead { pid, path, source }),
    }
}

fn is_process_gone(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::NotFound || err.raw_os_error() == Some(libc::ESRCH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEX64: &str = "9f2ab81c0d7e4a3b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1a2b3c4d5e6f7a8b";
    const OTHER64: &str = "1111111111111111111111111111111111111111111111111111111111111111";

    fn parse(content: &str) -> Option<String> {
        parse_cgroup(Cursor::new(content))
            .unwrap()
            .map(|id| id.as_str().to_string())
    }

    #[test]
    fn test_kubepods_line() {
        let line = format!("5:cpu:/kubepods/burstable/pod123/{HEX64}");
        assert_eq!(match_line(&line).unwrap().as_str(), HEX64);

        let line = format!(
            "11:memory:/kubepods/besteffort/pod0b7e5a1c-27f4-11e8-8a4c-42010a800002/{HEX64}"
        );
        assert_eq!(match_line(&line).unwrap().as_str(), HEX64);
    }

    #[test]
    fn test_docker_line() {
        let line = format!("4:cpu,cpuacct:/docker/pod42/{HEX64}");
        assert_eq!(match_line(&line).unwrap().as_str(), HEX64);
    }

    #[test]
    fn test_nested_segment_after_id() {
        let line = format!("3:pids:/kubepods/burstable/pod123/{HEX64}/init");
        assert_eq!(match_line(&line).unwrap().as_str(), HEX64);
    }

    #[test]
    fn test_rejects_bad_trailing_segment() {
        // Too short
        assert!(match_line(&format!("5:cpu:/kubepods/burstable/pod123/{}", &HEX64[1..])).is_none());
        // Too long
        assert!(match_line(&format!("5:cpu:/kubepods/burstable/pod123/{HEX64}0")).is_none());
        // Not hex
        assert!(match_line(&format!(
            "5:cpu:/kubepods/burstable/pod123/{}",
            HEX64.replace('f', "z")
        ))
        .is_none());
        // Uppercase hex is not what runtimes write
        assert!(match_line(&format!(
            "5:cpu:/kubepods/burstable/pod123/{}",
            HEX64.to_uppercase()
        ))
        .is_none());
    }

    #[test]
    fn test_rejects_unrelated_layouts() {
        assert!(match_line("0::/init.scope").is_none());
        assert!(match_line("1:name=systemd:/user.slice/user-1000.slice/session-2.scope").is_none());
        // Missing pod segment
        assert!(match_line(&format!("4:cpu:/docker/{HEX64}")).is_none());
        // Missing hierarchy prefix
        assert!(match_line(&format!("/kubepods/burstable/pod123/{HEX64}")).is_none());
    }

    #[test]
    fn test_parse_first_matching_line_wins() {
        let content = format!(
            "12:pids:/user.slice\n\
             5:cpu:/kubepods/burstable/pod123/{HEX64}\n\
             4:memory:/docker/pod9/{OTHER64}\n"
        );
        assert_eq!(parse(&content).as_deref(), Some(HEX64));
    }

    #[test]
    fn test_parse_skips_bad_line_and_continues() {
        let content = format!(
            "5:cpu:/kubepods/burstable/pod123/{}\n\
             4:memory:/docker/pod9/{OTHER64}\n",
            &HEX64[..63]
        );
        assert_eq!(parse(&content).as_deref(), Some(OTHER64));
    }

    #[test]
    fn test_parse_continues_past_non_utf8_line() {
        let mut content = b"12:name=weird:/user.slice/\xff\xfe.scope\n".to_vec();
        content.extend_from_slice(format!("5:cpu:/kubepods/burstable/pod123/{HEX64}\n").as_bytes());

        let id = parse_cgroup(Cursor::new(content)).unwrap().unwrap();
        assert_eq!(id.as_str(), HEX64);
    }

    #[test]
    fn test_parse_crlf_line_ending() {
        let content = format!("5:cpu:/kubepods/burstable/pod123/{HEX64}\r\n");
        assert_eq!(parse(&content).as_deref(), Some(HEX64));
    }

    #[test]
    fn test_parse_no_match() {
        assert_eq!(parse("0::/\n1:name=systemd:/init.scope\n"), None);
        assert_eq!(parse(""), None);
    }

    #[test]
    fn test_lookup_missing_process() {
        let dir = tempfile::tempdir().unwrap();
        let result = lookup_container_id(dir.path(), 4242).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_lookup_reads_record() {
        let dir = tempfile::tempdir().unwrap();
        let pid_dir = dir.path().join("77");
        std::fs::create_dir(&pid_dir).unwrap();
        std::fs::write(
            pid_dir.join("cgroup"),
            format!("2:cpu:/kubepods/besteffort/podabc/{HEX64}\n"),
        )
        .unwrap();

        let id = lookup_container_id(dir.path(), 77).unwrap().unwrap();
        assert_eq!(id.as_str(), HEX64);
    }

    #[test]
    fn test_lookup_surfaces_other_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let pid_dir = dir.path().join("78");
        // A directory where the record should be: opening succeeds, reading fails
        std::fs::create_dir_all(pid_dir.join("cgroup")).unwrap();

        let err = lookup_container_id(dir.path(), 78).unwrap_err();
        assert!(matches!(err, Error::CgroupRead { pid: 78, .. }));
    }

    #[test]
    fn test_cgroup_path() {
        assert_eq!(
            cgroup_path(Path::new("/proc"), 1),
            PathBuf::from("/proc/1/cgroup")
        );
    }
}
