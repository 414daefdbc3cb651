#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use bench_core::{ClientConfig, Credentials, IsqlClient};
use tempfile::TempDir;

const NEVER_MATCHES: &str = "@@no-failure@@";

/// Shell script standing in for `isql`.
///
/// It logs every submitted script and its arguments and creates the database
/// file on `CREATE DATABASE`. Input containing the failure marker then exits
/// with code 1; otherwise `SET LIST ON` queries print list output.
pub struct FakeIsql {
    dir: TempDir,
    fail_marker: String,
}

impl FakeIsql {
    pub fn new() -> Self {
        Self::build(NEVER_MATCHES)
    }

    pub fn failing_on(marker: &str) -> Self {
        Self::build(marker)
    }

    fn build(fail_marker: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let fake = Self {
            dir,
            fail_marker: fail_marker.to_string(),
        };
        fake.write_script();
        fake
    }

    fn write_script(&self) {
        let script = format!(
            r#"#!/bin/sh
input=$(cat)
printf '%s\n----\n' "$input" >> "{inputs}"
printf '%s\n' "$*" >> "{args}"
case "$input" in
  *"CREATE DATABASE '"*)
    db=$(printf '%s\n' "$input" | sed -n "s/^CREATE DATABASE '\([^']*\)'.*/\1/p")
    : > "$db" ;;
esac
case "$input" in
  *"{marker}"*)
    echo "Statement failed" >&2
    exit 1 ;;
esac
case "$input" in
  *"SET LIST ON"*)
    printf '\nDatabase: fake, User: SYSDBA\nEngineVersion    4.0.1\nRemoteProtocol    <null>\nClientVersion    LI-V4.0.1 Firebird 4.0\n\n' ;;
esac
exit 0
"#,
            inputs = self.inputs_log().display(),
            args = self.args_log().display(),
            marker = self.fail_marker,
        );
        let path = self.executable();
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    pub fn executable(&self) -> PathBuf {
        self.dir.path().join("isql")
    }

    fn inputs_log(&self) -> PathBuf {
        self.dir.path().join("inputs.log")
    }

    fn args_log(&self) -> PathBuf {
        self.dir.path().join("args.log")
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            executable: self.executable(),
            credentials: Credentials::default(),
        }
    }

    pub fn client(&self) -> IsqlClient {
        IsqlClient::new(self.client_config())
    }

    /// Every SQL script the fake received, in order.
    pub fn inputs(&self) -> Vec<String> {
        read_or_empty(&self.inputs_log())
            .split("\n----\n")
            .filter(|chunk| !chunk.trim().is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn argument_lines(&self) -> Vec<String> {
        read_or_empty(&self.args_log())
            .lines()
            .map(str::to_string)
            .collect()
    }
}

fn read_or_empty(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_default()
}
