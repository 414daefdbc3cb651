//! Command execution through the `isql` command-line client

use snafu::{OptionExt, ResultExt};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::config::{ClientConfig, Credentials, Target};
use crate::error::{ClientIoSnafu, ExecutionSnafu, MissingClientSnafu, Result, SpawnSnafu};

/// Captured result of one client invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Submits SQL text to the database engine.
///
/// `target` is `None` when the statement addresses its database itself
/// (`CREATE DATABASE`). A non-zero exit status is an error unless
/// `ignore_errors` is set, in which case the output is returned as is.
pub trait SqlExecutor {
    fn execute(
        &self,
        sql: &str,
        target: Option<&Target>,
        ignore_errors: bool,
    ) -> Result<CommandOutput>;

    fn credentials(&self) -> &Credentials;
}

#[derive(Debug, Clone)]
pub struct IsqlClient {
    config: ClientConfig,
}

impl IsqlClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Fails with `MissingClient` unless the executable can be found.
    pub fn verify(&self) -> Result<PathBuf> {
        let resolved = resolve_executable(&self.config.executable);
        resolved.context(MissingClientSnafu {
            path: self.config.executable.clone(),
        })
    }

    fn command(&self, target: Option<&Target>) -> Command {
        let mut cmd = Command::new(&self.config.executable);
        cmd.args(["-b", "-q", "-pag", "0"])
            .arg("-user")
            .arg(&self.config.credentials.user)
            .arg("-password")
            .arg(&self.config.credentials.password);
        if let Some(target) = target {
            cmd.arg(target.connection_string());
        }
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

impl SqlExecutor for IsqlClient {
    fn execute(
        &self,
        sql: &str,
        target: Option<&Target>,
        ignore_errors: bool,
    ) -> Result<CommandOutput> {
        let mut cmd = self.command(target);
        tracing::debug!(
            "Running {} against {}",
            self.config.executable.display(),
            target.map_or_else(|| "<no target>".to_string(), Target::connection_string)
        );

        let mut child = cmd.spawn().context(SpawnSnafu {
            program: self.config.executable.clone(),
        })?;
        let mut stdin = child.stdin.take();

        // The client may fill its output pipes before it has read all input.
        let (write_result, output) = std::thread::scope(|scope| {
            let writer = scope.spawn(move || -> std::io::Result<()> {
                if let Some(stdin) = stdin.as_mut() {
                    stdin.write_all(sql.as_bytes())?;
                    stdin.flush()?;
                }
                Ok(())
            });
            let output = child.wait_with_output();
            let write_result = writer
                .join()
                .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));
            (write_result, output)
        });
        let output = output.context(ClientIoSnafu)?;

        let captured = CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if captured.success() {
            // A client that exits cleanly without draining stdin is not a failure.
            if let Err(e) = write_result {
                tracing::debug!("Client closed stdin early: {e}");
            }
            return Ok(captured);
        }

        if ignore_errors {
            tracing::warn!(
                "Ignoring client failure (exit code {:?}): {}",
                captured.exit_code,
                captured.stderr.trim()
            );
            return Ok(captured);
        }

        ExecutionSnafu {
            exit_code: captured.exit_code,
            stderr: captured.stderr.trim().to_string(),
        }
        .fail()
    }

    fn credentials(&self) -> &Credentials {
        &self.config.credentials
    }
}

fn resolve_executable(executable: &Path) -> Option<PathBuf> {
    if executable.components().count() > 1 || executable.is_absolute() {
        return executable.is_file().then(|| executable.to_path_buf());
    }
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .flat_map(|dir| candidates(&dir, executable))
        .find(|candidate| candidate.is_file())
}

#[cfg(windows)]
fn candidates(dir: &Path, executable: &Path) -> Vec<PathBuf> {
    vec![dir.join(executable), dir.join(executable).with_extension("exe")]
}

#[cfg(not(windows))]
fn candidates(dir: &Path, executable: &Path) -> Vec<PathBuf> {
    vec![dir.join(executable)]
}
