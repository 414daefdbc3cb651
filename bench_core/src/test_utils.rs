use std::cell::RefCell;

use crate::config::{Credentials, Target};
use crate::error::{ExecutionSnafu, Result};
use crate::isql::{CommandOutput, SqlExecutor};

/// In-memory executor that records every submitted statement.
#[derive(Default)]
pub struct RecordingExecutor {
    calls: RefCell<Vec<(String, Option<String>)>>,
    fail_on: Option<String>,
    stdout: String,
    credentials: Credentials,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Any SQL containing `marker` exits with code 1.
    pub fn failing_on(marker: &str) -> Self {
        Self {
            fail_on: Some(marker.to_string()),
            ..Self::default()
        }
    }

    pub fn with_stdout(mut self, stdout: &str) -> Self {
        self.stdout = stdout.to_string();
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(sql, _)| sql.clone()).collect()
    }

    pub fn targets(&self) -> Vec<Option<String>> {
        self.calls
            .borrow()
            .iter()
            .map(|(_, target)| target.clone())
            .collect()
    }
}

impl SqlExecutor for RecordingExecutor {
    fn execute(
        &self,
        sql: &str,
        target: Option<&Target>,
        ignore_errors: bool,
    ) -> Result<CommandOutput> {
        self.calls
            .borrow_mut()
            .push((sql.to_string(), target.map(Target::connection_string)));

        let failed = self
            .fail_on
            .as_deref()
            .is_some_and(|marker| sql.contains(marker));
        if failed && !ignore_errors {
            return ExecutionSnafu {
                exit_code: Some(1),
                stderr: "Statement failed",
            }
            .fail();
        }

        Ok(CommandOutput {
            exit_code: Some(if failed { 1 } else { 0 }),
            stdout: self.stdout.clone(),
            stderr: if failed {
                "Statement failed".to_string()
            } else {
                String::new()
            },
        })
    }

    fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}
