//! Creation and removal of the ephemeral benchmark database

use snafu::ResultExt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::Target;
use crate::error::{Result, StaleDatabaseSnafu};
use crate::isql::SqlExecutor;
use crate::workload::sql;

pub const PAGE_SIZE: u32 = 16384;

/// A database file that exists for the duration of one run.
///
/// The file is removed by [`DatabaseLifecycle::destroy`], or on drop if
/// that never happened.
#[derive(Debug)]
pub struct EphemeralDatabase {
    target: Target,
    removed: bool,
}

impl EphemeralDatabase {
    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn path(&self) -> &Path {
        &self.target.path
    }

    fn remove(&mut self) {
        if self.removed {
            return;
        }
        self.removed = true;
        match std::fs::remove_file(&self.target.path) {
            Ok(()) => tracing::info!("Removed database {}", self.target.path.display()),
            Err(e) => tracing::warn!(
                "Could not remove database {}: {e}",
                self.target.path.display()
            ),
        }
    }
}

impl Drop for EphemeralDatabase {
    fn drop(&mut self) {
        self.remove();
    }
}

pub struct DatabaseLifecycle<'a, E: SqlExecutor + ?Sized> {
    executor: &'a E,
}

impl<'a, E: SqlExecutor + ?Sized> DatabaseLifecycle<'a, E> {
    pub fn new(executor: &'a E) -> Self {
        Self { executor }
    }

    /// Removes any file left at the target path, then creates a fresh database.
    /// A file left behind by a failed creation is removed before the error
    /// is returned.
    pub fn create(&self, target: &Target) -> Result<EphemeralDatabase> {
        remove_stale(&target.path)?;

        let credentials = self.executor.credentials();
        let statement = sql::create_database(
            &target.connection_string(),
            &credentials.user,
            &credentials.password,
            PAGE_SIZE,
        );
        tracing::info!("Creating database {}", target.connection_string());
        self.executor
            .execute(&statement, None, false)
            .inspect_err(|_| discard_partial(&target.path))?;

        Ok(EphemeralDatabase {
            target: target.clone(),
            removed: false,
        })
    }

    /// Best-effort removal; failures are logged and swallowed.
    pub fn destroy(&self, mut database: EphemeralDatabase) {
        database.remove();
    }
}

fn remove_stale(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            tracing::info!("Removed stale database {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).context(StaleDatabaseSnafu {
            path: PathBuf::from(path),
        }),
    }
}

fn discard_partial(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => tracing::info!("Removed partially created database {}", path.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(
            "Could not remove partially created database {}: {e}",
            path.display()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BenchError;
    use crate::config::Credentials;
    use crate::error::ExecutionSnafu;
    use crate::isql::CommandOutput;
    use crate::test_utils::RecordingExecutor;

    /// Writes the database file, then reports failure.
    struct HalfCreatingExecutor {
        path: PathBuf,
        credentials: Credentials,
    }

    impl SqlExecutor for HalfCreatingExecutor {
        fn execute(&self, _: &str, _: Option<&Target>, _: bool) -> Result<CommandOutput> {
            std::fs::write(&self.path, b"partial").unwrap();
            ExecutionSnafu {
                exit_code: Some(1),
                stderr: "I/O error during write",
            }
            .fail()
        }

        fn credentials(&self) -> &Credentials {
            &self.credentials
        }
    }

    #[test]
    fn should_remove_preexisting_file_before_creating() {
        let dir = tempfile::tempdir().unwrap();
        let target = Target::local(dir.path().join("fbbench.fdb"));
        std::fs::write(&target.path, b"stale").unwrap();
        let executor = RecordingExecutor::new();

        let database = DatabaseLifecycle::new(&executor).create(&target).unwrap();

        assert!(!target.path.exists());
        assert_eq!(database.path(), target.path.as_path());
        let calls = executor.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].starts_with("CREATE DATABASE '"));
        assert!(calls[0].contains("PAGE_SIZE 16384"));
        assert_eq!(executor.targets(), vec![None]);
    }

    #[test]
    fn should_tolerate_missing_file_on_create() {
        let dir = tempfile::tempdir().unwrap();
        let target = Target::local(dir.path().join("fbbench.fdb"));
        let executor = RecordingExecutor::new();

        assert!(DatabaseLifecycle::new(&executor).create(&target).is_ok());
    }

    #[test]
    fn should_fail_when_stale_path_cannot_be_removed() {
        let dir = tempfile::tempdir().unwrap();
        let target = Target::local(dir.path().join("fbbench.fdb"));
        std::fs::create_dir(&target.path).unwrap();
        let executor = RecordingExecutor::new();

        let err = DatabaseLifecycle::new(&executor).create(&target).unwrap_err();

        assert!(matches!(err, BenchError::StaleDatabase { .. }));
        assert!(executor.calls().is_empty());
    }

    #[test]
    fn should_propagate_creation_failure() {
        let dir = tempfile::tempdir().unwrap();
        let target = Target::local(dir.path().join("fbbench.fdb"));
        let executor = RecordingExecutor::failing_on("CREATE DATABASE");

        let err = DatabaseLifecycle::new(&executor).create(&target).unwrap_err();

        assert!(matches!(err, BenchError::Execution { .. }));
    }

    #[test]
    fn should_remove_file_left_by_failed_creation() {
        let dir = tempfile::tempdir().unwrap();
        let target = Target::local(dir.path().join("fbbench.fdb"));
        let executor = HalfCreatingExecutor {
            path: target.path.clone(),
            credentials: Credentials::default(),
        };

        let err = DatabaseLifecycle::new(&executor).create(&target).unwrap_err();

        assert_eq!(err.exit_code(), Some(1));
        assert!(!target.path.exists());
    }

    #[test]
    fn should_remove_file_on_destroy() {
        let dir = tempfile::tempdir().unwrap();
        let target = Target::local(dir.path().join("fbbench.fdb"));
        let executor = RecordingExecutor::new();
        let lifecycle = DatabaseLifecycle::new(&executor);
        let database = lifecycle.create(&target).unwrap();
        std::fs::write(&target.path, b"data").unwrap();

        lifecycle.destroy(database);

        assert!(!target.path.exists());
    }

    #[test]
    fn should_swallow_destroy_of_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = Target::local(dir.path().join("fbbench.fdb"));
        let executor = RecordingExecutor::new();
        let lifecycle = DatabaseLifecycle::new(&executor);
        let database = lifecycle.create(&target).unwrap();

        lifecycle.destroy(database);

        assert!(!target.path.exists());
    }

    #[test]
    fn should_remove_file_when_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let target = Target::local(dir.path().join("fbbench.fdb"));
        let executor = RecordingExecutor::new();
        let database = DatabaseLifecycle::new(&executor).create(&target).unwrap();
        std::fs::write(&target.path, b"data").unwrap();

        drop(database);

        assert!(!target.path.exists());
    }
}
