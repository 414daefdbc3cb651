use snafu::{Location, Snafu};
use std::path::PathBuf;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
pub enum BenchError {
    #[snafu(display("Database client not found: {}", path.display()))]
    MissingClient {
        path: PathBuf,
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("Target folder is not a usable directory: {}", path.display()))]
    InvalidTargetFolder {
        path: PathBuf,
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("Failed to remove stale database file: {}", path.display()))]
    StaleDatabase {
        path: PathBuf,
        source: std::io::Error,
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("Failed to start database client: {}", program.display()))]
    Spawn {
        program: PathBuf,
        source: std::io::Error,
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("I/O failure while talking to the database client"))]
    ClientIo {
        source: std::io::Error,
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("Database client exited with code {}: {stderr}", exit_code.map_or("<signal>".to_string(), |c| c.to_string())))]
    Execution {
        exit_code: Option<i32>,
        stderr: String,
        #[snafu(implicit)]
        location: Location,
    },
}

impl BenchError {
    /// Errors raised before any workload statement could run.
    pub fn is_setup(&self) -> bool {
        matches!(
            self,
            BenchError::MissingClient { .. }
                | BenchError::InvalidTargetFolder { .. }
                | BenchError::StaleDatabase { .. }
                | BenchError::Spawn { .. }
        )
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            BenchError::Execution { exit_code, .. } => *exit_code,
            _ => None,
        }
    }
}

pub type Result<T, E = BenchError> = std::result::Result<T, E>;
