//! Run configuration and environment resolution

use snafu::{Location, OptionExt, Snafu};
use std::path::{Path, PathBuf};
use strum::{Display, EnumString};

use crate::workload::WorkloadOptions;

pub const DATABASE_FILE_NAME: &str = "fbbench.fdb";
pub const DEFAULT_USER: &str = "SYSDBA";
pub const DEFAULT_PASSWORD: &str = "masterkey";
pub const LOOPBACK_HOST: &str = "localhost";

pub const ENV_USER: &str = "ISC_USER";
pub const ENV_PASSWORD: &str = "ISC_PASSWORD";
pub const ENV_INSTALL_DIR: &str = "FIREBIRD";
pub const ENV_CLIENT_PATH: &str = "FBBENCH_ISQL";

#[cfg(windows)]
const DEFAULT_INSTALL_DIR: &str = r"C:\Program Files\Firebird\Firebird_4_0";
#[cfg(not(windows))]
const DEFAULT_INSTALL_DIR: &str = "/opt/firebird";

#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
pub enum ConfigError {
    #[snafu(display("Missing required parameter: {parameter}"))]
    MissingParameter {
        parameter: String,
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("Invalid value for {parameter}: {value}"))]
    InvalidParameterValue {
        parameter: String,
        value: String,
        #[snafu(implicit)]
        location: Location,
    },
}

/// How the client reaches the database file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Protocol {
    /// Bare file path, same-host access.
    #[default]
    Local,
    /// `localhost:path` over TCP.
    Inet,
    /// `xnet://path` local shared-memory protocol.
    Xnet,
}

/// A database file on this machine and the protocol used to reach it.
/// `inet` connects through loopback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub protocol: Protocol,
    pub path: PathBuf,
}

impl Target {
    pub fn new(protocol: Protocol, path: impl Into<PathBuf>) -> Self {
        Self {
            protocol,
            path: path.into(),
        }
    }

    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self::new(Protocol::Local, path)
    }

    /// Database file inside `folder` using the fixed benchmark file name.
    pub fn in_folder(protocol: Protocol, folder: &Path) -> Self {
        Self::new(protocol, folder.join(DATABASE_FILE_NAME))
    }

    pub fn connection_string(&self) -> String {
        let path = self.path.display();
        match self.protocol {
            Protocol::Local => path.to_string(),
            Protocol::Inet => format!("{LOOPBACK_HOST}:{path}"),
            Protocol::Xnet => format!("xnet://{path}"),
        }
    }

    pub fn folder(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            user: DEFAULT_USER.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"****")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub executable: PathBuf,
    pub credentials: Credentials,
}

impl ClientConfig {
    /// Resolves the client from environment values supplied by `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let executable = match non_empty(ENV_CLIENT_PATH) {
            Some(path) => PathBuf::from(path),
            None => {
                let install_dir = non_empty(ENV_INSTALL_DIR)
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_INSTALL_DIR));
                client_in_install_dir(&install_dir)
            }
        };

        let credentials = Credentials {
            user: non_empty(ENV_USER).unwrap_or_else(|| DEFAULT_USER.to_string()),
            password: non_empty(ENV_PASSWORD).unwrap_or_else(|| DEFAULT_PASSWORD.to_string()),
        };

        Self {
            executable,
            credentials,
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

#[cfg(windows)]
fn client_in_install_dir(install_dir: &Path) -> PathBuf {
    install_dir.join("isql.exe")
}

#[cfg(not(windows))]
fn client_in_install_dir(install_dir: &Path) -> PathBuf {
    install_dir.join("bin").join("isql")
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub client: ClientConfig,
    pub target: Target,
    pub workload: WorkloadOptions,
    pub collect_engine_facts: bool,
}

impl RunConfig {
    pub fn new(client: ClientConfig, target: Target) -> Self {
        Self {
            client,
            target,
            workload: WorkloadOptions::default(),
            collect_engine_facts: true,
        }
    }
}

pub fn parse_protocol(value: &str) -> Result<Protocol, ConfigError> {
    value
        .trim()
        .to_lowercase()
        .parse::<Protocol>()
        .ok()
        .context(InvalidParameterValueSnafu {
            parameter: "protocol",
            value,
        })
}

pub fn parse_row_count(value: &str) -> Result<u64, ConfigError> {
    let digits: String = value.chars().filter(|c| *c != '_' && *c != ',').collect();
    if digits.is_empty() {
        return MissingParameterSnafu { parameter: "rows" }.fail();
    }
    digits.parse::<u64>().ok().context(InvalidParameterValueSnafu {
        parameter: "rows",
        value,
    })
}
