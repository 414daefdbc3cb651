use snafu::{Location, Snafu};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

const DEFAULT_FILTER: &str = "info";

#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
pub enum LogError {
    #[snafu(display("Failed to create log file: {}", path.display()))]
    LogFile {
        path: PathBuf,
        source: std::io::Error,
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("Failed to install tracing subscriber"))]
    InstallSubscriber {
        source: tracing::subscriber::SetGlobalDefaultError,
        #[snafu(implicit)]
        location: Location,
    },
}

/// Log sinks. Standard output is reserved for the report.
pub struct LoggingConfig {
    pub log_file: Option<PathBuf>,
    pub stderr: bool,
    /// `EnvFilter` directives; `RUST_LOG` wins when set.
    pub filter: Option<String>,
}

impl LoggingConfig {
    pub fn new(log_file: Option<PathBuf>, stderr: bool) -> Self {
        Self {
            log_file,
            stderr,
            filter: None,
        }
    }

    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter;
        self
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(self.filter.as_deref().unwrap_or(DEFAULT_FILTER))
        })
    }
}

pub fn init(config: LoggingConfig) -> Result<(), LogError> {
    use snafu::ResultExt;

    let file_layer = match &config.log_file {
        Some(path) => {
            let file = std::fs::File::create(path).context(LogFileSnafu { path: path.clone() })?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(file)
                    .with_filter(config.env_filter()),
            )
        }
        None => None,
    };

    let stderr_layer = config.stderr.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(config.env_filter())
    });

    let subscriber = Registry::default().with(file_layer).with(stderr_layer);
    tracing::subscriber::set_global_default(subscriber).context(InstallSubscriberSnafu)
}
