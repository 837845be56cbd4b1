use anyhow::Result;
use tracing_appender::{
    non_blocking::{NonBlocking, WorkerGuard},
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

const DEFAULT_FILTER: &str = "info,legal_doc_analyzer=debug,tower_http=info";
const LOG_DIR: &str = "logs";
const LOG_FILE_PREFIX: &str = "analyzer";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Output format chosen by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// `json` (any case) selects JSON, anything else falls back to pretty.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }

    fn from_env() -> Self {
        Self::parse(std::env::var("LOG_FORMAT").ok().as_deref())
    }

    fn stdout_layer(self) -> BoxedLayer {
        match self {
            LogFormat::Json => fmt::layer()
                .json()
                .with_current_span(true)
                .with_thread_ids(true)
                .boxed(),
            LogFormat::Pretty => fmt::layer().pretty().boxed(),
        }
    }

    /// File output never carries ANSI colors.
    fn file_layer(self, writer: NonBlocking) -> BoxedLayer {
        match self {
            LogFormat::Json => fmt::layer()
                .json()
                .with_writer(writer)
                .with_thread_ids(true)
                .boxed(),
            LogFormat::Pretty => fmt::layer().with_writer(writer).with_ansi(false).boxed(),
        }
    }
}

fn env_filter() -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(DEFAULT_FILTER)?),
    }
}

/// Install the global subscriber: stdout plus `logs/analyzer.YYYY-MM-DD.log`.
///
/// Keep the returned guard alive in `main`; dropping it flushes the file writer.
pub fn init_logger() -> Result<WorkerGuard> {
    let format = LogFormat::from_env();

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(LOG_DIR)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(vec![format.stdout_layer(), format.file_layer(writer)])
        .with(env_filter()?)
        .try_init()?;

    Ok(guard)
}
