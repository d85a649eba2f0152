use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Date parsing error: {0}")]
    DateParse(#[from] chrono::ParseError),

    #[error("Unsupported format kind '{kind}' in format '{format}'")]
    UnsupportedFormatKind { kind: char, format: String },

    #[error("Invalid format specification: {0}")]
    InvalidFormatSpec(String),

    #[error("Value {value} cannot be written with format {format}")]
    IncompatibleValue { value: String, format: String },

    #[error("Invalid time range: {0}")]
    InvalidTimeRange(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(i64),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration load error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unsafe path component '{0}' in output filename")]
    UnsafePathComponent(String),

    #[error("Page reader shut down: {0}")]
    ReaderShutdown(String),

    #[error("Missing required data: {0}")]
    MissingData(String),

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}
