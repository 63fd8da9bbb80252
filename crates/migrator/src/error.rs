use platform::PlatformError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MigrateError>;

#[derive(Error, Debug)]
pub enum MigrateError {
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Download error: {0}")]
    Download(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Problem {problem_id} has no counterpart in the target contest")]
    UnmappedProblem { problem_id: String },

    #[error("Value '{value}' of attribute '{key}' is not a number")]
    InvalidAttributeValue { key: String, value: String },

    #[error("Invalid value '{value}' in column '{column}'")]
    InvalidValue { column: String, value: String },

    #[error("Invalid CSV header: {0}")]
    InvalidHeader(String),

    #[error("Setup error: {0}")]
    Setup(String),
}

impl MigrateError {
    /// Errors raised before any row is processed: missing space, contest or
    /// member, or a malformed input file.
    pub fn is_setup(&self) -> bool {
        matches!(self, Self::Setup(_) | Self::InvalidHeader(_))
    }

    pub fn setup(context: impl std::fmt::Display, source: impl std::fmt::Display) -> Self {
        Self::Setup(format!("{}: {}", context, source))
    }
}
