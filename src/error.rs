//! Error types for jobsift

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiftError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    #[error("Record table error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Answer composer failed: {0}")]
    Compose(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl SiftError {
    /// Stable machine-readable code used in robot output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Config(_) | Self::MissingConfig(_) => "config",
            Self::Csv(_) => "record_table",
            Self::Fetch { .. } => "fetch_failed",
            Self::Compose(_) => "compose_failed",
            Self::Serialization(_) => "serialization",
            Self::InvalidArgument(_) => "invalid_argument",
        }
    }
}

pub type Result<T> = std::result::Result<T, SiftError>;
