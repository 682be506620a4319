use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GrowthError>;

#[derive(Debug, Error)]
pub enum GrowthError {
    #[error("input file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Structural problem at a specific (1-based) line of the input.
    #[error("line {line}: {message}")]
    Parse { line: u64, message: String },

    /// The file parsed but some tables or rows never appeared.
    #[error("shape mismatch: {0}")]
    Shape(String),

    #[error("invalid value for {group}: {message}")]
    Value { group: String, message: String },

    #[error("config: {0}")]
    Config(String),
}

impl GrowthError {
    pub(crate) fn parse(line: u64, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn value(group: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Value {
            group: group.into(),
            message: message.into(),
        }
    }
}
