use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("recognition engine is unavailable: {message}")]
    Unavailable { message: String },
    #[error("failed to decode image {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },
    #[error("recognition failed: {message}")]
    Recognition { message: String },
}

impl OcrError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn decode(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn recognition(message: impl Into<String>) -> Self {
        Self::Recognition {
            message: message.into(),
        }
    }

    /// Whether this error is the batch-aborting precondition failure, as
    /// opposed to a per-item decode or recognition failure.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}
