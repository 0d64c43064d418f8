use std::path::Path;

use crate::error::OcrError;

/// Common interface for all OCR engine backends.
pub trait OcrEngine: Send + Sync {
    fn name(&self) -> &'static str;

    /// Query the engine's version or identity. A successful probe means the
    /// engine can be used for recognition.
    fn probe(&self) -> Result<(), OcrError>;

    /// Recognize text in the image at `path`. Returns the raw text; trimming
    /// is applied by [`EngineAdapter`](crate::EngineAdapter).
    fn recognize(&self, path: &Path) -> Result<String, OcrError>;
}

/// Placeholder engine used while a real backend is not wired.
#[derive(Debug, Default)]
pub struct NoopEngine;

impl OcrEngine for NoopEngine {
    fn name(&self) -> &'static str {
        "noop"
    }

    fn probe(&self) -> Result<(), OcrError> {
        Ok(())
    }

    fn recognize(&self, _: &Path) -> Result<String, OcrError> {
        Ok(String::new())
    }
}
