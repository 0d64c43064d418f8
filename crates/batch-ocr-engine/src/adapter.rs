use std::path::Path;
use std::sync::Arc;

use crate::engine::OcrEngine;
use crate::error::OcrError;

/// Wraps an [`OcrEngine`] behind a cached availability flag.
///
/// The backend is probed exactly once when the adapter is constructed (or
/// reconfigured); recognition never re-probes. Probe failures are recorded
/// as unavailability, never surfaced.
pub struct EngineAdapter {
    backend: Arc<dyn OcrEngine>,
    available: bool,
}

impl EngineAdapter {
    pub fn new(backend: Arc<dyn OcrEngine>) -> Self {
        let available = backend.probe().is_ok();
        Self { backend, available }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Cached result of the construction-time probe.
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Swap the backend and probe the new one once.
    pub fn reconfigure(&mut self, backend: Arc<dyn OcrEngine>) {
        self.available = backend.probe().is_ok();
        self.backend = backend;
    }

    /// Recognize text in the image at `path`, trimming surrounding
    /// whitespace from the result.
    ///
    /// Fails with [`OcrError::Unavailable`] when the cached probe failed;
    /// per-item decode and recognition errors pass through untouched so the
    /// caller decides the continue policy.
    pub fn recognize(&self, path: &Path) -> Result<String, OcrError> {
        if !self.available {
            return Err(OcrError::unavailable(format!(
                "the '{}' backend failed its availability probe",
                self.backend.name()
            )));
        }
        let text = self.backend.recognize(path)?;
        Ok(text.trim().to_string())
    }
}
