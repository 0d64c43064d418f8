use std::path::{Path, PathBuf};

use batch_ocr_engine::{EngineAdapter, OcrError};

use crate::output::JsonOutput;

/// Notification emitted once per image, strictly before its recognition
/// attempt begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    /// 0-based position of the current image in the batch.
    pub index: usize,
    /// Number of images in the batch.
    pub total: usize,
    /// Short display name for the current image.
    pub label: String,
}

/// Insertion-ordered mapping from image path to recognized text.
///
/// A path enqueued more than once keeps its first-insertion position and
/// takes the value of its last-processed occurrence.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    entries: Vec<(PathBuf, String)>,
}

impl BatchResult {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, path: &Path) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == path)
            .map(|(_, text)| text.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.entries
            .iter()
            .map(|(path, text)| (path.as_path(), text.as_str()))
    }

    fn insert(&mut self, path: PathBuf, text: String) {
        match self.entries.iter_mut().find(|(key, _)| *key == path) {
            Some(entry) => entry.1 = text,
            None => self.entries.push((path, text)),
        }
    }
}

/// Drives an OCR engine over an ordered list of images, isolating per-item
/// failures and reporting progress to an optional observer.
pub struct BatchProcessor {
    adapter: EngineAdapter,
}

impl BatchProcessor {
    pub fn new(adapter: EngineAdapter) -> Self {
        Self { adapter }
    }

    pub fn adapter(&self) -> &EngineAdapter {
        &self.adapter
    }

    pub fn is_available(&self) -> bool {
        self.adapter.is_available()
    }

    /// Recognize every image in `images` in order.
    ///
    /// Engine unavailability is checked up front and fails the whole batch
    /// with zero items processed and zero progress events. Per-item decode
    /// and recognition failures never abort the batch: the failing image is
    /// recorded with an empty string and the cause goes to stderr.
    pub fn process_batch(
        &self,
        images: &[PathBuf],
        mut on_progress: Option<&mut dyn FnMut(ProgressEvent)>,
    ) -> Result<BatchResult, OcrError> {
        if !self.adapter.is_available() {
            return Err(OcrError::unavailable(format!(
                "the '{}' backend failed its availability probe; install the engine \
                 or point the configuration at its executable",
                self.adapter.backend_name()
            )));
        }

        let total = images.len();
        let mut result = BatchResult::default();

        for (index, image) in images.iter().enumerate() {
            if let Some(callback) = on_progress.as_deref_mut() {
                callback(ProgressEvent {
                    index,
                    total,
                    label: display_label(image),
                });
            }

            match self.adapter.recognize(image) {
                Ok(text) => result.insert(image.clone(), text),
                Err(err) if err.is_unavailable() => return Err(err),
                Err(err) => {
                    eprintln!("error processing {}: {err}", image.display());
                    result.insert(image.clone(), String::new());
                }
            }
        }

        Ok(result)
    }

    /// Write `result` to `destination` as pretty-printed JSON keyed by image
    /// basename.
    ///
    /// The basename projection is lossy: when two paths share a basename the
    /// later entry wins. Failures are reported on stderr and surface as a
    /// `false` return, never as a panic or an error value.
    pub fn serialize(&self, result: &BatchResult, destination: &Path) -> bool {
        match JsonOutput::pretty().write(result, destination) {
            Ok(()) => true,
            Err(err) => {
                eprintln!("error saving results to {}: {err}", destination.display());
                false
            }
        }
    }
}

/// Short human-readable name for an image path.
pub(crate) fn display_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
