pub mod batch;
pub mod cli;
pub mod output;
pub mod progress;
pub mod settings;

pub use batch::{BatchProcessor, BatchResult, ProgressEvent};
pub use batch_ocr_engine::{EngineAdapter, NoopEngine, OcrEngine, OcrError, available_engines};
#[cfg(feature = "engine-tesseract")]
pub use batch_ocr_engine::TesseractEngine;
