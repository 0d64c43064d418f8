mod adapter;
mod backends;
mod engine;
mod error;

#[cfg(feature = "engine-tesseract")]
pub use backends::tesseract::TesseractEngine;
pub use adapter::EngineAdapter;
pub use engine::{NoopEngine, OcrEngine};
pub use error::OcrError;

/// Names of the engine backends compiled into this build.
pub fn available_engines() -> Vec<&'static str> {
    let mut names = Vec::new();
    #[cfg(feature = "engine-tesseract")]
    names.push("tesseract");
    names.push("noop");
    names
}
