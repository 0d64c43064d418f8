use std::path::{Path, PathBuf};
use std::process::Command;

use crate::engine::OcrEngine;
use crate::error::OcrError;

#[cfg(windows)]
const INSTALL_CANDIDATES: &[&str] = &[
    r"C:\Program Files\Tesseract-OCR\tesseract.exe",
    r"C:\Program Files (x86)\Tesseract-OCR\tesseract.exe",
];

#[cfg(not(windows))]
const INSTALL_CANDIDATES: &[&str] = &[
    "/usr/bin/tesseract",
    "/usr/local/bin/tesseract",
    "/opt/homebrew/bin/tesseract",
];

/// OCR backend driving the tesseract executable as a subprocess.
pub struct TesseractEngine {
    command: PathBuf,
}

impl TesseractEngine {
    /// Use `command` as the tesseract executable when given; otherwise probe
    /// the well-known install locations and fall back to PATH resolution
    /// when none of them exists.
    pub fn new(command: Option<PathBuf>) -> Self {
        let command = command
            .or_else(|| first_existing(INSTALL_CANDIDATES.iter().map(Path::new)))
            .unwrap_or_else(|| PathBuf::from("tesseract"));
        Self { command }
    }

    pub fn command(&self) -> &Path {
        &self.command
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn probe(&self) -> Result<(), OcrError> {
        let output = Command::new(&self.command)
            .arg("--version")
            .output()
            .map_err(|err| {
                OcrError::unavailable(format!(
                    "failed to run {} --version: {err}",
                    self.command.display()
                ))
            })?;
        if output.status.success() {
            Ok(())
        } else {
            Err(OcrError::unavailable(format!(
                "{} --version exited with {}",
                self.command.display(),
                output.status
            )))
        }
    }

    fn recognize(&self, path: &Path) -> Result<String, OcrError> {
        // Decode up front so corrupt input surfaces as a decode error
        // rather than an opaque subprocess failure.
        image::open(path).map_err(|err| OcrError::decode(path, err.to_string()))?;

        let output = Command::new(&self.command)
            .arg(path)
            .arg("stdout")
            .output()
            .map_err(|err| OcrError::recognition(format!("failed to spawn tesseract: {err}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::recognition(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|err| OcrError::recognition(format!("tesseract produced invalid UTF-8: {err}")))
    }
}

fn first_existing<'a>(candidates: impl IntoIterator<Item = &'a Path>) -> Option<PathBuf> {
    candidates
        .into_iter()
        .find(|path| path.exists())
        .map(Path::to_path_buf)
}
