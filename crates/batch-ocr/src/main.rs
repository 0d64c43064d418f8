use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use indicatif::ProgressBar;
use tokio::sync::mpsc;

use batch_ocr::batch::{BatchProcessor, ProgressEvent};
use batch_ocr::cli::{CliArgs, EngineChoice};
use batch_ocr::progress::batch_bar_style;
use batch_ocr::settings::{self, EffectiveSettings, FileConfig};
#[cfg(feature = "engine-tesseract")]
use batch_ocr_engine::TesseractEngine;
use batch_ocr_engine::{EngineAdapter, NoopEngine, OcrEngine, available_engines};

const PROGRESS_CHANNEL_CAPACITY: usize = 64;

const IMAGE_EXTENSIONS: &[&str] = &["bmp", "gif", "jpeg", "jpg", "png", "tif", "tiff", "webp"];

#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    let cli = CliArgs::parse();

    if cli.list_engines {
        println!("available engines: {}", available_engines().join(", "));
        return ExitCode::SUCCESS;
    }

    let settings = match settings::resolve_settings(&cli) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if cli.inputs.is_empty() {
        eprintln!("no inputs provided; pass image files or directories");
        return ExitCode::FAILURE;
    }
    let images = collect_images(&cli.inputs);
    if images.is_empty() {
        eprintln!("no images found in the provided inputs");
        return ExitCode::FAILURE;
    }

    let backend = match build_backend(cli.engine, &settings) {
        Ok(backend) => backend,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };
    let adapter = EngineAdapter::new(backend);
    if !adapter.is_available() {
        eprintln!(
            "the '{}' engine is not usable; install it and make sure it is on your \
             PATH, or pass --tesseract with the path to the executable",
            adapter.backend_name()
        );
        return ExitCode::FAILURE;
    }
    let processor = BatchProcessor::new(adapter);

    let bar = if cli.quiet {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(images.len() as u64);
        bar.set_style(batch_bar_style());
        bar
    };

    let (tx, rx) = mpsc::channel::<ProgressEvent>(PROGRESS_CHANNEL_CAPACITY);
    let progress_task = tokio::spawn(drive_progress(bar.clone(), rx));

    let worker = tokio::task::spawn_blocking(move || {
        let mut forward = |event: ProgressEvent| {
            let _ = tx.blocking_send(event);
        };
        let outcome = processor.process_batch(&images, Some(&mut forward));
        (processor, images, outcome)
    });
    let (processor, images, outcome) = worker.await.expect("batch task panicked");
    progress_task.await.expect("progress task panicked");

    let result = match outcome {
        Ok(result) => result,
        Err(err) => {
            bar.abandon_with_message("batch aborted");
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    bar.finish_with_message(format!("completed {} images", result.len()));

    if !processor.serialize(&result, &settings.output) {
        return ExitCode::FAILURE;
    }
    println!("results written to {}", settings.output.display());

    remember_directories(&settings, &images);
    ExitCode::SUCCESS
}

fn build_backend(
    choice: EngineChoice,
    settings: &EffectiveSettings,
) -> Result<Arc<dyn OcrEngine>, String> {
    match choice {
        #[cfg(feature = "engine-tesseract")]
        EngineChoice::Tesseract => Ok(Arc::new(TesseractEngine::new(
            settings.tesseract_path.clone(),
        ))),
        #[cfg(not(feature = "engine-tesseract"))]
        EngineChoice::Tesseract => Err(
            "this build does not include the tesseract engine; rebuild with the \
             \"engine-tesseract\" feature"
                .to_string(),
        ),
        EngineChoice::Noop => Ok(Arc::new(NoopEngine)),
    }
}

/// Expand the CLI inputs into an ordered image list. Directories are scanned
/// one level deep for known image extensions, sorted by name; missing paths
/// are skipped with a warning.
fn collect_images(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut images = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut found = Vec::new();
            match fs::read_dir(input) {
                Ok(entries) => {
                    for entry in entries.flatten() {
                        let path = entry.path();
                        if path.is_file() && has_image_extension(&path) {
                            found.push(path);
                        }
                    }
                }
                Err(err) => {
                    eprintln!("skipping {}: {err}", input.display());
                    continue;
                }
            }
            found.sort();
            images.extend(found);
        } else if input.is_file() {
            images.push(input.clone());
        } else {
            eprintln!("skipping {}: not a file or directory", input.display());
        }
    }
    images
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

async fn drive_progress(bar: ProgressBar, mut rx: mpsc::Receiver<ProgressEvent>) {
    while let Some(event) = rx.recv().await {
        bar.set_position(event.index as u64);
        bar.set_message(event.label);
    }
}

/// Best-effort persistence of the last-used locations for the next run.
fn remember_directories(settings: &EffectiveSettings, images: &[PathBuf]) {
    let Some(config_path) = settings.config_path.as_deref() else {
        return;
    };
    let config = FileConfig {
        tesseract_path: settings.tesseract_path.clone(),
        last_input_dir: images
            .first()
            .and_then(|image| image.parent())
            .map(Path::to_path_buf),
        last_output_dir: settings.output.parent().map(Path::to_path_buf),
    };
    if let Err(err) = settings::save_config(&config, config_path) {
        eprintln!("warning: could not save config: {err}");
    }
}
