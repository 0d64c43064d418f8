use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum EngineChoice {
    Tesseract,
    Noop,
}

#[derive(Debug, Parser)]
#[command(
    name = "batch-ocr",
    about = "Extract text from a batch of images into a single JSON file",
    disable_help_subcommand = true
)]
pub struct CliArgs {
    /// Output path for the aggregated JSON results
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to the tesseract executable
    #[arg(long = "tesseract", value_name = "PATH")]
    pub tesseract: Option<PathBuf>,

    /// Override the configuration file path
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    /// OCR engine backend
    #[arg(long = "engine", value_enum, default_value_t = EngineChoice::Tesseract)]
    pub engine: EngineChoice,

    /// Print the list of compiled engine backends
    #[arg(long = "list-engines")]
    pub list_engines: bool,

    /// Suppress the progress bar
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Image files or directories to process
    pub inputs: Vec<PathBuf>,
}
