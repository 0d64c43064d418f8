mod error;
mod json;

pub use error::OutputError;
pub(crate) use json::JsonOutput;
