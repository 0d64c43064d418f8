use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::batch::{BatchResult, display_label};
use crate::output::error::OutputError;

pub(crate) struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub(crate) fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Encode `result` keyed by basename and write it to `path`.
    ///
    /// Basename collisions overwrite: the entry appearing later in the
    /// result's iteration order wins.
    pub(crate) fn write(&self, result: &BatchResult, path: &Path) -> Result<(), OutputError> {
        let mut display = Map::new();
        for (image, text) in result.iter() {
            display.insert(display_label(image), Value::String(text.to_string()));
        }

        let encoded = if self.pretty {
            serde_json::to_vec_pretty(&display)?
        } else {
            serde_json::to_vec(&display)?
        };
        fs::write(path, encoded)?;
        Ok(())
    }
}
