use std::path::PathBuf;

use super::conversion_error::ConversionError;

/// Frame size written for a converted input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Converted {
    pub width: u32,
    pub height: u32,
}

/// Result of converting one input file.
#[derive(Debug)]
pub struct FileOutcome {
    pub index: u64,
    pub input: PathBuf,
    pub output: PathBuf,
    pub result: Result<Converted, ConversionError>,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}
