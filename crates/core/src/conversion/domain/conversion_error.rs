use std::path::PathBuf;

use thiserror::Error;

type SourceError = Box<dyn std::error::Error>;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: SourceError,
    },
    #[error("{} has unusable dimensions {width}x{height}", .path.display())]
    InvalidDimensions {
        path: PathBuf,
        width: u32,
        height: u32,
    },
    #[error("failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: SourceError,
    },
    #[error("failed to create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
