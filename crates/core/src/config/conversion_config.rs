use std::path::{Path, PathBuf};

use crate::shared::constants::{
    DEFAULT_FPS, DEFAULT_HEIGHT, DEFAULT_KBPS, DEFAULT_PREFIX, DEFAULT_START_INDEX,
    INPUT_DIR_NAME, OUTPUT_DIR_NAME,
};

/// Resolved settings for one conversion run.
///
/// Built once by [`ConfigBuilder`] and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionConfig {
    root: PathBuf,
    output_dir: PathBuf,
    prefix: String,
    start_index: u32,
    height: u32,
    kbps: u32,
    fps: u32,
}

impl ConversionConfig {
    /// Working root that holds the `video/` input folder.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn input_dir(&self) -> PathBuf {
        self.root.join(INPUT_DIR_NAME)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn start_index(&self) -> u32 {
        self.start_index
    }

    /// Target output height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bitrate label in kbps. Appears in the output name only.
    pub fn kbps(&self) -> u32 {
        self.kbps
    }

    /// Output frame rate.
    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// Mutable staging area used while argument tokens are scanned.
#[derive(Clone, Debug)]
pub struct ConfigBuilder {
    root: PathBuf,
    output_dir: Option<PathBuf>,
    prefix: String,
    start_index: u32,
    height: u32,
    kbps: u32,
    fps: u32,
}

impl ConfigBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output_dir: None,
            prefix: DEFAULT_PREFIX.to_string(),
            start_index: DEFAULT_START_INDEX,
            height: DEFAULT_HEIGHT,
            kbps: DEFAULT_KBPS,
            fps: DEFAULT_FPS,
        }
    }

    pub fn root(&mut self, root: impl Into<PathBuf>) -> &mut Self {
        self.root = root.into();
        self
    }

    pub fn output_dir(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.prefix = prefix.into();
        self
    }

    pub fn start_index(&mut self, index: u32) -> &mut Self {
        self.start_index = index;
        self
    }

    pub fn height(&mut self, height: u32) -> &mut Self {
        self.height = height;
        self
    }

    pub fn kbps(&mut self, kbps: u32) -> &mut Self {
        self.kbps = kbps;
        self
    }

    pub fn fps(&mut self, fps: u32) -> &mut Self {
        self.fps = fps;
        self
    }

    /// Freezes the builder. Without an explicit output directory the
    /// output lands in `<root>/dest`.
    pub fn build(&self) -> ConversionConfig {
        let output_dir = self
            .output_dir
            .clone()
            .unwrap_or_else(|| self.root.join(OUTPUT_DIR_NAME));
        ConversionConfig {
            root: self.root.clone(),
            output_dir,
            prefix: self.prefix.clone(),
            start_index: self.start_index,
            height: self.height,
            kbps: self.kbps,
            fps: self.fps,
        }
    }
}
