use std::fs;
use std::path::{Path, PathBuf};

use crate::config::conversion_config::ConversionConfig;
use crate::conversion::domain::conversion_error::ConversionError;
use crate::conversion::domain::file_outcome::{Converted, FileOutcome};
use crate::conversion::domain::output_name::OutputName;
use crate::conversion::domain::target_size::target_size;
use crate::shared::constants::OUTPUT_CODEC;
use crate::video::domain::video_clip::{EncodeSettings, VideoClip};

use super::batch_report::BatchReport;

/// Converts a list of inputs one at a time: open → resize → loop → encode.
///
/// The clip is closed after every input. A failed input is recorded in the
/// report and the batch moves on; its index is still consumed, so output
/// names stay positional.
pub struct ConvertBatchUseCase {
    clip: Box<dyn VideoClip>,
    config: ConversionConfig,
}

impl ConvertBatchUseCase {
    pub fn new(clip: Box<dyn VideoClip>, config: ConversionConfig) -> Self {
        Self { clip, config }
    }

    /// Fails only when the output directory cannot be created.
    pub fn execute(&mut self, inputs: &[PathBuf]) -> Result<BatchReport, ConversionError> {
        let output_dir = self.config.output_dir();
        fs::create_dir_all(output_dir).map_err(|source| ConversionError::OutputDir {
            path: output_dir.to_path_buf(),
            source,
        })?;

        log::info!(
            "Converting {} files into {}",
            inputs.len(),
            output_dir.display()
        );

        let mut report = BatchReport::new();
        let mut index = u64::from(self.config.start_index());

        for input in inputs {
            let output = OutputName::new(&self.config, index).into_path();
            log::info!("[{index}] {} -> {}", input.display(), output.display());

            let result = self.convert_one(input, &output);
            match &result {
                Ok(size) => log::info!(
                    "[{index}] Wrote {} ({}x{})",
                    output.display(),
                    size.width,
                    size.height
                ),
                Err(e) => log::error!("[{index}] {e}"),
            }

            report.push(FileOutcome {
                index,
                input: input.clone(),
                output,
                result,
            });
            index += 1;
        }

        report.log_summary();
        Ok(report)
    }

    fn convert_one(&mut self, input: &Path, output: &Path) -> Result<Converted, ConversionError> {
        let result = self.transform_and_write(input, output);
        self.clip.close();
        result
    }

    fn transform_and_write(
        &mut self,
        input: &Path,
        output: &Path,
    ) -> Result<Converted, ConversionError> {
        let metadata = self
            .clip
            .open(input)
            .map_err(|source| ConversionError::Open {
                path: input.to_path_buf(),
                source,
            })?;
        log::info!(
            "Source {}x{} {} at {:.2} fps, {:.2}s",
            metadata.width,
            metadata.height,
            metadata.codec,
            metadata.fps,
            metadata.duration
        );

        let (width, height) = target_size(metadata.width, metadata.height, self.config.height())
            .ok_or_else(|| ConversionError::InvalidDimensions {
                path: input.to_path_buf(),
                width: metadata.width,
                height: metadata.height,
            })?;

        self.clip.set_fps(metadata.fps);
        self.clip.resize(width, height);
        self.clip.loop_to(metadata.duration);

        let settings = EncodeSettings {
            fps: self.config.fps(),
            codec: OUTPUT_CODEC,
            audio: false,
        };
        self.clip
            .write(output, &settings)
            .map_err(|source| ConversionError::Encode {
                path: input.to_path_buf(),
                source,
            })?;

        Ok(Converted { width, height })
    }
}
