use std::path::PathBuf;

use crate::config::conversion_config::ConversionConfig;
use crate::shared::constants::OUTPUT_EXTENSION;

/// Output file name for one input: `{prefix}{index}_{height}_{kbps}_{fps}.h264`.
///
/// The index is the only component that varies within a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputName {
    file_name: String,
    path: PathBuf,
}

impl OutputName {
    pub fn new(config: &ConversionConfig, index: u64) -> Self {
        let file_name = format!(
            "{}{}_{}_{}_{}.{}",
            config.prefix(),
            index,
            config.height(),
            config.kbps(),
            config.fps(),
            OUTPUT_EXTENSION
        );
        let path = config.output_dir().join(&file_name);
        Self { file_name, path }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::conversion_config::ConfigBuilder;
    use std::path::Path;

    #[test]
    fn test_default_name() {
        let config = ConfigBuilder::new("/work").build();
        let name = OutputName::new(&config, 0);
        assert_eq!(name.file_name(), "video0_180_150_15.h264");
        assert_eq!(name.path(), Path::new("/work/dest/video0_180_150_15.h264"));
    }

    #[test]
    fn test_custom_settings() {
        let config = ConfigBuilder::new("/work")
            .prefix("clip")
            .height(240)
            .output_dir("/tmp/out")
            .build();
        assert_eq!(
            OutputName::new(&config, 5).into_path(),
            PathBuf::from("/tmp/out/clip5_240_150_15.h264")
        );
        assert_eq!(
            OutputName::new(&config, 6).file_name(),
            "clip6_240_150_15.h264"
        );
    }

    #[test]
    fn test_index_is_only_varying_part() {
        let config = ConfigBuilder::new("/work").kbps(90).fps(24).build();
        let a = OutputName::new(&config, 9);
        let b = OutputName::new(&config, 10);
        assert_eq!(a.file_name(), "video9_180_90_24.h264");
        assert_eq!(b.file_name(), "video10_180_90_24.h264");
    }
}
