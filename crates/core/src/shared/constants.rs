pub const DEFAULT_PREFIX: &str = "video";
pub const DEFAULT_START_INDEX: u32 = 0;
pub const DEFAULT_HEIGHT: u32 = 180;
pub const DEFAULT_KBPS: u32 = 150;
pub const DEFAULT_FPS: u32 = 15;

/// Input folder, relative to the working root.
pub const INPUT_DIR_NAME: &str = "video";
/// Default output folder, relative to the working root.
pub const OUTPUT_DIR_NAME: &str = "dest";

/// Placeholder that keeps an empty input folder under version control.
pub const PLACEHOLDER_FILE_NAME: &str = ".gitkeep";

pub const OUTPUT_CODEC: &str = "libx264";
pub const OUTPUT_EXTENSION: &str = "h264";
