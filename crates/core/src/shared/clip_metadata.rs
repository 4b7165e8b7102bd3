use std::path::PathBuf;

/// Native properties of an opened clip.
#[derive(Clone, Debug, PartialEq)]
pub struct ClipMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    /// Seconds. Zero when the container does not report one.
    pub duration: f64,
    pub codec: String,
    pub source_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(width: u32, height: u32) -> ClipMetadata {
        ClipMetadata {
            width,
            height,
            fps: 30.0,
            duration: 2.5,
            codec: "h264".to_string(),
            source_path: Some(PathBuf::from("/tmp/test.mp4")),
        }
    }

    #[test]
    fn test_construction() {
        let meta = metadata(1920, 1080);
        assert_eq!(meta.width, 1920);
        assert_eq!(meta.height, 1080);
        assert_eq!(meta.fps, 30.0);
        assert_eq!(meta.duration, 2.5);
        assert_eq!(meta.codec, "h264");
        assert_eq!(meta.source_path, Some(PathBuf::from("/tmp/test.mp4")));
    }

    #[test]
    fn test_clone_is_independent() {
        let meta = metadata(640, 480);
        let mut cloned = meta.clone();
        assert_eq!(meta, cloned);
        cloned.duration = 0.0;
        assert_ne!(meta, cloned);
    }
}
