use std::path::Path;

use crate::shared::clip_metadata::ClipMetadata;

/// Encoder parameters for [`VideoClip::write`].
#[derive(Clone, Debug, PartialEq)]
pub struct EncodeSettings<'a> {
    /// Output frame rate.
    pub fps: u32,
    /// Encoder name as known to the video library (e.g. `libx264`).
    pub codec: &'a str,
    pub audio: bool,
}

/// A video opened for transformation and re-encoding.
///
/// Transformations are recorded on the open clip and applied when it is
/// written. Implementations hide the codec library; the conversion
/// pipeline only sees [`ClipMetadata`] and these calls.
pub trait VideoClip: Send {
    /// Opens a video file and returns its native properties.
    fn open(&mut self, path: &Path) -> Result<ClipMetadata, Box<dyn std::error::Error>>;

    /// Sets the frame rate the source frames are interpreted at.
    fn set_fps(&mut self, fps: f64);

    fn resize(&mut self, width: u32, height: u32);

    /// Repeats the clip until it lasts `duration` seconds, trimming the
    /// last pass.
    fn loop_to(&mut self, duration: f64);

    /// Encodes the transformed clip to `path`.
    fn write(
        &mut self,
        path: &Path,
        settings: &EncodeSettings<'_>,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Releases the clip. Safe to call on a clip that is not open.
    fn close(&mut self);
}
