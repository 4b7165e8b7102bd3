/// Aspect-preserving size for a fixed output height.
///
/// Returns `(round(target_height * width / height), target_height)`, or
/// `None` when the native size has a zero dimension.
pub fn target_size(width: u32, height: u32, target_height: u32) -> Option<(u32, u32)> {
    if width == 0 || height == 0 {
        return None;
    }
    let ratio = width as f64 / height as f64;
    let new_width = (target_height as f64 * ratio).round() as u32;
    Some((new_width, target_height))
}
