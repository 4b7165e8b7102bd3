pub mod clip_metadata;
pub mod constants;
