pub mod video_clip;
