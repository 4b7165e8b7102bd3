pub mod ffmpeg_clip;
mod frame_ticker;
