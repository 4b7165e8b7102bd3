pub mod config;
pub mod conversion;
pub mod pipeline;
pub mod shared;
pub mod video;
