pub mod conversion_config;
pub mod resolver;
