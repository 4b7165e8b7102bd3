pub mod conversion_error;
pub mod file_outcome;
pub mod output_name;
pub mod target_size;
