pub mod batch_report;
pub mod convert_batch_use_case;
