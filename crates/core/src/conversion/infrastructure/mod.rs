pub mod input_scanner;
