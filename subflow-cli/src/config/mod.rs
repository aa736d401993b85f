pub mod analysis_config;
pub mod app_config;
pub mod input_config;
pub mod log_config;
pub mod output_config;
