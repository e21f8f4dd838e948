//! Configuration for gh-pr-comment
//!
//! This crate provides:
//! - Configuration file lookup (current directory, then config directory)
//! - Application configuration (AppConfig) loaded from TOML

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::AppConfig;
pub use config_file::load_config_file;
pub use paths::app_config_path;
