//! Storage module for configuration and the exercise list file.

pub mod config;
pub mod exercise_list;

pub use config::{
    get_config_path, load_config_from, save_config_to, AppConfig, ConfigError, ImportSettings,
    ReportFormat, ReportSettings,
};
pub use exercise_list::ExerciseList;
