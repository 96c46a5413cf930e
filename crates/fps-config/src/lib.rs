//! Configuration for the first-person controller.
//!
//! Tuning values persist to disk as RON files and can be overridden from the
//! command line via clap. Every section falls back to its defaults when
//! missing, so older config files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    Config, DebugConfig, HealthConfig, InteractionConfig, LocomotionConfig, LookAxes, LookConfig,
    default_config_dir,
};
pub use error::ConfigError;
