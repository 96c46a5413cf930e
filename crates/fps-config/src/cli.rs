//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Controller command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "fps-sim", about = "Headless first-person controller simulation")]
pub struct CliArgs {
    /// Horizontal look sensitivity (degrees per unit of pointer delta).
    #[arg(long)]
    pub sensitivity_x: Option<f32>,

    /// Vertical look sensitivity (degrees per unit of pointer delta).
    #[arg(long)]
    pub sensitivity_y: Option<f32>,

    /// Disable the forward use-scan.
    #[arg(long)]
    pub no_use: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(sx) = args.sensitivity_x {
            self.look.sensitivity_x = sx;
        }
        if let Some(sy) = args.sensitivity_y {
            self.look.sensitivity_y = sy;
        }
        if args.no_use {
            self.interaction.can_use_usables = false;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            sensitivity_x: Some(2.5),
            no_use: true,
            log_level: Some("debug".to_string()),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.look.sensitivity_x, 2.5);
        assert!(!config.interaction.can_use_usables);
        assert_eq!(config.debug.log_level, "debug");
        // Non-overridden fields retain defaults
        assert_eq!(config.look.sensitivity_y, 15.0);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from(["fps-sim", "--sensitivity-y", "4", "--no-use"]);
        assert_eq!(args.sensitivity_y, Some(4.0));
        assert!(args.no_use);
        assert!(args.config.is_none());
    }
}
