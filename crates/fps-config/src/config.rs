//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level controller configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Pointer look settings.
    pub look: LookConfig,
    /// Ground movement, gravity, and jump settings.
    pub locomotion: LocomotionConfig,
    /// Health and death settings.
    pub health: HealthConfig,
    /// Forward use-scan settings.
    pub interaction: InteractionConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Which accumulated angles drive the look orientation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum LookAxes {
    /// Yaw around the up axis followed by pitch around the lateral axis.
    #[default]
    YawPitch,
    /// Yaw only; pitch input still accumulates but is not applied.
    YawOnly,
    /// Pitch only; yaw input still accumulates but is not applied.
    PitchOnly,
}

/// Look configuration. Angles are in degrees.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LookConfig {
    /// Which axes are applied to the orientation.
    pub axes: LookAxes,
    /// Degrees of yaw per unit of horizontal pointer delta.
    pub sensitivity_x: f32,
    /// Degrees of pitch per unit of vertical pointer delta.
    pub sensitivity_y: f32,
    /// Lower yaw bound, within `[-360, 360]`.
    pub min_yaw: f32,
    /// Upper yaw bound, within `[-360, 360]`.
    pub max_yaw: f32,
    /// Lower pitch bound, within `[-360, 360]`.
    pub min_pitch: f32,
    /// Upper pitch bound, within `[-360, 360]`.
    pub max_pitch: f32,
}

/// Locomotion configuration. Speeds are in units per second.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Forward/backward speed at full axis deflection.
    pub forward_speed: f32,
    /// Strafe speed at full axis deflection.
    pub sideway_speed: f32,
    /// Terminal vertical speed (negative = down).
    pub gravity: f32,
    /// Vertical speed set by a jump.
    pub jump_power: f32,
    /// Rate at which vertical speed relaxes back toward `gravity`.
    /// Smaller values give longer, higher jumps.
    pub jump_damping: f32,
}

/// Health configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HealthConfig {
    /// Health ceiling.
    pub max_health: f32,
    /// Health applied at spawn.
    pub initial_health: f32,
    /// Seconds between death and the level reload.
    pub reload_delay_secs: f32,
}

/// Interaction configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InteractionConfig {
    /// Whether the player scans for usable targets at all.
    pub can_use_usables: bool,
    /// Length of the forward use ray.
    pub use_distance: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            axes: LookAxes::YawPitch,
            sensitivity_x: 15.0,
            sensitivity_y: 15.0,
            min_yaw: -360.0,
            max_yaw: 360.0,
            min_pitch: -60.0,
            max_pitch: 60.0,
        }
    }
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            forward_speed: 5.0,
            sideway_speed: 3.0,
            gravity: -9.81,
            jump_power: 20.0,
            jump_damping: 50.0,
        }
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            initial_health: 100.0,
            reload_delay_secs: 5.0,
        }
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            can_use_usables: true,
            use_distance: 3.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Platform config directory for the controller, e.g. `~/.config/fps-controller`.
#[must_use]
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("fps-controller"))
}

// --- Validation ---

fn check_angle(name: &str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || !(-360.0..=360.0).contains(&value) {
        return Err(ConfigError::Invalid(format!(
            "{name} must lie in [-360, 360], got {value}"
        )));
    }
    Ok(())
}

fn check_range(name: &str, min: f32, max: f32) -> Result<(), ConfigError> {
    check_angle(&format!("min_{name}"), min)?;
    check_angle(&format!("max_{name}"), max)?;
    if min > max {
        return Err(ConfigError::Invalid(format!(
            "min_{name} ({min}) exceeds max_{name} ({max})"
        )));
    }
    Ok(())
}

fn check_non_negative(name: &str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::Invalid(format!(
            "{name} must be finite and non-negative, got {value}"
        )));
    }
    Ok(())
}

fn check_finite(name: &str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::Invalid(format!("{name} must be finite")));
    }
    Ok(())
}

impl Config {
    /// Check every tuning value against its allowed range.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let look = &self.look;
        check_finite("sensitivity_x", look.sensitivity_x)?;
        check_finite("sensitivity_y", look.sensitivity_y)?;
        check_range("yaw", look.min_yaw, look.max_yaw)?;
        check_range("pitch", look.min_pitch, look.max_pitch)?;

        let loco = &self.locomotion;
        check_non_negative("forward_speed", loco.forward_speed)?;
        check_non_negative("sideway_speed", loco.sideway_speed)?;
        check_non_negative("jump_power", loco.jump_power)?;
        check_non_negative("jump_damping", loco.jump_damping)?;
        check_finite("gravity", loco.gravity)?;

        let health = &self.health;
        if !health.max_health.is_finite() || health.max_health <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "max_health must be positive, got {}",
                health.max_health
            )));
        }
        check_finite("initial_health", health.initial_health)?;
        check_non_negative("reload_delay_secs", health.reload_delay_secs)?;

        if !self.interaction.use_distance.is_finite() || self.interaction.use_distance <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "use_distance must be positive, got {}",
                self.interaction.use_distance
            )));
        }
        Ok(())
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("sensitivity_x: 15.0"));
        assert!(ron_str.contains("YawPitch"));
        assert!(ron_str.contains("can_use_usables: true"));
    }

    #[test]
    fn test_defaults_match_reference_tuning() {
        let config = Config::default();
        assert_eq!(config.look.min_pitch, -60.0);
        assert_eq!(config.look.max_pitch, 60.0);
        assert_eq!(config.locomotion.jump_power, 20.0);
        assert_eq!(config.locomotion.jump_damping, 50.0);
        assert_eq!(config.health.reload_delay_secs, 5.0);
        assert_eq!(config.interaction.use_distance, 3.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(look: (sensitivity_x: 2.0))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.look.sensitivity_x, 2.0);
        assert_eq!(config.look.sensitivity_y, 15.0);
        assert_eq!(config.health, HealthConfig::default());
    }

    #[test]
    fn test_look_axes_parse() {
        let config: Config = ron::from_str("(look: (axes: PitchOnly))").unwrap();
        assert_eq!(config.look.axes, LookAxes::PitchOnly);
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.look.sensitivity_x = 3.5;
        config.locomotion.gravity = -20.0;
        config.interaction.can_use_usables = false;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.health.max_health = 250.0;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().health.max_health, 250.0);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_pitch_range() {
        let mut config = Config::default();
        config.look.min_pitch = 30.0;
        config.look.max_pitch = -30.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("min_pitch"));
    }

    #[test]
    fn test_validate_rejects_angle_outside_full_turn() {
        let mut config = Config::default();
        config.look.max_yaw = 400.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_negative_speed() {
        let mut config = Config::default();
        config.locomotion.sideway_speed = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_max_health() {
        let mut config = Config::default();
        config.health.max_health = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_zero_speeds() {
        let mut config = Config::default();
        config.locomotion.forward_speed = 0.0;
        config.locomotion.sideway_speed = 0.0;
        assert!(config.validate().is_ok());
    }
}
