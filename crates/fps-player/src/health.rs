//! Health value and the one-way Alive → Dead life state.

use fps_config::HealthConfig;

/// Life state of the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LifeState {
    /// Health has never reached zero.
    #[default]
    Alive,
    /// Terminal.
    Dead,
}

/// What a health change caused.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HealthChange {
    /// The new value was lower than the old one.
    pub damaged: bool,
    /// This change moved the player from Alive to Dead.
    pub died: bool,
    /// Health after the change, for the health display.
    pub health: f32,
}

/// Owns the health value and the life state.
///
/// Health is capped at `max_health` but not floored at zero: a lethal hit
/// leaves the negative value in place for the display.
#[derive(Clone, Debug)]
pub struct HealthController {
    health: f32,
    max_health: f32,
    life: LifeState,
}

impl HealthController {
    /// Create an alive controller holding the configured initial health.
    ///
    /// The value is stored raw; pass it through [`set_health`](Self::set_health)
    /// once to cap it and evaluate an initial death.
    #[must_use]
    pub fn new(config: &HealthConfig) -> Self {
        Self {
            health: config.initial_health,
            max_health: config.max_health,
            life: LifeState::Alive,
        }
    }

    /// Current health.
    #[must_use]
    pub fn health(&self) -> f32 {
        self.health
    }

    /// Health ceiling.
    #[must_use]
    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    /// Current life state.
    #[must_use]
    pub fn life(&self) -> LifeState {
        self.life
    }

    /// Whether the player has died.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.life == LifeState::Dead
    }

    /// Health as a fraction of the ceiling.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        self.health / self.max_health
    }

    /// Replace the health value.
    ///
    /// Damage is detected against the previous value before capping, and the
    /// death transition is evaluated before the cap is applied. Once dead,
    /// further calls still update the value but never report `died` again.
    pub fn set_health(&mut self, value: f32) -> HealthChange {
        let damaged = value < self.health;
        self.health = value;

        let mut died = false;
        if self.health <= 0.0 && self.life == LifeState::Alive {
            self.life = LifeState::Dead;
            died = true;
        }

        if self.health > self.max_health {
            self.health = self.max_health;
        }

        HealthChange {
            damaged,
            died,
            health: self.health,
        }
    }

    /// Subtract `amount` from the current health.
    pub fn apply_damage(&mut self, amount: f32) -> HealthChange {
        self.set_health(self.health - amount)
    }

    /// Add `amount` to the current health.
    pub fn heal(&mut self, amount: f32) -> HealthChange {
        self.set_health(self.health + amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> HealthController {
        HealthController::new(&HealthConfig::default())
    }

    #[test]
    fn test_starts_full_and_alive() {
        let hc = full();
        assert_eq!(hc.health(), 100.0);
        assert_eq!(hc.life(), LifeState::Alive);
        assert_eq!(hc.fraction(), 1.0);
    }

    #[test]
    fn test_damage_then_death() {
        let mut hc = full();
        let change = hc.set_health(40.0);
        assert_eq!(
            change,
            HealthChange {
                damaged: true,
                died: false,
                health: 40.0
            }
        );

        let change = hc.set_health(-5.0);
        assert!(change.damaged);
        assert!(change.died);
        assert_eq!(change.health, -5.0);
        assert!(hc.is_dead());
    }

    #[test]
    fn test_values_above_ceiling_are_truncated() {
        let mut hc = full();
        for value in [100.5, 150.0, 1e9, f32::MAX] {
            let change = hc.set_health(value);
            assert_eq!(change.health, 100.0);
            assert_eq!(hc.health(), 100.0);
            assert!(!change.damaged);
        }
    }

    #[test]
    fn test_death_reported_once() {
        let mut hc = full();
        assert!(hc.set_health(0.0).died);
        for value in [0.0, -1.0, -50.0, -0.5] {
            let change = hc.set_health(value);
            assert!(!change.died);
            assert!(hc.is_dead());
        }
    }

    #[test]
    fn test_no_resurrection() {
        let mut hc = full();
        hc.set_health(-10.0);
        let change = hc.set_health(80.0);
        assert!(!change.damaged);
        assert!(!change.died);
        assert_eq!(hc.health(), 80.0);
        assert_eq!(hc.life(), LifeState::Dead);
    }

    #[test]
    fn test_heal_is_not_damage() {
        let mut hc = full();
        hc.set_health(30.0);
        let change = hc.heal(20.0);
        assert!(!change.damaged);
        assert_eq!(change.health, 50.0);
    }

    #[test]
    fn test_apply_damage_subtracts() {
        let mut hc = full();
        let change = hc.apply_damage(25.0);
        assert!(change.damaged);
        assert_eq!(change.health, 75.0);
        let change = hc.apply_damage(80.0);
        assert!(change.died);
        assert_eq!(change.health, -5.0);
    }

    #[test]
    fn test_initial_health_applied_without_damage() {
        let config = HealthConfig {
            initial_health: 250.0,
            ..HealthConfig::default()
        };
        let mut hc = HealthController::new(&config);
        let change = hc.set_health(hc.health());
        assert!(!change.damaged);
        assert_eq!(change.health, 100.0);
    }

    #[test]
    fn test_setting_same_value_is_not_damage() {
        let mut hc = full();
        let change = hc.set_health(100.0);
        assert!(!change.damaged);
        assert!(!change.died);
    }
}
