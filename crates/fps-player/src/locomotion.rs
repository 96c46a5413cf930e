//! Ground locomotion: walk/strafe displacement plus a vertical speed that
//! relaxes toward terminal fall speed and is reset by jumps.

use fps_config::LocomotionConfig;
use glam::{Quat, Vec3};

use crate::frame::{FORWARD, RIGHT, UP};

/// Result of one locomotion step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LocomotionStep {
    /// World-space displacement to hand to the host mover.
    pub displacement: Vec3,
    /// Whether the horizontal part of the displacement is non-zero.
    pub is_moving: bool,
}

/// Kinematic walk/jump integrator.
///
/// Produces a displacement request each tick; collision resolution and
/// ground detection stay with the host mover.
#[derive(Clone, Debug)]
pub struct LocomotionController {
    forward_speed: f32,
    sideway_speed: f32,
    gravity: f32,
    jump_power: f32,
    jump_damping: f32,
    vertical_speed: f32,
}

impl LocomotionController {
    /// Create a controller already falling at terminal speed.
    #[must_use]
    pub fn new(config: &LocomotionConfig) -> Self {
        Self {
            forward_speed: config.forward_speed,
            sideway_speed: config.sideway_speed,
            gravity: config.gravity,
            jump_power: config.jump_power,
            jump_damping: config.jump_damping,
            vertical_speed: config.gravity,
        }
    }

    /// Current vertical speed (positive = up).
    #[must_use]
    pub fn vertical_speed(&self) -> f32 {
        self.vertical_speed
    }

    /// Terminal vertical speed the relaxation settles at.
    #[must_use]
    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    /// Integrate one tick of movement.
    ///
    /// `forward_axis` and `sideway_axis` are in `[-1, 1]`. `is_grounded` is the
    /// ground contact reported by the mover at the end of the previous tick.
    /// A non-positive or non-finite `dt` yields no displacement and leaves the
    /// state untouched.
    pub fn step(
        &mut self,
        forward_axis: f32,
        sideway_axis: f32,
        jump_pressed: bool,
        is_grounded: bool,
        dt: f32,
        orientation: Quat,
    ) -> LocomotionStep {
        if !dt.is_finite() || dt <= 0.0 {
            return LocomotionStep::default();
        }

        if self.vertical_speed > self.gravity {
            self.vertical_speed -= self.jump_damping * dt;
        }
        if self.vertical_speed < self.gravity {
            self.vertical_speed = self.gravity;
        }

        // Forward is flattened so looking up or down never lifts the player.
        let mut forward = orientation * (FORWARD * self.forward_speed * forward_axis * dt);
        forward.y = 0.0;
        let right = (orientation * RIGHT) * self.sideway_speed * sideway_axis * dt;
        let horizontal = forward + right;

        if jump_pressed && is_grounded {
            self.vertical_speed = self.jump_power;
        }

        LocomotionStep {
            displacement: horizontal + UP * self.vertical_speed * dt,
            is_moving: horizontal.length_squared() > 0.0,
        }
    }
}
