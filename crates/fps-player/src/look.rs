//! Pointer look: accumulates pointer deltas into bounded yaw/pitch angles
//! and re-derives the orientation from the spawn orientation every frame.

use fps_config::{LookAxes, LookConfig};
use glam::Quat;

use crate::angle::clamp_angle;
use crate::frame::{RIGHT, UP};

/// Whether a sub-controller runs on the next tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Activity {
    /// Updated every tick.
    #[default]
    Active,
    /// Skipped; keeps its last output.
    Frozen,
}

/// Yaw/pitch accumulator for a first-person view.
///
/// Angles are in degrees. Yaw turns around [`UP`], pitch tilts around the
/// negated [`RIGHT`] axis, both composed onto the orientation captured at
/// construction rather than onto the previous frame's result, so the view
/// never drifts.
#[derive(Clone, Debug)]
pub struct LookController {
    axes: LookAxes,
    sensitivity_x: f32,
    sensitivity_y: f32,
    min_yaw: f32,
    max_yaw: f32,
    min_pitch: f32,
    max_pitch: f32,
    yaw: f32,
    pitch: f32,
    base: Quat,
    orientation: Quat,
    activity: Activity,
}

impl LookController {
    /// Create a look controller with zeroed accumulators around `base`.
    #[must_use]
    pub fn new(config: &LookConfig, base: Quat) -> Self {
        Self {
            axes: config.axes,
            sensitivity_x: config.sensitivity_x,
            sensitivity_y: config.sensitivity_y,
            min_yaw: config.min_yaw,
            max_yaw: config.max_yaw,
            min_pitch: config.min_pitch,
            max_pitch: config.max_pitch,
            yaw: 0.0,
            pitch: 0.0,
            base,
            orientation: base,
            activity: Activity::Active,
        }
    }

    /// Accumulate one frame of pointer delta and return the new orientation.
    ///
    /// A non-finite delta component counts as zero.
    pub fn update(&mut self, dx: f32, dy: f32) -> Quat {
        let dx = if dx.is_finite() { dx } else { 0.0 };
        let dy = if dy.is_finite() { dy } else { 0.0 };
        self.yaw += dx * self.sensitivity_x;
        self.pitch += dy * self.sensitivity_y;
        self.yaw = clamp_angle(self.yaw, self.min_yaw, self.max_yaw);
        self.pitch = clamp_angle(self.pitch, self.min_pitch, self.max_pitch);

        self.orientation = match self.axes {
            LookAxes::YawPitch => self.base * yaw_rotation(self.yaw) * pitch_rotation(self.pitch),
            LookAxes::YawOnly => self.base * yaw_rotation(self.yaw),
            LookAxes::PitchOnly => {
                self.base * Quat::from_axis_angle(RIGHT, (-self.pitch).to_radians())
            }
        };
        self.orientation
    }

    /// Accumulated yaw in degrees.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Accumulated pitch in degrees.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Orientation captured at construction.
    #[must_use]
    pub fn base(&self) -> Quat {
        self.base
    }

    /// Orientation produced by the last update (the base before any update).
    #[must_use]
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn activity(&self) -> Activity {
        self.activity
    }

    /// Whether the composing controller should call [`update`](Self::update).
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.activity == Activity::Active
    }

    /// Stop per-tick updates; the orientation stays at its last value.
    pub fn freeze(&mut self) {
        self.activity = Activity::Frozen;
    }
}

fn yaw_rotation(yaw_deg: f32) -> Quat {
    Quat::from_axis_angle(UP, yaw_deg.to_radians())
}

fn pitch_rotation(pitch_deg: f32) -> Quat {
    Quat::from_axis_angle(-RIGHT, pitch_deg.to_radians())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FORWARD;

    fn look(axes: LookAxes) -> LookController {
        let config = LookConfig {
            axes,
            ..LookConfig::default()
        };
        LookController::new(&config, Quat::IDENTITY)
    }

    #[test]
    fn test_initial_orientation_is_base() {
        let base = Quat::from_rotation_y(0.7);
        let ctl = LookController::new(&LookConfig::default(), base);
        assert_eq!(ctl.orientation(), base);
        assert_eq!(ctl.yaw(), 0.0);
        assert_eq!(ctl.pitch(), 0.0);
        assert!(ctl.is_active());
    }

    #[test]
    fn test_one_tick_of_yaw() {
        let mut ctl = look(LookAxes::YawPitch);
        let q = ctl.update(1.0, 0.0);
        assert_eq!(ctl.yaw(), 15.0);
        let expected = Quat::from_axis_angle(UP, 15.0_f32.to_radians());
        assert!(q.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn test_yaw_then_pitch_composed_on_base() {
        let base = Quat::from_rotation_x(0.2);
        let mut ctl = LookController::new(&LookConfig::default(), base);
        let q = ctl.update(2.0, 1.0);
        let expected = base
            * Quat::from_axis_angle(UP, 30.0_f32.to_radians())
            * Quat::from_axis_angle(-RIGHT, 15.0_f32.to_radians());
        assert!(q.abs_diff_eq(expected, 1e-6));
        assert_eq!(ctl.base(), base);
    }

    #[test]
    fn test_zero_delta_never_changes_orientation() {
        let mut ctl = look(LookAxes::YawPitch);
        let start = ctl.update(3.0, -1.5);
        for _ in 0..1_000 {
            assert_eq!(ctl.update(0.0, 0.0), start);
        }
    }

    #[test]
    fn test_accumulators_stay_bounded() {
        let mut ctl = look(LookAxes::YawPitch);
        let deltas = [1e3, -5e4, 77.0, 9e5, -1.0, -8e5];
        for (i, dx) in deltas.iter().cycle().take(200).enumerate() {
            let dy = if i % 3 == 0 { -dx } else { *dx };
            ctl.update(*dx, dy);
            assert!((-360.0..=360.0).contains(&ctl.yaw()), "yaw {}", ctl.yaw());
            assert!((-60.0..=60.0).contains(&ctl.pitch()), "pitch {}", ctl.pitch());
        }
    }

    #[test]
    fn test_non_finite_delta_ignored() {
        let mut ctl = look(LookAxes::YawPitch);
        let before = ctl.update(1.0, 1.0);
        assert_eq!(ctl.update(f32::NAN, f32::INFINITY), before);
        for _ in 0..10 {
            ctl.update(1.0, 0.0);
        }
        assert_eq!(ctl.yaw(), 165.0);
        assert_eq!(ctl.pitch(), 15.0);
        assert!(ctl.orientation().is_finite());
    }

    #[test]
    fn test_pitch_clamps_at_limit() {
        let mut ctl = look(LookAxes::YawPitch);
        ctl.update(0.0, 10.0);
        assert_eq!(ctl.pitch(), 60.0);
        ctl.update(0.0, -100.0);
        assert_eq!(ctl.pitch(), -60.0);
    }

    #[test]
    fn test_pitch_rotates_about_negated_right() {
        let mut ctl = look(LookAxes::YawPitch);
        let q = ctl.update(0.0, 2.0);
        let expected = Quat::from_axis_angle(-RIGHT, 30.0_f32.to_radians()) * FORWARD;
        assert!((q * FORWARD).abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn test_yaw_only_ignores_pitch() {
        let mut ctl = look(LookAxes::YawOnly);
        let q = ctl.update(1.0, 3.0);
        assert_eq!(ctl.pitch(), 45.0);
        assert!(q.abs_diff_eq(Quat::from_axis_angle(UP, 15.0_f32.to_radians()), 1e-6));
    }

    #[test]
    fn test_pitch_only_rotates_negative_pitch_about_right() {
        let mut ctl = look(LookAxes::PitchOnly);
        let q = ctl.update(5.0, 1.0);
        let expected = Quat::from_axis_angle(RIGHT, (-15.0_f32).to_radians());
        assert!(q.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn test_freeze_keeps_orientation() {
        let mut ctl = look(LookAxes::YawPitch);
        let q = ctl.update(1.0, 1.0);
        ctl.freeze();
        assert_eq!(ctl.activity(), Activity::Frozen);
        assert!(!ctl.is_active());
        assert_eq!(ctl.orientation(), q);
    }
}
