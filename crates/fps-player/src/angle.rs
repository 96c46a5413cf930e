//! Angle normalization for the look accumulators.

/// Nudge `angle` (degrees) back into `[-360, 360]` with a single wrap step,
/// then clamp it into `[min, max]`.
///
/// Only one turn is removed: `-800` becomes `-440`, not `-80`. The look
/// accumulators are clamped every frame, so they never drift further than
/// one frame's delta past the bound.
///
/// Never panics: with an inverted range the lower bound is checked first.
#[must_use]
pub fn clamp_angle(angle: f32, min: f32, max: f32) -> f32 {
    let mut angle = angle;
    if angle < -360.0 {
        angle += 360.0;
    }
    if angle > 360.0 {
        angle -= 360.0;
    }
    if angle < min {
        min
    } else if angle > max {
        max
    } else {
        angle
    }
}
