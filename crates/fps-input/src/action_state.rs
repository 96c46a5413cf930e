//! Per-frame action state with previous-frame values for edge detection.
//!
//! The host polls its devices and writes one value per [`Action`] each frame
//! through [`ActionState::set_value`] or [`ActionState::set_pressed`]. Values
//! are clamped to `[-1.0, 1.0]`.

use rustc_hash::FxHashMap;

/// Semantic player actions.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Action {
    /// Move the player forward.
    MoveForward,
    /// Move the player backward.
    MoveBack,
    /// Strafe left.
    MoveLeft,
    /// Strafe right.
    MoveRight,
    /// Jump.
    Jump,
    /// Use the target in front of the player.
    Use,
}

/// Threshold below which an action is considered inactive.
const ACTIVATION_THRESHOLD: f32 = 0.001;

/// Action values for the current and previous frame.
#[derive(Debug, Clone, Default)]
pub struct ActionState {
    values: FxHashMap<Action, f32>,
    prev_values: FxHashMap<Action, f32>,
}

impl ActionState {
    /// Create a new empty action state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shift current values to previous and clear the current frame.
    ///
    /// Call once per frame before writing the new values.
    pub fn begin_frame(&mut self) {
        self.prev_values.clone_from(&self.values);
        self.values.clear();
    }

    /// Set the analog value of an action for this frame.
    pub fn set_value(&mut self, action: Action, value: f32) {
        self.values.insert(action, value.clamp(-1.0, 1.0));
    }

    /// Set a digital action for this frame.
    pub fn set_pressed(&mut self, action: Action, pressed: bool) {
        self.set_value(action, if pressed { 1.0 } else { 0.0 });
    }

    /// The analog value of an action, `0.0` if unset this frame.
    #[must_use]
    pub fn action_value(&self, action: Action) -> f32 {
        self.values.get(&action).copied().unwrap_or(0.0)
    }

    /// Whether an action's value is above the activation threshold.
    #[must_use]
    pub fn is_action_active(&self, action: Action) -> bool {
        self.action_value(action).abs() > ACTIVATION_THRESHOLD
    }

    /// True only on the frame the action transitioned from inactive to active.
    #[must_use]
    pub fn action_just_activated(&self, action: Action) -> bool {
        let prev =
            self.prev_values.get(&action).copied().unwrap_or(0.0).abs() > ACTIVATION_THRESHOLD;
        self.is_action_active(action) && !prev
    }

    /// Signed axis from a positive and a negative action, clamped to `[-1, 1]`.
    #[must_use]
    pub fn axis(&self, positive: Action, negative: Action) -> f32 {
        (self.action_value(positive) - self.action_value(negative)).clamp(-1.0, 1.0)
    }
}
