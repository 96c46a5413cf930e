//! Normalized per-tick input consumed by the player controller.

use glam::Vec2;

use crate::action_state::{Action, ActionState};

/// Everything the controller reads from input in one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    /// Pointer delta this tick (x = horizontal, y = vertical), host-normalized.
    pub look_delta: Vec2,
    /// Forward/back axis in `[-1, 1]`.
    pub forward: f32,
    /// Right/left axis in `[-1, 1]`.
    pub sideway: f32,
    /// Jump held.
    pub jump: bool,
    /// Use pressed this tick (edge, not held).
    pub use_pressed: bool,
}

impl PlayerInput {
    /// Build the tick input from resolved actions and the pointer delta.
    #[must_use]
    pub fn from_actions(actions: &ActionState, look_delta: Vec2) -> Self {
        Self {
            look_delta,
            forward: actions.axis(Action::MoveForward, Action::MoveBack),
            sideway: actions.axis(Action::MoveRight, Action::MoveLeft),
            jump: actions.is_action_active(Action::Jump),
            use_pressed: actions.action_just_activated(Action::Use),
        }
    }
}
