//! Input abstraction: host-normalized action values folded into a per-tick
//! [`PlayerInput`] for the character controller.

pub mod action_state;
pub mod player_input;

pub use action_state::{Action, ActionState};
pub use player_input::PlayerInput;
