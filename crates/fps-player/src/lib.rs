//! First-person character controller: pointer look, ground locomotion with
//! gravity and jumps, a forward use-scan, and the health/death state machine.
//!
//! The host supplies collision, ray casting, UI, animation, and level
//! management through the traits in [`host`] and drives the controller with
//! one [`PlayerController::tick`] per frame.

pub mod angle;
pub mod controller;
pub mod error;
pub mod frame;
pub mod health;
pub mod host;
pub mod interaction;
pub mod locomotion;
pub mod look;
pub mod scheduler;


pub use angle::clamp_angle;
pub use controller::{HealthCommand, PlayerController, TickReport};
pub use error::PlayerError;
pub use health::{HealthChange, HealthController, LifeState};
pub use host::{
    ANIM_DAMAGED, ANIM_IS_DEAD, ANIM_IS_WALKING, AnimationSink, CameraSink, Collaborators,
    HealthDisplay, Interactable, Level, Mover, RayCaster, RayHit, Usable, UseHintDisplay,
};
pub use interaction::{InteractionScanner, ScanResult, USE_DISTANCE};
pub use locomotion::{LocomotionController, LocomotionStep};
pub use look::{Activity, LookController};
pub use scheduler::{ControllerId, FiredTimer, ScheduledEvent, SchedulerHandle, TimerScheduler};
