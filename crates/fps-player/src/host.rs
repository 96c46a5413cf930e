//! Contracts for the host systems the controller drives.
//!
//! The controller never looks collaborators up by itself; the host builds a
//! [`Collaborators`] bundle and hands it over at construction.

use glam::{Quat, Vec3};

/// Animation parameter toggled while the player walks.
pub const ANIM_IS_WALKING: &str = "IsWalking";
/// Animation trigger fired when health drops.
pub const ANIM_DAMAGED: &str = "Damaged";
/// Animation parameter set once on death.
pub const ANIM_IS_DEAD: &str = "IsDead";

/// Receives the view orientation each tick.
pub trait CameraSink {
    /// Apply the new local orientation.
    fn set_orientation(&mut self, orientation: Quat);
}

/// Moves the player body with collision resolution.
pub trait Mover {
    /// Current world-space position of the body.
    fn position(&self) -> Vec3;

    /// Apply `displacement` with collision resolution and report whether the
    /// body ended in ground contact.
    fn move_by(&mut self, displacement: Vec3) -> bool;
}

/// Something that can be used by the player, such as a door or a switch.
pub trait Usable {
    /// Trigger the use action. Fire-and-forget.
    fn try_use(&mut self);
}

/// An object a ray can hit. Capabilities are queried, not type-checked.
pub trait Interactable {
    /// The usable capability, if this object has one.
    fn as_usable(&mut self) -> Option<&mut dyn Usable> {
        None
    }
}

/// Nearest object along a cast ray.
pub struct RayHit<'a> {
    /// Distance from the ray origin to the hit point.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
    /// The object that was hit.
    pub target: &'a mut dyn Interactable,
}

/// Casts rays against the host's collision world.
pub trait RayCaster {
    /// Nearest hit along `direction` (normalized) within `max_distance`.
    fn cast(&mut self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit<'_>>;
}

/// Health bar UI.
pub trait HealthDisplay {
    /// Show the current health against the ceiling.
    fn show_health(&mut self, current: f32, max: f32);
}

/// "Press E to use" hint UI.
pub trait UseHintDisplay {
    /// Show or hide the hint.
    fn set_visible(&mut self, visible: bool);
}

/// First-person animation state machine.
pub trait AnimationSink {
    /// Set a boolean parameter.
    fn set_bool(&mut self, name: &str, value: bool);
    /// Fire a one-shot trigger.
    fn set_trigger(&mut self, name: &str);
}

/// Level management on the host side.
pub trait Level {
    /// Reload the level that is currently loaded.
    fn reload_current_level(&mut self);
}

/// Host collaborators handed to [`PlayerController::new`](crate::PlayerController::new).
///
/// `camera` and `mover` are required. `ray_caster` is required only when the
/// use-scan is enabled. The UI and animation sinks are optional.
#[derive(Default)]
pub struct Collaborators {
    /// View orientation sink.
    pub camera: Option<Box<dyn CameraSink>>,
    /// Body mover.
    pub mover: Option<Box<dyn Mover>>,
    /// Forward use-scan ray caster.
    pub ray_caster: Option<Box<dyn RayCaster>>,
    /// Health bar.
    pub health_display: Option<Box<dyn HealthDisplay>>,
    /// Use hint.
    pub use_hint: Option<Box<dyn UseHintDisplay>>,
    /// Animation sink.
    pub animator: Option<Box<dyn AnimationSink>>,
}

impl Collaborators {
    /// Start a bundle with the two required collaborators.
    #[must_use]
    pub fn new(camera: impl CameraSink + 'static, mover: impl Mover + 'static) -> Self {
        Self {
            camera: Some(Box::new(camera)),
            mover: Some(Box::new(mover)),
            ..Self::default()
        }
    }

    /// Attach a ray caster.
    #[must_use]
    pub fn with_ray_caster(mut self, ray_caster: impl RayCaster + 'static) -> Self {
        self.ray_caster = Some(Box::new(ray_caster));
        self
    }

    /// Attach a health display.
    #[must_use]
    pub fn with_health_display(mut self, display: impl HealthDisplay + 'static) -> Self {
        self.health_display = Some(Box::new(display));
        self
    }

    /// Attach a use-hint display.
    #[must_use]
    pub fn with_use_hint(mut self, hint: impl UseHintDisplay + 'static) -> Self {
        self.use_hint = Some(Box::new(hint));
        self
    }

    /// Attach an animation sink.
    #[must_use]
    pub fn with_animator(mut self, animator: impl AnimationSink + 'static) -> Self {
        self.animator = Some(Box::new(animator));
        self
    }
}
