//! Per-tick composition of look, locomotion, use-scan, and health.

use fps_config::Config;
use fps_input::PlayerInput;
use glam::{Quat, Vec3};
use tracing::{debug, info, trace, warn};

use crate::error::PlayerError;
use crate::frame::FORWARD;
use crate::health::{HealthChange, HealthController, LifeState};
use crate::host::{
    ANIM_DAMAGED, ANIM_IS_DEAD, ANIM_IS_WALKING, AnimationSink, CameraSink, Collaborators,
    HealthDisplay, Mover, RayCaster, UseHintDisplay,
};
use crate::interaction::InteractionScanner;
use crate::locomotion::LocomotionController;
use crate::look::LookController;
use crate::scheduler::{ControllerId, ScheduledEvent, SchedulerHandle};

/// A health mutation queued for the start of the next tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HealthCommand {
    /// Replace the health value.
    Set(f32),
    /// Subtract from the health value.
    Damage(f32),
    /// Add to the health value.
    Heal(f32),
}

/// What happened during one [`PlayerController::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickReport {
    /// Life state after the queued health commands were applied.
    pub life: LifeState,
    /// Displacement handed to the mover (zero while dead).
    pub displacement: Vec3,
    /// Ground contact reported by the mover.
    pub grounded: bool,
    /// Whether the player walked this tick.
    pub is_moving: bool,
    /// Whether the use hint is shown.
    pub hint_visible: bool,
    /// Whether a usable target was triggered.
    pub used: bool,
    /// View orientation after this tick.
    pub orientation: Quat,
}

/// First-person player: owns the sub-controllers and drives the host
/// collaborators once per tick.
pub struct PlayerController {
    id: ControllerId,
    scheduler: SchedulerHandle,
    look: LookController,
    locomotion: LocomotionController,
    scanner: InteractionScanner,
    health: HealthController,
    can_use_usables: bool,
    reload_delay_secs: f32,
    grounded: bool,
    pending_health: Vec<HealthCommand>,
    camera: Box<dyn CameraSink>,
    mover: Box<dyn Mover>,
    ray_caster: Option<Box<dyn RayCaster>>,
    health_display: Option<Box<dyn HealthDisplay>>,
    use_hint: Option<Box<dyn UseHintDisplay>>,
    animator: Option<Box<dyn AnimationSink>>,
}

impl PlayerController {
    /// Build a controller around the spawn orientation `base_orientation`.
    ///
    /// The configured initial health is applied immediately, so the health
    /// display receives its first value here.
    ///
    /// # Errors
    /// [`PlayerError::InvalidConfiguration`] for out-of-range tuning values,
    /// [`PlayerError::MissingCollaborator`] when the camera or mover is absent,
    /// or the ray caster is absent while the use-scan is enabled.
    pub fn new(
        config: &Config,
        base_orientation: Quat,
        collaborators: Collaborators,
        scheduler: SchedulerHandle,
    ) -> Result<Self, PlayerError> {
        config.validate()?;

        let Collaborators {
            camera,
            mover,
            ray_caster,
            health_display,
            use_hint,
            animator,
        } = collaborators;

        let camera = camera.ok_or(PlayerError::MissingCollaborator("camera"))?;
        let mover = mover.ok_or(PlayerError::MissingCollaborator("mover"))?;
        if config.interaction.can_use_usables && ray_caster.is_none() {
            return Err(PlayerError::MissingCollaborator("ray caster"));
        }

        if health_display.is_none() {
            warn!("No health display attached; health changes will not be shown");
        }
        if use_hint.is_none() {
            warn!("No use hint display attached; use hints will not be shown");
        }
        if animator.is_none() {
            warn!("No animation sink attached; walk/damage/death animations disabled");
        }

        let id = scheduler.register();
        let mut player = Self {
            id,
            scheduler,
            look: LookController::new(&config.look, base_orientation),
            locomotion: LocomotionController::new(&config.locomotion),
            scanner: InteractionScanner::new(config.interaction.use_distance),
            health: HealthController::new(&config.health),
            can_use_usables: config.interaction.can_use_usables,
            reload_delay_secs: config.health.reload_delay_secs,
            grounded: false,
            pending_health: Vec::new(),
            camera,
            mover,
            ray_caster,
            health_display,
            use_hint,
            animator,
        };

        let initial = player.health.health();
        player.apply_health(HealthCommand::Set(initial));
        debug!(?id, health = player.health.health(), "player spawned");
        Ok(player)
    }

    /// Identity used for this player's scheduled timers.
    #[must_use]
    pub fn id(&self) -> ControllerId {
        self.id
    }

    /// Current health.
    #[must_use]
    pub fn health(&self) -> f32 {
        self.health.health()
    }

    /// Health ceiling.
    #[must_use]
    pub fn max_health(&self) -> f32 {
        self.health.max_health()
    }

    /// Health as a fraction of the ceiling; negative once health drops below zero.
    #[must_use]
    pub fn health_fraction(&self) -> f32 {
        self.health.fraction()
    }

    /// Current life state.
    #[must_use]
    pub fn life(&self) -> LifeState {
        self.health.life()
    }

    /// Whether the player has died.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health.is_dead()
    }

    /// Look sub-controller.
    #[must_use]
    pub fn look(&self) -> &LookController {
        &self.look
    }

    /// Locomotion sub-controller.
    #[must_use]
    pub fn locomotion(&self) -> &LocomotionController {
        &self.locomotion
    }

    /// Ground contact reported by the mover on the last tick.
    #[must_use]
    pub fn grounded(&self) -> bool {
        self.grounded
    }

    /// Whether the use-scan runs each tick.
    #[must_use]
    pub fn can_use_usables(&self) -> bool {
        self.can_use_usables
    }

    /// Enable or disable the use-scan. Enabling has no effect without a ray caster.
    pub fn set_can_use_usables(&mut self, enabled: bool) {
        if enabled && self.ray_caster.is_none() {
            warn!("Cannot enable use-scan without a ray caster");
            return;
        }
        self.can_use_usables = enabled;
        if !enabled && let Some(hint) = self.use_hint.as_deref_mut() {
            hint.set_visible(false);
        }
    }

    /// Replace the health value now.
    pub fn set_health(&mut self, value: f32) -> HealthChange {
        self.apply_health(HealthCommand::Set(value))
    }

    /// Subtract `amount` from the health value now.
    pub fn apply_damage(&mut self, amount: f32) -> HealthChange {
        self.apply_health(HealthCommand::Damage(amount))
    }

    /// Add `amount` to the health value now.
    pub fn heal(&mut self, amount: f32) -> HealthChange {
        self.apply_health(HealthCommand::Heal(amount))
    }

    /// Queue a health change for the start of the next tick, ahead of that
    /// tick's movement and look.
    pub fn queue_health(&mut self, command: HealthCommand) {
        self.pending_health.push(command);
    }

    fn apply_health(&mut self, command: HealthCommand) -> HealthChange {
        let was_dead = self.health.is_dead();
        let change = match command {
            HealthCommand::Set(value) => self.health.set_health(value),
            HealthCommand::Damage(amount) => self.health.apply_damage(amount),
            HealthCommand::Heal(amount) => self.health.heal(amount),
        };

        if change.damaged
            && !was_dead
            && let Some(animator) = self.animator.as_deref_mut()
        {
            animator.set_trigger(ANIM_DAMAGED);
        }

        if change.died {
            self.on_death();
        }

        if let Some(display) = self.health_display.as_deref_mut() {
            display.show_health(change.health, self.health.max_health());
        }
        change
    }

    fn on_death(&mut self) {
        info!(id = ?self.id, health = self.health.health(), "player died");
        if let Some(animator) = self.animator.as_deref_mut() {
            animator.set_bool(ANIM_IS_DEAD, true);
        }
        self.look.freeze();
        self.scheduler
            .schedule_once(self.id, self.reload_delay_secs, ScheduledEvent::ReloadLevel);
    }

    /// Run one simulation tick.
    ///
    /// Queued health commands are applied first. While alive the use-scan and
    /// locomotion run; the look runs until it is frozen by death.
    pub fn tick(&mut self, input: &PlayerInput, dt: f32) -> TickReport {
        for command in std::mem::take(&mut self.pending_health) {
            self.apply_health(command);
        }

        let mut report = TickReport {
            life: self.health.life(),
            displacement: Vec3::ZERO,
            grounded: self.grounded,
            is_moving: false,
            hint_visible: false,
            used: false,
            orientation: self.look.orientation(),
        };

        if !self.health.is_dead() {
            if self.can_use_usables
                && let Some(ray_caster) = self.ray_caster.as_deref_mut()
            {
                let origin = self.mover.position();
                let direction = self.look.orientation() * FORWARD;
                let scan = self
                    .scanner
                    .scan(ray_caster, origin, direction, input.use_pressed);
                report.hint_visible = scan.hint_visible;
                report.used = scan.used;
                if let Some(hint) = self.use_hint.as_deref_mut() {
                    hint.set_visible(scan.hint_visible);
                }
            }

            let step = self.locomotion.step(
                input.forward,
                input.sideway,
                input.jump,
                self.grounded,
                dt,
                self.look.orientation(),
            );
            self.grounded = self.mover.move_by(step.displacement);
            if let Some(animator) = self.animator.as_deref_mut() {
                animator.set_bool(ANIM_IS_WALKING, step.is_moving);
            }

            report.displacement = step.displacement;
            report.is_moving = step.is_moving;
            report.grounded = self.grounded;
        }

        if self.look.is_active() {
            let orientation = self.look.update(input.look_delta.x, input.look_delta.y);
            self.camera.set_orientation(orientation);
            report.orientation = orientation;
        }

        trace!(
            displacement = ?report.displacement,
            grounded = report.grounded,
            vertical_speed = self.locomotion.vertical_speed(),
            "tick"
        );
        report
    }
}

impl Drop for PlayerController {
    fn drop(&mut self) {
        match self.scheduler.try_cancel_owner(self.id) {
            Some(0) => {}
            Some(cancelled) => debug!(id = ?self.id, cancelled, "cancelled pending timers"),
            None => warn!(id = ?self.id, "scheduler busy; pending timers not cancelled"),
        }
    }
}
