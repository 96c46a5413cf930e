//! Host sinks that report through the log instead of a UI or animator.

use std::cell::Cell;
use std::rc::Rc;

use fps_player::{AnimationSink, CameraSink, HealthDisplay, UseHintDisplay};
use glam::Quat;
use tracing::{debug, info, trace};

/// Stores the last view orientation for the run summary.
pub struct RecordingCamera {
    last: Rc<Cell<Quat>>,
}

impl RecordingCamera {
    /// Camera writing into `last`.
    pub fn new(last: Rc<Cell<Quat>>) -> Self {
        Self { last }
    }
}

impl CameraSink for RecordingCamera {
    fn set_orientation(&mut self, orientation: Quat) {
        trace!(?orientation, "camera");
        self.last.set(orientation);
    }
}

/// Logs the health bar whenever its value changes.
#[derive(Default)]
pub struct LogHealthBar {
    shown: Option<f32>,
}

impl HealthDisplay for LogHealthBar {
    fn show_health(&mut self, current: f32, max: f32) {
        if self.shown != Some(current) {
            info!("health {current:.0}/{max:.0}");
            self.shown = Some(current);
        }
    }
}

/// Logs the use hint when it appears or disappears.
#[derive(Default)]
pub struct LogUseHint {
    visible: bool,
}

impl UseHintDisplay for LogUseHint {
    fn set_visible(&mut self, visible: bool) {
        if visible != self.visible {
            debug!(visible, "use hint");
            self.visible = visible;
        }
    }
}

/// Logs animation parameter changes and triggers.
#[derive(Default)]
pub struct LogAnimator {
    walking: bool,
}

impl AnimationSink for LogAnimator {
    fn set_bool(&mut self, name: &str, value: bool) {
        if name == fps_player::ANIM_IS_WALKING {
            if value == self.walking {
                return;
            }
            self.walking = value;
        }
        debug!(name, value, "animation bool");
    }

    fn set_trigger(&mut self, name: &str) {
        info!(name, "animation trigger");
    }
}
