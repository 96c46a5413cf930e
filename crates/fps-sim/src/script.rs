//! Scripted input timeline for the headless run.

use fps_input::{Action, ActionState};
use glam::Vec2;

/// What happens during a span of ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cue {
    /// Hold an action.
    Hold(Action),
    /// Add a pointer delta each tick.
    Look(Vec2),
    /// Deal damage each tick.
    Damage(f32),
}

/// A cue active on ticks `start..end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    /// First tick.
    pub start: u64,
    /// One past the last tick.
    pub end: u64,
    /// The cue.
    pub cue: Cue,
}

impl Span {
    fn at(tick: u64, cue: Cue) -> Self {
        Self {
            start: tick,
            end: tick + 1,
            cue,
        }
    }

    fn covers(&self, tick: u64) -> bool {
        (self.start..self.end).contains(&tick)
    }
}

/// Ordered list of input spans.
#[derive(Clone, Debug, Default)]
pub struct Script {
    spans: Vec<Span>,
}

impl Script {
    /// Script from explicit spans.
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// The default 60 Hz run: settle, open the door ahead, back off, jump,
    /// turn to face the switch, strafe to it and press it, then take three
    /// hits, the last one lethal.
    pub fn demo() -> Self {
        Self::new(vec![
            Span::at(30, Cue::Hold(Action::Use)),
            Span {
                start: 31,
                end: 61,
                cue: Cue::Hold(Action::MoveBack),
            },
            Span {
                start: 61,
                end: 71,
                cue: Cue::Hold(Action::Jump),
            },
            Span::at(80, Cue::Look(Vec2::new(-6.0, 0.0))),
            Span {
                start: 81,
                end: 131,
                cue: Cue::Hold(Action::MoveLeft),
            },
            Span::at(140, Cue::Hold(Action::Use)),
            Span::at(150, Cue::Damage(40.0)),
            Span::at(170, Cue::Damage(30.0)),
            Span::at(200, Cue::Damage(50.0)),
        ])
    }

    /// Write this tick's held actions and return the pointer delta.
    pub fn apply(&self, tick: u64, actions: &mut ActionState) -> Vec2 {
        let mut look = Vec2::ZERO;
        for span in self.spans.iter().filter(|s| s.covers(tick)) {
            match span.cue {
                Cue::Hold(action) => actions.set_pressed(action, true),
                Cue::Look(delta) => look += delta,
                Cue::Damage(_) => {}
            }
        }
        look
    }

    /// Total damage dealt on this tick.
    pub fn damage_at(&self, tick: u64) -> f32 {
        self.spans
            .iter()
            .filter(|s| s.covers(tick))
            .filter_map(|s| match s.cue {
                Cue::Damage(amount) => Some(amount),
                _ => None,
            })
            .sum()
    }
}
