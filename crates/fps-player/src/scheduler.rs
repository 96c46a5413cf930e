//! Host-owned one-shot timers keyed by the controller that scheduled them.
//!
//! The host advances the scheduler with its own clock and reacts to the fired
//! events. A controller cancels its timers when it is dropped, so a reload
//! scheduled by a player that no longer exists never fires.

use std::cell::RefCell;
use std::rc::Rc;

/// Identity of a controller registered with a [`TimerScheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControllerId(u64);

/// Deferred actions the controller can request from the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScheduledEvent {
    /// Reload the current level.
    ReloadLevel,
}

/// A timer that came due during [`TimerScheduler::advance`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FiredTimer {
    /// Controller that scheduled the timer.
    pub owner: ControllerId,
    /// What to do.
    pub event: ScheduledEvent,
    /// Scheduler time at which the timer was due.
    pub due: f64,
}

#[derive(Clone, Copy, Debug)]
struct Timer {
    owner: ControllerId,
    event: ScheduledEvent,
    due: f64,
    seq: u64,
}

/// One-shot timer queue driven by the host's clock.
#[derive(Debug, Default)]
pub struct TimerScheduler {
    now: f64,
    timers: Vec<Timer>,
    next_owner: u64,
    next_seq: u64,
}

impl TimerScheduler {
    /// Create an empty scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an identity for a new controller.
    pub fn register(&mut self) -> ControllerId {
        let id = ControllerId(self.next_owner);
        self.next_owner += 1;
        id
    }

    /// Seconds elapsed since the scheduler was created.
    #[must_use]
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Number of timers that have not fired yet.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Number of pending timers owned by `owner`.
    #[must_use]
    pub fn pending_for(&self, owner: ControllerId) -> usize {
        self.timers.iter().filter(|t| t.owner == owner).count()
    }

    /// Due time of the earliest pending timer owned by `owner`.
    #[must_use]
    pub fn next_due_for(&self, owner: ControllerId) -> Option<f64> {
        self.timers
            .iter()
            .filter(|t| t.owner == owner)
            .map(|t| t.due)
            .min_by(f64::total_cmp)
    }

    /// Fire `event` once, `delay_secs` from now.
    pub fn schedule_once(&mut self, owner: ControllerId, delay_secs: f32, event: ScheduledEvent) {
        let due = self.now + f64::from(delay_secs.max(0.0));
        self.timers.push(Timer {
            owner,
            event,
            due,
            seq: self.next_seq,
        });
        self.next_seq += 1;
        tracing::debug!(?owner, ?event, due, "timer scheduled");
    }

    /// Drop every pending timer of `owner`. Returns how many were removed.
    pub fn cancel_owner(&mut self, owner: ControllerId) -> usize {
        let before = self.timers.len();
        self.timers.retain(|t| t.owner != owner);
        before - self.timers.len()
    }

    /// Drop every pending timer, e.g. when the level is torn down.
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Advance the clock by `dt` seconds and return the timers that came due,
    /// earliest first. Each timer fires exactly once.
    pub fn advance(&mut self, dt: f32) -> Vec<FiredTimer> {
        if dt.is_finite() && dt > 0.0 {
            self.now += f64::from(dt);
        }

        let now = self.now;
        let (mut due, pending): (Vec<Timer>, Vec<Timer>) =
            self.timers.drain(..).partition(|t| t.due <= now);
        self.timers = pending;

        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)));
        due.into_iter()
            .map(|t| FiredTimer {
                owner: t.owner,
                event: t.event,
                due: t.due,
            })
            .collect()
    }
}

/// Shared handle to a host-owned [`TimerScheduler`].
///
/// The simulation is single-threaded, so a reference-counted cell is enough.
#[derive(Clone, Debug, Default)]
pub struct SchedulerHandle(Rc<RefCell<TimerScheduler>>);

impl SchedulerHandle {
    /// Wrap a fresh scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// See [`TimerScheduler::register`].
    pub fn register(&self) -> ControllerId {
        self.0.borrow_mut().register()
    }

    /// See [`TimerScheduler::schedule_once`].
    pub fn schedule_once(&self, owner: ControllerId, delay_secs: f32, event: ScheduledEvent) {
        self.0.borrow_mut().schedule_once(owner, delay_secs, event);
    }

    /// See [`TimerScheduler::cancel_owner`]. Returns `None` if the scheduler
    /// is currently borrowed elsewhere.
    pub fn try_cancel_owner(&self, owner: ControllerId) -> Option<usize> {
        self.0
            .try_borrow_mut()
            .ok()
            .map(|mut s| s.cancel_owner(owner))
    }

    /// See [`TimerScheduler::advance`].
    pub fn advance(&self, dt: f32) -> Vec<FiredTimer> {
        self.0.borrow_mut().advance(dt)
    }

    /// See [`TimerScheduler::clear`].
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// See [`TimerScheduler::now`].
    #[must_use]
    pub fn now(&self) -> f64 {
        self.0.borrow().now()
    }

    /// See [`TimerScheduler::pending`].
    #[must_use]
    pub fn pending(&self) -> usize {
        self.0.borrow().pending()
    }

    /// See [`TimerScheduler::pending_for`].
    #[must_use]
    pub fn pending_for(&self, owner: ControllerId) -> usize {
        self.0.borrow().pending_for(owner)
    }

    /// See [`TimerScheduler::next_due_for`].
    #[must_use]
    pub fn next_due_for(&self, owner: ControllerId) -> Option<f64> {
        self.0.borrow().next_due_for(owner)
    }

    /// Hold the scheduler borrowed, as a host iterating it would.
    #[cfg(test)]
    pub(crate) fn hold(&self) -> std::cell::RefMut<'_, TimerScheduler> {
        self.0.borrow_mut()
    }
}
