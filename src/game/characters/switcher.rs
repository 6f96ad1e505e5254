// Action switching: one-shot moves with timed reversion to idle

use log::debug;

use crate::engine::timer::TimerQueue;

use super::action::Action;
use super::actor::{Actor, ActorId, ActorRoster};

/// Cross-fade length between actions, in seconds
pub const TRANSITION_WINDOW: f32 = 0.3;

/// Result of a trigger request. Every outcome other than `Started` left the
/// actor untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// The move is now playing and a reversion is scheduled
    Started,
    /// The move was already the current action
    AlreadyActive,
    /// The actor or the move has not finished loading
    NotLoaded,
    /// The actor has no move by that name
    UnknownAction,
}

/// Switches actors between idle and their one-shot moves
///
/// Owns the scene clock that reversions are scheduled on. Each actor has at
/// most one pending reversion: a new trigger cancels the previous one, so the
/// last trigger wins.
#[derive(Debug)]
pub struct ActionSwitcher {
    transition_window: f32,
    /// Scene time in seconds
    now: f64,
    reversions: TimerQueue<ActorId>,
}

impl Default for ActionSwitcher {
    fn default() -> Self {
        Self::new(TRANSITION_WINDOW)
    }
}

impl ActionSwitcher {
    pub fn new(transition_window: f32) -> Self {
        Self {
            transition_window: transition_window.max(0.0),
            now: 0.0,
            reversions: TimerQueue::new(),
        }
    }

    /// Scene time in seconds
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Play the move `name` on `actor`, cross-fading out of whatever it is
    /// playing, and schedule the return to idle
    pub fn trigger(&mut self, actor: &mut Actor, name: &str) -> TriggerOutcome {
        if !actor.has_move(name) {
            return TriggerOutcome::UnknownAction;
        }
        if actor.current().is_one_shot(name) {
            return TriggerOutcome::AlreadyActive;
        }
        let target = match actor.one_shot(name) {
            Some(target) if actor.is_move_loaded(name) => target,
            _ => return TriggerOutcome::NotLoaded,
        };

        let window = self.transition_window;
        let duration = target.duration().unwrap_or_default();
        cross_fade(actor, &target, window);

        if let Some(stale) = actor.replace_pending_reversion(None) {
            self.reversions.cancel(stale);
        }
        let due = self.now + f64::from(duration + window);
        let handle = self.reversions.schedule(due, actor.id);
        actor.replace_pending_reversion(Some(handle));

        debug!("{}: {} -> {}", actor.name, actor.current().name(), name);
        actor.set_current(target);

        TriggerOutcome::Started
    }

    /// Cross-fade `actor` back to idle. Returns false when there was nothing
    /// to do: already idle, or idle not loaded yet.
    pub fn revert_to_idle(&mut self, actor: &mut Actor) -> bool {
        if !actor.is_loaded() {
            return false;
        }
        if let Some(pending) = actor.replace_pending_reversion(None) {
            self.reversions.cancel(pending);
        }
        if actor.current().is_idle() {
            return false;
        }

        debug!("{}: {} -> idle", actor.name, actor.current().name());
        cross_fade(actor, &Action::Idle, self.transition_window);
        actor.set_current(Action::Idle);
        true
    }

    /// Advance the scene clock and fire every reversion that fell due.
    /// Returns the actors that went back to idle.
    pub fn advance(&mut self, dt: f32, actors: &mut ActorRoster) -> Vec<ActorId> {
        self.now += f64::from(dt.max(0.0));

        let mut reverted = Vec::new();
        for id in self.reversions.pop_due(self.now) {
            let Some(actor) = actors.get_mut(id) else {
                continue;
            };
            // Already fired; nothing to cancel
            actor.replace_pending_reversion(None);
            if self.revert_to_idle(actor) {
                reverted.push(id);
            }
        }
        reverted
    }

    /// When the actor's pending reversion fires, if one is scheduled
    pub fn reversion_due(&self, actor: &Actor) -> Option<f64> {
        actor
            .pending_reversion()
            .and_then(|handle| self.reversions.due_time(handle))
    }

    /// Number of reversions waiting to fire across all actors
    pub fn pending_reversions(&self) -> usize {
        self.reversions.len()
    }
}

/// Fade out the actor's current action and restart `to` with a fade in
fn cross_fade(actor: &mut Actor, to: &Action, window: f32) {
    let from = actor.handle_of(actor.current());
    let Some(to) = actor.handle_of(to) else {
        return;
    };
    let Some(mixer) = actor.mixer_mut() else {
        return;
    };

    if let Some(from) = from {
        if let Some(action) = mixer.action_mut(from) {
            action.fade_out(window);
        }
    }
    if let Some(action) = mixer.action_mut(to) {
        action.reset().fade_in(window).play();
    }
}
