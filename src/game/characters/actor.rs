// Animated actor entity and management

use std::collections::HashMap;

use log::{debug, info};

use crate::engine::animation::{ActionHandle, AnimationClip, AnimationMixer, LoopMode};
use crate::engine::timer::TimerHandle;

use super::action::Action;

/// Unique identifier for an actor
pub type ActorId = u32;

/// A one-shot move; its clip may arrive before or after the actor's model
#[derive(Debug, Default)]
struct OneShotSlot {
    clip: Option<AnimationClip>,
    handle: Option<ActionHandle>,
}

/// A named animated entity in the scene
#[derive(Debug)]
pub struct Actor {
    /// Unique identifier
    pub id: ActorId,
    /// Actor name (for display and logs)
    pub name: String,

    /// Created when the actor's model finishes loading
    mixer: Option<AnimationMixer>,
    /// Looping default action, once its clip is known
    idle: Option<ActionHandle>,
    /// Declared one-shot moves, keyed by trigger name
    one_shots: HashMap<String, OneShotSlot>,

    /// What the actor is playing now
    current: Action,
    /// Reversion to idle scheduled by the last trigger
    pending_reversion: Option<TimerHandle>,
}

impl Actor {
    /// Create an actor with the given set of one-shot move names
    pub fn new(id: ActorId, name: &str, moves: &[&str]) -> Self {
        Self {
            id,
            name: name.to_string(),
            mixer: None,
            idle: None,
            one_shots: moves
                .iter()
                .map(|m| (m.to_string(), OneShotSlot::default()))
                .collect(),
            current: Action::Idle,
            pending_reversion: None,
        }
    }

    /// The actor's model finished loading. Starts the idle loop when a clip
    /// is given and binds any one-shot clips that arrived earlier.
    pub fn attach_model(&mut self, idle_clip: Option<AnimationClip>) {
        let mixer = self.mixer.get_or_insert_with(AnimationMixer::new);

        if let Some(clip) = idle_clip {
            let handle = mixer.clip_action(clip);
            if let Some(action) = mixer.action_mut(handle) {
                action.set_loop(LoopMode::Repeat).play();
            }
            self.idle = Some(handle);
            self.current = Action::Idle;
            info!("{} is idling", self.name);
        }

        for (name, slot) in &mut self.one_shots {
            if slot.handle.is_none() {
                if let Some(clip) = slot.clip.clone() {
                    slot.handle = Some(bind_one_shot(mixer, clip));
                    debug!("{}: bound deferred move {}", self.name, name);
                }
            }
        }
    }

    /// A one-shot clip finished loading. Returns false if `name` is not one
    /// of this actor's moves.
    pub fn set_one_shot_clip(&mut self, name: &str, clip: AnimationClip) -> bool {
        let Some(slot) = self.one_shots.get_mut(name) else {
            return false;
        };

        if let Some(mixer) = self.mixer.as_mut() {
            slot.handle = Some(bind_one_shot(mixer, clip.clone()));
        }
        slot.clip = Some(clip);
        true
    }

    /// Idle action is resolved; the actor can be switched
    pub fn is_loaded(&self) -> bool {
        self.idle.is_some()
    }

    /// Both the idle action and the named one-shot are resolved
    pub fn is_move_loaded(&self, name: &str) -> bool {
        self.is_loaded()
            && self
                .one_shots
                .get(name)
                .is_some_and(|slot| slot.handle.is_some())
    }

    /// Whether `name` is one of this actor's moves
    pub fn has_move(&self, name: &str) -> bool {
        self.one_shots.contains_key(name)
    }

    /// Names of all declared moves, sorted
    pub fn move_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.one_shots.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The move as an `Action`, once its clip is known
    pub fn one_shot(&self, name: &str) -> Option<Action> {
        self.one_shots
            .get(name)
            .and_then(|slot| slot.clip.as_ref())
            .map(|clip| Action::one_shot(name, clip.duration))
    }

    /// What the actor is playing now
    pub fn current(&self) -> &Action {
        &self.current
    }

    /// Advance animation playback
    pub fn update(&mut self, dt: f32) {
        if let Some(mixer) = self.mixer.as_mut() {
            mixer.update(dt);
        }
    }

    pub fn mixer(&self) -> Option<&AnimationMixer> {
        self.mixer.as_ref()
    }

    /// Mixer action backing `action`
    pub fn handle_of(&self, action: &Action) -> Option<ActionHandle> {
        match action {
            Action::Idle => self.idle,
            Action::OneShot { name, .. } => self.one_shots.get(name).and_then(|s| s.handle),
        }
    }

    pub(super) fn mixer_mut(&mut self) -> Option<&mut AnimationMixer> {
        self.mixer.as_mut()
    }

    pub(super) fn set_current(&mut self, action: Action) {
        self.current = action;
    }

    pub(super) fn pending_reversion(&self) -> Option<TimerHandle> {
        self.pending_reversion
    }

    pub(super) fn replace_pending_reversion(
        &mut self,
        handle: Option<TimerHandle>,
    ) -> Option<TimerHandle> {
        std::mem::replace(&mut self.pending_reversion, handle)
    }
}

fn bind_one_shot(mixer: &mut AnimationMixer, clip: AnimationClip) -> ActionHandle {
    let handle = mixer.clip_action(clip);
    if let Some(action) = mixer.action_mut(handle) {
        action.set_loop(LoopMode::Once).set_clamp_when_finished(true);
    }
    handle
}

/// Owns every actor in the scene
#[derive(Debug, Default)]
pub struct ActorRoster {
    actors: Vec<Actor>,
    next_id: ActorId,
}

impl ActorRoster {
    pub fn new() -> Self {
        Self {
            actors: Vec::new(),
            next_id: 0,
        }
    }

    /// Add a new actor with the given moves
    pub fn spawn(&mut self, name: &str, moves: &[&str]) -> ActorId {
        let id = self.next_id;
        self.next_id += 1;

        self.actors.push(Actor::new(id, name, moves));

        id
    }

    /// Get an actor by ID
    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    /// Get a mutable actor by ID
    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|a| a.id == id)
    }

    /// Get an actor by name
    pub fn find(&self, name: &str) -> Option<&Actor> {
        self.actors.iter().find(|a| a.name == name)
    }

    /// Get all actors
    pub fn all(&self) -> &[Actor] {
        &self.actors
    }

    /// Advance playback of every actor
    pub fn update(&mut self, dt: f32) {
        for actor in &mut self.actors {
            actor.update(dt);
        }
    }

    /// Get the number of actors
    pub fn count(&self) -> usize {
        self.actors.len()
    }

    /// Number of actors whose idle action is resolved
    pub fn loaded_count(&self) -> usize {
        self.actors.iter().filter(|a| a.is_loaded()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn james() -> Actor {
        Actor::new(1, "James", &["uppercut", "dying"])
    }

    #[test]
    fn test_new_actor_is_unloaded_idle() {
        let actor = james();
        assert!(!actor.is_loaded());
        assert!(actor.current().is_idle());
        assert!(actor.mixer().is_none());
        assert_eq!(actor.move_names(), vec!["dying", "uppercut"]);
    }

    #[test]
    fn test_attach_model_starts_idle() {
        let mut actor = james();
        actor.attach_model(Some(AnimationClip::new("idle", 2.0)));

        assert!(actor.is_loaded());
        let mixer = actor.mixer().unwrap();
        assert_eq!(mixer.playing_count(), 1);
        let idle = actor.handle_of(&Action::Idle).unwrap();
        assert_eq!(mixer.action(idle).unwrap().loop_mode(), LoopMode::Repeat);
    }

    #[test]
    fn test_model_without_idle_clip() {
        let mut actor = james();
        actor.attach_model(None);

        assert!(!actor.is_loaded());
        assert!(actor.mixer().is_some());
        actor.set_one_shot_clip("uppercut", AnimationClip::new("uppercut", 1.2));
        assert!(!actor.is_move_loaded("uppercut"));
    }

    #[test]
    fn test_move_clip_after_model() {
        let mut actor = james();
        actor.attach_model(Some(AnimationClip::new("idle", 2.0)));
        assert!(!actor.is_move_loaded("uppercut"));

        assert!(actor.set_one_shot_clip("uppercut", AnimationClip::new("uppercut", 1.2)));
        assert!(actor.is_move_loaded("uppercut"));
        assert!(!actor.is_move_loaded("dying"));

        let handle = actor.handle_of(&Action::one_shot("uppercut", 1.2)).unwrap();
        let action = actor.mixer().unwrap().action(handle).unwrap();
        assert_eq!(action.loop_mode(), LoopMode::Once);
        assert!(!action.is_playing());
    }

    #[test]
    fn test_move_clip_before_model_is_kept() {
        let mut actor = james();
        assert!(actor.set_one_shot_clip("dying", AnimationClip::new("dying", 2.0)));
        assert!(!actor.is_move_loaded("dying"));
        assert_eq!(actor.one_shot("dying"), Some(Action::one_shot("dying", 2.0)));

        actor.attach_model(Some(AnimationClip::new("idle", 2.0)));
        assert!(actor.is_move_loaded("dying"));
    }

    #[test]
    fn test_unknown_move_clip_is_rejected() {
        let mut actor = james();
        assert!(!actor.set_one_shot_clip("combo", AnimationClip::new("combo", 1.0)));
        assert!(!actor.has_move("combo"));
        assert!(actor.one_shot("combo").is_none());
    }

    #[test]
    fn test_roster_spawn_and_lookup() {
        let mut roster = ActorRoster::new();
        let adam = roster.spawn("Adam", &["combo"]);
        let james = roster.spawn("James", &["uppercut", "dying"]);

        assert_ne!(adam, james);
        assert_eq!(roster.count(), 2);
        assert_eq!(roster.get(adam).unwrap().name, "Adam");
        assert_eq!(roster.find("James").unwrap().id, james);
        assert!(roster.find("Nobody").is_none());
        assert_eq!(roster.loaded_count(), 0);

        roster
            .get_mut(adam)
            .unwrap()
            .attach_model(Some(AnimationClip::new("idle", 1.0)));
        assert_eq!(roster.loaded_count(), 1);
    }

    #[test]
    fn test_roster_update_advances_mixers() {
        let mut roster = ActorRoster::new();
        let adam = roster.spawn("Adam", &["combo"]);
        roster
            .get_mut(adam)
            .unwrap()
            .attach_model(Some(AnimationClip::new("idle", 4.0)));

        roster.update(0.5);

        let actor = roster.get(adam).unwrap();
        let idle = actor.handle_of(&Action::Idle).unwrap();
        assert_eq!(actor.mixer().unwrap().action(idle).unwrap().time(), 0.5);
    }
}
