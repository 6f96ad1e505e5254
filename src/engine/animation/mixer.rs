// Animation mixer: per-model set of clip actions with blend weights

use super::AnimationClip;
use crate::core::math::{lerp, progress};

/// How an action behaves when it reaches the end of its clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopMode {
    /// Wrap around and play forever
    #[default]
    Repeat,
    /// Play once and stop
    Once,
}

/// Handle to an action owned by a mixer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionHandle(usize);

/// A weight ramp in progress
#[derive(Debug, Clone, Copy)]
struct Fade {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
}

impl Fade {
    fn weight(&self) -> f32 {
        lerp(self.from, self.to, progress(self.elapsed, self.duration))
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Playback state of one clip on one model
#[derive(Debug, Clone)]
pub struct ClipAction {
    clip: AnimationClip,
    loop_mode: LoopMode,
    /// Hold the last pose once a `Once` action finishes
    clamp_when_finished: bool,
    /// Local playback time in seconds
    time: f32,
    /// Weight before any fade is applied
    weight: f32,
    fade: Option<Fade>,
    playing: bool,
    finished: bool,
}

impl ClipAction {
    fn new(clip: AnimationClip) -> Self {
        Self {
            clip,
            loop_mode: LoopMode::Repeat,
            clamp_when_finished: false,
            time: 0.0,
            weight: 1.0,
            fade: None,
            playing: false,
            finished: false,
        }
    }

    pub fn set_loop(&mut self, mode: LoopMode) -> &mut Self {
        self.loop_mode = mode;
        self
    }

    pub fn set_clamp_when_finished(&mut self, clamp: bool) -> &mut Self {
        self.clamp_when_finished = clamp;
        self
    }

    /// Rewind to the start. A fade in progress is kept so that a following
    /// `fade_in` can pick up from the current weight.
    pub fn reset(&mut self) -> &mut Self {
        self.time = 0.0;
        self.finished = false;
        self
    }

    /// Ramp weight up to 1 over `duration` seconds, starting from 0 for a
    /// stopped action or from the current weight for one still blending out
    pub fn fade_in(&mut self, duration: f32) -> &mut Self {
        let from = self.effective_weight();
        self.fade = Some(Fade {
            from,
            to: 1.0,
            elapsed: 0.0,
            duration,
        });
        self
    }

    /// Ramp weight from its current value to 0 over `duration` seconds,
    /// then stop
    pub fn fade_out(&mut self, duration: f32) -> &mut Self {
        let from = self.effective_weight();
        self.fade = Some(Fade {
            from,
            to: 0.0,
            elapsed: 0.0,
            duration,
        });
        self
    }

    pub fn play(&mut self) -> &mut Self {
        self.playing = true;
        self
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Blend weight after fades; 0 when not playing
    pub fn effective_weight(&self) -> f32 {
        if !self.playing {
            return 0.0;
        }
        match &self.fade {
            Some(fade) => fade.weight() * self.weight,
            None => self.weight,
        }
    }

    fn update(&mut self, dt: f32) {
        if !self.playing {
            return;
        }

        self.advance_time(dt);

        if let Some(fade) = &mut self.fade {
            fade.elapsed += dt;
            if fade.is_complete() {
                let target = fade.to;
                self.fade = None;
                if target <= 0.0 {
                    self.playing = false;
                } else {
                    self.weight = target;
                }
            }
        }
    }

    fn advance_time(&mut self, dt: f32) {
        if self.finished {
            return;
        }

        let duration = self.clip.duration;
        self.time += dt;

        match self.loop_mode {
            LoopMode::Repeat => {
                if duration > 0.0 {
                    self.time %= duration;
                } else {
                    self.time = 0.0;
                }
            }
            LoopMode::Once => {
                if self.time >= duration {
                    self.time = duration;
                    self.finished = true;
                    if !self.clamp_when_finished {
                        self.playing = false;
                        self.fade = None;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
impl ClipAction {
    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    /// A `Once` action that reached the end of its clip
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    pub fn time(&self) -> f32 {
        self.time
    }
}

/// Owns the actions of a single animated model and advances them each frame
#[derive(Debug, Default)]
pub struct AnimationMixer {
    actions: Vec<ClipAction>,
}

impl AnimationMixer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stopped action for `clip`.
    /// Exporters often give every clip the same name, so actions are never shared.
    pub fn clip_action(&mut self, clip: AnimationClip) -> ActionHandle {
        self.actions.push(ClipAction::new(clip));
        ActionHandle(self.actions.len() - 1)
    }

    pub fn action(&self, handle: ActionHandle) -> Option<&ClipAction> {
        self.actions.get(handle.0)
    }

    pub fn action_mut(&mut self, handle: ActionHandle) -> Option<&mut ClipAction> {
        self.actions.get_mut(handle.0)
    }

    /// Advance every playing action by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        for action in &mut self.actions {
            action.update(dt);
        }
    }

    /// Number of actions currently contributing to the pose
    pub fn playing_count(&self) -> usize {
        self.actions.iter().filter(|a| a.is_playing()).count()
    }
}

#[cfg(test)]
impl AnimationMixer {
    /// Sum of effective weights of all actions
    pub fn total_weight(&self) -> f32 {
        self.actions.iter().map(ClipAction::effective_weight).sum()
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clip_action_per_call() {
        let mut mixer = AnimationMixer::new();
        let a = mixer.clip_action(AnimationClip::new("mixamo.com", 2.0));
        let b = mixer.clip_action(AnimationClip::new("mixamo.com", 2.0));

        assert_ne!(a, b);
        assert_eq!(mixer.action_count(), 2);
        assert!(!mixer.action(a).unwrap().is_playing());
        assert_eq!(mixer.action(a).unwrap().loop_mode(), LoopMode::Repeat);
    }

    #[test]
    fn test_repeat_wraps() {
        let mut mixer = AnimationMixer::new();
        let idle = mixer.clip_action(AnimationClip::new("idle", 1.0));
        mixer.action_mut(idle).unwrap().play();

        mixer.update(1.25);
        let action = mixer.action(idle).unwrap();
        assert_relative_eq!(action.time(), 0.25, epsilon = 1e-5);
        assert!(action.is_playing());
    }

    #[test]
    fn test_once_without_clamp_stops() {
        let mut mixer = AnimationMixer::new();
        let hit = mixer.clip_action(AnimationClip::new("hit", 0.5));
        mixer
            .action_mut(hit)
            .unwrap()
            .set_loop(LoopMode::Once)
            .play();

        mixer.update(0.6);
        let action = mixer.action(hit).unwrap();
        assert!(action.is_finished());
        assert!(!action.is_playing());
        assert_eq!(action.effective_weight(), 0.0);
    }

    #[test]
    fn test_once_with_clamp_holds_last_pose() {
        let mut mixer = AnimationMixer::new();
        let dying = mixer.clip_action(AnimationClip::new("dying", 2.0));
        mixer
            .action_mut(dying)
            .unwrap()
            .set_loop(LoopMode::Once)
            .set_clamp_when_finished(true)
            .play();

        mixer.update(3.0);
        let action = mixer.action(dying).unwrap();
        assert!(action.is_finished());
        assert!(action.is_playing());
        assert_eq!(action.time(), 2.0);
        assert_eq!(action.effective_weight(), 1.0);
    }

    #[test]
    fn test_fade_in_ramps_weight() {
        let mut mixer = AnimationMixer::new();
        let idle = mixer.clip_action(AnimationClip::new("idle", 2.0));
        mixer.action_mut(idle).unwrap().fade_in(0.3).play();

        assert_eq!(mixer.action(idle).unwrap().effective_weight(), 0.0);
        mixer.update(0.15);
        assert_relative_eq!(
            mixer.action(idle).unwrap().effective_weight(),
            0.5,
            epsilon = 1e-5
        );
        mixer.update(0.2);
        let action = mixer.action(idle).unwrap();
        assert!(!action.is_fading());
        assert_eq!(action.effective_weight(), 1.0);
    }

    #[test]
    fn test_fade_out_stops_action() {
        let mut mixer = AnimationMixer::new();
        let idle = mixer.clip_action(AnimationClip::new("idle", 2.0));
        mixer.action_mut(idle).unwrap().play();
        mixer.action_mut(idle).unwrap().fade_out(0.3);

        mixer.update(0.31);
        assert!(!mixer.action(idle).unwrap().is_playing());
        assert_eq!(mixer.playing_count(), 0);
    }

    #[test]
    fn test_cross_fade_keeps_total_weight() {
        let mut mixer = AnimationMixer::new();
        let idle = mixer.clip_action(AnimationClip::new("idle", 2.0));
        let combo = mixer.clip_action(AnimationClip::new("combo", 1.0));
        mixer.action_mut(idle).unwrap().play();

        mixer.action_mut(idle).unwrap().fade_out(0.3);
        mixer
            .action_mut(combo)
            .unwrap()
            .set_loop(LoopMode::Once)
            .reset()
            .fade_in(0.3)
            .play();

        for _ in 0..2 {
            mixer.update(0.1);
            assert_relative_eq!(mixer.total_weight(), 1.0, epsilon = 1e-4);
        }
        mixer.update(0.2);
        assert_relative_eq!(mixer.total_weight(), 1.0, epsilon = 1e-4);
        assert_eq!(mixer.playing_count(), 1);
        assert!(mixer.action(combo).unwrap().is_playing());
    }

    #[test]
    fn test_reset_rewinds() {
        let mut mixer = AnimationMixer::new();
        let combo = mixer.clip_action(AnimationClip::new("combo", 1.0));
        mixer
            .action_mut(combo)
            .unwrap()
            .set_loop(LoopMode::Once)
            .set_clamp_when_finished(true)
            .play();
        mixer.update(2.0);
        assert!(mixer.action(combo).unwrap().is_finished());

        mixer.action_mut(combo).unwrap().reset();
        let action = mixer.action(combo).unwrap();
        assert_eq!(action.time(), 0.0);
        assert!(!action.is_finished());
    }

    #[test]
    fn test_fade_in_resumes_from_current_weight() {
        let mut mixer = AnimationMixer::new();
        let uppercut = mixer.clip_action(AnimationClip::new("uppercut", 1.2));
        mixer.action_mut(uppercut).unwrap().fade_in(0.3).play();
        mixer.update(0.3);
        mixer.action_mut(uppercut).unwrap().fade_out(0.3);
        mixer.update(0.1);
        let before = mixer.action(uppercut).unwrap().effective_weight();
        assert_relative_eq!(before, 2.0 / 3.0, epsilon = 1e-4);

        // Brought back while still blending out: no drop in weight
        mixer.action_mut(uppercut).unwrap().reset().fade_in(0.3).play();
        let action = mixer.action(uppercut).unwrap();
        assert_relative_eq!(action.effective_weight(), before, epsilon = 1e-5);
        assert_eq!(action.time(), 0.0);

        mixer.update(0.15);
        let weight = mixer.action(uppercut).unwrap().effective_weight();
        assert!(weight > before && weight < 1.0);
        mixer.update(0.2);
        assert_eq!(mixer.action(uppercut).unwrap().effective_weight(), 1.0);
    }

    #[test]
    fn test_stopped_action_does_not_advance() {
        let mut mixer = AnimationMixer::new();
        let idle = mixer.clip_action(AnimationClip::new("idle", 2.0));
        mixer.update(1.0);
        assert_eq!(mixer.action(idle).unwrap().time(), 0.0);
    }
}
