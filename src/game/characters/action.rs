// What an actor is currently playing

/// The active animation of an actor
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Action {
    /// The looping default animation
    #[default]
    Idle,
    /// A play-once move with a known length
    OneShot { name: String, duration: f32 },
}

impl Action {
    pub fn one_shot(name: &str, duration: f32) -> Self {
        Self::OneShot {
            name: name.to_string(),
            duration,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Name used in logs and for trigger comparison
    pub fn name(&self) -> &str {
        match self {
            Self::Idle => "idle",
            Self::OneShot { name, .. } => name,
        }
    }

    /// Clip length for one-shots; idle loops forever
    pub fn duration(&self) -> Option<f32> {
        match self {
            Self::Idle => None,
            Self::OneShot { duration, .. } => Some(*duration),
        }
    }

    /// Whether this is the one-shot called `name`
    pub fn is_one_shot(&self, name: &str) -> bool {
        matches!(self, Self::OneShot { name: n, .. } if n == name)
    }
}
