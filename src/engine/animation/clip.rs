// Animation clip metadata

/// A single animation clip
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    /// Name of the clip as stored in the model file (may be empty)
    pub name: String,
    /// Length of one playback cycle in seconds
    pub duration: f32,
}

impl AnimationClip {
    /// Create a new animation clip
    pub fn new(name: &str, duration: f32) -> Self {
        Self {
            name: name.to_string(),
            duration: duration.max(0.0),
        }
    }

    /// Clip with an empty name, for files that don't name their animations
    pub fn unnamed(duration: f32) -> Self {
        Self::new("", duration)
    }

    /// Name to show in logs
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "<unnamed>"
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_creation() {
        let clip = AnimationClip::new("mixamo.com", 1.2);
        assert_eq!(clip.name, "mixamo.com");
        assert_eq!(clip.duration, 1.2);
    }

    #[test]
    fn test_negative_duration_is_zero() {
        let clip = AnimationClip::new("broken", -1.0);
        assert_eq!(clip.duration, 0.0);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(AnimationClip::unnamed(1.0).display_name(), "<unnamed>");
        assert_eq!(AnimationClip::new("idle", 1.0).display_name(), "idle");
    }
}
