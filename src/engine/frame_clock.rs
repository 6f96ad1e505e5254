/// Frame timing for the render callback
///
/// The scene advances once per displayed frame by the wall-clock time since
/// the previous frame. There is no fixed timestep: animation mixers and
/// reversion timers are driven directly by this delta.
use std::time::{Duration, Instant};

/// Largest delta handed to the scene in a single frame (seconds).
/// A window that was dragged or minimised resumes without fast-forwarding.
pub const MAX_FRAME_DELTA: f32 = 0.25;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Per-frame delta clock
pub struct FrameClock {
    /// Time of last frame
    last_frame_time: Instant,

    /// Time when the clock started
    start_time: Instant,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Current frame number
    frame_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,

    /// Delta handed out by the last `begin_frame`
    delta: f32,
}

impl FrameClock {
    /// Create a new frame clock starting now
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame_time: now,
            start_time: now,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            current_fps: 0.0,
            delta: 0.0,
        }
    }

    /// Begin a new frame, returns the seconds elapsed since the previous one
    pub fn begin_frame(&mut self) -> f32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.record_frame(frame_time)
    }

    /// Record a frame of the given length and return the clamped delta
    fn record_frame(&mut self, frame_time: Duration) -> f32 {
        self.frame_count += 1;

        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        // Update FPS counter every 10 frames
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        self.delta = frame_time.as_secs_f32().min(MAX_FRAME_DELTA);
        self.delta
    }

    /// Delta handed out by the last `begin_frame` (in seconds)
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total elapsed time since start
    pub fn elapsed(&self) -> Duration {
        Instant::now().duration_since(self.start_time)
    }

    /// Get total number of frames begun
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
