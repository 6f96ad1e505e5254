// Deferred callbacks on the scene clock

/// Handle to a scheduled timer, used to cancel it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// A single scheduled entry
#[derive(Debug)]
struct ScheduledTimer<T> {
    handle: TimerHandle,
    /// Scene time (seconds) at which the timer fires
    due: f64,
    payload: T,
}

/// Queue of deferred payloads keyed on scene time
///
/// Timers fire in due order; ties fire in scheduling order.
/// A cancelled timer never fires.
#[derive(Debug)]
pub struct TimerQueue<T> {
    timers: Vec<ScheduledTimer<T>>,
    next_handle: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            next_handle: 0,
        }
    }

    /// Schedule `payload` to fire at scene time `due`
    pub fn schedule(&mut self, due: f64, payload: T) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;

        // Keep sorted by due time; equal times stay in insertion order
        let pos = self.timers.partition_point(|t| t.due <= due);
        self.timers.insert(
            pos,
            ScheduledTimer {
                handle,
                due,
                payload,
            },
        );

        handle
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        if let Some(pos) = self.timers.iter().position(|t| t.handle == handle) {
            self.timers.remove(pos);
            true
        } else {
            false
        }
    }

    /// Scene time at which a pending timer fires
    pub fn due_time(&self, handle: TimerHandle) -> Option<f64> {
        self.timers
            .iter()
            .find(|t| t.handle == handle)
            .map(|t| t.due)
    }

    /// Remove and return every payload due at or before `now`, in firing order
    pub fn pop_due(&mut self, now: f64) -> Vec<T> {
        let split = self.timers.partition_point(|t| t.due <= now);
        self.timers.drain(..split).map(|t| t.payload).collect()
    }

    /// Number of pending timers
    pub fn len(&self) -> usize {
        self.timers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_due_before_time() {
        let mut queue = TimerQueue::new();
        queue.schedule(1.5, "revert");
        assert!(queue.pop_due(1.4).is_empty());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_fires_at_due_time() {
        let mut queue = TimerQueue::new();
        queue.schedule(1.5, "revert");
        assert_eq!(queue.pop_due(1.5), vec!["revert"]);
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(3.0, 'c');
        queue.schedule(1.0, 'a');
        queue.schedule(2.0, 'b');
        queue.schedule(2.0, 'd');

        assert_eq!(queue.pop_due(10.0), vec!['a', 'b', 'd', 'c']);
    }

    #[test]
    fn test_partial_drain() {
        let mut queue = TimerQueue::new();
        queue.schedule(1.0, 1);
        queue.schedule(2.0, 2);

        assert_eq!(queue.pop_due(1.5), vec![1]);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop_due(2.5), vec![2]);
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut queue = TimerQueue::new();
        let first = queue.schedule(1.5, "uppercut");
        queue.schedule(2.8, "dying");

        assert!(queue.cancel(first));
        assert_eq!(queue.due_time(first), None);
        assert!(queue.pop_due(2.0).is_empty());
        assert_eq!(queue.pop_due(3.0), vec!["dying"]);
    }

    #[test]
    fn test_cancel_twice() {
        let mut queue = TimerQueue::new();
        let handle = queue.schedule(1.0, ());
        assert!(queue.cancel(handle));
        assert!(!queue.cancel(handle));
    }

    #[test]
    fn test_cancel_after_fire() {
        let mut queue = TimerQueue::new();
        let handle = queue.schedule(1.0, ());
        queue.pop_due(1.0);
        assert!(!queue.cancel(handle));
    }

    #[test]
    fn test_due_time() {
        let mut queue = TimerQueue::new();
        let handle = queue.schedule(2.5, ());
        assert_eq!(queue.due_time(handle), Some(2.5));
        queue.pop_due(3.0);
        assert_eq!(queue.due_time(handle), None);
    }

    #[test]
    fn test_handles_are_unique() {
        let mut queue = TimerQueue::new();
        let a = queue.schedule(1.0, ());
        let b = queue.schedule(1.0, ());
        assert_ne!(a, b);
    }
}
