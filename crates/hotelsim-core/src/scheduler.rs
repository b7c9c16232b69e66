//! Deferred tasks on a simulated clock.
//!
//! The clock only moves when [`Scheduler::advance`] is called, so tests and
//! presentation layers decide exactly when deferred work fires. Every
//! scheduled task gets a [`TaskHandle`] that its owner keeps to cancel it.

use serde::{Deserialize, Serialize};

/// Cancellation handle for a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct ScheduledTask<T> {
    handle: TaskHandle,
    deadline: f64,
    payload: T,
}

/// Simulated clock holding tasks that fire once at their deadline
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: f64,
    next_handle: u64,
    tasks: Vec<ScheduledTask<T>>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_handle: 0,
            tasks: Vec::new(),
        }
    }

    /// Current simulated time
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Schedule `payload` to fire `delay` time units from now.
    pub fn schedule_in(&mut self, delay: f64, payload: T) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.tasks.push(ScheduledTask {
            handle,
            deadline: self.now + delay.max(0.0),
            payload,
        });
        handle
    }

    /// Cancel a task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.handle != handle);
        self.tasks.len() != before
    }

    /// Deadline of a pending task
    pub fn deadline(&self, handle: TaskHandle) -> Option<f64> {
        self.tasks
            .iter()
            .find(|t| t.handle == handle)
            .map(|t| t.deadline)
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }

    /// Move the clock forward and return every task now due, earliest first.
    /// Tasks with equal deadlines fire in scheduling order.
    pub fn advance(&mut self, delta: f64) -> Vec<(TaskHandle, T)> {
        if delta.is_finite() && delta > 0.0 {
            self.now += delta;
        }
        let now = self.now;

        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.tasks.drain(..).partition(|t| t.deadline <= now);
        self.tasks = waiting;

        due.sort_by(|a, b| {
            a.deadline
                .total_cmp(&b.deadline)
                .then(a.handle.cmp(&b.handle))
        });
        due.into_iter().map(|t| (t.handle, t.payload)).collect()
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_at_deadline() {
        let mut s = Scheduler::new();
        let h = s.schedule_in(4.0, "confirm");
        assert!(s.advance(3.5).is_empty());
        assert_eq!(s.advance(0.5), vec![(h, "confirm")]);
        assert_eq!(s.pending_count(), 0);
        assert!(s.advance(10.0).is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut s = Scheduler::new();
        let h = s.schedule_in(1.0, 1);
        assert!(s.cancel(h));
        assert!(!s.cancel(h));
        assert!(s.advance(5.0).is_empty());
    }

    #[test]
    fn test_due_order() {
        let mut s = Scheduler::new();
        let late = s.schedule_in(3.0, "late");
        let early = s.schedule_in(1.0, "early");
        let tie = s.schedule_in(3.0, "tie");
        let fired = s.advance(5.0);
        assert_eq!(fired, vec![(early, "early"), (late, "late"), (tie, "tie")]);
    }

    #[test]
    fn test_deadline_relative_to_now() {
        let mut s: Scheduler<()> = Scheduler::new();
        s.advance(10.0);
        let h = s.schedule_in(4.0, ());
        assert_eq!(s.deadline(h), Some(14.0));
        assert_eq!(s.now(), 10.0);
    }

    #[test]
    fn test_negative_or_nan_delta_ignored() {
        let mut s: Scheduler<()> = Scheduler::new();
        s.advance(-3.0);
        s.advance(f64::NAN);
        assert_eq!(s.now(), 0.0);
    }

    #[test]
    fn test_zero_delay_fires_on_next_advance() {
        let mut s = Scheduler::new();
        let h = s.schedule_in(0.0, 'x');
        assert_eq!(s.advance(0.0), vec![(h, 'x')]);
    }
}
