//! Virtual time for deterministic runs.
//!
//! Time only moves when the runtime pops a due timer or advances to a target.
//! Timers due at the same instant fire in the order they were scheduled.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::scheduler::{Delay, TaskId};

/// Frame length of the simulated display (about 60 Hz).
pub const FRAME_MS: u64 = 16;

#[derive(Debug, Clone)]
struct TimerEntry {
    due_ms: u64,
    seq: u64,
    id: TaskId,
}

impl PartialEq for TimerEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TimerEntry {}

impl PartialOrd for TimerEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap on (due, seq)
        (other.due_ms, other.seq).cmp(&(self.due_ms, self.seq))
    }
}

#[derive(Debug, Default)]
pub struct VirtualClock {
    now_ms: u64,
    next_seq: u64,
    pending: BinaryHeap<TimerEntry>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn schedule(&mut self, id: TaskId, delay: Delay) {
        let due_ms = match delay {
            Delay::Millis(ms) => self.now_ms + u64::from(ms),
            Delay::AnimationFrame => (self.now_ms / FRAME_MS + 1) * FRAME_MS,
        };
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(TimerEntry { due_ms, seq, id });
    }

    pub fn cancel(&mut self, id: TaskId) {
        self.pending.retain(|entry| entry.id != id);
    }

    /// Pops the earliest timer due at or before `until_ms`, moving time to it.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<TaskId> {
        if self.pending.peek()?.due_ms > until_ms {
            return None;
        }
        let entry = self.pending.pop()?;
        self.now_ms = self.now_ms.max(entry.due_ms);
        Some(entry.id)
    }

    pub fn advance_to(&mut self, ms: u64) {
        self.now_ms = self.now_ms.max(ms);
    }

    pub fn time_to_next_timer(&self) -> Option<u64> {
        self.pending
            .peek()
            .map(|entry| entry.due_ms.saturating_sub(self.now_ms))
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_starts_at_zero() {
        assert_eq!(VirtualClock::new().now_ms(), 0);
    }

    #[test]
    fn timers_fire_in_due_order() {
        let mut clock = VirtualClock::new();
        clock.schedule(TaskId(1), Delay::Millis(300));
        clock.schedule(TaskId(2), Delay::Millis(100));
        assert_eq!(clock.pop_due(1000), Some(TaskId(2)));
        assert_eq!(clock.now_ms(), 100);
        assert_eq!(clock.pop_due(1000), Some(TaskId(1)));
        assert_eq!(clock.pop_due(1000), None);
    }

    #[test]
    fn ties_resolve_first_in_first_out() {
        let mut clock = VirtualClock::new();
        for id in 0..5 {
            clock.schedule(TaskId(id), Delay::Millis(50));
        }
        let order: Vec<u64> = std::iter::from_fn(|| clock.pop_due(50))
            .map(|id| id.0)
            .collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn frames_land_on_frame_boundaries() {
        let mut clock = VirtualClock::new();
        clock.advance_to(20);
        clock.schedule(TaskId(9), Delay::AnimationFrame);
        assert_eq!(clock.time_to_next_timer(), Some(12));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut clock = VirtualClock::new();
        clock.schedule(TaskId(1), Delay::Millis(10));
        clock.cancel(TaskId(1));
        assert_eq!(clock.pop_due(100), None);
        assert_eq!(clock.pending_count(), 0);
    }

    #[test]
    fn timers_beyond_target_wait() {
        let mut clock = VirtualClock::new();
        clock.schedule(TaskId(1), Delay::Millis(500));
        assert_eq!(clock.pop_due(499), None);
        clock.advance_to(499);
        assert_eq!(clock.time_to_next_timer(), Some(1));
    }
}
