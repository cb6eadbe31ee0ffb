// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use crate::Scheduler;

/// A scheduled token and when it becomes due.
#[derive(Clone, Debug)]
struct Entry<T> {
    due_ms: u64,
    seq: u64,
    token: T,
}

/// Deterministic [`Scheduler`] driven by an explicit virtual clock.
///
/// Frames occur on multiples of the frame interval (16ms by default). A
/// request for `n` frames becomes due at the `n`-th frame boundary strictly
/// after the current time; a timer becomes due at `now + ms`. Tokens with the
/// same due time are delivered in the order they were scheduled.
#[derive(Clone, Debug)]
pub struct ManualScheduler<T> {
    now_ms: u64,
    frame_interval_ms: u64,
    next_seq: u64,
    queue: Vec<Entry<T>>,
}

impl<T> Default for ManualScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ManualScheduler<T> {
    /// Creates a scheduler at time zero with a 16ms frame interval.
    #[must_use]
    pub fn new() -> Self {
        Self::with_frame_interval(16)
    }

    /// Creates a scheduler with a custom frame interval (at least 1ms).
    #[must_use]
    pub fn with_frame_interval(frame_interval_ms: u64) -> Self {
        Self {
            now_ms: 0,
            frame_interval_ms: frame_interval_ms.max(1),
            next_seq: 0,
            queue: Vec::new(),
        }
    }

    /// Current virtual time.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of tokens not yet delivered.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` when nothing is scheduled.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Advances to the next frame boundary and returns every token now due.
    pub fn advance_frame(&mut self) -> Vec<T> {
        let next = self.frame_boundary_after(self.now_ms, 1);
        self.advance_to(next)
    }

    /// Advances the clock by `ms` and returns every token now due.
    pub fn advance_ms(&mut self, ms: u64) -> Vec<T> {
        let target = self.now_ms.saturating_add(ms);
        self.advance_to(target)
    }

    /// Advances the clock to the earliest due token and returns it.
    ///
    /// Returns `None` when idle; the clock does not move in that case.
    pub fn pop_next(&mut self) -> Option<T> {
        let index = self.earliest()?;
        let entry = self.queue.remove(index);
        self.now_ms = self.now_ms.max(entry.due_ms);
        Some(entry.token)
    }

    /// Drops every pending token.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    fn advance_to(&mut self, target: u64) -> Vec<T> {
        let mut due = Vec::new();
        self.now_ms = self.now_ms.max(target);
        while let Some(index) = self.earliest() {
            if self.queue[index].due_ms > self.now_ms {
                break;
            }
            due.push(self.queue.remove(index).token);
        }
        due
    }

    fn earliest(&self) -> Option<usize> {
        self.queue
            .iter()
            .enumerate()
            .min_by_key(|(_, e)| (e.due_ms, e.seq))
            .map(|(i, _)| i)
    }

    fn frame_boundary_after(&self, time: u64, frames: u32) -> u64 {
        let interval = self.frame_interval_ms;
        (time / interval + u64::from(frames.max(1))) * interval
    }

    fn push(&mut self, due_ms: u64, token: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Entry { due_ms, seq, token });
    }
}

impl<T> Scheduler<T> for ManualScheduler<T> {
    fn after_frames(&mut self, frames: u32, token: T) {
        let due = self.frame_boundary_after(self.now_ms, frames);
        self.push(due, token);
    }

    fn after_ms(&mut self, ms: u64, token: T) {
        let due = self.now_ms.saturating_add(ms);
        self.push(due, token);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::ManualScheduler;
    use crate::Scheduler;

    #[test]
    fn frames_land_on_boundaries() {
        let mut s = ManualScheduler::with_frame_interval(10);
        s.advance_ms(5);
        s.after_frames(2, 'a');
        // Boundaries after t=5 are 10 and 20.
        assert_eq!(s.advance_frame(), Vec::<char>::new());
        assert_eq!(s.now_ms(), 10);
        assert_eq!(s.advance_frame(), vec!['a']);
        assert_eq!(s.now_ms(), 20);
    }

    #[test]
    fn timers_fire_in_due_then_schedule_order() {
        let mut s = ManualScheduler::new();
        s.after_ms(200, 1);
        s.after_ms(100, 2);
        s.after_ms(100, 3);
        assert_eq!(s.advance_ms(150), vec![2, 3]);
        assert_eq!(s.pending(), 1);
        assert_eq!(s.advance_ms(50), vec![1]);
        assert!(s.is_idle());
    }

    #[test]
    fn pop_next_moves_clock_to_due_time() {
        let mut s = ManualScheduler::new();
        s.after_ms(200, "late");
        s.after_frames(2, "frames");
        assert_eq!(s.pop_next(), Some("frames"));
        assert_eq!(s.now_ms(), 32);
        assert_eq!(s.pop_next(), Some("late"));
        assert_eq!(s.now_ms(), 200);
        assert_eq!(s.pop_next(), None);
        assert_eq!(s.now_ms(), 200);
    }

    #[test]
    fn nothing_is_due_synchronously() {
        let mut s = ManualScheduler::new();
        s.after_ms(0, ());
        s.after_frames(0, ());
        // Zero-length waits still need the clock to be driven.
        assert_eq!(s.pending(), 2);
        assert_eq!(s.advance_ms(0).len(), 1);
        assert_eq!(s.advance_frame().len(), 1);
    }

    #[test]
    fn clear_drops_pending() {
        let mut s = ManualScheduler::new();
        s.after_ms(10, ());
        s.clear();
        assert!(s.is_idle());
        assert!(s.advance_ms(100).is_empty());
    }
}
