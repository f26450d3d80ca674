//! Deterministic timer queue.
//!
//! Stands in for `setTimeout` and animation frames. Time is injected by the
//! caller, so the same input sequence always produces the same effects.
//!
//! Timers are never cancelled. Each one carries the [`Generation`] its owner
//! had when scheduling it; the owner bumps its generation to invalidate
//! everything in flight and ignores timers whose generation no longer
//! matches.

use crate::model::{Effect, TypewriterSlot};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Monotonic token identifying one scheduling epoch of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    /// Advance to a fresh epoch and return it.
    pub fn bump(&mut self) -> Generation {
        self.0 = self.0.wrapping_add(1);
        *self
    }
}

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Release the navigation transition lock.
    TransitionUnlock,
    /// Zero the scroll accumulator after silence.
    AccumulatorReset,
    /// Dispatch `contentRevealed` and enable snapping.
    ContentRevealed,
    /// Return the page strip to 0 after leaving for Hero.
    StripReset,
    /// Rubber stage went quiet; start decaying overscroll.
    RubberQuiet,
    /// One overscroll decay animation frame.
    RubberFrame,
    /// Next typewriter character or pause end.
    TypewriterStep(TypewriterSlot),
}

/// A scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    /// Absolute time the timer fires at.
    pub due_ms: u64,
    /// Action.
    pub kind: TimerKind,
    /// Owner epoch at scheduling time.
    pub generation: Generation,
    sequence: u64,
}

impl Ord for Timer {
    fn cmp(&self, other: &Self) -> Ordering {
        // Earliest due first, then scheduling order (reversed for the max-heap)
        other
            .due_ms
            .cmp(&self.due_ms)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for Timer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pending timers ordered by due time.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Timer>,
    sequence: u64,
}

impl TimerQueue {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` at absolute time `due_ms`.
    pub fn schedule(&mut self, due_ms: u64, kind: TimerKind, generation: Generation) {
        self.sequence += 1;
        self.heap.push(Timer {
            due_ms,
            kind,
            generation,
            sequence: self.sequence,
        });
    }

    /// Schedule `kind` `delay_ms` after `now`.
    pub fn schedule_in(&mut self, now: u64, delay_ms: u64, kind: TimerKind, generation: Generation) {
        self.schedule(now.saturating_add(delay_ms), kind, generation);
    }

    /// Remove and return the earliest timer due at or before `now`.
    pub fn pop_due(&mut self, now: u64) -> Option<Timer> {
        if self.heap.peek()?.due_ms <= now {
            self.heap.pop()
        } else {
            None
        }
    }

    /// Due time of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<u64> {
        self.heap.peek().map(|t| t.due_ms)
    }

    /// Number of pending timers, stale ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// True when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

/// Where handlers write: the current time, the timer queue, and the effect
/// list the host drains.
#[derive(Debug)]
pub struct Outbox<'a> {
    /// Time of the input or timer being handled.
    pub now: u64,
    /// Pending timers.
    pub timers: &'a mut TimerQueue,
    /// Effects not yet drained by the host.
    pub effects: &'a mut Vec<Effect>,
}

impl Outbox<'_> {
    /// Append one effect.
    pub fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    /// Schedule `kind` `delay_ms` from now.
    pub fn schedule_in(&mut self, delay_ms: u64, kind: TimerKind, generation: Generation) {
        self.timers.schedule_in(self.now, delay_ms, kind, generation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_due_order_then_schedule_order() {
        let mut q = TimerQueue::new();
        let g = Generation::default();
        q.schedule(300, TimerKind::StripReset, g);
        q.schedule(100, TimerKind::TransitionUnlock, g);
        q.schedule(100, TimerKind::AccumulatorReset, g);

        assert_eq!(q.next_deadline(), Some(100));
        let kinds: Vec<TimerKind> = std::iter::from_fn(|| q.pop_due(1_000))
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TimerKind::TransitionUnlock,
                TimerKind::AccumulatorReset,
                TimerKind::StripReset
            ]
        );
        assert!(q.is_empty());
    }

    #[test]
    fn nothing_pops_before_its_due_time() {
        let mut q = TimerQueue::new();
        q.schedule_in(50, 16, TimerKind::RubberFrame, Generation::default());
        assert_eq!(q.pop_due(65), None);
        assert_eq!(q.pop_due(66).map(|t| t.due_ms), Some(66));
    }

    #[test]
    fn bump_yields_distinct_generations() {
        let mut g = Generation::default();
        let first = g;
        let second = g.bump();
        assert_ne!(first, second);
        assert_eq!(g, second);
    }

    #[test]
    fn timer_keeps_generation_it_was_scheduled_with() {
        let mut q = TimerQueue::new();
        let mut g = Generation::default();
        let scheduled = g.bump();
        q.schedule(10, TimerKind::RubberQuiet, scheduled);
        g.bump();
        let timer = q.pop_due(10).unwrap();
        assert_eq!(timer.generation, scheduled);
        assert_ne!(timer.generation, g);
    }
}
