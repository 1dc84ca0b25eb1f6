use std::{cmp::Reverse, collections::BinaryHeap};

use crate::{engine::word::WordId, foundation::core::Millis};

/// Work scheduled on the coarse timer queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    /// Fade in the guide lines.
    ShowGuides,
    /// Activate token `index`. Ignored unless it is the next token.
    Activate { index: usize },
    /// Reveal one character slot. Ignored once the word is gone.
    RevealChar { word: WordId, slot: usize },
    /// End the stream after the final hold.
    Complete,
}

#[derive(Debug)]
struct Entry {
    due: Millis,
    seq: u64,
    event: TimerEvent,
}

// Ordered by (due, insertion order) so equal deadlines fire FIFO.
impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

/// Fire-and-forget timers. There is no per-timer cancellation.
#[derive(Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Millis, event: TimerEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { due, seq, event }));
    }

    /// Pop the earliest timer whose deadline is `<= now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<(Millis, TimerEvent)> {
        if self.heap.peek()?.0.due > now {
            return None;
        }
        self.heap.pop().map(|Reverse(e)| (e.due, e.event))
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.heap.peek().map(|Reverse(e)| e.due)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/timers.rs"]
mod tests;
