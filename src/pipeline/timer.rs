//! Deterministic timer queue keyed by timer kind.
//!
//! Deadlines are absolute microsecond timestamps on the pipeline's virtual
//! clock. At most one timer per kind is armed; arming again replaces the old
//! deadline. Timers that fall due at the same instant fire in the order they
//! were armed.

/// A pending timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TimerEntry<K> {
    kind: K,
    deadline: u64,
    seq: u64,
}

/// Queue of pending timers, at most one per kind.
#[derive(Debug, Clone)]
pub struct TimerQueue<K> {
    entries: Vec<TimerEntry<K>>,
    next_seq: u64,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<K: Copy + Eq + std::fmt::Debug> TimerQueue<K> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `kind` to fire at `deadline`, replacing any pending timer of that kind.
    pub fn schedule(&mut self, kind: K, deadline: u64) {
        self.cancel(kind);
        let seq = self.next_seq;
        self.next_seq += 1;
        tracing::trace!(?kind, deadline, "Timer armed");
        self.entries.push(TimerEntry { kind, deadline, seq });
    }

    /// Disarm `kind`. Returns whether it was pending.
    pub fn cancel(&mut self, kind: K) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.kind != kind);
        before != self.entries.len()
    }

    /// Disarm every timer.
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    /// Whether `kind` is armed.
    pub fn is_pending(&self, kind: K) -> bool {
        self.entries.iter().any(|e| e.kind == kind)
    }

    /// Deadline of `kind`, if armed.
    pub fn deadline(&self, kind: K) -> Option<u64> {
        self.entries.iter().find(|e| e.kind == kind).map(|e| e.deadline)
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    /// Remove and return the earliest timer due at or before `now`.
    ///
    /// Callers pop one timer at a time because firing a timer may arm or
    /// disarm others.
    pub fn pop_due(&mut self, now: u64) -> Option<(K, u64)> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline <= now)
            .min_by_key(|(_, e)| (e.deadline, e.seq))
            .map(|(i, _)| i)?;
        let entry = self.entries.remove(index);
        Some((entry.kind, entry.deadline))
    }

    /// Whether no timers are armed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
