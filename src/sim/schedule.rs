//! Delayed state transitions
//!
//! Entries carry a due time on the simulation clock and fire in
//! (due time, insertion) order at the start of a tick, never mid-step.

/// A transition waiting for its due time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledEvent {
    /// Fresh player and empty barrel set after losing a life
    RestartRound,
    /// Back to level 1 after the last life
    FullReset,
    /// One note of the level-complete fanfare
    FanfareNote(u8),
    /// Build the next level and resume play
    AdvanceLevel,
}

#[derive(Debug, Clone)]
struct Entry {
    due_ms: f64,
    seq: u64,
    event: ScheduledEvent,
}

#[derive(Debug, Clone, Default)]
pub struct Schedule {
    entries: Vec<Entry>,
    next_seq: u64,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `event` to fire once the clock reaches `due_ms`
    pub fn push(&mut self, due_ms: f64, event: ScheduledEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry { due_ms, seq, event });
    }

    /// Remove and return the earliest entry due at `now_ms`
    pub fn pop_due(&mut self, now_ms: f64) -> Option<ScheduledEvent> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= now_ms)
            .min_by(|(_, a), (_, b)| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)))
            .map(|(i, _)| i)?;
        Some(self.entries.remove(idx).event)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
