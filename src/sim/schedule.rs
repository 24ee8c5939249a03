//! Delayed continuations
//!
//! Message timeouts and the trail shutoff run as entries here, advanced by
//! the game tick. Entries are never cancelled; each carries the token it was
//! scheduled under and the receiver drops it if the token is stale.

/// Work to run once a delay elapses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// End of the "Correct!" message: move to the next level
    FinishAdvance { round: u64 },
    /// End of the "Wrong" message: let the player try again
    FinishRetry { round: u64 },
    /// Hide the pointer trail left by `gesture`
    TrailOff { gesture: u64 },
}

#[derive(Debug, Clone)]
struct Pending {
    remaining: f32,
    /// Scheduling order, breaks ties between equal deadlines
    seq: u64,
    action: Continuation,
}

/// One-shot timers in seconds
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    pending: Vec<Pending>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` after `delay` seconds
    pub fn schedule(&mut self, delay: f32, action: Continuation) {
        self.pending.push(Pending {
            remaining: delay.max(0.0),
            seq: self.next_seq,
            action,
        });
        self.next_seq += 1;
    }

    /// Advance time and return due actions, earliest deadline first
    pub fn advance(&mut self, dt: f32) -> Vec<Continuation> {
        let dt = dt.max(0.0);
        for entry in &mut self.pending {
            entry.remaining -= dt;
        }

        let (mut due, waiting): (Vec<_>, Vec<_>) = self.pending.drain(..).partition(|e| e.remaining <= 0.0);
        self.pending = waiting;
        due.sort_by(|a, b| a.remaining.total_cmp(&b.remaining).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|e| e.action).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_delay() {
        let mut s = Scheduler::new();
        s.schedule(1.0, Continuation::TrailOff { gesture: 1 });
        assert!(s.advance(0.5).is_empty());
        assert_eq!(s.advance(0.5), vec![Continuation::TrailOff { gesture: 1 }]);
        assert!(s.is_empty());
    }

    #[test]
    fn test_due_in_deadline_order() {
        let mut s = Scheduler::new();
        s.schedule(3.0, Continuation::FinishRetry { round: 1 });
        s.schedule(1.0, Continuation::TrailOff { gesture: 4 });
        s.schedule(3.0, Continuation::FinishAdvance { round: 2 });
        let due = s.advance(5.0);
        assert_eq!(
            due,
            vec![
                Continuation::TrailOff { gesture: 4 },
                Continuation::FinishRetry { round: 1 },
                Continuation::FinishAdvance { round: 2 },
            ]
        );
    }

    #[test]
    fn test_overlapping_entries_both_fire() {
        let mut s = Scheduler::new();
        s.schedule(1.0, Continuation::TrailOff { gesture: 1 });
        s.advance(0.4);
        s.schedule(1.0, Continuation::TrailOff { gesture: 2 });
        assert_eq!(s.advance(0.6), vec![Continuation::TrailOff { gesture: 1 }]);
        assert_eq!(s.len(), 1);
        assert_eq!(s.advance(0.4), vec![Continuation::TrailOff { gesture: 2 }]);
    }
}
