//! Virtual-clock timer queue
//!
//! Stands in for `setInterval`/`setTimeout`: the host advances the clock and
//! pulls due events one at a time. Events due at the same instant come out in
//! the order they were scheduled. Cancelled timers never fire.

use super::grid::ObstacleToken;

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    SpawnCollectible,
    SpawnObstacle,
    Countdown,
    ObstacleExpired { cell: usize, token: ObstacleToken },
}

/// Handle for cancelling a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct Entry {
    handle: TimerHandle,
    due_ms: u64,
    /// Registration order, breaks ties between equal deadlines
    seq: u64,
    /// `Some` for repeating timers
    interval_ms: Option<u64>,
    event: TimerEvent,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_id: u64,
    next_seq: u64,
    entries: Vec<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of live timers
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Fire `event` every `interval_ms`, first firing one interval from now
    pub fn every(&mut self, interval_ms: u64, event: TimerEvent) -> TimerHandle {
        let interval_ms = interval_ms.max(1);
        self.push(interval_ms, Some(interval_ms), event)
    }

    /// Fire `event` once after `delay_ms`
    pub fn after(&mut self, delay_ms: u64, event: TimerEvent) -> TimerHandle {
        self.push(delay_ms, None, event)
    }

    fn push(&mut self, delay_ms: u64, interval_ms: Option<u64>, event: TimerEvent) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry {
            handle,
            due_ms: self.now_ms + delay_ms,
            seq,
            interval_ms,
            event,
        });
        handle
    }

    /// Cancel a timer; returns false if it already fired or was cancelled
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    /// Whether `handle` is still waiting to fire
    pub fn is_armed(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Pop the earliest event due at or before `until_ms`, moving the clock to
    /// its deadline. Repeating timers are re-armed one interval later.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<TimerEvent> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= until_ms)
            .min_by_key(|(_, e)| (e.due_ms, e.seq))
            .map(|(i, _)| i)?;

        let due_ms = self.entries[idx].due_ms;
        self.now_ms = self.now_ms.max(due_ms);
        let event = self.entries[idx].event;

        match self.entries[idx].interval_ms {
            Some(interval) => self.entries[idx].due_ms = due_ms + interval,
            None => {
                self.entries.swap_remove(idx);
            }
        }

        Some(event)
    }

    /// Move the clock forward without firing anything (call after draining `pop_due`)
    pub fn advance_clock(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(s: &mut Scheduler, until: u64) -> Vec<(u64, TimerEvent)> {
        let mut out = Vec::new();
        while let Some(ev) = s.pop_due(until) {
            out.push((s.now_ms(), ev));
        }
        s.advance_clock(until);
        out
    }

    #[test]
    fn test_repeating_fires_each_interval() {
        let mut s = Scheduler::new();
        s.every(1000, TimerEvent::Countdown);
        let fired = drain(&mut s, 3500);
        assert_eq!(
            fired,
            vec![
                (1000, TimerEvent::Countdown),
                (2000, TimerEvent::Countdown),
                (3000, TimerEvent::Countdown)
            ]
        );
        assert_eq!(s.now_ms(), 3500);
        assert_eq!(s.pending(), 1);
    }

    #[test]
    fn test_chronological_across_timers() {
        let mut s = Scheduler::new();
        s.every(300, TimerEvent::SpawnCollectible);
        s.every(500, TimerEvent::SpawnObstacle);
        let fired: Vec<_> = drain(&mut s, 1000).into_iter().map(|(t, _)| t).collect();
        assert_eq!(fired, vec![300, 500, 600, 900, 1000]);
    }

    #[test]
    fn test_ties_follow_registration_order() {
        let mut s = Scheduler::new();
        s.every(500, TimerEvent::SpawnCollectible);
        s.every(1000, TimerEvent::Countdown);
        let fired: Vec<_> = drain(&mut s, 1000).into_iter().map(|(_, e)| e).collect();
        assert_eq!(
            fired,
            vec![
                TimerEvent::SpawnCollectible,
                TimerEvent::SpawnCollectible,
                TimerEvent::Countdown
            ]
        );
    }

    #[test]
    fn test_one_shot_fires_once() {
        let mut s = Scheduler::new();
        let ev = TimerEvent::ObstacleExpired {
            cell: 4,
            token: ObstacleToken(1),
        };
        s.after(1200, ev);
        assert!(drain(&mut s, 1199).is_empty());
        assert_eq!(drain(&mut s, 5000), vec![(1200, ev)]);
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut s = Scheduler::new();
        let h = s.every(100, TimerEvent::SpawnObstacle);
        assert!(s.cancel(h));
        assert!(!s.cancel(h));
        assert!(drain(&mut s, 1000).is_empty());
    }

    #[test]
    fn test_one_shot_disarms_after_firing() {
        let mut s = Scheduler::new();
        let repeating = s.every(100, TimerEvent::SpawnObstacle);
        let once = s.after(50, TimerEvent::Countdown);
        assert!(s.is_armed(once));
        drain(&mut s, 60);
        assert!(!s.is_armed(once));
        assert!(!s.cancel(once));
        assert!(s.is_armed(repeating));
        assert!(s.cancel(repeating));
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn test_after_is_relative_to_current_clock() {
        let mut s = Scheduler::new();
        s.advance_clock(2000);
        s.after(1200, TimerEvent::Countdown);
        assert_eq!(drain(&mut s, 4000), vec![(3200, TimerEvent::Countdown)]);
    }
}
