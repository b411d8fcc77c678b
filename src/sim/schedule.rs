//! Frame-counted deferred actions
//!
//! Delayed effects (staggered celebration bursts, screen transitions) are
//! queued here with an absolute fire frame and drained by the game tick.
//! Starting a new session cancels everything still pending in one call.

use super::state::Screen;

/// Something to do later
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Deferred {
    /// One burst at the heart's position
    CelebrationBurst,
    /// Show a full-screen overlay
    ShowScreen(Screen),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Entry {
    fire_at: u64,
    action: Deferred,
}

#[derive(Debug, Clone, Default)]
pub struct Schedule {
    entries: Vec<Entry>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to fire `delay_frames` after `now`
    pub fn after(&mut self, now: u64, delay_frames: u64, action: Deferred) {
        self.entries.push(Entry {
            fire_at: now + delay_frames,
            action,
        });
    }

    /// Remove and return every action due at or before `now`, in fire order
    pub fn drain_due(&mut self, now: u64) -> Vec<Deferred> {
        let mut due: Vec<Entry> = Vec::new();
        self.entries.retain(|e| {
            if e.fire_at <= now {
                due.push(*e);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|e| e.fire_at);
        due.into_iter().map(|e| e.action).collect()
    }

    /// Cancel everything pending
    pub fn cancel_all(&mut self) {
        if !self.entries.is_empty() {
            log::debug!("Cancelled {} pending actions", self.entries.len());
        }
        self.entries.clear();
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_in_order() {
        let mut schedule = Schedule::new();
        schedule.after(10, 5, Deferred::ShowScreen(Screen::Win));
        schedule.after(10, 2, Deferred::CelebrationBurst);

        assert!(schedule.drain_due(11).is_empty());
        assert_eq!(schedule.drain_due(12), vec![Deferred::CelebrationBurst]);
        assert_eq!(
            schedule.drain_due(100),
            vec![Deferred::ShowScreen(Screen::Win)]
        );
        assert_eq!(schedule.pending(), 0);
    }

    #[test]
    fn test_cancel_all() {
        let mut schedule = Schedule::new();
        for i in 0..50 {
            schedule.after(0, i, Deferred::CelebrationBurst);
        }
        schedule.cancel_all();
        assert_eq!(schedule.pending(), 0);
        assert!(schedule.drain_due(u64::MAX).is_empty());
    }
}
