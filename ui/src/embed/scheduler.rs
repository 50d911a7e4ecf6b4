//! Timer scheduling seam for the coordinator.

use std::time::Duration;

use super::machine::TimerKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Arms one-shot timers. When a timer elapses the owner of the scheduler
/// must hand its id back to [`Coordinator::on_timer`](super::Coordinator::on_timer).
pub trait Scheduler {
    fn schedule(&mut self, kind: TimerKind, after: Duration) -> TimerId;

    /// Cancel a pending timer. Unknown or already fired ids are ignored.
    fn cancel(&mut self, id: TimerId);

    /// The timer fired and was delivered; release anything held for it.
    fn complete(&mut self, _id: TimerId) {}
}

#[derive(Debug, Clone)]
struct Pending {
    id: TimerId,
    kind: TimerKind,
    due: Duration,
}

/// Virtual clock. Nothing fires on its own; [`ManualScheduler::pop_due`]
/// hands out elapsed timers in due order.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Kinds still waiting, earliest first.
    pub fn pending_kinds(&self) -> Vec<TimerKind> {
        let mut pending = self.pending.clone();
        pending.sort_by_key(|p| (p.due, p.id));
        pending.into_iter().map(|p| p.kind).collect()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return the earliest timer due at or before `until`,
    /// moving the clock to its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerId> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= until)
            .min_by_key(|(_, p)| (p.due, p.id))
            .map(|(index, _)| index)?;
        let timer = self.pending.remove(index);
        self.now = self.now.max(timer.due);
        Some(timer.id)
    }

    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, kind: TimerKind, after: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.pending.push(Pending {
            id,
            kind,
            due: self.now + after,
        });
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.pending.retain(|p| p.id != id);
    }
}
