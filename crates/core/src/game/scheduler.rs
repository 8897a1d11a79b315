//! Discrete-event timer queue for one room session.
//!
//! Periodic tasks re-arm themselves when popped; one-shot tasks are replaced
//! when scheduled again. The queue lives inside the session, so dropping the
//! session cancels everything still pending.

/// Declaration order doubles as the tie-break order for tasks due at the same instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TaskKind {
    Movement,
    EnemyStrike,
    ZoneEffect,
    EnemyAi,
    AttackPoseReset,
    SlashReset,
    HitFlashReset,
    RespawnReposition,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Task {
    kind: TaskKind,
    due_ms: u64,
    period_ms: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scheduler {
    tasks: Vec<Task>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a periodic task whose first firing is one period after `now_ms`.
    pub fn every(&mut self, kind: TaskKind, now_ms: u64, period_ms: u64) {
        let period_ms = period_ms.max(1);
        self.cancel(kind);
        self.tasks.push(Task { kind, due_ms: now_ms + period_ms, period_ms: Some(period_ms) });
    }

    pub fn once(&mut self, kind: TaskKind, due_ms: u64) {
        self.cancel(kind);
        self.tasks.push(Task { kind, due_ms, period_ms: None });
    }

    pub fn cancel(&mut self, kind: TaskKind) {
        self.tasks.retain(|task| task.kind != kind);
    }

    pub fn due_at(&self, kind: TaskKind) -> Option<u64> {
        self.tasks.iter().find(|task| task.kind == kind).map(|task| task.due_ms)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Removes (or re-arms) the earliest task due at or before `until_ms`.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(u64, TaskKind)> {
        let index = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.due_ms <= until_ms)
            .min_by_key(|(_, task)| (task.due_ms, task.kind))
            .map(|(index, _)| index)?;

        let task = self.tasks[index];
        match task.period_ms {
            Some(period) => self.tasks[index].due_ms += period,
            None => {
                self.tasks.swap_remove(index);
            }
        }
        Some((task.due_ms, task.kind))
    }
}
