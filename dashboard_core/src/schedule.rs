//! Cooperative scheduler for the three periodic dashboard tasks.
//!
//! The schedule never sleeps or spawns; the caller passes the current time
//! in and asks which tasks are due. A task that is still running when its
//! deadline comes around is skipped for that tick and rescheduled one
//! interval later, so at most one instance of each task is ever in flight.

use std::{
    fmt,
    time::{Duration, Instant},
};

use indexmap::IndexMap;
use tracing::debug;

/// A periodic task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Fetch metrics and redraw.
    MetricsRefresh,
    /// Update the wall clock readout.
    ClockTick,
    /// Fetch headlines.
    NewsRefresh,
}

impl TaskKind {
    /// All tasks, in the order they are started.
    pub const ALL: [TaskKind; 3] = [
        TaskKind::MetricsRefresh,
        TaskKind::ClockTick,
        TaskKind::NewsRefresh,
    ];
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TaskKind::MetricsRefresh => "metrics",
            TaskKind::ClockTick => "clock",
            TaskKind::NewsRefresh => "news",
        })
    }
}

/// Period of each task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleIntervals {
    /// Metrics refresh period.
    pub metrics: Duration,
    /// Clock tick period.
    pub clock: Duration,
    /// News refresh period.
    pub news: Duration,
}

impl Default for ScheduleIntervals {
    fn default() -> Self {
        Self {
            metrics: Duration::from_secs(10),
            clock: Duration::from_secs(1),
            news: Duration::from_secs(300),
        }
    }
}

impl ScheduleIntervals {
    /// Period for one task.
    pub fn get(&self, kind: TaskKind) -> Duration {
        match kind {
            TaskKind::MetricsRefresh => self.metrics,
            TaskKind::ClockTick => self.clock,
            TaskKind::NewsRefresh => self.news,
        }
    }
}

#[derive(Debug, Clone)]
struct TaskState {
    interval: Duration,
    next_due: Instant,
    running: bool,
    pending: bool,
    skipped: u64,
}

/// Deadlines and running flags for every task.
#[derive(Debug, Clone)]
pub struct Schedule {
    tasks: IndexMap<TaskKind, TaskState>,
}

impl Schedule {
    /// A schedule where every task is due at `now`.
    pub fn new(now: Instant, intervals: ScheduleIntervals) -> Self {
        let tasks = TaskKind::ALL
            .into_iter()
            .map(|kind| {
                (
                    kind,
                    TaskState {
                        // A zero period would make the task due forever.
                        interval: intervals.get(kind).max(Duration::from_millis(1)),
                        next_due: now,
                        running: false,
                        pending: false,
                        skipped: 0,
                    },
                )
            })
            .collect();
        Self { tasks }
    }

    fn state(&self, kind: TaskKind) -> &TaskState {
        &self.tasks[&kind]
    }

    fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        &mut self.tasks[&kind]
    }

    /// Tasks whose deadline has passed and that are not running.
    ///
    /// Every task that reached its deadline is rescheduled one interval
    /// later, whether it is returned or skipped because it is still running.
    pub fn due(&mut self, now: Instant) -> Vec<TaskKind> {
        let mut ready = Vec::new();
        for (kind, task) in self.tasks.iter_mut() {
            if task.next_due > now {
                continue;
            }
            task.next_due += task.interval;
            if task.next_due <= now {
                task.next_due = now + task.interval;
            }
            if task.running {
                task.skipped += 1;
                debug!(task = %kind, skipped = task.skipped, "previous run still in flight; skipping");
                continue;
            }
            ready.push(*kind);
        }
        ready
    }

    /// Mark a task as in flight.
    pub fn begin(&mut self, kind: TaskKind) {
        self.state_mut(kind).running = true;
    }

    /// Mark a task as done. A trigger received while it ran makes it due
    /// immediately.
    pub fn finish(&mut self, kind: TaskKind, now: Instant) {
        let task = self.state_mut(kind);
        task.running = false;
        if task.pending {
            task.pending = false;
            task.next_due = now;
        }
    }

    /// Request an out-of-band run (manual refresh, range change).
    ///
    /// Returns `true` if the task is now due; `false` if it is running, in
    /// which case it will run again as soon as it finishes.
    pub fn trigger(&mut self, kind: TaskKind, now: Instant) -> bool {
        let task = self.state_mut(kind);
        if task.running {
            task.pending = true;
            false
        } else {
            task.next_due = now;
            true
        }
    }

    /// Earliest deadline across all tasks.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tasks.values().map(|t| t.next_due).min()
    }

    /// How many ticks of a task were skipped because it was still running.
    pub fn skipped(&self, kind: TaskKind) -> u64 {
        self.state(kind).skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn everything_is_due_at_start() {
        let t0 = Instant::now();
        let mut s = Schedule::new(t0, ScheduleIntervals::default());
        assert_eq!(s.due(t0), TaskKind::ALL.to_vec());
        assert!(s.due(t0).is_empty());
        assert_eq!(s.next_deadline(), Some(t0 + secs(1)));
    }

    #[test]
    fn intervals_are_independent() {
        let t0 = Instant::now();
        let mut s = Schedule::new(t0, ScheduleIntervals::default());
        s.due(t0);
        assert_eq!(s.due(t0 + secs(1)), vec![TaskKind::ClockTick]);
        assert_eq!(
            s.due(t0 + secs(10)),
            vec![TaskKind::MetricsRefresh, TaskKind::ClockTick]
        );
    }

    #[test]
    fn running_task_is_skipped_and_rescheduled() {
        let t0 = Instant::now();
        let mut s = Schedule::new(t0, ScheduleIntervals::default());
        s.due(t0);
        s.begin(TaskKind::MetricsRefresh);

        let ready = s.due(t0 + secs(10));
        assert!(!ready.contains(&TaskKind::MetricsRefresh));
        assert_eq!(s.skipped(TaskKind::MetricsRefresh), 1);

        s.finish(TaskKind::MetricsRefresh, t0 + secs(12));
        assert!(!s.due(t0 + secs(19)).contains(&TaskKind::MetricsRefresh));
        assert!(s.due(t0 + secs(20)).contains(&TaskKind::MetricsRefresh));
    }

    #[test]
    fn trigger_while_running_reruns_after_finish() {
        let t0 = Instant::now();
        let mut s = Schedule::new(t0, ScheduleIntervals::default());
        s.due(t0);
        s.begin(TaskKind::NewsRefresh);

        assert!(!s.trigger(TaskKind::NewsRefresh, t0 + secs(2)));
        assert!(!s.due(t0 + secs(3)).contains(&TaskKind::NewsRefresh));

        s.finish(TaskKind::NewsRefresh, t0 + secs(4));
        assert!(s.due(t0 + secs(4)).contains(&TaskKind::NewsRefresh));
    }

    #[test]
    fn trigger_when_idle_is_due_now() {
        let t0 = Instant::now();
        let mut s = Schedule::new(t0, ScheduleIntervals::default());
        s.due(t0);
        assert!(s.trigger(TaskKind::MetricsRefresh, t0 + secs(3)));
        assert_eq!(s.next_deadline(), Some(t0 + secs(1)));
        assert!(s.due(t0 + secs(3)).contains(&TaskKind::MetricsRefresh));
    }

    #[test]
    fn stalled_loop_does_not_replay_missed_ticks() {
        let t0 = Instant::now();
        let mut s = Schedule::new(t0, ScheduleIntervals::default());
        s.due(t0);
        assert!(s.due(t0 + secs(30)).contains(&TaskKind::ClockTick));
        assert!(!s.due(t0 + secs(30)).contains(&TaskKind::ClockTick));
    }
}
