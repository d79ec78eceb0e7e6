/// Deferred Task Queue
///
/// Work that must not run inside the event that triggered it is queued here
/// and executed when the embedder drains the host. Tasks are one-shot and
/// cannot be cancelled. A task always runs strictly after the event that
/// submitted it, and tasks submitted while draining wait for the next drain.

use crate::host::{Host, ViewerId};
use std::collections::VecDeque;
use std::fmt;

/// A one-shot unit of deferred work
pub type Task = Box<dyn FnOnce(&mut Host) + Send>;

/// Where a task is bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskTarget {
    /// Runs on the next drain
    NextTick,
    /// Runs on the next drain if the entity still exists, otherwise it is retired
    Entity(ViewerId),
}

pub struct ScheduledTask {
    pub target: TaskTarget,
    task: Task,
}

impl ScheduledTask {
    pub fn run(self, host: &mut Host) {
        (self.task)(host)
    }
}

impl fmt::Debug for ScheduledTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduledTask").field("target", &self.target).finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct Scheduler {
    queue: VecDeque<ScheduledTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` on the next tick
    pub fn run_next_tick(&mut self, task: impl FnOnce(&mut Host) + Send + 'static) {
        self.queue.push_back(ScheduledTask {
            target: TaskTarget::NextTick,
            task: Box::new(task),
        });
    }

    /// Run `task` on the next tick, bound to `entity`
    pub fn run_at_entity(&mut self, entity: ViewerId, task: impl FnOnce(&mut Host) + Send + 'static) {
        self.queue.push_back(ScheduledTask {
            target: TaskTarget::Entity(entity),
            task: Box::new(task),
        });
    }

    /// Take every task queued so far
    pub fn take_due(&mut self) -> Vec<ScheduledTask> {
        self.queue.drain(..).collect()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
