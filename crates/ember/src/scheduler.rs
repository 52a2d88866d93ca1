//! Cancellable timer tasks.
//!
//! The scheduler never waits. It records which [`Job`] belongs to which
//! [`TaskId`] and queues [`TimerCommand`]s; the platform drains them with
//! [`Scheduler::take_commands`], waits, and reports back through
//! [`Scheduler::fire`]. A firing whose task was cancelled in the meantime is
//! ignored, so platforms never need to race cancellation.

use std::collections::BTreeMap;

use ember_scene::{NodeId, SectionId};
use ulid::Ulid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub u64);

/// Work to run when a task fires.
#[derive(Clone, Debug, PartialEq)]
pub enum Job {
    LoadingProgress,
    RevealShell,
    FinishReveal,
    RestartAnimations(SectionId),
    RetriggerCurrentSection,
    CounterFrame(NodeId),
    FillStatBars,
    LiveStatus,
    LiveSquad,
    LiveStreak,
    DismissNotification(Ulid),
    RemoveNotification(Ulid),
    ClearFeedback { node: NodeId, class: &'static str },
    FinishContactSubmit,
    HideGalleryOverlay(NodeId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delay {
    Millis(u32),
    /// Next animation frame.
    AnimationFrame,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerRequest {
    pub id: TaskId,
    pub delay: Delay,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerCommand {
    Start(TimerRequest),
    Cancel(TaskId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cadence {
    Once(Delay),
    Every(u32),
}

#[derive(Debug)]
struct ScheduledTask {
    job: Job,
    cadence: Cadence,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    tasks: BTreeMap<TaskId, ScheduledTask>,
    commands: Vec<TimerCommand>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `job` once after `delay_ms`.
    pub fn after(&mut self, delay_ms: u32, job: Job) -> TaskId {
        self.insert(job, Cadence::Once(Delay::Millis(delay_ms)))
    }

    /// Runs `job` every `interval_ms` until cancelled.
    pub fn every(&mut self, interval_ms: u32, job: Job) -> TaskId {
        self.insert(job, Cadence::Every(interval_ms))
    }

    /// Runs `job` on the next animation frame.
    pub fn next_frame(&mut self, job: Job) -> TaskId {
        self.insert(job, Cadence::Once(Delay::AnimationFrame))
    }

    fn insert(&mut self, job: Job, cadence: Cadence) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.commands.push(TimerCommand::Start(TimerRequest {
            id,
            delay: cadence.delay(),
        }));
        self.tasks.insert(id, ScheduledTask { job, cadence });
        id
    }

    /// Returns `false` if the task already finished or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let removed = self.tasks.remove(&id).is_some();
        if removed {
            self.commands.push(TimerCommand::Cancel(id));
        }
        removed
    }

    pub fn cancel_all(&mut self) {
        let ids: Vec<TaskId> = self.tasks.keys().copied().collect();
        for id in ids {
            self.cancel(id);
        }
    }

    /// Called by the platform when the timer of `id` elapsed.
    ///
    /// One-shot tasks are retired; repeating tasks queue their next start.
    pub fn fire(&mut self, id: TaskId) -> Option<Job> {
        let task = self.tasks.get(&id)?;
        match task.cadence {
            Cadence::Every(interval_ms) => {
                let job = task.job.clone();
                self.commands.push(TimerCommand::Start(TimerRequest {
                    id,
                    delay: Delay::Millis(interval_ms),
                }));
                Some(job)
            }
            Cadence::Once(_) => self.tasks.remove(&id).map(|task| task.job),
        }
    }

    pub fn is_active(&self, id: TaskId) -> bool {
        self.tasks.contains_key(&id)
    }

    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn take_commands(&mut self) -> Vec<TimerCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Cadence {
    fn delay(self) -> Delay {
        match self {
            Self::Once(delay) => delay,
            Self::Every(interval_ms) => Delay::Millis(interval_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_fires_once() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.after(100, Job::RevealShell);
        assert_eq!(
            scheduler.take_commands(),
            vec![TimerCommand::Start(TimerRequest {
                id,
                delay: Delay::Millis(100)
            })]
        );

        assert_eq!(scheduler.fire(id), Some(Job::RevealShell));
        assert_eq!(scheduler.fire(id), None);
        assert!(!scheduler.is_active(id));
        assert!(scheduler.take_commands().is_empty());
    }

    #[test]
    fn repeating_task_requeues_itself() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.every(10_000, Job::LiveStatus);
        scheduler.take_commands();

        assert_eq!(scheduler.fire(id), Some(Job::LiveStatus));
        assert_eq!(
            scheduler.take_commands(),
            vec![TimerCommand::Start(TimerRequest {
                id,
                delay: Delay::Millis(10_000)
            })]
        );
        assert!(scheduler.is_active(id));
    }

    #[test]
    fn cancelled_task_ignores_late_firing() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.every(100, Job::LoadingProgress);
        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert_eq!(scheduler.fire(id), None);
        assert_eq!(
            scheduler.take_commands().last(),
            Some(&TimerCommand::Cancel(id))
        );
    }

    #[test]
    fn frames_request_animation_frame_delay() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.next_frame(Job::CounterFrame(NodeId(3)));
        assert_eq!(
            scheduler.take_commands(),
            vec![TimerCommand::Start(TimerRequest {
                id,
                delay: Delay::AnimationFrame
            })]
        );
    }

    #[test]
    fn cancel_all_empties_the_table() {
        let mut scheduler = Scheduler::new();
        scheduler.every(10, Job::LiveStatus);
        scheduler.after(10, Job::FillStatBars);
        scheduler.cancel_all();
        assert_eq!(scheduler.active_count(), 0);
    }
}
