//! Cooperative task scheduler driven by the host's frame callback.
//!
//! Tasks re-arm themselves by returning a [`Rearm`] from each run. Time is
//! whatever the host passes to [`Scheduler::frame`]. Tests feed a virtual
//! clock so runs are deterministic.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::stage::Stage;

/// When a task wants to run next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rearm {
    /// Fire once the given delay has elapsed after this run
    After(Duration),
    /// Fire on the next frame
    NextFrame,
    /// Never run again
    Done,
}

pub trait Task {
    fn name(&self) -> &'static str;
    fn run(&mut self, stage: &mut Stage, now: Duration) -> Rearm;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

/// Shared stop flag. Once raised, the scheduler runs nothing further.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Due {
    At(Duration),
    NextFrame,
}

struct Slot {
    id: TaskId,
    task: Box<dyn Task>,
    due: Due,
}

#[derive(Default)]
pub struct Scheduler {
    slots: Vec<Slot>,
    next_id: u64,
    clock: Duration,
    stop: StopHandle,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task. `first` is relative to the scheduler's current clock.
    pub fn spawn<T: Task + 'static>(&mut self, task: T, first: Rearm) -> Option<TaskId> {
        let due = match first {
            Rearm::After(delay) => Due::At(self.clock + delay),
            Rearm::NextFrame => Due::NextFrame,
            Rearm::Done => return None,
        };

        let id = TaskId(self.next_id);
        self.next_id += 1;
        log::debug!("Spawned task '{}' ({:?})", task.name(), id);
        self.slots.push(Slot {
            id,
            task: Box::new(task),
            due,
        });
        Some(id)
    }

    /// Spawn only if the unit actually mounted.
    pub fn spawn_mounted<T: Task + 'static>(&mut self, task: Option<T>, first: Rearm) -> Option<TaskId> {
        task.and_then(|task| self.spawn(task, first))
    }

    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|slot| slot.id != id);
        self.slots.len() != before
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn is_scheduled(&self, id: TaskId) -> bool {
        self.slots.iter().any(|slot| slot.id == id)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Run one frame at host time `now`. Returns the number of task runs.
    ///
    /// Frame tasks run once. Timer tasks run once per deadline that has
    /// passed, each seeing its own scheduled time, so a slow frame does not
    /// lose ticks. A zero delay counts as "next frame".
    pub fn frame(&mut self, stage: &mut Stage, now: Duration) -> usize {
        if self.stop.is_stopped() {
            return 0;
        }
        self.clock = self.clock.max(now);

        let mut runs = 0;
        let clock = self.clock;
        self.slots.retain_mut(|slot| {
            loop {
                let fire_at = match slot.due {
                    Due::NextFrame => clock,
                    Due::At(t) if t <= clock => t,
                    Due::At(_) => return true,
                };

                runs += 1;
                match slot.task.run(stage, fire_at) {
                    Rearm::Done => return false,
                    Rearm::NextFrame => {
                        slot.due = Due::NextFrame;
                        return true;
                    }
                    Rearm::After(delay) if delay.is_zero() => {
                        slot.due = Due::NextFrame;
                        return true;
                    }
                    Rearm::After(delay) => {
                        let next = fire_at + delay;
                        slot.due = Due::At(next);
                        if next > clock {
                            return true;
                        }
                    }
                }
            }
        });
        runs
    }

    /// Drive `frames` frames spaced `interval` apart on the virtual clock.
    pub fn run_frames(&mut self, stage: &mut Stage, frames: usize, interval: Duration) -> usize {
        let mut runs = 0;
        for _ in 0..frames {
            if self.stop.is_stopped() {
                break;
            }
            let now = self.clock + interval;
            runs += self.frame(stage, now);
        }
        runs
    }
}
