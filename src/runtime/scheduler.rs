//! Background execution of task commands.
//!
//! Every [`Command`] runs on its own tokio task. Whatever event it resolves to
//! is sent back over an unbounded channel tagged with the id of the task that
//! issued it, so the driver can drop events addressed to a task that is no
//! longer current.

use crate::event::{Command, Event};
use crate::tasks::TaskId;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub type JobId = u64;

/// Event produced by a command, addressed to the task that issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub task: TaskId,
    pub event: Event,
}

#[derive(Debug)]
struct Job {
    handle: JoinHandle<()>,
    description: String,
    started_at: tokio::time::Instant,
}

/// Spawns commands and aborts whatever is still running when dropped.
pub struct Scheduler {
    jobs: HashMap<JobId, Job>,
    next_job_id: JobId,
    sender: mpsc::UnboundedSender<Envelope>,
}

impl Scheduler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Envelope>) {
        let (tx, rx) = mpsc::unbounded_channel();

        (
            Self {
                jobs: HashMap::new(),
                next_job_id: 1,
                sender: tx,
            },
            rx,
        )
    }

    /// Run `command` in the background on behalf of `task`.
    pub fn spawn(&mut self, task: TaskId, command: Command) -> JobId {
        let job_id = self.next_job_id;
        self.next_job_id += 1;

        let description = format!("{:?}", command);
        let sender = self.sender.clone();
        let handle = tokio::spawn(async move {
            if let Some(event) = command.resolve().await {
                // The receiver is gone once the driver moved on
                let _ = sender.send(Envelope { task, event });
            }
        });

        log::debug!("Spawned job {} for task {}: {}", job_id, task, description);
        self.jobs.insert(
            job_id,
            Job {
                handle,
                description,
                started_at: tokio::time::Instant::now(),
            },
        );
        job_id
    }

    pub fn spawn_all(&mut self, task: TaskId, commands: Vec<Command>) -> Vec<JobId> {
        commands.into_iter().map(|command| self.spawn(task, command)).collect()
    }

    /// Forget jobs that completed. Returns how many were removed.
    pub fn cleanup_finished(&mut self) -> usize {
        let before = self.jobs.len();
        self.jobs.retain(|job_id, job| {
            let finished = job.handle.is_finished();
            if finished {
                log::trace!(
                    "Job {} ({}) finished after {:?}",
                    job_id,
                    job.description,
                    job.started_at.elapsed()
                );
            }
            !finished
        });
        before - self.jobs.len()
    }

    pub fn cancel_all(&mut self) {
        for (_, job) in self.jobs.drain() {
            job.handle.abort();
        }
    }

    /// Number of jobs not yet cleaned up.
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
