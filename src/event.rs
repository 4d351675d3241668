//! Events fed into tasks and the follow-up commands tasks hand back.
//!
//! Commands are plain descriptions. The driver resolves each one on a
//! background tokio task and feeds the resulting [`Event`] back into the
//! consumer loop; a command never touches task state itself.

use crate::keys::Key;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::sync::mpsc;

/// Identifies one arm-cycle of a countdown.
///
/// Every re-arm gets a fresh id so events from an earlier cycle are
/// recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArmId(pub(crate) u64);

impl ArmId {
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Outcome reported by a background operation: an optional summary, or the
/// error rendered as text.
pub type OperationOutcome = Result<Option<String>, String>;

/// Future run by [`Command::Run`].
pub type OperationFuture = Pin<Box<dyn Future<Output = anyhow::Result<Option<String>>> + Send>>;

/// Input delivered to a task's event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(Key),
    /// The countdown of the given arm-cycle expired
    Timeout(ArmId),
    /// Refresh the remaining-time display of the given arm-cycle
    Tick(ArmId),
    /// A background operation resolved
    OperationFinished(OperationOutcome),
}

impl From<Key> for Event {
    fn from(key: Key) -> Self {
        Event::Key(key)
    }
}

/// Asynchronous follow-up requested by a task.
pub enum Command {
    /// One-shot deadline, dropped when a cancel notification arrives first
    Deadline {
        arm: ArmId,
        after: Duration,
        cancel: mpsc::Receiver<()>,
    },
    /// One-shot refresh; tasks re-issue it on each accepted tick
    Tick { arm: ArmId, after: Duration },
    /// Background operation
    Run(OperationFuture),
}

impl Command {
    /// Arm-cycle a timer command belongs to.
    #[must_use]
    pub fn arm(&self) -> Option<ArmId> {
        match self {
            Command::Deadline { arm, .. } | Command::Tick { arm, .. } => Some(*arm),
            Command::Run(_) => None,
        }
    }

    #[must_use]
    pub fn is_deadline(&self) -> bool {
        matches!(self, Command::Deadline { .. })
    }

    #[must_use]
    pub fn is_tick(&self) -> bool {
        matches!(self, Command::Tick { .. })
    }

    /// Wait for the command to complete. `None` when it was cancelled.
    pub async fn resolve(self) -> Option<Event> {
        match self {
            Command::Deadline { arm, after, mut cancel } => {
                tokio::select! {
                    _ = tokio::time::sleep(after) => Some(Event::Timeout(arm)),
                    // Sender dropped or cancel sent: either way this cycle is over
                    _ = cancel.recv() => None,
                }
            }
            Command::Tick { arm, after } => {
                tokio::time::sleep(after).await;
                Some(Event::Tick(arm))
            }
            Command::Run(operation) => {
                let outcome = operation.await.map_err(|e| format!("{:#}", e));
                Some(Event::OperationFinished(outcome))
            }
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Deadline { arm, after, .. } => f
                .debug_struct("Deadline")
                .field("arm", arm)
                .field("after", after)
                .finish(),
            Command::Tick { arm, after } => f.debug_struct("Tick").field("arm", arm).field("after", after).finish(),
            Command::Run(_) => f.write_str("Run(..)"),
        }
    }
}
