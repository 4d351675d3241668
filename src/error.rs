//! Error types attached to task results.
//!
//! Tasks never propagate errors across the event boundary. Every failure is
//! stored in the task's [`TaskResult`](crate::tasks::TaskResult) and read by
//! the caller once the task reports `Done`.

/// Failures a task can finish with, or show inline while active.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    /// Input rejected by its validator. Non-fatal while the task is active.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The user aborted the task.
    #[error("Cancelled by user")]
    Cancelled,

    /// The countdown expired and its configured default was rejected.
    #[error("Timeout default rejected: {0}")]
    TimeoutDefaultInvalid(String),

    /// The negative answer of a confirmation.
    #[error("Declined")]
    Declined,

    /// A background operation returned an error.
    #[error("Operation failed: {0}")]
    Operation(String),
}

impl TaskError {
    /// Whether this error halts the surrounding queue unless configured otherwise.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::TimeoutDefaultInvalid(_))
    }

    /// Whether this error only informs statistics and lets the queue continue.
    #[must_use]
    pub fn is_soft(&self) -> bool {
        matches!(self, Self::Declined | Self::Validation(_))
    }
}
