//! taskwizard - keyboard-driven terminal wizards
//!
//! This library provides ordered queues of interactive tasks (confirmations,
//! single and multi selection lists, validated text input and background
//! operations) that render themselves incrementally and report a typed
//! result once finished.
//!
//! # Modules
//!
//! The library is organized into several key modules:
//!
//! * [`tasks`] - The task state machines
//! * [`timeout`] - Countdown shared by every task
//! * [`selection`] - Membership storage for selection lists
//! * [`viewport`] - Scrolling window over long lists
//! * [`runtime`] - Event loop, scheduler and terminal I/O
//! * [`config`] - Application configuration management

/// Configuration module for managing application settings
pub mod config;

/// Library constants and default values
pub mod constants;

/// Errors attached to task results
pub mod error;

/// Events fed into tasks and commands they hand back
pub mod event;

/// Icon definitions for visual representation
pub mod icons;

/// Named keys and terminal key translation
pub mod keys;

/// Localized labels and error keyword classification
pub mod locale;

/// Logging setup
pub mod logger;

/// Styling seam and text layout helpers
pub mod render;

/// Driver, scheduler and input sources
pub mod runtime;

/// Selection membership storage
pub mod selection;

/// Interactive task state machines
pub mod tasks;

/// Countdown with default value
pub mod timeout;

/// Input validators
pub mod validation;

/// Scroll window computation
pub mod viewport;

// Re-export the types most callers need
pub use error::TaskError;
pub use event::{Command, Event};
pub use keys::Key;
pub use tasks::{
    FuncTask, InputTask, Item, ItemRef, MultiSelectTask, SingleSelectTask, Task, TaskResult, Transition, YesNoTask,
};
