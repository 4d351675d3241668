//! Interactive task state machines.
//!
//! Every task moves from `Active` to `Done` exactly once. While active it
//! consumes [`Event`]s and answers with a [`Transition`]; once done every
//! event is ignored and the [`TaskResult`] is frozen.
//!
//! # Tasks
//!
//! - [`MultiSelectTask`] - checkbox list with select-all, dependencies and scrolling
//! - [`SingleSelectTask`] - pick one item from a list
//! - [`YesNoTask`] - confirmation built on [`SingleSelectTask`]
//! - [`InputTask`] - validated free text
//! - [`FuncTask`] - runs a background operation

pub mod func;
pub mod input;
pub mod multi_select;
pub mod single_select;
pub mod yes_no;

pub use func::FuncTask;
pub use input::InputTask;
pub use multi_select::{DependencyRule, MultiSelectTask, RuleAction};
pub use single_select::SingleSelectTask;
pub use yes_no::{Verdict, YesNoTask};

use crate::error::TaskError;
use crate::event::{Command, Event};
use crate::icons::Icon;
use crate::render::{RenderContext, Role};
use uuid::Uuid;

pub type TaskId = Uuid;

/// One entry of a selection list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub key: String,
    pub name: String,
    pub description: Option<String>,
}

impl Item {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            description: None,
        }
    }

    /// Item whose key doubles as its display name.
    pub fn simple(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(key.clone(), key)
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Reference to an item by position or by key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemRef {
    Index(usize),
    Key(String),
}

impl ItemRef {
    /// Resolve against `items`. Unknown references yield `None`.
    pub fn resolve(&self, items: &[Item]) -> Option<usize> {
        match self {
            ItemRef::Index(index) => (*index < items.len()).then_some(*index),
            ItemRef::Key(key) => items.iter().position(|item| &item.key == key),
        }
    }
}

impl From<usize> for ItemRef {
    fn from(index: usize) -> Self {
        ItemRef::Index(index)
    }
}

impl From<&str> for ItemRef {
    fn from(key: &str) -> Self {
        ItemRef::Key(key.to_string())
    }
}

impl From<String> for ItemRef {
    fn from(key: String) -> Self {
        ItemRef::Key(key)
    }
}

/// Whether a task keeps consuming events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Continue,
    Done,
}

/// Answer of an event handler: new status plus follow-up commands.
#[derive(Debug)]
pub struct Transition {
    pub status: Status,
    pub commands: Vec<Command>,
}

impl Transition {
    #[must_use]
    pub fn stay() -> Self {
        Self {
            status: Status::Continue,
            commands: Vec::new(),
        }
    }

    #[must_use]
    pub fn stay_with(commands: Vec<Command>) -> Self {
        Self {
            status: Status::Continue,
            commands,
        }
    }

    #[must_use]
    pub fn done() -> Self {
        Self {
            status: Status::Done,
            commands: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.status == Status::Done
    }
}

/// Final outcome of a task.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskResult {
    pub done: bool,
    pub icon: Option<Icon>,
    /// Display form of the committed value
    pub final_value: Option<String>,
    pub error: Option<TaskError>,
    /// Whether the surrounding queue should halt
    pub stop_on_error: bool,
}

impl TaskResult {
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Contract shared by every interactive task.
pub trait Task: Send {
    fn id(&self) -> TaskId;

    fn title(&self) -> &str;

    /// Initial commands, at most the countdown when one is configured.
    fn start(&mut self) -> Vec<Command>;

    fn handle_event(&mut self, event: Event) -> Transition;

    fn render_active(&self, width: u16, ctx: &RenderContext<'_>) -> String;

    fn render_final(&self, width: u16, ctx: &RenderContext<'_>) -> String;

    fn result(&self) -> &TaskResult;

    fn is_done(&self) -> bool {
        self.result().done
    }

    fn has_error(&self) -> bool {
        self.result().has_error()
    }

    fn error(&self) -> Option<&TaskError> {
        self.result().error.as_ref()
    }

    fn stop_on_error(&self) -> bool {
        self.result().stop_on_error
    }
}

/// State common to all tasks: identity, title and the once-only result.
#[derive(Debug, Clone)]
pub(crate) struct TaskCore {
    pub id: TaskId,
    pub title: String,
    /// Halt policy applied to soft failures
    pub stop_on_error: bool,
    /// The committed value came from the countdown default
    pub timed_out: bool,
    pub result: TaskResult,
}

impl TaskCore {
    pub fn new(title: impl Into<String>, stop_on_error: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            stop_on_error,
            timed_out: false,
            result: TaskResult::default(),
        }
    }

    pub fn is_done(&self) -> bool {
        self.result.done
    }

    /// Finish successfully. Ignored when already done.
    pub fn succeed(&mut self, value: impl Into<String>) -> Transition {
        self.finish(Some(value.into()), None, Icon::Success, false)
    }

    /// Finish through user cancellation, which always halts the queue.
    pub fn cancel(&mut self) -> Transition {
        self.finish(None, Some(TaskError::Cancelled), Icon::Cancelled, true)
    }

    /// Finish with an error using the configured halt policy.
    pub fn fail(&mut self, error: TaskError, icon: Icon) -> Transition {
        let stop = self.stop_on_error;
        self.finish(None, Some(error), icon, stop)
    }

    /// Finish with a fatal error that halts the queue.
    pub fn fail_fatal(&mut self, error: TaskError) -> Transition {
        self.finish(None, Some(error), Icon::Error, true)
    }

    pub fn finish(
        &mut self,
        value: Option<String>,
        error: Option<TaskError>,
        icon: Icon,
        stop_on_error: bool,
    ) -> Transition {
        if self.result.done {
            return Transition::done();
        }
        match &error {
            Some(e) => log::info!("Task '{}' finished with error: {}", self.title, e),
            None => log::info!("Task '{}' finished", self.title),
        }
        self.result = TaskResult {
            done: true,
            icon: Some(icon),
            final_value: value,
            error,
            stop_on_error,
        };
        Transition::done()
    }

    /// Title line with the optional timer suffix.
    pub fn render_title(&self, ctx: &RenderContext<'_>, timer: &str) -> String {
        let mut line = ctx.style(&self.title, Role::Title);
        if !timer.is_empty() {
            line.push(' ');
            line.push_str(&ctx.style(&format!("{} {}", ctx.icons().timer(), timer), Role::Timer));
        }
        line
    }

    /// One-line summary shown once the task is done.
    pub fn render_summary(&self, width: u16, ctx: &RenderContext<'_>) -> String {
        use crate::locale::keys;
        use crate::render::truncate;

        let icon = self.result.icon.unwrap_or(Icon::Info);
        let (detail, role) = match (&self.result.error, &self.result.final_value) {
            (Some(TaskError::Cancelled), _) => (ctx.locale.text(keys::RESULT_CANCELLED), Role::Warning),
            (Some(error), _) => (
                ctx.locale.format(keys::RESULT_FAILED, &[error]),
                if error.is_soft() { Role::Warning } else { Role::Error },
            ),
            (None, Some(value)) if self.timed_out => {
                (ctx.locale.format(keys::RESULT_TIMEOUT_DEFAULT, &[value]), Role::Value)
            }
            (None, Some(value)) => (value.clone(), Role::Value),
            (None, None) => (String::new(), Role::Value),
        };

        let plain = if detail.is_empty() {
            format!("{} {}", ctx.renderer.icon(icon), self.title)
        } else {
            format!("{} {}: {}", ctx.renderer.icon(icon), self.title, detail)
        };
        let plain = truncate(&plain, width as usize);
        ctx.style(&plain, role)
    }
}

/// "N items above/below" marker for a scrolled list.
pub(crate) fn scroll_indicator(count: usize, above: bool, show_counters: bool, ctx: &RenderContext<'_>) -> String {
    use crate::locale::keys;

    let arrow = if above {
        ctx.icons().scroll_up()
    } else {
        ctx.icons().scroll_down()
    };
    let text = if show_counters {
        let key = if above {
            keys::VIEWPORT_ABOVE
        } else {
            keys::VIEWPORT_BELOW
        };
        format!("  {} {}", arrow, ctx.locale.format(key, &[&count]))
    } else {
        format!("  {}", arrow)
    };
    ctx.style(&text, Role::Muted)
}
