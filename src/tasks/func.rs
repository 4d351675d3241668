//! Task running a background operation.
//!
//! The operation is handed to the driver as a [`Command::Run`] from
//! [`Task::start`]; the task only ever sees its outcome as an
//! [`Event::OperationFinished`]. Cancelling first makes the late outcome a
//! no-op.

use super::{Task, TaskCore, TaskId, TaskResult, Transition};
use crate::constants::DETAIL_INDENT;
use crate::error::TaskError;
use crate::event::{Command, Event, OperationFuture, OperationOutcome};
use crate::icons::Icon;
use crate::locale::{classify_error, keys, ErrorClass, Language};
use crate::render::{truncate, wrap_indented, RenderContext, Role};
use std::future::Future;

type Operation = Box<dyn FnOnce() -> OperationFuture + Send>;

/// Runs a zero-argument async operation and reports its summary.
pub struct FuncTask {
    core: TaskCore,
    operation: Option<Operation>,
    running: bool,
    /// Language used to classify error messages
    language: Language,
    summary: Option<String>,
}

impl FuncTask {
    /// `f` is called once, when the task starts.
    pub fn new<F, Fut>(title: impl Into<String>, f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<Option<String>>> + Send + 'static,
    {
        Self {
            core: TaskCore::new(title, true),
            operation: Some(Box::new(move || Box::pin(f()) as OperationFuture)),
            running: false,
            language: Language::default(),
            summary: None,
        }
    }

    #[must_use]
    pub fn with_stop_on_error(mut self, stop: bool) -> Self {
        self.core.stop_on_error = stop;
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// The operation has been handed out and has not resolved yet.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running && !self.core.is_done()
    }

    /// Summary returned by a successful operation.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    fn error_icon(&self, message: &str) -> Icon {
        match classify_error(message, self.language) {
            ErrorClass::Cancelled => Icon::Cancelled,
            ErrorClass::Timeout | ErrorClass::Validation => Icon::Warning,
            ErrorClass::Other => Icon::Error,
        }
    }

    fn on_finished(&mut self, outcome: OperationOutcome) -> Transition {
        self.running = false;
        match outcome {
            Ok(summary) => {
                self.summary = summary.clone();
                self.core.finish(summary, None, Icon::Success, false)
            }
            Err(message) => {
                let icon = self.error_icon(&message);
                self.core.fail(TaskError::Operation(message), icon)
            }
        }
    }
}

impl Task for FuncTask {
    fn id(&self) -> TaskId {
        self.core.id
    }

    fn title(&self) -> &str {
        &self.core.title
    }

    fn start(&mut self) -> Vec<Command> {
        if self.core.is_done() {
            return Vec::new();
        }
        match self.operation.take() {
            Some(operation) => {
                self.running = true;
                log::debug!("Starting operation for task '{}'", self.core.title);
                vec![Command::Run(operation())]
            }
            None => Vec::new(),
        }
    }

    fn handle_event(&mut self, event: Event) -> Transition {
        if self.core.is_done() {
            return Transition::done();
        }

        match event {
            Event::Key(key) if key.is_abort() => {
                self.running = false;
                self.core.cancel()
            }
            Event::OperationFinished(outcome) => self.on_finished(outcome),
            _ => Transition::stay(),
        }
    }

    fn render_active(&self, width: u16, ctx: &RenderContext<'_>) -> String {
        let text = format!(
            "{} {} {}",
            ctx.icons().running(),
            self.core.title,
            ctx.locale.text(keys::FUNC_RUNNING)
        );
        ctx.style(&truncate(&text, width as usize), Role::Title)
    }

    fn render_final(&self, width: u16, ctx: &RenderContext<'_>) -> String {
        if self.core.result.has_error() {
            return self.core.render_summary(width, ctx);
        }

        let width = width as usize;
        let icon = self.core.result.icon.unwrap_or(Icon::Success);
        let head = format!(
            "{} {}: {}",
            ctx.renderer.icon(icon),
            self.core.title,
            ctx.locale.text(keys::FUNC_DONE)
        );
        let mut lines = vec![ctx.style(&truncate(&head, width), Role::Success)];
        if let Some(summary) = &self.summary {
            for paragraph in summary.lines() {
                lines.extend(
                    wrap_indented(paragraph, width, DETAIL_INDENT)
                        .into_iter()
                        .map(|line| ctx.style(&line, Role::Value)),
                );
            }
        }
        lines.join("\n")
    }

    fn result(&self) -> &TaskResult {
        &self.core.result
    }
}
