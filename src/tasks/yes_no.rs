//! Yes/no confirmation built on [`SingleSelectTask`].
//!
//! Answering "no" is a soft failure: the task records
//! [`TaskError::Declined`] but keeps the configured halt policy, so a queue
//! normally continues. Hooks can rewrite the verdict for either answer.

use super::single_select::{SingleSelectTask, Step};
use super::{Item, Task, TaskId, TaskResult, Transition};
use crate::constants::{DETAIL_INDENT, NO_KEY, YES_KEY};
use crate::error::TaskError;
use crate::event::{Command, Event};
use crate::icons::Icon;
use crate::keys::Key;
use crate::locale::{keys, Locale};
use crate::render::{truncate, wrap_indented, RenderContext, Role};
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

/// Error and halt decision produced by an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub error: Option<TaskError>,
    pub stop_on_error: bool,
}

type Hook = Box<dyn FnMut(Verdict) -> Verdict + Send>;

const YES_INDEX: usize = 0;
const NO_INDEX: usize = 1;

/// Confirmation task.
pub struct YesNoTask {
    inner: SingleSelectTask,
    question: String,
    yes_label: Option<String>,
    no_label: Option<String>,
    on_yes: Option<Hook>,
    on_no: Option<Hook>,
    answer: Option<bool>,
}

impl YesNoTask {
    pub fn new(title: impl Into<String>, question: impl Into<String>) -> Self {
        let items = vec![Item::simple(YES_KEY), Item::simple(NO_KEY)];
        Self {
            inner: SingleSelectTask::new(title, items),
            question: question.into(),
            yes_label: None,
            no_label: None,
            on_yes: None,
            on_no: None,
            answer: None,
        }
    }

    /// Arm a countdown that answers `default` when it expires.
    #[must_use]
    pub fn with_timeout(mut self, duration: Duration, default: bool) -> Self {
        self.inner = self.inner.with_timeout(duration, Self::index_of(default));
        self
    }

    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.inner = self.inner.with_tick_interval(interval);
        self
    }

    #[must_use]
    pub fn disable_timeout(mut self) -> Self {
        self.inner = self.inner.disable_timeout();
        self
    }

    /// Pre-focus an answer.
    #[must_use]
    pub fn with_default(mut self, answer: bool) -> Self {
        self.inner = self.inner.with_default_item(Self::index_of(answer));
        self
    }

    /// Replace the localized "Yes"/"No" labels.
    #[must_use]
    pub fn with_labels(mut self, yes: impl Into<String>, no: impl Into<String>) -> Self {
        self.yes_label = Some(yes.into());
        self.no_label = Some(no.into());
        self
    }

    #[must_use]
    pub fn with_stop_on_error(mut self, stop: bool) -> Self {
        self.inner = self.inner.with_stop_on_error(stop);
        self
    }

    /// Rewrite the verdict of a "yes".
    #[must_use]
    pub fn with_on_yes<F>(mut self, hook: F) -> Self
    where
        F: FnMut(Verdict) -> Verdict + Send + 'static,
    {
        self.on_yes = Some(Box::new(hook));
        self
    }

    /// Rewrite the verdict of a "no".
    #[must_use]
    pub fn with_on_no<F>(mut self, hook: F) -> Self
    where
        F: FnMut(Verdict) -> Verdict + Send + 'static,
    {
        self.on_no = Some(Box::new(hook));
        self
    }

    /// The committed answer.
    #[must_use]
    pub fn answer(&self) -> Option<bool> {
        self.answer
    }

    /// Answer currently focused.
    #[must_use]
    pub fn focused(&self) -> bool {
        self.inner.cursor() == YES_INDEX
    }

    #[must_use]
    pub fn is_timeout_active(&self) -> bool {
        self.inner.is_timeout_active()
    }

    #[must_use]
    pub fn render_timer(&self, locale: &dyn Locale) -> String {
        self.inner.render_timer(locale)
    }

    fn index_of(answer: bool) -> usize {
        if answer {
            YES_INDEX
        } else {
            NO_INDEX
        }
    }

    fn label(&self, answer: bool, locale: &dyn Locale) -> String {
        let custom = if answer { &self.yes_label } else { &self.no_label };
        custom
            .clone()
            .unwrap_or_else(|| locale.text(if answer { keys::YES } else { keys::NO }))
    }

    fn conclude(&mut self, answer: bool, timed_out: bool) -> Transition {
        self.inner.mark_committed(Self::index_of(answer), timed_out);
        self.answer = Some(answer);

        let stop_on_error = self.inner.core.stop_on_error;
        let verdict = if answer {
            let verdict = Verdict {
                error: None,
                stop_on_error,
            };
            match self.on_yes.as_mut() {
                Some(hook) => hook(verdict),
                None => verdict,
            }
        } else {
            let verdict = Verdict {
                error: Some(TaskError::Declined),
                stop_on_error,
            };
            match self.on_no.as_mut() {
                Some(hook) => hook(verdict),
                None => verdict,
            }
        };

        let icon = match &verdict.error {
            None => Icon::Success,
            Some(error) if error.is_soft() => Icon::Warning,
            Some(_) => Icon::Error,
        };
        let key = if answer { YES_KEY } else { NO_KEY };
        self.inner
            .core
            .finish(Some(key.to_string()), verdict.error, icon, verdict.stop_on_error)
    }
}

impl Task for YesNoTask {
    fn id(&self) -> TaskId {
        self.inner.id()
    }

    fn title(&self) -> &str {
        self.inner.title()
    }

    fn start(&mut self) -> Vec<Command> {
        self.inner.start_timeout()
    }

    fn handle_event(&mut self, event: Event) -> Transition {
        if self.inner.core.is_done() {
            return Transition::done();
        }

        if let Event::Key(Key::Char(c)) = event {
            match c.to_ascii_lowercase() {
                'y' | 'j' => return self.conclude(true, false),
                'n' => return self.conclude(false, false),
                _ => {}
            }
        }

        match self.inner.process(event) {
            Step::Continue(commands) => Transition::stay_with(commands),
            Step::Commit { index, timed_out } => self.conclude(index == YES_INDEX, timed_out),
            Step::Cancel => {
                self.inner.stop_timeout();
                self.inner.core.cancel()
            }
            Step::InvalidDefault(reason) => self
                .inner
                .core
                .fail_fatal(TaskError::TimeoutDefaultInvalid(reason)),
        }
    }

    fn render_active(&self, width: u16, ctx: &RenderContext<'_>) -> String {
        let width = width as usize;
        let icons = ctx.icons();
        let mut lines = vec![self.inner.core.render_title(ctx, &self.inner.render_timer(ctx.locale))];

        lines.extend(
            wrap_indented(&format!("{} {}", icons.question(), self.question), width, "")
                .into_iter()
                .map(|line| ctx.style(&line, Role::Value)),
        );

        let pointer = icons.pointer();
        let blank = " ".repeat(pointer.width());
        for answer in [true, false] {
            let focused = self.focused() == answer;
            let text = format!(
                "{}{} {} {}",
                DETAIL_INDENT,
                if focused { pointer } else { blank.as_str() },
                icons.radio(focused),
                self.label(answer, ctx.locale)
            );
            lines.push(ctx.style(
                &truncate(&text, width),
                if focused { Role::Cursor } else { Role::Value },
            ));
        }

        lines.push(ctx.style(&truncate(&ctx.locale.text(keys::HINT_YES_NO), width), Role::Hint));
        lines.join("\n")
    }

    fn render_final(&self, width: u16, ctx: &RenderContext<'_>) -> String {
        let Some(answer) = self.answer else {
            return self.inner.core.render_summary(width, ctx);
        };

        let result = self.result();
        let label = self.label(answer, ctx.locale);
        let label = if self.inner.timed_out() {
            ctx.locale.format(keys::RESULT_TIMEOUT_DEFAULT, &[&label])
        } else {
            label
        };
        let icon = result.icon.unwrap_or(Icon::Info);
        let text = truncate(
            &format!("{} {}: {}", ctx.renderer.icon(icon), self.title(), label),
            width as usize,
        );
        let role = if result.has_error() {
            Role::Warning
        } else {
            Role::Success
        };
        ctx.style(&text, role)
    }

    fn result(&self) -> &TaskResult {
        self.inner.result()
    }
}
