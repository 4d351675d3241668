//! Free-text input with live validation.
//!
//! Every edit re-validates the text for display only. Enter re-validates and
//! commits. Typing anything printable switches the countdown off for good,
//! since a default applied after that would throw the user's text away.

use super::{Task, TaskCore, TaskId, TaskResult, Transition};
use crate::error::TaskError;
use crate::event::{Command, Event};
use crate::icons::Icon;
use crate::keys::Key;
use crate::locale::{keys, Locale};
use crate::render::{truncate, RenderContext, Role};
use crate::timeout::TimeoutManager;
use crate::validation::Validator;
use std::time::Duration;

const CARET: &str = "█";

/// Why the current text is not acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Issue {
    Required,
    Rejected(String),
}

impl Issue {
    fn to_error(&self) -> TaskError {
        match self {
            Issue::Required => TaskError::Validation("a value is required".to_string()),
            Issue::Rejected(reason) => TaskError::Validation(reason.clone()),
        }
    }
}

/// Text input task.
pub struct InputTask {
    core: TaskCore,
    prompt: String,
    text: String,
    /// Caret position in characters
    caret: usize,
    validator: Option<Box<dyn Validator>>,
    allow_empty: bool,
    mask: Option<char>,
    placeholder: Option<String>,
    issue: Option<Issue>,
    timeout: TimeoutManager<String>,
}

impl InputTask {
    pub fn new(title: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            core: TaskCore::new(title, false),
            prompt: prompt.into(),
            text: String::new(),
            caret: 0,
            validator: None,
            allow_empty: false,
            mask: None,
            placeholder: None,
            issue: None,
            timeout: TimeoutManager::new(),
        }
    }

    /// Arm a countdown that submits `default` when it expires.
    #[must_use]
    pub fn with_timeout(mut self, duration: Duration, default: impl Into<String>) -> Self {
        self.timeout.configure(duration, default.into());
        self
    }

    /// Refresh the countdown display every `interval`.
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.timeout.set_tick_interval(interval);
        self
    }

    #[must_use]
    pub fn disable_timeout(mut self) -> Self {
        self.timeout.disable();
        self
    }

    #[must_use]
    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    /// Accept an empty submission.
    #[must_use]
    pub fn with_allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    /// Render every character as `mask`, e.g. for passwords.
    #[must_use]
    pub fn with_mask(mut self, mask: char) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Text shown while the field is empty.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Pre-fill the field with the caret at the end.
    #[must_use]
    pub fn with_initial_value(mut self, value: impl Into<String>) -> Self {
        self.text = value.into();
        self.caret = self.text.chars().count();
        self
    }

    #[must_use]
    pub fn with_stop_on_error(mut self, stop: bool) -> Self {
        self.core.stop_on_error = stop;
        self
    }

    /// Current text, or the committed value once done.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Validation problem currently displayed.
    #[must_use]
    pub fn validation_error(&self) -> Option<TaskError> {
        self.issue.as_ref().map(Issue::to_error)
    }

    #[must_use]
    pub fn is_timeout_active(&self) -> bool {
        self.timeout.is_active()
    }

    #[must_use]
    pub fn timed_out(&self) -> bool {
        self.core.timed_out
    }

    #[must_use]
    pub fn render_timer(&self, locale: &dyn Locale) -> String {
        self.timeout.render(locale)
    }

    fn check(&self, text: &str) -> Result<(), Issue> {
        if text.is_empty() {
            return if self.allow_empty {
                Ok(())
            } else {
                Err(Issue::Required)
            };
        }
        match &self.validator {
            Some(validator) => validator.validate(text).map_err(Issue::Rejected),
            None => Ok(()),
        }
    }

    /// Live validation: an empty field is not flagged until submitted.
    fn revalidate(&mut self) {
        self.issue = if self.text.is_empty() {
            None
        } else {
            self.check(&self.text).err()
        };
    }

    fn byte_offset(&self, caret: usize) -> usize {
        self.text
            .char_indices()
            .nth(caret)
            .map_or(self.text.len(), |(offset, _)| offset)
    }

    fn insert(&mut self, c: char) {
        let offset = self.byte_offset(self.caret);
        self.text.insert(offset, c);
        self.caret += 1;
    }

    fn delete_before_caret(&mut self) -> bool {
        if self.caret == 0 {
            return false;
        }
        let offset = self.byte_offset(self.caret - 1);
        self.text.remove(offset);
        self.caret -= 1;
        true
    }

    fn delete_at_caret(&mut self) -> bool {
        if self.caret >= self.text.chars().count() {
            return false;
        }
        let offset = self.byte_offset(self.caret);
        self.text.remove(offset);
        true
    }

    fn submit(&mut self) -> Transition {
        match self.check(&self.text) {
            Ok(()) => {
                self.issue = None;
                self.timeout.stop();
                let shown = self.display_text();
                self.core.succeed(shown)
            }
            Err(issue) => {
                self.issue = Some(issue);
                Transition::stay()
            }
        }
    }

    fn apply_timeout_default(&mut self, default: String) -> Transition {
        match self.check(&default) {
            Ok(()) => {
                self.text = default;
                self.caret = self.text.chars().count();
                self.core.timed_out = true;
                let shown = self.display_text();
                self.core.succeed(shown)
            }
            Err(issue) => {
                let reason = match issue {
                    Issue::Required => "empty default".to_string(),
                    Issue::Rejected(reason) => reason,
                };
                self.core.fail_fatal(TaskError::TimeoutDefaultInvalid(reason))
            }
        }
    }

    fn display_text(&self) -> String {
        match self.mask {
            Some(mask) => std::iter::repeat(mask).take(self.text.chars().count()).collect(),
            None => self.text.clone(),
        }
    }

    fn handle_key(&mut self, key: Key) -> Transition {
        match key {
            Key::Enter => self.submit(),
            Key::Esc | Key::CtrlC => {
                self.timeout.stop();
                self.core.cancel()
            }
            Key::Backspace => {
                if self.delete_before_caret() {
                    self.revalidate();
                }
                Transition::stay()
            }
            Key::Delete => {
                if self.delete_at_caret() {
                    self.revalidate();
                }
                Transition::stay()
            }
            Key::Left => {
                self.caret = self.caret.saturating_sub(1);
                Transition::stay()
            }
            Key::Right => {
                self.caret = (self.caret + 1).min(self.text.chars().count());
                Transition::stay()
            }
            Key::Home => {
                self.caret = 0;
                Transition::stay()
            }
            Key::End => {
                self.caret = self.text.chars().count();
                Transition::stay()
            }
            key => {
                if let Some(c) = key.as_char() {
                    self.timeout.disable();
                    self.insert(c);
                    self.revalidate();
                }
                Transition::stay()
            }
        }
    }
}

impl Task for InputTask {
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
        self.timeout.start()
    }

    fn handle_event(&mut self, event: Event) -> Transition {
        if self.core.is_done() {
            return Transition::done();
        }

        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Tick(arm) => Transition::stay_with(self.timeout.on_tick(arm)),
            Event::Timeout(arm) => match self.timeout.take_expired(arm) {
                Some(default) => self.apply_timeout_default(default),
                None => Transition::stay(),
            },
            Event::OperationFinished(_) => Transition::stay(),
        }
    }

    fn render_active(&self, width: u16, ctx: &RenderContext<'_>) -> String {
        let width = width as usize;
        let mut lines = vec![self.core.render_title(ctx, &self.timeout.render(ctx.locale))];

        let shown = self.display_text();
        let caret_offset = shown
            .char_indices()
            .nth(self.caret)
            .map_or(shown.len(), |(offset, _)| offset);
        let field = if shown.is_empty() {
            match &self.placeholder {
                Some(placeholder) => format!("{}{}", CARET, ctx.style(placeholder, Role::Muted)),
                None => CARET.to_string(),
            }
        } else {
            format!(
                "{}{}{}",
                ctx.style(&shown[..caret_offset], Role::Value),
                CARET,
                ctx.style(&shown[caret_offset..], Role::Value)
            )
        };
        lines.push(format!("{} {}", ctx.style(&self.prompt, Role::Title), field));

        if let Some(issue) = &self.issue {
            let message = match issue {
                Issue::Required => ctx.locale.text(keys::INPUT_REQUIRED),
                Issue::Rejected(reason) => reason.clone(),
            };
            let text = format!("{} {}", ctx.renderer.icon(Icon::Error), message);
            lines.push(ctx.style(&truncate(&text, width), Role::Error));

            if let Some(validator) = &self.validator {
                let expected = ctx.locale.format(keys::INPUT_EXPECTED, &[&validator.description()]);
                lines.push(ctx.style(&truncate(&expected, width), Role::Hint));
            }
        }

        lines.push(ctx.style(&truncate(&ctx.locale.text(keys::HINT_INPUT), width), Role::Hint));
        lines.join("\n")
    }

    fn render_final(&self, width: u16, ctx: &RenderContext<'_>) -> String {
        self.core.render_summary(width, ctx)
    }

    fn result(&self) -> &TaskResult {
        &self.core.result
    }
}
