//! Pick exactly one item from a list.

use super::{scroll_indicator, Item, ItemRef, Task, TaskCore, TaskId, TaskResult, Transition};
use crate::constants::DETAIL_INDENT;
use crate::error::TaskError;
use crate::event::{Command, Event};
use crate::keys::Key;
use crate::locale::{keys, Locale};
use crate::render::{truncate, wrap_indented, RenderContext, Role};
use crate::timeout::TimeoutManager;
use crate::viewport::Viewport;
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

/// What a processed event asks the owner to do.
#[derive(Debug)]
pub(crate) enum Step {
    Continue(Vec<Command>),
    /// Commit the item at this index
    Commit { index: usize, timed_out: bool },
    Cancel,
    /// Countdown default could not be applied
    InvalidDefault(String),
}

/// Single-selection task with clamped navigation.
pub struct SingleSelectTask {
    pub(crate) core: TaskCore,
    items: Vec<Item>,
    cursor: usize,
    viewport: Viewport,
    timeout: TimeoutManager<ItemRef>,
    committed: Option<usize>,
}

impl SingleSelectTask {
    pub fn new(title: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            core: TaskCore::new(title, false),
            items,
            cursor: 0,
            viewport: Viewport::unbounded(),
            timeout: TimeoutManager::new(),
            committed: None,
        }
    }

    /// Arm a countdown that commits `default` when it expires.
    #[must_use]
    pub fn with_timeout(mut self, duration: Duration, default: impl Into<ItemRef>) -> Self {
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

    /// Start with the cursor on `target`. Unknown references are ignored.
    #[must_use]
    pub fn with_default_item(mut self, target: impl Into<ItemRef>) -> Self {
        let target = target.into();
        match target.resolve(&self.items) {
            Some(index) => self.cursor = index,
            None => log::debug!("Ignoring default item {:?}: no such item", target),
        }
        self.viewport.follow(Some(self.cursor), self.items.len());
        self
    }

    #[must_use]
    pub fn with_viewport(mut self, size: usize, show_counters: bool) -> Self {
        self.viewport = Viewport::new(size, show_counters);
        self.viewport.follow(Some(self.cursor), self.items.len());
        self
    }

    #[must_use]
    pub fn with_stop_on_error(mut self, stop: bool) -> Self {
        self.core.stop_on_error = stop;
        self
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Index under the cursor, or the committed index once done.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        if self.core.is_done() {
            return self.committed;
        }
        (!self.items.is_empty()).then_some(self.cursor)
    }

    #[must_use]
    pub fn selected_item(&self) -> Option<&Item> {
        self.selected_index().and_then(|index| self.items.get(index))
    }

    /// Key of the committed item.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.committed.map(|index| self.items[index].key.as_str())
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
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

    pub(crate) fn start_timeout(&mut self) -> Vec<Command> {
        if self.core.is_done() {
            return Vec::new();
        }
        self.timeout.start()
    }

    pub(crate) fn move_to(&mut self, index: usize) {
        if index < self.items.len() {
            self.cursor = index;
            self.viewport.follow(Some(self.cursor), self.items.len());
        }
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    /// Stop the countdown and remember the committed index.
    pub(crate) fn mark_committed(&mut self, index: usize, timed_out: bool) {
        self.timeout.stop();
        self.committed = Some(index);
        self.core.timed_out = timed_out;
    }

    pub(crate) fn stop_timeout(&mut self) {
        self.timeout.stop();
    }

    /// Navigation and countdown handling shared with wrappers.
    pub(crate) fn process(&mut self, event: Event) -> Step {
        match event {
            Event::Key(key) => match key {
                Key::Up => {
                    self.timeout.stop();
                    self.move_to(self.cursor.saturating_sub(1));
                    Step::Continue(Vec::new())
                }
                Key::Down => {
                    self.timeout.stop();
                    self.move_to(self.cursor + 1);
                    Step::Continue(Vec::new())
                }
                Key::Enter | Key::Right if !self.items.is_empty() => Step::Commit {
                    index: self.cursor,
                    timed_out: false,
                },
                Key::Left | Key::Esc | Key::CtrlC => Step::Cancel,
                key if key.is_quit() => Step::Cancel,
                _ => Step::Continue(Vec::new()),
            },
            Event::Tick(arm) => Step::Continue(self.timeout.on_tick(arm)),
            Event::Timeout(arm) => match self.timeout.take_expired(arm) {
                Some(default) => match default.resolve(&self.items) {
                    Some(index) => {
                        self.move_to(index);
                        Step::Commit { index, timed_out: true }
                    }
                    None => Step::InvalidDefault(format!("unknown item {:?}", default)),
                },
                None => Step::Continue(Vec::new()),
            },
            Event::OperationFinished(_) => Step::Continue(Vec::new()),
        }
    }

    fn render_row(&self, index: usize, width: usize, ctx: &RenderContext<'_>) -> Vec<String> {
        let icons = ctx.icons();
        let pointer = icons.pointer();
        let blank = " ".repeat(pointer.width());
        let item = &self.items[index];
        let focused = index == self.cursor;

        let text = format!(
            "{} {} {}",
            if focused { pointer } else { blank.as_str() },
            icons.radio(focused),
            item.name
        );
        let mut lines = vec![ctx.style(
            &truncate(&text, width),
            if focused { Role::Cursor } else { Role::Value },
        )];

        if focused {
            if let Some(description) = &item.description {
                lines.extend(
                    wrap_indented(description, width, DETAIL_INDENT)
                        .into_iter()
                        .map(|line| ctx.style(&line, Role::Description)),
                );
            }
        }
        lines
    }
}

impl Task for SingleSelectTask {
    fn id(&self) -> TaskId {
        self.core.id
    }

    fn title(&self) -> &str {
        &self.core.title
    }

    fn start(&mut self) -> Vec<Command> {
        self.start_timeout()
    }

    fn handle_event(&mut self, event: Event) -> Transition {
        if self.core.is_done() {
            return Transition::done();
        }

        match self.process(event) {
            Step::Continue(commands) => Transition::stay_with(commands),
            Step::Commit { index, timed_out } => {
                self.mark_committed(index, timed_out);
                let name = self.items[index].name.clone();
                self.core.succeed(name)
            }
            Step::Cancel => {
                self.timeout.stop();
                self.core.cancel()
            }
            Step::InvalidDefault(reason) => self.core.fail_fatal(TaskError::TimeoutDefaultInvalid(reason)),
        }
    }

    fn render_active(&self, width: u16, ctx: &RenderContext<'_>) -> String {
        let width = width as usize;
        let mut lines = vec![self.core.render_title(ctx, &self.timeout.render(ctx.locale))];

        let total = self.items.len();
        let above = self.viewport.hidden_above(total);
        if above > 0 {
            lines.push(scroll_indicator(above, true, self.viewport.show_counters(), ctx));
        }
        for index in self.viewport.visible_range(total) {
            lines.extend(self.render_row(index, width, ctx));
        }
        let below = self.viewport.hidden_below(total);
        if below > 0 {
            lines.push(scroll_indicator(below, false, self.viewport.show_counters(), ctx));
        }

        lines.push(ctx.style(&truncate(&ctx.locale.text(keys::HINT_SINGLE), width), Role::Hint));
        lines.join("\n")
    }

    fn render_final(&self, width: u16, ctx: &RenderContext<'_>) -> String {
        self.core.render_summary(width, ctx)
    }

    fn result(&self) -> &TaskResult {
        &self.core.result
    }
}
