//! Checkbox list with select-all, dependency rules and a scrolling window.
//!
//! Membership lives in a [`SelectionSet`]; every read and write goes through
//! [`MultiSelectTask::is_selected_raw`] and
//! [`MultiSelectTask::set_selected_state`]. After any change that can affect
//! rules the task re-resolves dependencies, re-anchors the cursor and moves the
//! viewport, in that order.

pub mod dependency;

pub use dependency::{pass_budget, DependencyRule, Resolution, RuleAction};

use self::dependency::RuleSet;
use super::{scroll_indicator, Item, ItemRef, Task, TaskCore, TaskId, TaskResult, Transition};
use crate::constants::DETAIL_INDENT;
use crate::error::TaskError;
use crate::event::{Command, Event};
use crate::keys::Key;
use crate::locale::keys;
use crate::render::{truncate, wrap_indented, RenderContext, Role};
use crate::selection::SelectionSet;
use crate::timeout::TimeoutManager;
use crate::viewport::{logical_slot, Viewport};
use std::collections::BTreeSet;
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

/// Cursor position within a multi-selection list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// On the pseudo "select all" entry
    SelectAll,
    Item(usize),
    /// Nothing can be focused
    Unavailable,
}

impl Cursor {
    /// Signed form: `-1` for the pseudo entry, `None` when unavailable.
    #[must_use]
    pub fn as_signed(&self) -> Option<isize> {
        match self {
            Cursor::SelectAll => Some(-1),
            Cursor::Item(index) => Some(*index as isize),
            Cursor::Unavailable => None,
        }
    }
}

/// Multi-selection task.
pub struct MultiSelectTask {
    core: TaskCore,
    items: Vec<Item>,
    selection: SelectionSet,
    cursor: Cursor,
    static_disabled: BTreeSet<usize>,
    dynamic_disabled: BTreeSet<usize>,
    disabled: BTreeSet<usize>,
    rules: RuleSet,
    last_resolution: Resolution,
    select_all: bool,
    select_all_label: Option<String>,
    viewport: Viewport,
    require_selection: bool,
    selection_warning: bool,
    timeout: TimeoutManager<Vec<ItemRef>>,
}

impl MultiSelectTask {
    pub fn new(title: impl Into<String>, items: Vec<Item>) -> Self {
        let cursor = if items.is_empty() {
            Cursor::Unavailable
        } else {
            Cursor::Item(0)
        };
        let mut task = Self {
            core: TaskCore::new(title, false),
            selection: SelectionSet::with_capacity(items.len()),
            items,
            cursor,
            static_disabled: BTreeSet::new(),
            dynamic_disabled: BTreeSet::new(),
            disabled: BTreeSet::new(),
            rules: RuleSet::default(),
            last_resolution: Resolution::Converged { passes: 0 },
            select_all: false,
            select_all_label: None,
            viewport: Viewport::unbounded(),
            require_selection: false,
            selection_warning: false,
            timeout: TimeoutManager::new(),
        };
        task.refresh();
        task
    }

    /// Arm a countdown that commits `defaults` when it expires.
    #[must_use]
    pub fn with_timeout<I, R>(mut self, duration: Duration, defaults: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<ItemRef>,
    {
        self.timeout
            .configure(duration, defaults.into_iter().map(Into::into).collect());
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

    /// Show at most `size` rows at once; `0` shows every row.
    #[must_use]
    pub fn with_viewport(mut self, size: usize, show_counters: bool) -> Self {
        self.viewport = Viewport::new(size, show_counters);
        self.refresh();
        self
    }

    /// Add the pseudo "select all" entry with the localized label and focus it.
    #[must_use]
    pub fn with_select_all(mut self) -> Self {
        self.select_all = true;
        self.cursor = Cursor::SelectAll;
        self.refresh();
        self
    }

    /// Add the pseudo "select all" entry with a custom label and focus it.
    #[must_use]
    pub fn with_select_all_label(mut self, label: impl Into<String>) -> Self {
        self.select_all_label = Some(label.into());
        self.with_select_all()
    }

    /// Permanently disable items by index or key. Unknown references are ignored.
    #[must_use]
    pub fn with_items_disabled<I, R>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<ItemRef>,
    {
        for target in targets.into_iter().map(Into::into) {
            match target.resolve(&self.items) {
                Some(index) => {
                    self.static_disabled.insert(index);
                }
                None => log::debug!("Ignoring disabled item {:?}: no such item", target),
            }
        }
        self.refresh();
        self
    }

    #[must_use]
    pub fn with_dependencies(mut self, rules: Vec<DependencyRule>) -> Self {
        self.rules = RuleSet::resolve(&rules, &self.items);
        self.refresh();
        self
    }

    /// Pre-select items. Disabled or unknown items stay unselected.
    #[must_use]
    pub fn with_default_items<I, R>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<ItemRef>,
    {
        for target in targets.into_iter().map(Into::into) {
            match target.resolve(&self.items) {
                Some(index) => {
                    self.set_selected_state(index, true);
                }
                None => log::debug!("Ignoring default item {:?}: no such item", target),
            }
        }
        self.refresh();
        self
    }

    /// Refuse to commit an empty selection.
    #[must_use]
    pub fn with_require_selection(mut self, require: bool) -> Self {
        self.require_selection = require;
        self
    }

    /// Halt policy for soft failures.
    #[must_use]
    pub fn with_stop_on_error(mut self, stop: bool) -> Self {
        self.core.stop_on_error = stop;
        self
    }

    // Accessors

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn has_select_all(&self) -> bool {
        self.select_all
    }

    #[must_use]
    pub fn is_selected(&self, index: usize) -> bool {
        self.is_selected_raw(index)
    }

    #[must_use]
    pub fn is_disabled(&self, index: usize) -> bool {
        self.disabled.contains(&index)
    }

    /// Effective disabled set: static and rule-driven entries.
    #[must_use]
    pub fn disabled_indices(&self) -> Vec<usize> {
        self.disabled.iter().copied().collect()
    }

    /// Items disabled by dependency rules only.
    #[must_use]
    pub fn dynamically_disabled(&self) -> Vec<usize> {
        self.dynamic_disabled.iter().copied().collect()
    }

    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selection.count()
    }

    /// Selected indices in list order.
    #[must_use]
    pub fn selected_indices(&self) -> Vec<usize> {
        (0..self.items.len()).filter(|index| self.is_selected_raw(*index)).collect()
    }

    /// Keys of the selected items in list order.
    #[must_use]
    pub fn selected_keys(&self) -> Vec<String> {
        self.selected_indices()
            .into_iter()
            .map(|index| self.items[index].key.clone())
            .collect()
    }

    /// Outcome of the most recent dependency resolution.
    #[must_use]
    pub fn last_resolution(&self) -> Resolution {
        self.last_resolution
    }

    #[must_use]
    pub fn is_timeout_active(&self) -> bool {
        self.timeout.is_active()
    }

    /// Whether the result was produced by the countdown.
    #[must_use]
    pub fn timed_out(&self) -> bool {
        self.core.timed_out
    }

    #[must_use]
    pub fn render_timer(&self, locale: &dyn crate::locale::Locale) -> String {
        self.timeout.render(locale)
    }

    // Selection funnel

    /// Membership of `index`, independent of the backing in use.
    #[must_use]
    pub fn is_selected_raw(&self, index: usize) -> bool {
        self.selection.is_set(index)
    }

    /// Set membership of `index`. Returns whether anything changed.
    pub fn set_selected_state(&mut self, index: usize, active: bool) -> bool {
        if index >= self.items.len() {
            return false;
        }
        if active {
            self.selection.set(index)
        } else {
            self.selection.clear(index)
        }
    }

    // Dependency resolution

    /// Re-run dependency rules, then re-anchor the cursor and the viewport.
    fn refresh(&mut self) {
        let (dynamic, resolution) = dependency::resolve(&self.rules, &mut self.selection, self.items.len());
        self.dynamic_disabled = dynamic;
        self.last_resolution = resolution;
        self.disabled = self.static_disabled.union(&self.dynamic_disabled).copied().collect();

        let disabled: Vec<usize> = self.disabled.iter().copied().collect();
        for index in disabled {
            self.set_selected_state(index, false);
        }

        self.reanchor_cursor();
        self.update_viewport();
    }

    fn is_enabled(&self, index: usize) -> bool {
        index < self.items.len() && !self.disabled.contains(&index)
    }

    fn enabled_indices(&self) -> Vec<usize> {
        (0..self.items.len()).filter(|index| self.is_enabled(*index)).collect()
    }

    fn next_enabled_after(&self, index: usize) -> Option<usize> {
        (index + 1..self.items.len()).find(|candidate| self.is_enabled(*candidate))
    }

    fn previous_enabled_before(&self, index: usize) -> Option<usize> {
        (0..index.min(self.items.len())).rev().find(|candidate| self.is_enabled(*candidate))
    }

    fn first_enabled(&self) -> Option<usize> {
        (0..self.items.len()).find(|candidate| self.is_enabled(*candidate))
    }

    fn last_enabled(&self) -> Option<usize> {
        (0..self.items.len()).rev().find(|candidate| self.is_enabled(*candidate))
    }

    fn fallback_cursor(&self) -> Cursor {
        if self.select_all {
            Cursor::SelectAll
        } else {
            Cursor::Unavailable
        }
    }

    fn reanchor_cursor(&mut self) {
        self.cursor = match self.cursor {
            Cursor::SelectAll if self.select_all => Cursor::SelectAll,
            Cursor::Item(index) if self.is_enabled(index) => Cursor::Item(index),
            Cursor::Item(index) => self
                .next_enabled_after(index)
                .or_else(|| self.previous_enabled_before(index))
                .map(Cursor::Item)
                .unwrap_or_else(|| self.fallback_cursor()),
            Cursor::SelectAll | Cursor::Unavailable => self
                .first_enabled()
                .map(Cursor::Item)
                .unwrap_or_else(|| self.fallback_cursor()),
        };
    }

    fn total_slots(&self) -> usize {
        self.items.len() + usize::from(self.select_all)
    }

    fn cursor_slot(&self) -> Option<usize> {
        match self.cursor {
            Cursor::SelectAll => Some(0),
            Cursor::Item(index) => Some(logical_slot(Some(index), self.select_all)),
            Cursor::Unavailable => None,
        }
    }

    fn update_viewport(&mut self) {
        let total = self.total_slots();
        let slot = self.cursor_slot();
        self.viewport.follow(slot, total);
    }

    // Navigation

    fn move_down(&mut self) {
        self.cursor = match self.cursor {
            Cursor::SelectAll => self.first_enabled().map_or(Cursor::SelectAll, Cursor::Item),
            Cursor::Item(index) => match self.next_enabled_after(index) {
                Some(next) => Cursor::Item(next),
                None if self.select_all => Cursor::SelectAll,
                None => self.first_enabled().map_or(Cursor::Unavailable, Cursor::Item),
            },
            Cursor::Unavailable => Cursor::Unavailable,
        };
        self.update_viewport();
    }

    fn move_up(&mut self) {
        self.cursor = match self.cursor {
            Cursor::SelectAll => self.last_enabled().map_or(Cursor::SelectAll, Cursor::Item),
            Cursor::Item(index) => match self.previous_enabled_before(index) {
                Some(previous) => Cursor::Item(previous),
                None if self.select_all => Cursor::SelectAll,
                None => self.last_enabled().map_or(Cursor::Unavailable, Cursor::Item),
            },
            Cursor::Unavailable => Cursor::Unavailable,
        };
        self.update_viewport();
    }

    // Selection changes

    fn toggle_current(&mut self) {
        match self.cursor {
            Cursor::SelectAll => self.toggle_all(),
            Cursor::Item(index) if self.is_enabled(index) => {
                let active = !self.is_selected_raw(index);
                self.set_selected_state(index, active);
                self.refresh();
            }
            Cursor::Item(_) | Cursor::Unavailable => {}
        }
    }

    /// Select every enabled item, or clear everything when all are selected.
    pub fn toggle_all(&mut self) {
        let enabled = self.enabled_indices();
        let all_selected = !enabled.is_empty() && enabled.iter().all(|index| self.is_selected_raw(*index));

        if all_selected {
            for index in 0..self.items.len() {
                self.set_selected_state(index, false);
            }
        } else {
            for index in enabled {
                self.set_selected_state(index, true);
            }
        }
        self.refresh();
    }

    fn all_enabled_selected(&self) -> bool {
        let enabled = self.enabled_indices();
        !enabled.is_empty() && enabled.iter().all(|index| self.is_selected_raw(*index))
    }

    // Completion

    fn commit(&mut self) -> Transition {
        if self.require_selection && self.selection.is_empty() {
            self.selection_warning = true;
            return Transition::stay();
        }
        self.timeout.stop();
        let names: Vec<&str> = self
            .selected_indices()
            .into_iter()
            .map(|index| self.items[index].name.as_str())
            .collect();
        let value = names.join(", ");
        self.core.succeed(value)
    }

    fn apply_timeout_default(&mut self, defaults: Vec<ItemRef>) -> Transition {
        self.core.timed_out = true;
        self.selection.clear_all();
        // Disabled items depend on the selection that was just cleared
        self.refresh();
        for target in &defaults {
            match target.resolve(&self.items) {
                Some(index) if self.is_enabled(index) => {
                    self.set_selected_state(index, true);
                }
                Some(index) => log::debug!("Timeout default item {} is disabled", index),
                None => log::debug!("Ignoring timeout default {:?}: no such item", target),
            }
        }
        self.refresh();

        if self.require_selection && self.selection.is_empty() {
            return self
                .core
                .fail_fatal(TaskError::TimeoutDefaultInvalid("no selectable default items".to_string()));
        }
        self.commit()
    }

    fn handle_key(&mut self, key: Key) -> Transition {
        if key != Key::Enter {
            self.selection_warning = false;
        }

        match key {
            Key::Up => {
                // Navigation counts as user activity and stops the countdown
                self.timeout.stop();
                self.move_up();
                Transition::stay()
            }
            Key::Down => {
                self.timeout.stop();
                self.move_down();
                Transition::stay()
            }
            Key::Space | Key::Right => {
                self.timeout.stop();
                self.toggle_current();
                Transition::stay()
            }
            Key::Enter => self.commit(),
            Key::Left | Key::Esc | Key::CtrlC => self.cancel(),
            key if key.is_quit() => self.cancel(),
            _ => Transition::stay(),
        }
    }

    fn cancel(&mut self) -> Transition {
        self.timeout.stop();
        self.core.cancel()
    }

    // Rendering helpers

    fn render_row(&self, slot: usize, width: usize, ctx: &RenderContext<'_>) -> Vec<String> {
        let icons = ctx.icons();
        let pointer = icons.pointer();
        let blank = " ".repeat(pointer.width());

        if self.select_all && slot == 0 {
            let focused = self.cursor == Cursor::SelectAll;
            let label = self
                .select_all_label
                .clone()
                .unwrap_or_else(|| ctx.locale.text(keys::SELECT_ALL));
            let text = format!(
                "{} {} {}",
                if focused { pointer } else { blank.as_str() },
                icons.checkbox(self.all_enabled_selected()),
                label
            );
            let role = if focused { Role::Cursor } else { Role::Value };
            return vec![ctx.style(&truncate(&text, width), role)];
        }

        let index = slot - usize::from(self.select_all);
        let item = &self.items[index];
        let focused = self.cursor == Cursor::Item(index);
        let disabled = self.is_disabled(index);
        let selected = self.is_selected_raw(index);

        let mark = if disabled {
            icons.disabled()
        } else {
            icons.checkbox(selected)
        };
        let text = format!(
            "{} {} {}",
            if focused { pointer } else { blank.as_str() },
            mark,
            item.name
        );
        let role = match (focused, disabled, selected) {
            (_, true, _) => Role::Disabled,
            (true, false, _) => Role::Cursor,
            (false, false, true) => Role::Selected,
            (false, false, false) => Role::Value,
        };

        let mut lines = vec![ctx.style(&truncate(&text, width), role)];
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

impl Task for MultiSelectTask {
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
                Some(defaults) => self.apply_timeout_default(defaults),
                None => Transition::stay(),
            },
            Event::OperationFinished(_) => Transition::stay(),
        }
    }

    fn render_active(&self, width: u16, ctx: &RenderContext<'_>) -> String {
        let width = width as usize;
        let mut lines = vec![self.core.render_title(ctx, &self.timeout.render(ctx.locale))];

        if self.selection_warning {
            lines.push(ctx.style(
                &format!(
                    "{} {}",
                    ctx.icons().result(crate::icons::Icon::Warning),
                    ctx.locale.text(keys::REQUIRE_SELECTION)
                ),
                Role::Warning,
            ));
        }

        let total = self.total_slots();
        let above = self.viewport.hidden_above(total);
        if above > 0 {
            lines.push(scroll_indicator(above, true, self.viewport.show_counters(), ctx));
        }
        for slot in self.viewport.visible_range(total) {
            lines.extend(self.render_row(slot, width, ctx));
        }
        let below = self.viewport.hidden_below(total);
        if below > 0 {
            lines.push(scroll_indicator(below, false, self.viewport.show_counters(), ctx));
        }

        lines.push(ctx.style(&truncate(&ctx.locale.text(keys::HINT_MULTI), width), Role::Hint));
        lines.join("\n")
    }

    fn render_final(&self, width: u16, ctx: &RenderContext<'_>) -> String {
        if self.core.result.error.is_none() && self.selection.is_empty() {
            let mut summary = self.core.clone();
            summary.result.final_value = Some(ctx.locale.text(keys::NONE));
            return summary.render_summary(width, ctx);
        }
        self.core.render_summary(width, ctx)
    }

    fn result(&self) -> &TaskResult {
        &self.core.result
    }
}
