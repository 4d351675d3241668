//! Cascading enable/disable rules between list items.
//!
//! Rules are applied repeatedly until a full pass changes nothing. The pass
//! budget of `4 × N + 10` only guards against rule sets that never settle;
//! [`Resolution`] tells the two outcomes apart.

use crate::constants::{DEPENDENCY_PASSES_PER_ITEM, DEPENDENCY_PASS_SLACK};
use crate::selection::SelectionSet;
use crate::tasks::{Item, ItemRef};
use std::collections::{BTreeMap, BTreeSet};

/// Effects applied to other items when a rule fires.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleAction {
    pub disable: Vec<ItemRef>,
    pub enable: Vec<ItemRef>,
    pub force_select: Vec<ItemRef>,
    pub force_clear: Vec<ItemRef>,
}

impl RuleAction {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn disable<I, R>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<ItemRef>,
    {
        self.disable.extend(targets.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn enable<I, R>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<ItemRef>,
    {
        self.enable.extend(targets.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn force_select<I, R>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<ItemRef>,
    {
        self.force_select.extend(targets.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn force_clear<I, R>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<ItemRef>,
    {
        self.force_clear.extend(targets.into_iter().map(Into::into));
        self
    }
}

/// Actions fired depending on whether the rule's item is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRule {
    pub item: ItemRef,
    pub on_select: RuleAction,
    pub on_deselect: RuleAction,
}

impl DependencyRule {
    pub fn new(item: impl Into<ItemRef>) -> Self {
        Self {
            item: item.into(),
            on_select: RuleAction::default(),
            on_deselect: RuleAction::default(),
        }
    }

    #[must_use]
    pub fn on_select(mut self, action: RuleAction) -> Self {
        self.on_select = action;
        self
    }

    #[must_use]
    pub fn on_deselect(mut self, action: RuleAction) -> Self {
        self.on_deselect = action;
        self
    }
}

/// [`RuleAction`] with every target resolved to an index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ResolvedAction {
    pub disable: Vec<usize>,
    pub enable: Vec<usize>,
    pub force_select: Vec<usize>,
    pub force_clear: Vec<usize>,
}

impl ResolvedAction {
    fn resolve(action: &RuleAction, items: &[Item]) -> Self {
        let targets = |refs: &[ItemRef]| -> Vec<usize> {
            refs.iter()
                .filter_map(|target| {
                    let index = target.resolve(items);
                    if index.is_none() {
                        log::debug!("Ignoring dependency target {:?}: no such item", target);
                    }
                    index
                })
                .collect()
        };

        Self {
            disable: targets(&action.disable),
            enable: targets(&action.enable),
            force_select: targets(&action.force_select),
            force_clear: targets(&action.force_clear),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ResolvedRule {
    pub on_select: ResolvedAction,
    pub on_deselect: ResolvedAction,
}

/// Rules keyed by the index of the item that triggers them.
#[derive(Debug, Clone, Default)]
pub(crate) struct RuleSet {
    rules: BTreeMap<usize, ResolvedRule>,
}

impl RuleSet {
    /// Resolve rules against `items`. Rules naming unknown items are dropped.
    /// A later rule for the same item replaces an earlier one.
    pub fn resolve(rules: &[DependencyRule], items: &[Item]) -> Self {
        let mut resolved = BTreeMap::new();
        for rule in rules {
            let Some(index) = rule.item.resolve(items) else {
                log::debug!("Ignoring dependency rule for {:?}: no such item", rule.item);
                continue;
            };
            resolved.insert(
                index,
                ResolvedRule {
                    on_select: ResolvedAction::resolve(&rule.on_select, items),
                    on_deselect: ResolvedAction::resolve(&rule.on_deselect, items),
                },
            );
        }
        Self { rules: resolved }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// How the fixed-point iteration ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// A full pass made no change
    Converged { passes: usize },
    /// The pass budget ran out while rules still changed state
    Exhausted { passes: usize },
}

impl Resolution {
    #[must_use]
    pub fn converged(&self) -> bool {
        matches!(self, Resolution::Converged { .. })
    }
}

/// Maximum number of passes for a list of `item_count` items.
#[must_use]
pub fn pass_budget(item_count: usize) -> usize {
    DEPENDENCY_PASSES_PER_ITEM * item_count + DEPENDENCY_PASS_SLACK
}

/// Drive `rules` to a fixed point, returning the dynamically disabled items.
///
/// `selection` is updated in place: disabled targets and forced targets
/// change membership. The caller still has to intersect the result with the
/// static disabled set.
pub(crate) fn resolve(
    rules: &RuleSet,
    selection: &mut SelectionSet,
    item_count: usize,
) -> (BTreeSet<usize>, Resolution) {
    let mut dynamic_disabled = BTreeSet::new();
    if rules.is_empty() {
        return (dynamic_disabled, Resolution::Converged { passes: 0 });
    }

    let budget = pass_budget(item_count);
    for pass in 1..=budget {
        let mut changed = false;

        for (key, rule) in &rules.rules {
            let action = if selection.is_set(*key) {
                &rule.on_select
            } else {
                &rule.on_deselect
            };

            for &target in &action.disable {
                changed |= dynamic_disabled.insert(target);
                changed |= selection.clear(target);
            }
            for &target in &action.enable {
                changed |= dynamic_disabled.remove(&target);
            }
            for &target in &action.force_select {
                changed |= selection.set(target);
            }
            for &target in &action.force_clear {
                changed |= selection.clear(target);
            }
        }

        if !changed {
            return (dynamic_disabled, Resolution::Converged { passes: pass });
        }
    }

    log::warn!(
        "Dependency rules did not settle within {} passes; keeping last state",
        budget
    );
    (dynamic_disabled, Resolution::Exhausted { passes: budget })
}
