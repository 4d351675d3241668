use crate::support::{deadline_arm, items, press, Lcg};
use pretty_assertions::assert_eq;
use std::time::Duration;
use taskwizard::error::TaskError;
use taskwizard::event::Event;
use taskwizard::keys::Key;
use taskwizard::render::plain_context;
use taskwizard::tasks::multi_select::{pass_budget, Cursor, Resolution};
use taskwizard::tasks::{DependencyRule, Item, MultiSelectTask, RuleAction, Task};

#[test]
fn test_down_space_enter_selects_second_item() {
    let mut task = MultiSelectTask::new("Pick", items(&["A", "B", "C"]));

    press(&mut task, &[Key::Down, Key::Space, Key::Enter]);

    assert!(task.is_done());
    assert!(!task.has_error());
    assert_eq!(task.selected_keys(), vec!["B".to_string()]);
    assert_eq!(task.result().final_value.as_deref(), Some("B"));
}

#[test]
fn test_select_all_entry_toggles_every_item() {
    let mut task = MultiSelectTask::new("Pick", items(&["A", "B", "C", "D"])).with_select_all();
    assert_eq!(task.cursor(), Cursor::SelectAll);

    press(&mut task, &[Key::Space]);
    assert_eq!(task.selected_count(), 4);

    press(&mut task, &[Key::Space]);
    assert_eq!(task.selected_count(), 0);
}

#[test]
fn test_toggle_all_twice_restores_empty_and_full_selection() {
    let mut task = MultiSelectTask::new("Pick", items(&["A", "B", "C"]));
    task.toggle_all();
    task.toggle_all();
    assert!(task.selected_indices().is_empty());

    let mut task = MultiSelectTask::new("Pick", items(&["A", "B", "C"])).with_default_items(["A", "B", "C"]);
    task.toggle_all();
    task.toggle_all();
    assert_eq!(task.selected_indices(), vec![0, 1, 2]);
}

#[test]
fn test_selecting_item_disables_dependent_item() {
    let rules = vec![DependencyRule::new("A").on_select(RuleAction::new().disable(["B"]))];
    let mut task = MultiSelectTask::new("Pick", items(&["A", "B", "C"]))
        .with_default_items(["B"])
        .with_dependencies(rules);
    assert!(task.is_selected(1));

    // Select A: B loses its selection and becomes unreachable
    press(&mut task, &[Key::Space]);
    assert!(task.is_selected(0));
    assert!(!task.is_selected(1));
    assert!(task.is_disabled(1));

    press(&mut task, &[Key::Down]);
    assert_eq!(task.cursor(), Cursor::Item(2));
    press(&mut task, &[Key::Up]);
    assert_eq!(task.cursor(), Cursor::Item(0));

    // Deselect A: B is reachable again but stays unselected
    press(&mut task, &[Key::Space]);
    assert!(!task.is_disabled(1));
    assert!(!task.is_selected(1));
    press(&mut task, &[Key::Down]);
    assert_eq!(task.cursor(), Cursor::Item(1));
}

#[test]
fn test_force_select_cascades_through_rules() {
    let rules = vec![
        DependencyRule::new("tui").on_select(RuleAction::new().force_select(["cli"])),
        DependencyRule::new("cli").on_select(RuleAction::new().force_select(["core"])),
    ];
    let task = MultiSelectTask::new("Features", items(&["core", "cli", "tui"]))
        .with_dependencies(rules)
        .with_default_items(["tui"]);

    assert_eq!(task.selected_keys(), vec!["core", "cli", "tui"]);
    assert!(task.last_resolution().converged());
}

#[test]
fn test_dependency_resolution_is_stable() {
    let rules = vec![
        DependencyRule::new(0usize).on_select(RuleAction::new().force_select([2usize]).disable([3usize])),
        DependencyRule::new(2usize).on_deselect(RuleAction::new().force_clear([4usize])),
        DependencyRule::new(4usize).on_select(RuleAction::new().disable([1usize])),
    ];
    let task = MultiSelectTask::new("Pick", items(&["a", "b", "c", "d", "e"]))
        .with_default_items([0usize, 3, 4])
        .with_dependencies(rules.clone());
    let selected = task.selected_indices();
    let disabled = task.disabled_indices();

    // Resolving the same rules again must not move anything
    let task = task.with_dependencies(rules);
    assert_eq!(task.selected_indices(), selected);
    assert_eq!(task.disabled_indices(), disabled);
    assert_eq!(selected, vec![0, 2, 4]);
    assert_eq!(disabled, vec![1, 3]);
}

#[test]
fn test_oscillating_rules_exhaust_pass_budget() {
    let rules = vec![DependencyRule::new("A")
        .on_select(RuleAction::new().force_clear(["A"]))
        .on_deselect(RuleAction::new().force_select(["A"]))];
    let task = MultiSelectTask::new("Pick", items(&["A"])).with_dependencies(rules);

    assert_eq!(
        task.last_resolution(),
        Resolution::Exhausted {
            passes: pass_budget(1)
        }
    );
    assert!(!task.is_done());
}

#[test]
fn test_unknown_rule_keys_are_ignored() {
    let rules = vec![
        DependencyRule::new("missing").on_select(RuleAction::new().disable(["A"])),
        DependencyRule::new("A").on_select(RuleAction::new().disable(["nope", "B"])),
    ];
    let task = MultiSelectTask::new("Pick", items(&["A", "B"]))
        .with_items_disabled(["ghost"])
        .with_default_items(["A", "phantom"])
        .with_dependencies(rules);

    assert_eq!(task.selected_keys(), vec!["A"]);
    assert_eq!(task.disabled_indices(), vec![1]);
}

#[test]
fn test_cursor_never_rests_on_disabled_item() {
    for select_all in [false, true] {
        let mut task = MultiSelectTask::new("Pick", items(&["a", "b", "c", "d", "e", "f", "g", "h"]))
            .with_items_disabled([0usize, 3, 7]);
        if select_all {
            task = task.with_select_all();
        }

        let mut rng = Lcg(7);
        for _ in 0..200 {
            let key = if rng.next(2) == 0 { Key::Up } else { Key::Down };
            press(&mut task, &[key]);
            match task.cursor() {
                Cursor::SelectAll => assert!(select_all),
                Cursor::Item(index) => {
                    assert!(index < 8);
                    assert!(!task.is_disabled(index), "cursor on disabled item {}", index);
                }
                Cursor::Unavailable => panic!("cursor lost"),
            }
        }
    }
}

#[test]
fn test_cursor_unavailable_when_everything_disabled() {
    let task = MultiSelectTask::new("Pick", items(&["a", "b"])).with_items_disabled([0usize, 1]);
    assert_eq!(task.cursor(), Cursor::Unavailable);
    assert_eq!(task.cursor().as_signed(), None);

    let task = MultiSelectTask::new("Pick", items(&["a", "b"]))
        .with_items_disabled([0usize, 1])
        .with_select_all();
    assert_eq!(task.cursor().as_signed(), Some(-1));
}

#[test]
fn test_viewport_keeps_cursor_visible() {
    let names: Vec<String> = (0..20).map(|i| format!("item{}", i)).collect();
    let list: Vec<Item> = names.iter().map(|name| Item::simple(name.as_str())).collect();
    let mut task = MultiSelectTask::new("Pick", list).with_select_all().with_viewport(5, true);

    let mut rng = Lcg(42);
    for _ in 0..300 {
        let key = if rng.next(3) == 0 { Key::Up } else { Key::Down };
        press(&mut task, &[key]);

        let viewport = task.viewport();
        let slot = match task.cursor() {
            Cursor::SelectAll => 0,
            Cursor::Item(index) => index + 1,
            Cursor::Unavailable => panic!("cursor lost"),
        };
        assert!(viewport.start() <= slot && slot < viewport.start() + viewport.size());
        assert_eq!(viewport.visible_range(21).len(), 5);
    }
}

#[test]
fn test_render_scrolled_list() {
    let ctx = plain_context();
    let mut task = MultiSelectTask::new("Pick", items(&["A", "B", "C", "D", "E", "F"])).with_viewport(3, true);

    assert_eq!(
        task.render_active(80, &ctx),
        "Pick\n> [ ] A\n  [ ] B\n  [ ] C\n  v 3 item(s) below\nup/down move, space toggle, enter confirm, esc cancel"
    );

    press(&mut task, &[Key::Down, Key::Down, Key::Down, Key::Space]);
    let text = task.render_active(80, &ctx);
    assert!(text.contains("  ^ 1 item(s) above"));
    assert!(text.contains("> [X] D"));
    assert!(text.contains("  v 2 item(s) below"));
}

#[test]
fn test_render_final_lists_names_or_none() {
    let ctx = plain_context();

    let mut task = MultiSelectTask::new("Pick", vec![Item::new("a", "Alpha"), Item::new("b", "Beta")]);
    press(&mut task, &[Key::Space, Key::Down, Key::Space, Key::Enter]);
    assert_eq!(task.render_final(80, &ctx), "+ Pick: Alpha, Beta");

    let mut task = MultiSelectTask::new("Pick", items(&["A"]));
    press(&mut task, &[Key::Enter]);
    assert_eq!(task.render_final(80, &ctx), "+ Pick: (none)");
}

#[test]
fn test_require_selection_blocks_empty_commit() {
    let ctx = plain_context();
    let mut task = MultiSelectTask::new("Pick", items(&["A", "B"])).with_require_selection(true);

    let transition = press(&mut task, &[Key::Enter]).unwrap();
    assert!(!transition.is_done());
    assert!(task.render_active(80, &ctx).contains("Select at least one item"));

    press(&mut task, &[Key::Space, Key::Enter]);
    assert!(task.is_done());
    assert_eq!(task.selected_keys(), vec!["A"]);
}

#[test]
fn test_escape_cancels_and_halts() {
    let mut task = MultiSelectTask::new("Pick", items(&["A"]));
    press(&mut task, &[Key::Esc]);

    assert!(task.is_done());
    assert_eq!(task.error(), Some(&TaskError::Cancelled));
    assert!(task.stop_on_error());
}

#[test]
fn test_timeout_applies_default_exactly_once() {
    let ctx = plain_context();
    let mut task = MultiSelectTask::new("Pick", items(&["A", "B", "C"])).with_timeout(Duration::from_secs(5), ["B"]);

    let commands = task.start();
    assert_eq!(commands.len(), 2);
    let arm = deadline_arm(&commands);

    assert!(task.handle_event(Event::Timeout(arm)).is_done());
    assert!(task.timed_out());
    assert_eq!(task.selected_keys(), vec!["B"]);
    let result = task.result().clone();

    assert!(task.handle_event(Event::Timeout(arm)).is_done());
    assert_eq!(task.result(), &result);
    assert_eq!(task.render_final(80, &ctx), "+ Pick: B (default after timeout)");
}

#[test]
fn test_navigation_stops_countdown() {
    let mut task = MultiSelectTask::new("Pick", items(&["A", "B"])).with_timeout(Duration::from_secs(5), ["A"]);
    let arm = deadline_arm(&task.start());
    assert!(task.is_timeout_active());

    press(&mut task, &[Key::Down]);
    assert!(!task.is_timeout_active());
    assert!(!task.handle_event(Event::Timeout(arm)).is_done());
    assert!(task.handle_event(Event::Tick(arm)).commands.is_empty());
}

#[test]
fn test_ticks_are_reissued_while_active() {
    let mut task = MultiSelectTask::new("Pick", items(&["A"])).with_timeout(Duration::from_secs(5), ["A"]);
    let arm = deadline_arm(&task.start());

    let transition = task.handle_event(Event::Tick(arm));
    assert_eq!(transition.commands.len(), 1);
    assert!(transition.commands[0].is_tick());
}

#[test]
fn test_timeout_default_must_be_selectable() {
    let mut task = MultiSelectTask::new("Pick", items(&["A", "B"]))
        .with_items_disabled(["B"])
        .with_require_selection(true)
        .with_timeout(Duration::from_secs(1), ["B"]);
    let arm = deadline_arm(&task.start());

    task.handle_event(Event::Timeout(arm));
    assert!(task.is_done());
    assert!(matches!(task.error(), Some(TaskError::TimeoutDefaultInvalid(_))));
    assert!(task.stop_on_error());
}

#[test]
fn test_timeout_default_enabled_once_selection_is_cleared() {
    let rules = vec![DependencyRule::new("A").on_select(RuleAction::new().disable(["B"]))];
    let mut task = MultiSelectTask::new("Pick", items(&["A", "B"]))
        .with_dependencies(rules)
        .with_default_items(["A"])
        .with_timeout(Duration::from_secs(1), ["B"]);
    assert!(task.is_disabled(1));
    let arm = deadline_arm(&task.start());

    assert!(task.handle_event(Event::Timeout(arm)).is_done());
    assert!(!task.has_error());
    assert!(task.timed_out());
    assert_eq!(task.selected_keys(), vec!["B"]);
    assert!(task.dynamically_disabled().is_empty());
    assert_eq!(task.render_final(80, &plain_context()), "+ Pick: B (default after timeout)");
}

#[test]
fn test_timeout_default_disabled_by_another_default() {
    let rules = vec![DependencyRule::new("A").on_select(RuleAction::new().disable(["B"]))];
    let mut task = MultiSelectTask::new("Pick", items(&["A", "B", "C"]))
        .with_dependencies(rules)
        .with_default_items(["C"])
        .with_timeout(Duration::from_secs(1), ["A", "B"]);
    let arm = deadline_arm(&task.start());

    assert!(task.handle_event(Event::Timeout(arm)).is_done());
    assert!(!task.has_error());
    assert_eq!(task.selected_keys(), vec!["A"]);
    assert_eq!(task.dynamically_disabled(), vec![1]);
    assert_eq!(task.render_final(80, &plain_context()), "+ Pick: A (default after timeout)");
}

#[test]
fn test_long_list_uses_ordinal_backing() {
    let names: Vec<String> = (0..40).map(|i| format!("k{}", i)).collect();
    let list: Vec<Item> = names.iter().map(|name| Item::simple(name.as_str())).collect();
    let mut task = MultiSelectTask::new("Pick", list).with_default_items([33usize, 39]);

    assert_eq!(task.selected_indices(), vec![33, 39]);
    task.toggle_all();
    assert_eq!(task.selected_count(), 40);
    task.toggle_all();
    assert_eq!(task.selected_count(), 0);
}

#[test]
fn test_events_after_done_are_ignored() {
    let mut task = MultiSelectTask::new("Pick", items(&["A", "B"]));
    press(&mut task, &[Key::Space, Key::Enter]);
    let result = task.result().clone();

    press(&mut task, &[Key::Down, Key::Space, Key::Enter]);
    assert_eq!(task.result(), &result);
    assert_eq!(task.selected_keys(), vec!["A"]);
}
