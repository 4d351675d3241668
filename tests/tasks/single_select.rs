use crate::support::{deadline_arm, items, press};
use pretty_assertions::assert_eq;
use std::time::Duration;
use taskwizard::error::TaskError;
use taskwizard::event::Event;
use taskwizard::keys::Key;
use taskwizard::render::plain_context;
use taskwizard::tasks::{Item, SingleSelectTask, Task};

#[test]
fn test_navigation_is_clamped() {
    let mut task = SingleSelectTask::new("Color", items(&["red", "green", "blue"]));

    press(&mut task, &[Key::Up]);
    assert_eq!(task.selected_index(), Some(0));

    press(&mut task, &[Key::Down, Key::Down, Key::Down, Key::Down]);
    assert_eq!(task.selected_index(), Some(2));
}

#[test]
fn test_enter_commits_focused_item() {
    let mut task = SingleSelectTask::new(
        "Color",
        vec![Item::new("r", "Red"), Item::new("g", "Green"), Item::new("b", "Blue")],
    );

    press(&mut task, &[Key::Down, Key::Enter]);
    assert!(task.is_done());
    assert_eq!(task.value(), Some("g"));
    assert_eq!(task.selected_item().map(|item| item.name.as_str()), Some("Green"));
    assert_eq!(task.result().final_value.as_deref(), Some("Green"));
}

#[test]
fn test_default_item_positions_cursor() {
    let task = SingleSelectTask::new("Color", items(&["red", "green", "blue"])).with_default_item("blue");
    assert_eq!(task.selected_index(), Some(2));

    let task = SingleSelectTask::new("Color", items(&["red", "green"])).with_default_item("purple");
    assert_eq!(task.selected_index(), Some(0));
}

#[test]
fn test_empty_list_ignores_enter() {
    let mut task = SingleSelectTask::new("Color", Vec::new());
    assert_eq!(task.selected_index(), None);

    press(&mut task, &[Key::Enter]);
    assert!(!task.is_done());
}

#[test]
fn test_quit_shortcut_cancels() {
    let mut task = SingleSelectTask::new("Color", items(&["red"]));
    press(&mut task, &[Key::Char('q')]);

    assert_eq!(task.error(), Some(&TaskError::Cancelled));
    assert!(task.stop_on_error());
}

#[test]
fn test_timeout_commits_default() {
    let mut task = SingleSelectTask::new("Color", items(&["red", "green", "blue"]))
        .with_timeout(Duration::from_secs(3), "green");
    let arm = deadline_arm(&task.start());

    assert!(task.handle_event(Event::Timeout(arm)).is_done());
    assert!(task.timed_out());
    assert_eq!(task.value(), Some("green"));
    assert_eq!(task.render_final(80, &plain_context()), "+ Color: green (default after timeout)");
}

#[test]
fn test_unknown_timeout_default_is_fatal() {
    let mut task = SingleSelectTask::new("Color", items(&["red"])).with_timeout(Duration::from_secs(3), 5usize);
    let arm = deadline_arm(&task.start());

    task.handle_event(Event::Timeout(arm));
    assert!(matches!(task.error(), Some(TaskError::TimeoutDefaultInvalid(_))));
    assert!(task.stop_on_error());
}

#[test]
fn test_render_scrolled_list() {
    let ctx = plain_context();
    let names: Vec<String> = (1..=6).map(|i| format!("option {}", i)).collect();
    let list: Vec<Item> = names.iter().map(|name| Item::simple(name.as_str())).collect();
    let mut task = SingleSelectTask::new("Choose", list).with_viewport(2, false);

    press(&mut task, &[Key::Down, Key::Down]);
    assert_eq!(
        task.render_active(80, &ctx),
        "Choose\n  ^\n  ( ) option 2\n> (*) option 3\n  v\nup/down move, enter select, esc cancel"
    );
}

#[test]
fn test_focused_description_is_wrapped() {
    let ctx = plain_context();
    let task = SingleSelectTask::new(
        "Mode",
        vec![Item::new("fast", "Fast").with_description("Skips every optional verification step")],
    );

    let text = task.render_active(24, &ctx);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[1], "> (*) Fast");
    assert!(lines[2].starts_with("    Skips"));
    assert!(lines.iter().all(|line| line.chars().count() <= 24));
}
