use crate::support::{deadline_arm, press, type_text};
use pretty_assertions::assert_eq;
use std::time::Duration;
use taskwizard::error::TaskError;
use taskwizard::event::Event;
use taskwizard::keys::Key;
use taskwizard::render::plain_context;
use taskwizard::tasks::{InputTask, Task};
use taskwizard::validation::{FnValidator, LengthRange, NotEmpty};

#[test]
fn test_empty_enter_stays_active_then_accepts_value() {
    let mut task = InputTask::new("Name", "Name:").with_validator(NotEmpty);

    let transition = press(&mut task, &[Key::Enter]).unwrap();
    assert!(!transition.is_done());
    assert!(!task.is_done());
    assert!(matches!(task.validation_error(), Some(TaskError::Validation(_))));

    type_text(&mut task, "x");
    let transition = press(&mut task, &[Key::Enter]).unwrap();
    assert!(transition.is_done());
    assert_eq!(task.value(), "x");
    assert_eq!(task.result().final_value.as_deref(), Some("x"));
    assert!(!task.has_error());
}

#[test]
fn test_live_validation_follows_edits() {
    let mut task = InputTask::new("Code", "Code:").with_validator(LengthRange { min: 3, max: Some(4) });

    type_text(&mut task, "ab");
    assert!(task.validation_error().is_some());
    type_text(&mut task, "c");
    assert_eq!(task.validation_error(), None);
    type_text(&mut task, "de");
    assert!(task.validation_error().is_some());
    press(&mut task, &[Key::Backspace]);
    assert_eq!(task.validation_error(), None);
    assert_eq!(task.value(), "abcd");
}

#[test]
fn test_caret_editing() {
    let mut task = InputTask::new("Word", "Word:");
    type_text(&mut task, "héllo");

    press(&mut task, &[Key::Home, Key::Delete]);
    assert_eq!(task.value(), "éllo");
    press(&mut task, &[Key::Right, Key::Backspace]);
    assert_eq!(task.value(), "llo");
    type_text(&mut task, "a");
    assert_eq!(task.value(), "allo");
    press(&mut task, &[Key::End]);
    assert_eq!(task.caret(), 4);
    press(&mut task, &[Key::Left, Key::Left, Key::Space]);
    assert_eq!(task.value(), "al lo");
}

#[test]
fn test_q_is_text_not_quit() {
    let mut task = InputTask::new("Word", "Word:");
    type_text(&mut task, "q");

    assert!(!task.is_done());
    assert_eq!(task.value(), "q");
}

#[test]
fn test_allow_empty() {
    let mut task = InputTask::new("Comment", "Comment:").with_allow_empty(true);
    press(&mut task, &[Key::Enter]);

    assert!(task.is_done());
    assert_eq!(task.value(), "");
}

#[test]
fn test_typing_disables_countdown_for_good() {
    let mut task = InputTask::new("Name", "Name:").with_timeout(Duration::from_secs(5), "guest");
    let arm = deadline_arm(&task.start());

    type_text(&mut task, "b");
    assert!(!task.is_timeout_active());
    assert!(!task.handle_event(Event::Timeout(arm)).is_done());

    // Restarting does not re-arm a disabled countdown
    assert!(task.start().is_empty());
}

#[test]
fn test_navigation_keeps_countdown() {
    let mut task = InputTask::new("Name", "Name:").with_timeout(Duration::from_secs(5), "guest");
    let arm = deadline_arm(&task.start());

    press(&mut task, &[Key::Left, Key::Home]);
    assert!(task.is_timeout_active());

    assert!(task.handle_event(Event::Timeout(arm)).is_done());
    assert_eq!(task.value(), "guest");
    assert!(task.timed_out());
    assert_eq!(task.render_final(80, &plain_context()), "+ Name: guest (default after timeout)");
}

#[test]
fn test_invalid_timeout_default_is_fatal() {
    let digits = FnValidator::new("digits only", |text: &str| {
        if text.chars().all(|c| c.is_ascii_digit()) {
            Ok(())
        } else {
            Err("only digits are allowed".to_string())
        }
    });
    let mut task = InputTask::new("PIN", "PIN:")
        .with_validator(digits)
        .with_timeout(Duration::from_secs(5), "abc");
    let arm = deadline_arm(&task.start());

    task.handle_event(Event::Timeout(arm));
    assert_eq!(
        task.error(),
        Some(&TaskError::TimeoutDefaultInvalid("only digits are allowed".to_string()))
    );
    assert!(task.stop_on_error());
}

#[test]
fn test_render_with_error_and_expectation() {
    let ctx = plain_context();
    let mut task = InputTask::new("Code", "Code:").with_validator(LengthRange { min: 3, max: None });
    type_text(&mut task, "ab");

    assert_eq!(
        task.render_active(80, &ctx),
        "Code\nCode: ab█\nX must be at least 3 characters\nExpected: at least 3 characters\nenter submit, esc cancel"
    );
}

#[test]
fn test_mask_hides_text() {
    let ctx = plain_context();
    let mut task = InputTask::new("Password", "Password:").with_mask('*');
    type_text(&mut task, "secret");

    assert!(task.render_active(80, &ctx).contains("Password: ******█"));
    press(&mut task, &[Key::Enter]);
    assert_eq!(task.value(), "secret");
    assert_eq!(task.render_final(80, &ctx), "+ Password: ******");
}

#[test]
fn test_escape_cancels() {
    let mut task = InputTask::new("Name", "Name:").with_initial_value("draft");
    press(&mut task, &[Key::Esc]);

    assert_eq!(task.error(), Some(&TaskError::Cancelled));
    assert!(task.stop_on_error());
    assert_eq!(task.render_final(80, &plain_context()), "- Name: Cancelled");
}
