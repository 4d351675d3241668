use crate::support::{deadline_arm, press};
use pretty_assertions::assert_eq;
use std::time::Duration;
use taskwizard::error::TaskError;
use taskwizard::event::Event;
use taskwizard::icons::Icon;
use taskwizard::keys::Key;
use taskwizard::render::plain_context;
use taskwizard::tasks::{Task, Verdict, YesNoTask};

#[test]
fn test_yes_shortcut() {
    let mut task = YesNoTask::new("Confirm", "Proceed?");
    press(&mut task, &[Key::Char('y')]);

    assert_eq!(task.answer(), Some(true));
    assert!(!task.has_error());
    assert_eq!(task.result().final_value.as_deref(), Some("yes"));
    assert_eq!(task.render_final(80, &plain_context()), "+ Confirm: Yes");
}

#[test]
fn test_no_is_soft_failure() {
    let mut task = YesNoTask::new("Confirm", "Proceed?");
    press(&mut task, &[Key::Down, Key::Enter]);

    assert_eq!(task.answer(), Some(false));
    assert_eq!(task.error(), Some(&TaskError::Declined));
    assert!(!task.stop_on_error());
    assert_eq!(task.result().icon, Some(Icon::Warning));
    assert_eq!(task.render_final(80, &plain_context()), "! Confirm: No");
}

#[test]
fn test_no_respects_configured_halt_policy() {
    let mut task = YesNoTask::new("Confirm", "Proceed?").with_stop_on_error(true);
    press(&mut task, &[Key::Char('n')]);

    assert!(task.has_error());
    assert!(task.stop_on_error());
}

#[test]
fn test_hooks_rewrite_verdict() {
    let mut task = YesNoTask::new("Confirm", "Proceed?").with_on_no(|_| Verdict {
        error: None,
        stop_on_error: false,
    });
    press(&mut task, &[Key::Char('N')]);
    assert!(!task.has_error());
    assert_eq!(task.result().icon, Some(Icon::Success));

    let mut task = YesNoTask::new("Confirm", "Proceed?").with_on_yes(|_| Verdict {
        error: Some(TaskError::Operation("disk full".to_string())),
        stop_on_error: true,
    });
    press(&mut task, &[Key::Enter]);
    assert_eq!(task.answer(), Some(true));
    assert!(task.stop_on_error());
    assert_eq!(task.result().icon, Some(Icon::Error));
}

#[test]
fn test_custom_labels() {
    let mut task = YesNoTask::new("Confirm", "Overwrite?").with_labels("Overwrite", "Keep");
    let text = task.render_active(80, &plain_context());
    assert!(text.contains("> (*) Overwrite"));
    assert!(text.contains("( ) Keep"));

    press(&mut task, &[Key::Down, Key::Enter]);
    assert_eq!(task.render_final(80, &plain_context()), "! Confirm: Keep");
}

#[test]
fn test_render_active() {
    let task = YesNoTask::new("Confirm", "Proceed?");
    assert_eq!(
        task.render_active(80, &plain_context()),
        "Confirm\n? Proceed?\n    > (*) Yes\n      ( ) No\ny/n or up/down, enter confirm"
    );
}

#[test]
fn test_timeout_answers_default() {
    let mut task = YesNoTask::new("Confirm", "Proceed?").with_timeout(Duration::from_secs(10), false);
    let arm = deadline_arm(&task.start());
    assert!(task.is_timeout_active());

    assert!(task.handle_event(Event::Timeout(arm)).is_done());
    assert_eq!(task.answer(), Some(false));
    assert_eq!(
        task.render_final(80, &plain_context()),
        "! Confirm: No (default after timeout)"
    );
}

#[test]
fn test_escape_cancels() {
    let mut task = YesNoTask::new("Confirm", "Proceed?").with_timeout(Duration::from_secs(10), true);
    task.start();
    press(&mut task, &[Key::Esc]);

    assert_eq!(task.answer(), None);
    assert_eq!(task.error(), Some(&TaskError::Cancelled));
    assert!(!task.is_timeout_active());
    assert_eq!(task.render_final(80, &plain_context()), "- Confirm: Cancelled");
}
