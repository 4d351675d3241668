use crate::support::press;
use pretty_assertions::assert_eq;
use taskwizard::error::TaskError;
use taskwizard::event::{Command, Event};
use taskwizard::icons::Icon;
use taskwizard::keys::Key;
use taskwizard::render::plain_context;
use taskwizard::tasks::{FuncTask, Task};

async fn run_to_completion(task: &mut FuncTask) {
    let mut commands = task.start();
    assert_eq!(commands.len(), 1);
    let command = commands.remove(0);
    assert!(matches!(command, Command::Run(_)));

    let event = command.resolve().await.unwrap();
    assert!(task.handle_event(event).is_done());
}

#[tokio::test]
async fn test_success_with_summary() {
    let mut task = FuncTask::new("Deploy", || async { Ok(Some("Created 2 files\nUpdated README".to_string())) });
    assert!(!task.is_running());

    run_to_completion(&mut task).await;
    assert!(!task.has_error());
    assert_eq!(task.summary(), Some("Created 2 files\nUpdated README"));
    assert_eq!(
        task.render_final(80, &plain_context()),
        "+ Deploy: Done\n    Created 2 files\n    Updated README"
    );
}

#[tokio::test]
async fn test_failure_halts_by_default() {
    let mut task = FuncTask::new("Deploy", || async { anyhow::bail!("connection refused") });

    run_to_completion(&mut task).await;
    assert_eq!(task.error(), Some(&TaskError::Operation("connection refused".to_string())));
    assert!(task.stop_on_error());
    assert_eq!(task.result().icon, Some(Icon::Error));
    assert_eq!(
        task.render_final(80, &plain_context()),
        "X Deploy: Failed: Operation failed: connection refused"
    );
}

#[tokio::test]
async fn test_failure_icon_follows_error_keywords() {
    let mut task =
        FuncTask::new("Fetch", || async { anyhow::bail!("request timed out after 30s") }).with_stop_on_error(false);

    run_to_completion(&mut task).await;
    assert_eq!(task.result().icon, Some(Icon::Warning));
    assert!(!task.stop_on_error());
}

#[tokio::test]
async fn test_cancel_ignores_late_outcome() {
    let mut task = FuncTask::new("Deploy", || async { Ok(None) });
    let commands = task.start();
    assert!(task.is_running());

    press(&mut task, &[Key::CtrlC]);
    assert_eq!(task.error(), Some(&TaskError::Cancelled));
    assert!(!task.is_running());

    for command in commands {
        if let Some(event) = command.resolve().await {
            task.handle_event(event);
        }
    }
    assert_eq!(task.error(), Some(&TaskError::Cancelled));
    assert_eq!(task.summary(), None);
}

#[test]
fn test_render_active() {
    let mut task = FuncTask::new("Deploy", || async { Ok(None) });
    task.start();
    assert_eq!(task.render_active(80, &plain_context()), "... Deploy Running");

    // Other keys do not interrupt the operation
    assert!(!task.handle_event(Event::Key(Key::Enter)).is_done());
}
