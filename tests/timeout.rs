use pretty_assertions::assert_eq;
use std::time::Duration;
use taskwizard::event::{Command, Event};
use taskwizard::render::ENGLISH;
use taskwizard::timeout::TimeoutManager;

fn armed(duration: Duration) -> (TimeoutManager<&'static str>, Vec<Command>) {
    let mut manager = TimeoutManager::new();
    manager.configure(duration, "fallback");
    let commands = manager.start();
    (manager, commands)
}

#[test]
fn test_start_issues_deadline_and_tick() {
    let (manager, commands) = armed(Duration::from_secs(5));

    assert_eq!(commands.len(), 2);
    assert!(commands[0].is_deadline());
    assert!(commands[1].is_tick());
    assert_eq!(commands[0].arm(), commands[1].arm());
    assert!(manager.is_active());
    assert!(manager.is_current(commands[0].arm().unwrap()));
}

#[test]
fn test_expiry_yields_default_once() {
    let (mut manager, commands) = armed(Duration::from_secs(5));
    let arm = commands[0].arm().unwrap();

    assert_eq!(manager.take_expired(arm), Some("fallback"));
    assert_eq!(manager.take_expired(arm), None);
    assert!(!manager.is_active());
    assert!(manager.on_tick(arm).is_empty());
}

#[test]
fn test_restart_makes_previous_cycle_stale() {
    let (mut manager, first) = armed(Duration::from_secs(5));
    let old = first[0].arm().unwrap();
    let second = manager.start();
    let new = second[0].arm().unwrap();

    assert_ne!(old, new);
    assert_eq!(manager.take_expired(old), None);
    assert!(manager.on_tick(old).is_empty());
    assert_eq!(manager.take_expired(new), Some("fallback"));
}

#[test]
fn test_disable_forgets_configuration() {
    let (mut manager, _) = armed(Duration::from_secs(5));
    manager.disable();

    assert!(!manager.is_configured());
    assert_eq!(manager.default_value(), None);
    assert!(manager.start().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_deadline_fires_after_duration() {
    let (_manager, mut commands) = armed(Duration::from_secs(3));
    let deadline = commands.remove(0);
    let arm = deadline.arm().unwrap();

    let start = tokio::time::Instant::now();
    assert_eq!(deadline.resolve().await, Some(Event::Timeout(arm)));
    assert_eq!(start.elapsed(), Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn test_stopped_deadline_resolves_to_nothing() {
    let (mut manager, mut commands) = armed(Duration::from_secs(3));
    let deadline = commands.remove(0);
    manager.stop();

    let start = tokio::time::Instant::now();
    assert_eq!(deadline.resolve().await, None);
    assert!(start.elapsed() < Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn test_remaining_follows_clock() {
    let (manager, _commands) = armed(Duration::from_secs(5));
    assert_eq!(manager.remaining_formatted(), "5s");

    tokio::time::advance(Duration::from_millis(2500)).await;
    assert_eq!(manager.remaining(), Duration::from_millis(2500));
    assert_eq!(manager.remaining_formatted(), "3s");
    assert_eq!(manager.render(&ENGLISH), "3s left");
}

#[tokio::test(start_paused = true)]
async fn test_tick_reissued_with_interval() {
    let mut manager = TimeoutManager::new();
    manager.configure(Duration::from_secs(10), 1u8);
    manager.set_tick_interval(Duration::from_millis(250));
    let mut commands = manager.start();
    let tick = commands.remove(1);
    let arm = tick.arm().unwrap();

    let start = tokio::time::Instant::now();
    assert_eq!(tick.resolve().await, Some(Event::Tick(arm)));
    assert_eq!(start.elapsed(), Duration::from_millis(250));

    let next = manager.on_tick(arm);
    assert_eq!(next.len(), 1);
    assert!(next[0].is_tick());
}
