//! Countdown shared by every task.
//!
//! Arming schedules two background commands: a cancellable deadline that
//! resolves into [`Event::Timeout`](crate::event::Event::Timeout) and a
//! one-second tick that only refreshes the remaining-time display. The
//! remaining time itself is always derived from the wall clock, so a late or
//! missed tick never shows a stale value.

use crate::constants::TICK_INTERVAL;
use crate::event::{ArmId, Command};
use crate::locale::{keys, Locale};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Countdown state with a default value applied on expiry.
#[derive(Debug)]
pub struct TimeoutManager<T> {
    duration: Option<Duration>,
    default_value: Option<T>,
    started_at: Option<Instant>,
    active: bool,
    generation: u64,
    /// Single-slot cancel signal of the current arm-cycle
    cancel: Option<mpsc::Sender<()>>,
    tick_interval: Duration,
}

impl<T> Default for TimeoutManager<T> {
    fn default() -> Self {
        Self {
            duration: None,
            default_value: None,
            started_at: None,
            active: false,
            generation: 0,
            cancel: None,
            tick_interval: TICK_INTERVAL,
        }
    }
}

impl<T: Clone> TimeoutManager<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the countdown. Takes effect on the next [`start`](Self::start).
    pub fn configure(&mut self, duration: Duration, default_value: T) {
        self.duration = Some(duration);
        self.default_value = Some(default_value);
    }

    /// Override the display refresh interval.
    pub fn set_tick_interval(&mut self, interval: Duration) {
        self.tick_interval = interval;
    }

    /// Stop the countdown and forget its configuration for good.
    pub fn disable(&mut self) {
        self.stop();
        self.duration = None;
        self.default_value = None;
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.duration.is_some()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn default_value(&self) -> Option<&T> {
        self.default_value.as_ref()
    }

    /// Arm a fresh cycle. Returns the deadline and the first tick, or nothing
    /// when no countdown is configured.
    pub fn start(&mut self) -> Vec<Command> {
        let Some(duration) = self.duration else {
            return Vec::new();
        };

        // A still-running previous cycle must not fire into the new one
        self.stop();

        self.generation += 1;
        let arm = ArmId(self.generation);
        let (cancel_tx, cancel_rx) = mpsc::channel(1);
        self.cancel = Some(cancel_tx);
        self.started_at = Some(Instant::now());
        self.active = true;

        log::debug!("Timeout armed for {:?} (cycle {})", duration, arm.value());

        vec![
            Command::Deadline {
                arm,
                after: duration,
                cancel: cancel_rx,
            },
            Command::Tick {
                arm,
                after: self.tick_interval,
            },
        ]
    }

    /// Cancel the running cycle without waiting. A notification that finds the
    /// deadline already fired is dropped.
    pub fn stop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.try_send(());
        }
        if self.active {
            log::debug!("Timeout cycle {} stopped", self.generation);
        }
        self.active = false;
    }

    /// Whether `arm` names the running cycle.
    #[must_use]
    pub fn is_current(&self, arm: ArmId) -> bool {
        self.active && arm.0 == self.generation
    }

    /// Handle a tick: keep ticking while the cycle is current.
    pub fn on_tick(&mut self, arm: ArmId) -> Vec<Command> {
        if !self.is_current(arm) {
            return Vec::new();
        }
        vec![Command::Tick {
            arm,
            after: self.tick_interval,
        }]
    }

    /// Consume an expiry of the running cycle, yielding the default to apply.
    /// Stale or repeated expiries yield `None`.
    pub fn take_expired(&mut self, arm: ArmId) -> Option<T> {
        if !self.is_current(arm) {
            return None;
        }
        self.active = false;
        self.cancel = None;
        log::debug!("Timeout cycle {} expired", arm.value());
        self.default_value.clone()
    }

    /// Time left in the running cycle, zero when inactive.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        match (self.active, self.duration, self.started_at) {
            (true, Some(duration), Some(started_at)) => duration.saturating_sub(started_at.elapsed()),
            _ => Duration::ZERO,
        }
    }

    /// Remaining time as `42s` or `3m05s`, rounded up to whole seconds.
    #[must_use]
    pub fn remaining_formatted(&self) -> String {
        format_remaining(self.remaining())
    }

    /// Localized remaining-time label, empty when inactive.
    #[must_use]
    pub fn render(&self, locale: &dyn Locale) -> String {
        if !self.active {
            return String::new();
        }
        locale.format(keys::TIMER_REMAINING, &[&self.remaining_formatted()])
    }
}

/// Format a duration as whole seconds rounded up, with minutes past 60s.
#[must_use]
pub fn format_remaining(remaining: Duration) -> String {
    let millis = remaining.as_millis();
    let seconds = millis.div_ceil(1000) as u64;
    if seconds >= 60 {
        format!("{}m{:02}s", seconds / 60, seconds % 60)
    } else {
        format!("{}s", seconds)
    }
}
