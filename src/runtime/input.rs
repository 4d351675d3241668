//! Key sources feeding the driver.

use crate::constants::INPUT_POLL_INTERVAL;
use crate::keys::Key;
use async_trait::async_trait;
use crossterm::event::{poll, read, Event as TermEvent};
use crossterm::terminal;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;

/// Something the driver reacts to besides scheduler events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    /// Terminal resized to this many columns
    Resize(u16),
}

#[async_trait]
pub trait EventSource: Send {
    /// Wait for the next input. Sources that run dry stay pending forever so
    /// countdowns can still fire.
    async fn next_event(&mut self) -> anyhow::Result<InputEvent>;
}

/// Raw mode for as long as the guard lives.
pub struct RawModeGuard;

impl RawModeGuard {
    pub fn enable() -> anyhow::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            log::error!("Failed to leave raw mode: {}", e);
        }
    }
}

/// Keys read from the real terminal.
pub struct TerminalInput {
    poll_interval: Duration,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self {
            poll_interval: INPUT_POLL_INTERVAL,
        }
    }

    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

impl Default for TerminalInput {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventSource for TerminalInput {
    async fn next_event(&mut self) -> anyhow::Result<InputEvent> {
        loop {
            // Check for terminal events without blocking the runtime
            if poll(Duration::from_millis(0))? {
                match read()? {
                    TermEvent::Key(event) => {
                        if let Some(key) = Key::from_key_event(event) {
                            return Ok(InputEvent::Key(key));
                        }
                    }
                    TermEvent::Resize(width, _) => return Ok(InputEvent::Resize(width)),
                    _ => {}
                }
                continue;
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

/// Pre-recorded keys, for tests and non-interactive runs.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    keys: VecDeque<Key>,
    delay: Option<Duration>,
    /// When the next key becomes due; survives a dropped `next_event` future
    due: Option<Instant>,
}

impl ScriptedInput {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            delay: None,
            due: None,
        }
    }

    /// Parse key names such as `"down"`, `"space"` or `"a"`.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> anyhow::Result<Self> {
        let keys = names
            .into_iter()
            .map(|name| name.parse::<Key>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(keys))
    }

    /// Wait this long before delivering each key.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

#[async_trait]
impl EventSource for ScriptedInput {
    async fn next_event(&mut self) -> anyhow::Result<InputEvent> {
        if self.keys.is_empty() {
            std::future::pending::<()>().await;
        }
        if let Some(delay) = self.delay {
            let due = *self.due.get_or_insert_with(|| Instant::now() + delay);
            tokio::time::sleep_until(due).await;
            self.due = None;
        }
        match self.keys.pop_front() {
            Some(key) => Ok(InputEvent::Key(key)),
            None => std::future::pending().await,
        }
    }
}
