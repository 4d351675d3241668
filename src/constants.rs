//! Constants used throughout the library
//!
//! This module centralizes key names, timing values and layout limits
//! to keep the task state machines free of magic numbers.

use std::time::Duration;

// Selection backing
/// Largest item count served by the single-word bitset backing
pub const BITSET_CAPACITY: usize = 32;

// Dependency resolution
/// Extra passes granted on top of `4 × item count` before giving up
pub const DEPENDENCY_PASS_SLACK: usize = 10;
/// Pass multiplier per item for the dependency fixed point
pub const DEPENDENCY_PASSES_PER_ITEM: usize = 4;

// Timers
/// Refresh interval for the remaining-time display
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);
/// Delay between terminal polls when no key is pending
pub const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

// Key names accepted by `Key::from_str`
pub const KEY_UP: &str = "up";
pub const KEY_DOWN: &str = "down";
pub const KEY_LEFT: &str = "left";
pub const KEY_RIGHT: &str = "right";
pub const KEY_SPACE: &str = "space";
pub const KEY_ENTER: &str = "enter";
pub const KEY_ESC: &str = "esc";
pub const KEY_CTRL_C: &str = "ctrl+c";
pub const KEY_BACKSPACE: &str = "backspace";
pub const KEY_DELETE: &str = "delete";
pub const KEY_HOME: &str = "home";
pub const KEY_END: &str = "end";
pub const KEY_TAB: &str = "tab";

// Item keys of the yes/no confirmation
pub const YES_KEY: &str = "yes";
pub const NO_KEY: &str = "no";

// Layout
/// Indentation used for item descriptions and summaries
pub const DETAIL_INDENT: &str = "    ";
/// Narrowest width a task renders into
pub const MIN_RENDER_WIDTH: u16 = 20;
/// Largest viewport accepted from configuration
pub const MAX_VIEWPORT_SIZE: usize = 100;
/// Longest countdown accepted from configuration, in seconds
pub const MAX_TIMEOUT_SECS: u64 = 3600;
/// Bounds for the configured tick interval, in milliseconds
pub const MIN_TICK_INTERVAL_MS: u64 = 50;
pub const MAX_TICK_INTERVAL_MS: u64 = 10_000;

// Files
pub const APP_DIR_NAME: &str = "taskwizard";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const LOCAL_CONFIG_FILE_NAME: &str = "taskwizard.toml";
pub const LOG_FILE_NAME: &str = "taskwizard.log";
pub const CONFIG_GENERATED: &str = "Generated default configuration file";
