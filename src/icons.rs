//! Icon service for managing different icon themes
//!
//! This module provides a centralized way to look up the glyphs tasks render,
//! supporting different themes like emoji, Unicode, and ASCII fallbacks.

use serde::{Deserialize, Serialize};

/// Icon theme variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IconTheme {
    /// Emoji icons (colorful, modern look)
    Emoji,
    /// Unicode symbols (clean, native look)
    Unicode,
    /// ASCII characters (maximum compatibility)
    #[default]
    Ascii,
}

/// Outcome icon attached to a finished task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Info,
    Cancelled,
}

/// Result icons
#[derive(Debug, Clone)]
pub struct ResultIcons {
    pub success: &'static str,
    pub error: &'static str,
    pub warning: &'static str,
    pub info: &'static str,
    pub cancelled: &'static str,
}

/// List row markers
#[derive(Debug, Clone)]
pub struct ListIcons {
    pub pointer: &'static str,
    pub checked: &'static str,
    pub unchecked: &'static str,
    pub disabled: &'static str,
    pub radio_on: &'static str,
    pub radio_off: &'static str,
}

/// Status and navigation icons
#[derive(Debug, Clone)]
pub struct StatusIcons {
    pub scroll_up: &'static str,
    pub scroll_down: &'static str,
    pub timer: &'static str,
    pub running: &'static str,
    pub question: &'static str,
}

/// Complete icon set for a specific theme
#[derive(Debug, Clone)]
pub struct IconSet {
    pub result: ResultIcons,
    pub list: ListIcons,
    pub status: StatusIcons,
}

/// Icon service for managing themes and providing icons
#[derive(Debug, Clone, Default)]
pub struct IconService {
    current_theme: IconTheme,
}

impl IconService {
    /// Create a new icon service with the specified theme
    #[must_use]
    pub fn new(theme: IconTheme) -> Self {
        Self { current_theme: theme }
    }

    /// ASCII service usable in constant contexts
    #[must_use]
    pub const fn ascii() -> Self {
        Self {
            current_theme: IconTheme::Ascii,
        }
    }

    /// Get the current theme
    #[must_use]
    pub fn theme(&self) -> IconTheme {
        self.current_theme
    }

    /// Get the complete icon set for the current theme
    #[must_use]
    pub fn icons(&self) -> IconSet {
        match self.current_theme {
            IconTheme::Emoji => Self::emoji_icons(),
            IconTheme::Unicode => Self::unicode_icons(),
            IconTheme::Ascii => Self::ascii_icons(),
        }
    }

    fn emoji_icons() -> IconSet {
        IconSet {
            result: ResultIcons {
                success: "✅",
                error: "❌",
                warning: "⚠️",
                info: "💡",
                cancelled: "🚫",
            },
            list: ListIcons {
                pointer: "👉",
                checked: "✅",
                unchecked: "🔳",
                disabled: "⛔",
                radio_on: "🔘",
                radio_off: "⚪",
            },
            status: StatusIcons {
                scroll_up: "🔼",
                scroll_down: "🔽",
                timer: "⏱️",
                running: "🔄",
                question: "❓",
            },
        }
    }

    fn unicode_icons() -> IconSet {
        IconSet {
            result: ResultIcons {
                success: "✓",
                error: "✗",
                warning: "⚠",
                info: "ⓘ",
                cancelled: "⊘",
            },
            list: ListIcons {
                pointer: "❯",
                checked: "◉",
                unchecked: "○",
                disabled: "⊝",
                radio_on: "●",
                radio_off: "○",
            },
            status: StatusIcons {
                scroll_up: "↑",
                scroll_down: "↓",
                timer: "⧖",
                running: "⟳",
                question: "?",
            },
        }
    }

    fn ascii_icons() -> IconSet {
        IconSet {
            result: ResultIcons {
                success: "+",
                error: "X",
                warning: "!",
                info: "i",
                cancelled: "-",
            },
            list: ListIcons {
                pointer: ">",
                checked: "[X]",
                unchecked: "[ ]",
                disabled: "[-]",
                radio_on: "(*)",
                radio_off: "( )",
            },
            status: StatusIcons {
                scroll_up: "^",
                scroll_down: "v",
                timer: "T",
                running: "...",
                question: "?",
            },
        }
    }

    /// Glyph for a task outcome
    #[must_use]
    pub fn result(&self, icon: Icon) -> &'static str {
        let icons = self.icons().result;
        match icon {
            Icon::Success => icons.success,
            Icon::Error => icons.error,
            Icon::Warning => icons.warning,
            Icon::Info => icons.info,
            Icon::Cancelled => icons.cancelled,
        }
    }

    #[must_use]
    pub fn pointer(&self) -> &'static str {
        self.icons().list.pointer
    }

    #[must_use]
    pub fn checkbox(&self, checked: bool) -> &'static str {
        let list = self.icons().list;
        if checked {
            list.checked
        } else {
            list.unchecked
        }
    }

    #[must_use]
    pub fn disabled(&self) -> &'static str {
        self.icons().list.disabled
    }

    #[must_use]
    pub fn radio(&self, on: bool) -> &'static str {
        let list = self.icons().list;
        if on {
            list.radio_on
        } else {
            list.radio_off
        }
    }

    #[must_use]
    pub fn scroll_up(&self) -> &'static str {
        self.icons().status.scroll_up
    }

    #[must_use]
    pub fn scroll_down(&self) -> &'static str {
        self.icons().status.scroll_down
    }

    #[must_use]
    pub fn timer(&self) -> &'static str {
        self.icons().status.timer
    }

    #[must_use]
    pub fn running(&self) -> &'static str {
        self.icons().status.running
    }

    #[must_use]
    pub fn question(&self) -> &'static str {
        self.icons().status.question
    }
}
