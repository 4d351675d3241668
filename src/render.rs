//! Styling seam and text layout helpers shared by every task.
//!
//! Tasks produce plain strings tagged with a [`Role`]; the [`Renderer`]
//! decides how a role looks. Rendering is a pure function of task state,
//! width and the [`RenderContext`].

use crate::icons::{Icon, IconService};
use crate::locale::{Locale, TableLocale};
use crossterm::style::Stylize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Semantic role of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Title,
    Cursor,
    Selected,
    Disabled,
    Description,
    Value,
    Error,
    Warning,
    Success,
    Hint,
    Timer,
    Muted,
}

/// Turns plain text into styled text and supplies icons.
pub trait Renderer: Send + Sync {
    fn stylize(&self, text: &str, role: Role) -> String;

    fn icons(&self) -> &IconService;

    fn icon(&self, icon: Icon) -> &'static str {
        self.icons().result(icon)
    }
}

/// Renderer that leaves text untouched.
#[derive(Debug, Clone, Default)]
pub struct PlainRenderer {
    icons: IconService,
}

impl PlainRenderer {
    #[must_use]
    pub fn new(icons: IconService) -> Self {
        Self { icons }
    }
}

impl Renderer for PlainRenderer {
    fn stylize(&self, text: &str, _role: Role) -> String {
        text.to_string()
    }

    fn icons(&self) -> &IconService {
        &self.icons
    }
}

/// Renderer emitting ANSI escape sequences through crossterm.
#[derive(Debug, Clone, Default)]
pub struct AnsiRenderer {
    icons: IconService,
}

impl AnsiRenderer {
    #[must_use]
    pub fn new(icons: IconService) -> Self {
        Self { icons }
    }
}

impl Renderer for AnsiRenderer {
    fn stylize(&self, text: &str, role: Role) -> String {
        match role {
            Role::Title => text.bold().to_string(),
            Role::Cursor => text.cyan().bold().to_string(),
            Role::Selected => text.green().to_string(),
            Role::Disabled => text.dark_grey().to_string(),
            Role::Description => text.grey().italic().to_string(),
            Role::Value => text.cyan().to_string(),
            Role::Error => text.red().to_string(),
            Role::Warning => text.yellow().to_string(),
            Role::Success => text.green().bold().to_string(),
            Role::Hint => text.dark_grey().to_string(),
            Role::Timer => text.magenta().to_string(),
            Role::Muted => text.dark_grey().to_string(),
        }
    }

    fn icons(&self) -> &IconService {
        &self.icons
    }
}

/// Collaborators handed to every render call.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub renderer: &'a dyn Renderer,
    pub locale: &'a dyn Locale,
}

impl<'a> RenderContext<'a> {
    #[must_use]
    pub fn new(renderer: &'a dyn Renderer, locale: &'a dyn Locale) -> Self {
        Self { renderer, locale }
    }

    pub fn style(&self, text: &str, role: Role) -> String {
        self.renderer.stylize(text, role)
    }

    pub fn icons(&self) -> &IconService {
        self.renderer.icons()
    }
}

/// Plain renderer and English table locale, handy for tests and logs.
pub static PLAIN_RENDERER: PlainRenderer = PlainRenderer {
    icons: IconService::ascii(),
};
pub static ENGLISH: TableLocale = TableLocale::english();

/// Context with [`PLAIN_RENDERER`] and [`ENGLISH`].
#[must_use]
pub fn plain_context() -> RenderContext<'static> {
    RenderContext::new(&PLAIN_RENDERER, &ENGLISH)
}

/// Cut `text` to at most `width` terminal columns, marking the cut with `…`.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut output = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        output.push(c);
        used += w;
    }
    output.push('…');
    output
}

/// Wrap `text` to `width` columns, prefixing every line with `indent`.
#[must_use]
pub fn wrap_indented(text: &str, width: usize, indent: &str) -> Vec<String> {
    let available = width.saturating_sub(indent.width()).max(1);
    text.lines()
        .flat_map(|line| {
            if line.is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(line, available)
                    .into_iter()
                    .map(|part| part.into_owned())
                    .collect()
            }
        })
        .map(|line| format!("{}{}", indent, line))
        .collect()
}
