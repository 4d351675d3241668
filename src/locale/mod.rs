//! Localized labels and format strings.
//!
//! Tasks never consult global language state. A [`Locale`] value travels with
//! every render call through [`RenderContext`](crate::render::RenderContext).

pub mod keywords;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;

pub use keywords::{classify_error, keywords_for, ErrorClass, KeywordSet};

/// Lookup keys shared by the built-in tasks.
pub mod keys {
    pub const SELECT_ALL: &str = "select_all";
    pub const YES: &str = "yes";
    pub const NO: &str = "no";
    pub const NONE: &str = "none";
    pub const VIEWPORT_ABOVE: &str = "viewport.above";
    pub const VIEWPORT_BELOW: &str = "viewport.below";
    pub const TIMER_REMAINING: &str = "timer.remaining";
    pub const HINT_MULTI: &str = "hint.multi";
    pub const HINT_SINGLE: &str = "hint.single";
    pub const HINT_YES_NO: &str = "hint.yes_no";
    pub const HINT_INPUT: &str = "hint.input";
    pub const REQUIRE_SELECTION: &str = "multi.require_selection";
    pub const INPUT_REQUIRED: &str = "input.required";
    pub const INPUT_EXPECTED: &str = "input.expected";
    pub const RESULT_CANCELLED: &str = "result.cancelled";
    pub const RESULT_TIMEOUT_DEFAULT: &str = "result.timeout_default";
    pub const RESULT_FAILED: &str = "result.failed";
    pub const FUNC_RUNNING: &str = "func.running";
    pub const FUNC_DONE: &str = "func.done";
    pub const KEYWORDS_CANCELLED: &str = "keywords.cancelled";
    pub const KEYWORDS_TIMEOUT: &str = "keywords.timeout";
    pub const KEYWORDS_VALIDATION: &str = "keywords.validation";
}

/// Languages with a built-in string table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    De,
}

impl Language {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::De => "de",
        }
    }

    fn table_source(&self) -> &'static str {
        match self {
            Language::En => include_str!("tables/en.json"),
            Language::De => include_str!("tables/de.json"),
        }
    }
}

/// Source of labels and format strings by key.
pub trait Locale: Send + Sync {
    fn language(&self) -> Language;

    /// Raw template for `key`, or `None` when no table knows it.
    fn template(&self, key: &str) -> Option<String>;

    /// Label for `key`, falling back to the key itself.
    fn text(&self, key: &str) -> String {
        self.template(key).unwrap_or_else(|| key.to_string())
    }

    /// Substitute `args` into the `{}` placeholders of `key`'s template, in order.
    fn format(&self, key: &str, args: &[&dyn Display]) -> String {
        fill_placeholders(&self.text(key), args)
    }
}

/// Replace each `{}` in `template` with the next argument. Surplus
/// placeholders are left untouched.
#[must_use]
pub fn fill_placeholders(template: &str, args: &[&dyn Display]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;

    while let Some(position) = rest.find("{}") {
        output.push_str(&rest[..position]);
        match args.next() {
            Some(arg) => output.push_str(&arg.to_string()),
            None => output.push_str("{}"),
        }
        rest = &rest[position + 2..];
    }
    output.push_str(rest);
    output
}

static TABLES: Lazy<HashMap<Language, HashMap<String, String>>> = Lazy::new(|| {
    [Language::En, Language::De]
        .into_iter()
        .map(|language| {
            let table = serde_json::from_str::<HashMap<String, String>>(language.table_source()).unwrap_or_else(|e| {
                log::error!("Failed to parse '{}' string table: {}", language.code(), e);
                HashMap::new()
            });
            (language, table)
        })
        .collect()
});

/// Locale backed by the embedded JSON string tables.
///
/// Keys missing from the selected language fall back to English.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableLocale {
    language: Language,
}

impl TableLocale {
    #[must_use]
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    #[must_use]
    pub const fn english() -> Self {
        Self { language: Language::En }
    }
}

impl Locale for TableLocale {
    fn language(&self) -> Language {
        self.language
    }

    fn template(&self, key: &str) -> Option<String> {
        TABLES
            .get(&self.language)
            .and_then(|table| table.get(key))
            .or_else(|| TABLES.get(&Language::En).and_then(|table| table.get(key)))
            .cloned()
    }
}
