//! Keyword registry used to classify free-form error messages.
//!
//! Keyword sets are built lazily per language from the string tables and
//! cached behind a read/write lock. Lookups take the read lock; only the
//! first lookup for a language takes the write lock, re-checking the map
//! before inserting.

use super::{keys, Language, Locale, TableLocale};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Broad category of an error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Cancelled,
    Timeout,
    Validation,
    Other,
}

/// Lower-cased keywords for each classified category.
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    pub cancelled: Vec<String>,
    pub timeout: Vec<String>,
    pub validation: Vec<String>,
}

impl KeywordSet {
    fn from_locale(locale: &dyn Locale) -> Self {
        let split = |key: &str| -> Vec<String> {
            locale
                .template(key)
                .unwrap_or_default()
                .split(',')
                .map(|word| word.trim().to_lowercase())
                .filter(|word| !word.is_empty())
                .collect()
        };

        Self {
            cancelled: split(keys::KEYWORDS_CANCELLED),
            timeout: split(keys::KEYWORDS_TIMEOUT),
            validation: split(keys::KEYWORDS_VALIDATION),
        }
    }

    /// Classify `message`. Cancellation wins over timeout, timeout over validation.
    #[must_use]
    pub fn classify(&self, message: &str) -> ErrorClass {
        let message = message.to_lowercase();
        let hit = |words: &[String]| words.iter().any(|word| message.contains(word.as_str()));

        if hit(&self.cancelled) {
            ErrorClass::Cancelled
        } else if hit(&self.timeout) {
            ErrorClass::Timeout
        } else if hit(&self.validation) {
            ErrorClass::Validation
        } else {
            ErrorClass::Other
        }
    }
}

static REGISTRY: Lazy<RwLock<HashMap<Language, Arc<KeywordSet>>>> = Lazy::new(|| RwLock::new(HashMap::new()));

/// Keyword set for `language`, built on first use.
pub fn keywords_for(language: Language) -> Arc<KeywordSet> {
    if let Ok(registry) = REGISTRY.read() {
        if let Some(set) = registry.get(&language) {
            return Arc::clone(set);
        }
    }

    let mut registry = match REGISTRY.write() {
        Ok(registry) => registry,
        // A panicked writer leaves a usable map behind
        Err(poisoned) => poisoned.into_inner(),
    };
    Arc::clone(
        registry
            .entry(language)
            .or_insert_with(|| Arc::new(KeywordSet::from_locale(&TableLocale::new(language)))),
    )
}

/// Classify an error message with the keywords of `language`.
#[must_use]
pub fn classify_error(message: &str, language: Language) -> ErrorClass {
    keywords_for(language).classify(message)
}
