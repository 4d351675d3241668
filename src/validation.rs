//! Validator interface consumed by input tasks.
//!
//! Format-specific validators (e-mail, addresses, passwords) live with the
//! application. This module only defines the seam plus the few generic
//! checks the library itself relies on.

/// Checks a piece of text and describes what it expects.
pub trait Validator: Send + Sync {
    /// `Ok(())` when `text` is acceptable, otherwise a user-facing reason.
    fn validate(&self, text: &str) -> Result<(), String>;

    /// Short description of the expected format.
    fn description(&self) -> String;
}

/// Rejects empty or whitespace-only text.
#[derive(Debug, Clone, Default)]
pub struct NotEmpty;

impl Validator for NotEmpty {
    fn validate(&self, text: &str) -> Result<(), String> {
        if text.trim().is_empty() {
            Err("value must not be empty".to_string())
        } else {
            Ok(())
        }
    }

    fn description(&self) -> String {
        "non-empty text".to_string()
    }
}

/// Bounds the character count of the text.
#[derive(Debug, Clone)]
pub struct LengthRange {
    pub min: usize,
    pub max: Option<usize>,
}

impl Validator for LengthRange {
    fn validate(&self, text: &str) -> Result<(), String> {
        let length = text.chars().count();
        if length < self.min {
            return Err(format!("must be at least {} characters", self.min));
        }
        match self.max {
            Some(max) if length > max => Err(format!("must be at most {} characters", max)),
            _ => Ok(()),
        }
    }

    fn description(&self) -> String {
        match self.max {
            Some(max) => format!("{} to {} characters", self.min, max),
            None => format!("at least {} characters", self.min),
        }
    }
}

/// Adapts a closure into a [`Validator`].
pub struct FnValidator<F> {
    check: F,
    description: String,
}

impl<F> FnValidator<F>
where
    F: Fn(&str) -> Result<(), String> + Send + Sync,
{
    pub fn new(description: impl Into<String>, check: F) -> Self {
        Self {
            check,
            description: description.into(),
        }
    }
}

impl<F> Validator for FnValidator<F>
where
    F: Fn(&str) -> Result<(), String> + Send + Sync,
{
    fn validate(&self, text: &str) -> Result<(), String> {
        (self.check)(text)
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}
