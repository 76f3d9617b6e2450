//! Session memory
//!
//! Conversational state that outlives a single command but not the process:
//! the user's name and an insertion-ordered list of remembered facts.
//! Nothing here is persisted across restarts.

use crate::{Error, Result};

/// Per-session conversational memory, owned by the dispatcher
#[derive(Debug, Clone, Default)]
pub struct SessionMemory {
    user_name: Option<String>,
    facts: Vec<String>,
}

impl SessionMemory {
    /// Create an empty session memory
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the user's name, returning the display form
    ///
    /// The raw capture is trimmed and its first letter capitalized.
    /// Last write wins.
    pub fn set_name(&mut self, raw: &str) -> String {
        let display_name = capitalize(raw.trim());
        tracing::debug!(name = %display_name, "user name stored");
        self.user_name = Some(display_name.clone());
        display_name
    }

    /// The user's name, if they have introduced themselves
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    /// Append a fact
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyFact`] if the fact is empty after trimming;
    /// the fact list is left unchanged.
    pub fn add_fact(&mut self, raw: &str) -> Result<()> {
        let fact = raw.trim();
        if fact.is_empty() {
            return Err(Error::EmptyFact);
        }

        self.facts.push(fact.to_string());
        tracing::debug!(count = self.facts.len(), "fact remembered");
        Ok(())
    }

    /// Remembered facts in insertion order
    #[must_use]
    pub fn facts(&self) -> &[String] {
        &self.facts
    }
}

/// Uppercase the first character, leaving the rest untouched
#[must_use]
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
