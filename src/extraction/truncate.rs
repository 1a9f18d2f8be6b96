//! Bounded excerpts of extracted content.

use std::fmt;

/// Default character budget for embedded content.
pub const DEFAULT_EXCERPT_LIMIT: usize = 2000;

/// Suffix appended when content was cut short.
pub const TRUNCATION_MARKER: &str = "... (content truncated)";

/// A prefix of some source text, at most `limit` characters long.
///
/// The `Display` impl renders the excerpt followed by [`TRUNCATION_MARKER`]
/// when the source was longer than the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Excerpt<'a> {
    /// The retained prefix.
    pub text: &'a str,
    /// Whether anything was cut off.
    pub truncated: bool,
}

/// Keep the first `limit` characters of `text`.
///
/// Counts Unicode scalar values, so multi-byte characters are never split.
pub fn truncate(text: &str, limit: usize) -> Excerpt<'_> {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => Excerpt {
            text: &text[..byte_idx],
            truncated: true,
        },
        None => Excerpt {
            text,
            truncated: false,
        },
    }
}

impl fmt::Display for Excerpt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)?;
        if self.truncated {
            f.write_str(TRUNCATION_MARKER)?;
        }
        Ok(())
    }
}
