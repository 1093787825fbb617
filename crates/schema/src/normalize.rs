//! Description and comment stripping.
//!
//! Subgraph schemas describe their types with quoted strings and `#` line
//! comments. Both can contain text that looks like SDL (`type `, `{`, `: `),
//! so they are removed before any splitting happens.

use regex::Regex;
use std::sync::LazyLock;

/// Shortest `"..."` span, newlines included. Block strings (`"""..."""`)
/// are three such spans in a row and disappear the same way.
static QUOTED_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)".*?""#).expect("quoted span pattern is valid"));

/// `#` through the end of its line, newline included.
static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[^\n]*\n").expect("line comment pattern is valid"));

/// SDL text with descriptions and line comments removed.
///
/// Only [`normalize`] constructs this, so holding one means the text has
/// already been through both passes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedSchema(String);

impl NormalizedSchema {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Strips quoted descriptions, then `#` comments, from raw SDL.
///
/// Never fails. An unterminated quote is left in place, and a comment on the
/// last line without a trailing newline survives; both are accepted
/// best-effort limitations.
#[must_use]
#[tracing::instrument(skip(raw), fields(raw_len = raw.len()))]
pub fn normalize(raw: &str) -> NormalizedSchema {
    let without_descriptions = QUOTED_SPAN.replace_all(raw, "");
    let without_comments = LINE_COMMENT.replace_all(&without_descriptions, "");
    let normalized = without_comments.into_owned();
    tracing::debug!(normalized_len = normalized.len(), "Normalized schema");
    NormalizedSchema(normalized)
}
