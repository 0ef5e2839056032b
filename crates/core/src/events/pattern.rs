// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event pattern matching
//!
//! Patterns are regular expressions searched anywhere in the event name.
//! Module metadata usually ships them wrapped in delimiters with trailing
//! flags, e.g. `/^combat\.hit$/i`; bare expressions are accepted too.

use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Characters accepted as pattern delimiters
const DELIMITERS: &[char] = &['/', '#', '~', '%', '!', '@', ';', ',', '|'];

/// A pattern string that cannot be compiled
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid event pattern {pattern:?}: {reason}")]
pub struct InvalidPatternError {
    pub pattern: String,
    pub reason: String,
}

impl InvalidPatternError {
    fn new(pattern: &str, reason: impl Into<String>) -> Self {
        Self {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}

/// Compiled pattern for matching event names
///
/// Keeps the source text so subscriptions can be compared and removed by
/// the exact string they were declared with.
#[derive(Clone, Debug)]
pub struct EventPattern {
    source: String,
    regex: Regex,
}

impl EventPattern {
    /// Compile a pattern
    pub fn parse(pattern: &str) -> Result<Self, InvalidPatternError> {
        let (body, flags) = split_delimited(pattern)?;
        if body.is_empty() {
            return Err(InvalidPatternError::new(pattern, "empty expression"));
        }

        let mut builder = RegexBuilder::new(&body);
        for flag in flags.chars() {
            match flag {
                'i' => {
                    builder.case_insensitive(true);
                }
                'm' => {
                    builder.multi_line(true);
                }
                's' => {
                    builder.dot_matches_new_line(true);
                }
                'x' => {
                    builder.ignore_whitespace(true);
                }
                'U' => {
                    builder.swap_greed(true);
                }
                // Patterns are always unicode-aware
                'u' => {}
                other => {
                    return Err(InvalidPatternError::new(
                        pattern,
                        format!("unsupported flag '{}'", other),
                    ))
                }
            }
        }

        let regex = builder
            .build()
            .map_err(|e| InvalidPatternError::new(pattern, e.to_string()))?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Check if this pattern matches an event name
    pub fn matches(&self, event_name: &str) -> bool {
        self.regex.is_match(event_name)
    }

    /// The pattern exactly as it was declared
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl PartialEq for EventPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for EventPattern {}

/// Check whether `pattern` matches `event_name`
///
/// A malformed pattern is an error, never a silent non-match.
pub fn matches(pattern: &str, event_name: &str) -> Result<bool, InvalidPatternError> {
    Ok(EventPattern::parse(pattern)?.matches(event_name))
}

/// Split `/body/flags` into its body and flags.
///
/// Strings that do not open with a known delimiter, or never close it,
/// are bare expressions with no flags.
fn split_delimited(pattern: &str) -> Result<(String, String), InvalidPatternError> {
    let mut chars = pattern.chars();
    let delimiter = match chars.next() {
        Some(c) if DELIMITERS.contains(&c) => c,
        _ => return Ok((pattern.to_string(), String::new())),
    };

    let rest = chars.as_str();
    let close = match rest.rfind(delimiter) {
        Some(idx) => idx,
        None => return Ok((pattern.to_string(), String::new())),
    };

    let flags = &rest[close + delimiter.len_utf8()..];
    if !flags.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(InvalidPatternError::new(
            pattern,
            "unexpected text after closing delimiter",
        ));
    }

    Ok((unescape_delimiter(&rest[..close], delimiter), flags.to_string()))
}

/// Turn `\<delim>` back into the delimiter, keeping it escaped only when
/// the regex engine would read it as syntax.
fn unescape_delimiter(body: &str, delimiter: char) -> String {
    let escaped = regex::escape(&delimiter.to_string());
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next) if next == delimiter => out.push_str(&escaped),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }

    out
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
