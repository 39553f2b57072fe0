// SPDX-License-Identifier: Apache-2.0

//! Output-path templating.
//!
//! Downstream destination names are rendered from patterns like
//! `app-${fields.service}-${+YYYY.MM.DD}`: field tokens are looked up in a
//! record header, `+`-prefixed tokens format the collection time. Token
//! extraction happens once at compile time; rendering is plain substitution.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use thiserror::Error;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{(.+?)\}").expect("token expression is valid"));

const TIME_TOKEN: &str = "+";

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("field {0:?} not found in header")]
    FieldNotFound(String),

    #[error("field {0:?} is not a string")]
    FieldNotString(String),
}

#[derive(Debug, Clone)]
struct Token {
    /// The full token as written, e.g. `${fields.service}`
    wrapped: String,
    /// The inner key, e.g. `fields.service`
    key: String,
}

/// A compiled destination-name pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    tokens: Vec<Token>,
}

impl Pattern {
    pub fn compile(pattern: &str) -> Pattern {
        let tokens = TOKEN_RE
            .captures_iter(pattern)
            .map(|caps| Token {
                wrapped: caps[0].to_string(),
                key: caps[1].to_string(),
            })
            .collect();

        Pattern {
            raw: pattern.to_string(),
            tokens,
        }
    }

    pub fn has_tokens(&self) -> bool {
        !self.tokens.is_empty()
    }

    /// Render the pattern against a record header, stamping time tokens with
    /// `now`. A pattern without tokens passes through unchanged.
    pub fn select(&self, header: &Value, now: DateTime<Utc>) -> Result<String, PatternError> {
        if self.tokens.is_empty() {
            return Ok(self.raw.clone());
        }

        let mut out = self.raw.clone();
        for token in &self.tokens {
            let replacement = match token.key.strip_prefix(TIME_TOKEN) {
                Some(format) => format_time(now, format),
                None => lookup(header, &token.key)?,
            };
            out = out.replace(&token.wrapped, &replacement);
        }
        Ok(out)
    }
}

/// Map date tokens (`YYYY.MM.DD` style) onto a chrono format string.
fn format_time(now: DateTime<Utc>, format: &str) -> String {
    let chrono_format = format
        .replace("YYYY", "%Y")
        .replace("MM", "%m")
        .replace("DD", "%d")
        .replace("HH", "%H")
        .replace("mm", "%M")
        .replace("ss", "%S");
    now.format(&chrono_format).to_string()
}

/// Dot-path lookup into the header; the resolved value must be a string.
fn lookup(header: &Value, key: &str) -> Result<String, PatternError> {
    let mut current = header;
    for segment in key.split('.') {
        current = current
            .get(segment)
            .ok_or_else(|| PatternError::FieldNotFound(key.to_string()))?;
    }
    current
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| PatternError::FieldNotString(key.to_string()))
}
