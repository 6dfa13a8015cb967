//! Purpose: Compile and evaluate row-match criteria (literal or pattern).
//! Exports: `Criterion`, `PATTERN_SIGIL`.
//! Role: Criterion boundary between the stringly sigil convention and typed matching.
//! Invariants: Pattern compile failures are explicit errors; a failed match never is.
//! Invariants: The strict flag only affects the literal branch.

use regex::{Regex, RegexBuilder};
use serde_json::Value;

use crate::core::coerce;
use crate::core::error::{Error, ErrorKind};

/// Leading character marking a textual criterion as a pattern: `/body/flags`.
pub const PATTERN_SIGIL: char = '/';

/// A row-match criterion: compare against a literal value, or test a
/// compiled regular expression against the field's text form.
///
/// [`Criterion::from_value`] applies the sigil convention. A literal string
/// that itself starts with `/` cannot be expressed through the convention;
/// build it with [`Criterion::literal`] instead.
#[derive(Clone, Debug)]
pub enum Criterion {
    Literal(Value),
    Pattern(Regex),
}

impl Criterion {
    /// Interprets a value under the sigil convention: a string starting with
    /// [`PATTERN_SIGIL`] compiles as `/body/flags`, anything else is a literal.
    pub fn from_value(value: &Value) -> Result<Self, Error> {
        match value {
            Value::String(text) if text.starts_with(PATTERN_SIGIL) => Self::pattern(text),
            other => Ok(Self::Literal(other.clone())),
        }
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    /// Compiles a `/body/flags` pattern. Flags: `i` (case-insensitive),
    /// `m` (multi-line), `s` (dot matches newline), `x` (ignore whitespace),
    /// `U` (swap greed).
    pub fn pattern(raw: &str) -> Result<Self, Error> {
        let Some(rest) = raw.strip_prefix(PATTERN_SIGIL) else {
            return Err(Error::new(ErrorKind::Pattern)
                .with_message(format!("pattern must start with '{PATTERN_SIGIL}'"))
                .with_hint("expected /body/flags, e.g. /er/i"));
        };
        let Some(split) = rest.rfind(PATTERN_SIGIL) else {
            return Err(Error::new(ErrorKind::Pattern)
                .with_message("pattern is missing its closing delimiter")
                .with_hint("expected /body/flags, e.g. /er/i"));
        };
        let body = &rest[..split];
        let flags = &rest[split + 1..];

        let mut builder = RegexBuilder::new(body);
        for flag in flags.chars() {
            match flag {
                'i' => builder.case_insensitive(true),
                'm' => builder.multi_line(true),
                's' => builder.dot_matches_new_line(true),
                'x' => builder.ignore_whitespace(true),
                'U' => builder.swap_greed(true),
                other => {
                    return Err(Error::new(ErrorKind::Pattern)
                        .with_message(format!("unknown pattern flag '{other}'"))
                        .with_hint("supported flags: i, m, s, x, U"));
                }
            };
        }
        let regex = builder.build().map_err(|err| {
            Error::new(ErrorKind::Pattern)
                .with_message(format!("invalid pattern body `{body}`"))
                .with_source(err)
        })?;
        Ok(Self::Pattern(regex))
    }

    /// Tests a field value. Literals compare with strict or loose equality;
    /// patterns test against the value's text form and ignore `strict`.
    pub fn matches(&self, candidate: &Value, strict: bool) -> bool {
        match self {
            Self::Literal(expected) => {
                if strict {
                    expected == candidate
                } else {
                    coerce::loose_eq(expected, candidate)
                }
            }
            Self::Pattern(regex) => match coerce::text_form(candidate) {
                Some(text) => regex.is_match(&text),
                None => false,
            },
        }
    }
}
