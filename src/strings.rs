//! String trafarets
//!
//! `Str` checks string values with a blank-allowed flag and an optional
//! pattern. On pattern success the match result, not just the raw string, is
//! threaded through the converter pipeline: the checked value is an object
//! carrying the matched text under `"match"` plus every named capture group,
//! so downstream converters can extract groups. The default conversion
//! collapses that object back to the matched text.
//!
//! `Email` and `Url` are pattern-backed specializations sharing the same
//! match threading.

use std::collections::HashSet;

use regex::{Captures, Regex};

use crate::errors::{DataError, SchemaError};
use crate::formats::{EMAIL_REGEX, URL_REGEX};
use crate::trafaret::{CheckResult, Trafaret};
use crate::types::Value;

/// Key the matched text is stored under in a match object
const MATCH_KEY: &str = "match";

// Matches must start at the beginning of the input; trailing input is
// allowed unless the pattern anchors it.
fn captures_at_start<'a>(regex: &Regex, input: &'a str) -> Option<Captures<'a>> {
    regex
        .captures(input)
        .filter(|caps| caps.get(0).map_or(false, |m| m.start() == 0))
}

// Build the value a pattern match produces: matched text plus named groups.
fn match_value(regex: &Regex, caps: &Captures<'_>) -> Value {
    let full = caps.get(0).map_or("", |m| m.as_str());
    let mut pairs = vec![(MATCH_KEY.to_string(), Value::from(full))];
    for name in regex.capture_names().flatten() {
        if let Some(group) = caps.name(name) {
            pairs.push((name.to_string(), Value::from(group.as_str())));
        }
    }
    Value::Object(pairs)
}

// Collapse a match object to its matched text; anything else passes through.
fn collapse_match(value: Value) -> Value {
    if let Some(matched) = value.get(MATCH_KEY) {
        return matched.clone();
    }
    value
}

fn check_string<'a>(value: &'a Value, allow_blank: bool) -> Result<&'a str, DataError> {
    let Value::String(s) = value else {
        return Err(DataError::leaf("value is not string"));
    };
    if !allow_blank && s.is_empty() {
        return Err(DataError::leaf("blank value is not allowed"));
    }
    Ok(s)
}

// ============================================================================
// Str
// ============================================================================

/// Accepts strings, optionally blank, optionally matching a pattern
#[derive(Debug, Clone, Default)]
pub struct Str {
    allow_blank: bool,
    pattern: Option<Regex>,
}

impl Str {
    /// Create a `Str` rejecting blank values
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow the empty string
    pub fn allow_blank(mut self) -> Self {
        self.allow_blank = true;
        self
    }

    /// Require the value to match `pattern` from its start
    ///
    /// The pattern compiles at schema-build time; an invalid pattern is a
    /// construction error.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, SchemaError> {
        self.pattern = Some(Regex::new(pattern)?);
        Ok(self)
    }
}

impl Trafaret for Str {
    fn check_value(&self, value: &Value) -> CheckResult {
        let s = check_string(value, self.allow_blank)?;
        match &self.pattern {
            Some(regex) => match captures_at_start(regex, s) {
                Some(caps) => Ok(match_value(regex, &caps)),
                None => Err(DataError::leaf("value does not match pattern")),
            },
            None => Ok(value.clone()),
        }
    }

    fn convert_default(&self, value: Value) -> Value {
        collapse_match(value)
    }

    fn repr(&self, _visiting: &mut HashSet<usize>) -> String {
        if self.allow_blank {
            "<Str(blank)>".to_string()
        } else {
            "<Str>".to_string()
        }
    }
}

// ============================================================================
// Email
// ============================================================================

/// Accepts email addresses
///
/// The match object exposes `name` and `domain` groups to converters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Email {
    allow_blank: bool,
}

impl Email {
    /// Create an `Email` trafaret
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow the empty string
    pub fn allow_blank(mut self) -> Self {
        self.allow_blank = true;
        self
    }
}

impl Trafaret for Email {
    fn check_value(&self, value: &Value) -> CheckResult {
        let s = check_string(value, self.allow_blank)?;
        if self.allow_blank && s.is_empty() {
            return Ok(value.clone());
        }
        match captures_at_start(&EMAIL_REGEX, s) {
            Some(caps) => Ok(match_value(&EMAIL_REGEX, &caps)),
            None => Err(DataError::leaf("value is not an email")),
        }
    }

    fn convert_default(&self, value: Value) -> Value {
        collapse_match(value)
    }

    fn repr(&self, _visiting: &mut HashSet<usize>) -> String {
        "<Email>".to_string()
    }
}

// ============================================================================
// Url
// ============================================================================

/// Accepts http/https/ftp URLs
#[derive(Debug, Clone, Copy, Default)]
pub struct Url {
    allow_blank: bool,
}

impl Url {
    /// Create a `Url` trafaret
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow the empty string
    pub fn allow_blank(mut self) -> Self {
        self.allow_blank = true;
        self
    }
}

impl Trafaret for Url {
    fn check_value(&self, value: &Value) -> CheckResult {
        let s = check_string(value, self.allow_blank)?;
        if self.allow_blank && s.is_empty() {
            return Ok(value.clone());
        }
        match captures_at_start(&URL_REGEX, s) {
            Some(caps) => Ok(match_value(&URL_REGEX, &caps)),
            None => Err(DataError::leaf("value is not URL")),
        }
    }

    fn convert_default(&self, value: Value) -> Value {
        collapse_match(value)
    }

    fn repr(&self, _visiting: &mut HashSet<usize>) -> String {
        "<Url>".to_string()
    }
}
