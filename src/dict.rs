//! Keyed-mapping combinator
//!
//! `Dict` validates a fixed, named field set. Each declared [`Key`] carries
//! presence rules (required, optional, defaulted), an output rename, and a
//! child trafaret. Input entries not consumed by a declared key fall under
//! the extra-key policy: explicitly allowed or ignored names, or the
//! allow-any / ignore-any flags.
//!
//! Both passes aggregate into one branch error, so a single check reports
//! every missing field, every failing value, and every disallowed extra.

use std::collections::{BTreeMap, HashSet};

use crate::errors::{DataError, ErrorKey};
use crate::trafaret::{CheckResult, Trafaret};
use crate::types::Value;

// ============================================================================
// Key
// ============================================================================

/// A declared field of a [`Dict`] schema
///
/// `name` is looked up in the input; the result is written under the target
/// name (`to_name` when set, otherwise `name`). A default is associated with
/// the source name for presence-testing and passes through the child
/// trafaret exactly like a present value.
pub struct Key {
    name: String,
    to_name: Option<String>,
    default: Option<Value>,
    optional: bool,
    trafaret: Box<dyn Trafaret>,
}

impl Key {
    /// Declare a required key validated by `trafaret`
    pub fn new(name: impl Into<String>, trafaret: impl Trafaret + 'static) -> Self {
        Self {
            name: name.into(),
            to_name: None,
            default: None,
            optional: false,
            trafaret: Box::new(trafaret),
        }
    }

    /// Supply a default used when the key is absent from the input
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Mark the key optional: absence without a default is not an error
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Rename the key in successful output
    pub fn to_name(mut self, name: impl Into<String>) -> Self {
        self.to_name = Some(name.into());
        self
    }

    /// The name written into successful output
    pub fn target_name(&self) -> &str {
        self.to_name.as_deref().unwrap_or(&self.name)
    }

    /// The name looked up in the input
    pub fn source_name(&self) -> &str {
        &self.name
    }

    // Schema-building call: optional keys lose their default.
    fn make_optional(&mut self) {
        self.optional = true;
        self.default = None;
    }
}

// ============================================================================
// Dict
// ============================================================================

/// Validates a mapping against a declared field set plus an extra-key policy
///
/// Keys keep declaration order, which fixes error and description ordering
/// but has no effect on correctness. Policy-configuration calls compose
/// additively and must finish before the schema is shared for checking.
#[derive(Default)]
pub struct Dict {
    keys: Vec<Key>,
    extras: Vec<String>,
    allow_any: bool,
    ignore: Vec<String>,
    ignore_any: bool,
}

impl Dict {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a key
    pub fn key(mut self, key: Key) -> Self {
        self.keys.push(key);
        self
    }

    /// Declare a required field; shorthand for `key(Key::new(..))`
    pub fn field(self, name: impl Into<String>, trafaret: impl Trafaret + 'static) -> Self {
        self.key(Key::new(name, trafaret))
    }

    /// Allow the named extra keys to pass through unchanged
    ///
    /// `"*"` sets the allow-any flag. Calls compose additively.
    pub fn allow_extra(mut self, names: &[&str]) -> Self {
        for &name in names {
            if name == "*" {
                self.allow_any = true;
            } else {
                self.extras.push(name.to_string());
            }
        }
        self
    }

    /// Silently drop the named extra keys
    ///
    /// `"*"` sets the ignore-any flag. Calls compose additively.
    pub fn ignore_extra(mut self, names: &[&str]) -> Self {
        for &name in names {
            if name == "*" {
                self.ignore_any = true;
            } else {
                self.ignore.push(name.to_string());
            }
        }
        self
    }

    /// Make the named keys optional, clearing their defaults
    ///
    /// `"*"` applies to every declared key.
    pub fn make_optional(mut self, names: &[&str]) -> Self {
        let all = names.contains(&"*");
        for key in &mut self.keys {
            if all || names.contains(&key.source_name()) {
                key.make_optional();
            }
        }
        self
    }
}

impl Trafaret for Dict {
    fn check_value(&self, value: &Value) -> CheckResult {
        let Value::Object(pairs) = value else {
            return Err(DataError::leaf("value is not dict"));
        };
        let mut remaining: Vec<(String, Value)> = pairs.clone();
        let mut collected: Vec<(String, Value)> = Vec::new();
        let mut errors: BTreeMap<ErrorKey, DataError> = BTreeMap::new();

        // Pass 1: declared keys consume their input entry (or their default).
        for key in &self.keys {
            let position = remaining
                .iter()
                .position(|(name, _)| name == key.source_name());
            let present = position.map(|i| remaining.remove(i).1);
            let candidate = present.or_else(|| key.default.clone());
            match candidate {
                Some(input) => match key.trafaret.check(&input) {
                    Ok(converted) => {
                        collected.push((key.target_name().to_string(), converted));
                    }
                    Err(err) => {
                        errors.insert(ErrorKey::Name(key.target_name().to_string()), err);
                    }
                },
                None if key.optional => {}
                None => {
                    errors.insert(
                        ErrorKey::Name(key.target_name().to_string()),
                        DataError::leaf("is required"),
                    );
                }
            }
        }

        // Pass 2: extra-key policy over the unconsumed entries.
        for (name, extra) in remaining {
            if self.ignore_any || self.ignore.iter().any(|n| n == &name) {
                continue;
            }
            if self.allow_any || self.extras.iter().any(|n| n == &name) {
                collected.push((name, extra));
            } else {
                let message = format!("{} is not allowed key", name);
                errors.insert(ErrorKey::Name(name), DataError::leaf(message));
            }
        }

        if errors.is_empty() {
            Ok(Value::Object(collected))
        } else {
            Err(DataError::branch(errors))
        }
    }

    fn repr(&self, visiting: &mut HashSet<usize>) -> String {
        let mut options = Vec::new();
        if self.allow_any {
            options.push("any".to_string());
        }
        if !self.ignore.is_empty() {
            options.push(format!("ignore=({})", self.ignore.join(", ")));
        }
        if !self.extras.is_empty() {
            options.push(format!("extras=({})", self.extras.join(", ")));
        }

        let mut keys: Vec<&Key> = self.keys.iter().collect();
        keys.sort_by(|a, b| a.source_name().cmp(b.source_name()));
        let fields: Vec<String> = keys
            .iter()
            .map(|k| format!("{}={}", k.source_name(), k.trafaret.repr(visiting)))
            .collect();

        if options.is_empty() {
            format!("<Dict({})>", fields.join(", "))
        } else {
            format!("<Dict({} | {})>", options.join(", "), fields.join(", "))
        }
    }
}
