//! Leaf trafarets with no child validators
//!
//! These are the terminal checks schemas bottom out in: pass-through,
//! null/boolean checks, exact-value match, runtime-kind check, enumerated
//! values, and arbitrary caller-supplied predicates.

use std::collections::HashSet;
use std::fmt;

use crate::errors::DataError;
use crate::trafaret::{CheckResult, Trafaret};
use crate::types::{Value, ValueKind};

// ============================================================================
// Any
// ============================================================================

/// Accepts every value unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Any;

impl Any {
    /// Create an `Any` trafaret
    pub fn new() -> Self {
        Self
    }
}

impl Trafaret for Any {
    fn check_value(&self, value: &Value) -> CheckResult {
        Ok(value.clone())
    }

    fn repr(&self, _visiting: &mut HashSet<usize>) -> String {
        "<Any>".to_string()
    }
}

// ============================================================================
// Null
// ============================================================================

/// Accepts only the null value
#[derive(Debug, Clone, Copy, Default)]
pub struct Null;

impl Null {
    /// Create a `Null` trafaret
    pub fn new() -> Self {
        Self
    }
}

impl Trafaret for Null {
    fn check_value(&self, value: &Value) -> CheckResult {
        if value.is_null() {
            Ok(Value::Null)
        } else {
            Err(DataError::leaf("value should be null"))
        }
    }

    fn repr(&self, _visiting: &mut HashSet<usize>) -> String {
        "<Null>".to_string()
    }
}

// ============================================================================
// Bool
// ============================================================================

/// Accepts only boolean values
#[derive(Debug, Clone, Copy, Default)]
pub struct Bool;

impl Bool {
    /// Create a `Bool` trafaret
    pub fn new() -> Self {
        Self
    }
}

impl Trafaret for Bool {
    fn check_value(&self, value: &Value) -> CheckResult {
        match value {
            Value::Bool(b) => Ok(Value::Bool(*b)),
            _ => Err(DataError::leaf("value should be boolean")),
        }
    }

    fn repr(&self, _visiting: &mut HashSet<usize>) -> String {
        "<Bool>".to_string()
    }
}

// ============================================================================
// Atom
// ============================================================================

/// Accepts exactly one value
#[derive(Debug, Clone)]
pub struct Atom {
    expected: Value,
}

impl Atom {
    /// Create an `Atom` matching `expected` only
    pub fn new(expected: impl Into<Value>) -> Self {
        Self {
            expected: expected.into(),
        }
    }
}

impl Trafaret for Atom {
    fn check_value(&self, value: &Value) -> CheckResult {
        if *value == self.expected {
            Ok(value.clone())
        } else {
            Err(DataError::leaf(format!(
                "value is not exactly '{}'",
                self.expected
            )))
        }
    }

    fn repr(&self, _visiting: &mut HashSet<usize>) -> String {
        format!("<Atom('{}')>", self.expected)
    }
}

// ============================================================================
// IsType
// ============================================================================

/// Accepts values of one runtime kind
#[derive(Debug, Clone, Copy)]
pub struct IsType {
    kind: ValueKind,
}

impl IsType {
    /// Create an `IsType` matching values of `kind`
    pub fn new(kind: ValueKind) -> Self {
        Self { kind }
    }
}

impl Trafaret for IsType {
    fn check_value(&self, value: &Value) -> CheckResult {
        if value.kind() == self.kind {
            Ok(value.clone())
        } else {
            Err(DataError::leaf(format!("value is not {}", self.kind)))
        }
    }

    fn repr(&self, _visiting: &mut HashSet<usize>) -> String {
        format!("<IsType({})>", self.kind)
    }
}

// ============================================================================
// Enum
// ============================================================================

/// Accepts values from a fixed set of variants
#[derive(Debug, Clone, Default)]
pub struct Enum {
    variants: Vec<Value>,
}

impl Enum {
    /// Create an `Enum` over the given variants
    pub fn new<V>(variants: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<Value>,
    {
        Self {
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }
}

impl Trafaret for Enum {
    fn check_value(&self, value: &Value) -> CheckResult {
        if self.variants.contains(value) {
            Ok(value.clone())
        } else {
            Err(DataError::leaf("value doesn't match any variant"))
        }
    }

    fn repr(&self, _visiting: &mut HashSet<usize>) -> String {
        let variants: Vec<String> = self.variants.iter().map(|v| format!("'{}'", v)).collect();
        format!("<Enum({})>", variants.join(", "))
    }
}

// ============================================================================
// Call
// ============================================================================

/// Wraps an arbitrary predicate into a trafaret
///
/// The function receives the value and returns the (possibly transformed)
/// value or a [`DataError`]. This covers one-off checks that do not deserve
/// a dedicated type.
pub struct Call {
    func: Box<dyn Fn(&Value) -> CheckResult + Send + Sync>,
}

impl Call {
    /// Create a `Call` from a predicate
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&Value) -> CheckResult + Send + Sync + 'static,
    {
        Self {
            func: Box::new(func),
        }
    }
}

impl fmt::Debug for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Call").finish_non_exhaustive()
    }
}

impl Trafaret for Call {
    fn check_value(&self, value: &Value) -> CheckResult {
        (self.func)(value)
    }

    fn repr(&self, _visiting: &mut HashSet<usize>) -> String {
        "<Call>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_passes_everything() {
        assert_eq!(Any::new().check(&Value::Null), Ok(Value::Null));
        assert_eq!(Any::new().check(&Value::Int(1)), Ok(Value::Int(1)));
        assert_eq!(
            Any::new().check(&Value::list([Value::Bool(true)])),
            Ok(Value::list([Value::Bool(true)]))
        );
    }

    #[test]
    fn test_null() {
        assert_eq!(Null::new().check(&Value::Null), Ok(Value::Null));
        let err = Null::new().check(&Value::Int(1)).unwrap_err();
        assert_eq!(err.to_string(), "value should be null");
    }

    #[test]
    fn test_bool() {
        assert_eq!(Bool::new().check(&Value::Bool(true)), Ok(Value::Bool(true)));
        assert_eq!(Bool::new().check(&Value::Bool(false)), Ok(Value::Bool(false)));
        let err = Bool::new().check(&Value::Int(1)).unwrap_err();
        assert_eq!(err.to_string(), "value should be boolean");
    }

    #[test]
    fn test_atom() {
        let atom = Atom::new("atom");
        assert_eq!(atom.check(&Value::from("atom")), Ok(Value::from("atom")));
        let err = atom.check(&Value::from("molecule")).unwrap_err();
        assert_eq!(err.to_string(), "value is not exactly 'atom'");
    }

    #[test]
    fn test_is_type() {
        let check = IsType::new(ValueKind::Int);
        assert_eq!(check.check(&Value::Int(1)), Ok(Value::Int(1)));
        let err = check.check(&Value::from("foo")).unwrap_err();
        assert_eq!(err.to_string(), "value is not integer");
    }

    #[test]
    fn test_enum() {
        let variants = Enum::new([Value::from("foo"), Value::from("bar"), Value::Int(1)]);
        assert_eq!(variants.check(&Value::from("foo")), Ok(Value::from("foo")));
        assert_eq!(variants.check(&Value::Int(1)), Ok(Value::Int(1)));
        let err = variants.check(&Value::Int(2)).unwrap_err();
        assert_eq!(err.to_string(), "value doesn't match any variant");
    }

    #[test]
    fn test_call() {
        let only_foo = Call::new(|value| match value {
            Value::String(s) if s == "foo" => Ok(value.clone()),
            _ => Err(DataError::leaf("I want only foo!")),
        });
        assert_eq!(only_foo.check(&Value::from("foo")), Ok(Value::from("foo")));
        let err = only_foo.check(&Value::from("bar")).unwrap_err();
        assert_eq!(err.to_string(), "I want only foo!");
    }
}
