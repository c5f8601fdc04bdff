//! The trafaret contract
//!
//! A trafaret is a composable validation unit: [`Trafaret::check`] takes an
//! untrusted [`Value`] and returns either the converted value or a
//! [`DataError`] tree describing every violation found. Failure is a value
//! propagated by return, never an unwind, so composite trafarets can
//! evaluate all children and aggregate their errors in one pass.
//!
//! Schemas are built once and then frozen: `check` never mutates the
//! trafaret, so a schema is safe to share across threads for unboundedly
//! many concurrent checks.

use std::collections::HashSet;

use crate::errors::DataError;
use crate::types::Value;

/// Result of a single check: the converted value or an error tree
pub type CheckResult = Result<Value, DataError>;

/// A post-check conversion stage
///
/// Converters assume their input already validated; they transform, never
/// fail.
pub type Converter = Box<dyn Fn(Value) -> Value + Send + Sync>;

// ============================================================================
// Trafaret Trait
// ============================================================================

/// Capability every schema node implements
pub trait Trafaret: Send + Sync {
    /// Core validation: check the value and return it, coerced where the
    /// trafaret coerces, before any conversion stage runs.
    fn check_value(&self, value: &Value) -> CheckResult;

    /// Conversion applied when no converter pipeline is attached
    ///
    /// Most trafarets pass the checked value through unchanged. `Str` with a
    /// pattern overrides this to collapse its match object to the matched
    /// text. Attaching a pipeline via [`TrafaretExt::convert`] replaces this
    /// default entirely.
    fn convert_default(&self, value: Value) -> Value {
        value
    }

    /// Validate `value` and run the conversion stage on success
    fn check(&self, value: &Value) -> CheckResult {
        self.check_value(value).map(|v| self.convert_default(v))
    }

    /// Describe this trafaret
    ///
    /// `visiting` carries the identities of `Forward` slots already being
    /// described through the call, so self-referential schemas print as
    /// `<recur>` instead of looping. The set travels by argument; no shared
    /// state is involved.
    fn repr(&self, visiting: &mut HashSet<usize>) -> String;

    /// Describe this trafaret from a fresh traversal
    fn describe(&self) -> String {
        self.repr(&mut HashSet::new())
    }
}

// ============================================================================
// Composition Extensions
// ============================================================================

/// Builder-style composition available on every sized trafaret
pub trait TrafaretExt: Trafaret + Sized + 'static {
    /// Compose with an alternative: try `self` first, then `other`
    ///
    /// Calling `or` on an existing [`Or`] appends to its alternatives
    /// instead of nesting (the inherent method takes precedence).
    fn or(self, other: impl Trafaret + 'static) -> crate::or::Or {
        crate::or::Or::new(self).or(other)
    }

    /// Attach a converter, starting a pipeline
    ///
    /// The pipeline runs in registration order, exactly once, only on a
    /// successful check. Calling `convert` on the returned [`Converted`]
    /// appends a further stage.
    fn convert<F>(self, converter: F) -> Converted
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Converted {
            inner: Box::new(self),
            pipeline: vec![Box::new(converter)],
        }
    }
}

impl<T: Trafaret + Sized + 'static> TrafaretExt for T {}

// ============================================================================
// Converter Pipeline
// ============================================================================

/// A trafaret with an attached converter pipeline
///
/// `check` runs the inner trafaret's core validation, then every pipeline
/// stage in order. The inner trafaret's default conversion does not run; the
/// first stage sees the raw checked value (for `Str` with a pattern, the
/// match object).
pub struct Converted {
    inner: Box<dyn Trafaret>,
    pipeline: Vec<Converter>,
}

impl Converted {
    /// Append another conversion stage to the pipeline
    pub fn convert<F>(mut self, converter: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.pipeline.push(Box::new(converter));
        self
    }
}

impl Trafaret for Converted {
    fn check_value(&self, value: &Value) -> CheckResult {
        self.inner.check_value(value)
    }

    fn check(&self, value: &Value) -> CheckResult {
        let mut converted = self.inner.check_value(value)?;
        for stage in &self.pipeline {
            converted = stage(converted);
        }
        Ok(converted)
    }

    fn repr(&self, visiting: &mut HashSet<usize>) -> String {
        self.inner.repr(visiting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::Int;

    #[test]
    fn test_converters_stack_in_order() {
        // (Int >> double >> triple).check(1) == 6
        let trafaret = Int::new()
            .convert(|v| match v {
                Value::Int(i) => Value::Int(i * 2),
                other => other,
            })
            .convert(|v| match v {
                Value::Int(i) => Value::Int(i * 3),
                other => other,
            });
        assert_eq!(trafaret.check(&Value::Int(1)), Ok(Value::Int(6)));
    }

    #[test]
    fn test_converters_run_only_on_success() {
        let trafaret = Int::new().convert(|_| Value::from("converted"));
        assert!(trafaret.check(&Value::from("nope")).is_err());
    }

    #[test]
    fn test_converted_repr_delegates() {
        let trafaret = Int::new().convert(|v| v);
        assert_eq!(trafaret.describe(), "<Int>");
    }
}
