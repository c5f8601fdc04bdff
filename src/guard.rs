//! Argument-validating function wrapper
//!
//! `Guard` checks a function's call arguments against a [`Dict`] schema
//! before invoking it. Positional and named arguments are merged with the
//! declared parameter defaults into a name-to-value object, validated, and
//! the converted object is handed to the function. Validation failures come
//! back as [`GuardError`], a dedicated kind, so callers can tell bad
//! arguments from errors raised by the function itself.

use thiserror::Error;

use crate::dict::Dict;
use crate::errors::DataError;
use crate::forward::Forward;
use crate::trafaret::Trafaret;
use crate::types::Value;

// ============================================================================
// Guard Error
// ============================================================================

/// Raised when a guarded function receives invalid arguments
#[derive(Debug, Error)]
pub enum GuardError {
    /// The assembled arguments failed the guard schema
    #[error("invalid arguments: {0}")]
    Arguments(DataError),
}

impl GuardError {
    /// The underlying validation error tree
    pub fn data_error(&self) -> &DataError {
        match self {
            Self::Arguments(err) => err,
        }
    }
}

// ============================================================================
// Parameters
// ============================================================================

/// A declared parameter of the guarded function
#[derive(Debug, Clone)]
pub struct Param {
    name: String,
    default: Option<Value>,
}

impl Param {
    /// Declare a parameter without a default
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    /// Supply the parameter's declared default
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

// ============================================================================
// Guard
// ============================================================================

/// A function guarded by a keyed-mapping schema
///
/// The schema must be a [`Dict`] or a [`Forward`] resolving to one; the
/// constructors enforce the restriction.
pub struct Guard<F> {
    trafaret: Box<dyn Trafaret>,
    params: Vec<Param>,
    func: F,
}

impl<F> Guard<F> {
    /// Guard `func` with a `Dict` schema
    pub fn new(schema: Dict, params: Vec<Param>, func: F) -> Self {
        Self {
            trafaret: Box::new(schema),
            params,
            func,
        }
    }

    /// Guard `func` with a `Forward` that resolves to a `Dict`
    pub fn with_forward(schema: Forward, params: Vec<Param>, func: F) -> Self {
        Self {
            trafaret: Box::new(schema),
            params,
            func,
        }
    }

    /// Validate the call arguments and invoke the function
    ///
    /// Positional arguments are matched to parameters in declaration order;
    /// named arguments override them; declared defaults fill what remains.
    pub fn call<R>(&self, positional: &[Value], named: &[(&str, Value)]) -> Result<R, GuardError>
    where
        F: Fn(Value) -> R,
    {
        let mut call_args: Vec<(String, Value)> = self
            .params
            .iter()
            .zip(positional)
            .map(|(param, value)| (param.name.clone(), value.clone()))
            .collect();

        for (name, value) in named {
            match call_args.iter_mut().find(|(n, _)| n.as_str() == *name) {
                Some(entry) => entry.1 = value.clone(),
                None => call_args.push((name.to_string(), value.clone())),
            }
        }

        for param in &self.params {
            if let Some(default) = &param.default {
                if call_args.iter().all(|(n, _)| n != &param.name) {
                    call_args.push((param.name.clone(), default.clone()));
                }
            }
        }

        let converted = self
            .trafaret
            .check(&Value::Object(call_args))
            .map_err(GuardError::Arguments)?;
        Ok((self.func)(converted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FlatError;
    use crate::numeric::Int;
    use crate::strings::Str;

    fn guarded() -> Guard<impl Fn(Value) -> (Value, Value, Value)> {
        let schema = Dict::new()
            .field("a", Str::new())
            .field("b", Int::new())
            .field("c", Str::new());
        let params = vec![
            Param::new("a"),
            Param::new("b"),
            Param::new("c").default("default"),
        ];
        Guard::new(schema, params, |args: Value| {
            (
                args.get("a").cloned().unwrap(),
                args.get("b").cloned().unwrap(),
                args.get("c").cloned().unwrap(),
            )
        })
    }

    #[test]
    fn test_defaults_fill_missing_arguments() {
        let guard = guarded();
        let (a, b, c) = guard
            .call(&[Value::from("foo"), Value::Int(1)], &[])
            .unwrap();
        assert_eq!(a, Value::from("foo"));
        assert_eq!(b, Value::Int(1));
        assert_eq!(c, Value::from("default"));
    }

    #[test]
    fn test_bad_positional_argument() {
        let guard = guarded();
        let err = guard
            .call(&[Value::from("foo"), Value::Int(1), Value::Int(2)], &[])
            .unwrap_err();
        let flat = err.data_error().as_flat();
        assert_eq!(flat.len(), 1);
        assert_eq!(flat.get("c").and_then(FlatError::message), Some("value is not string"));
    }

    #[test]
    fn test_missing_required_argument() {
        let guard = guarded();
        let err: GuardError = guard
            .call::<(Value, Value, Value)>(&[Value::from("foo")], &[])
            .unwrap_err();
        let flat = err.data_error().as_flat();
        assert_eq!(flat.get("b").and_then(FlatError::message), Some("is required"));
    }

    #[test]
    fn test_named_arguments_override_positional() {
        let guard = guarded();
        let (_, b, _) = guard
            .call(
                &[Value::from("foo"), Value::Int(1)],
                &[("b", Value::Int(9))],
            )
            .unwrap();
        assert_eq!(b, Value::Int(9));
    }

    #[test]
    fn test_arguments_are_converted() {
        // Int coerces a numeric string before the function sees it.
        let guard = guarded();
        let (_, b, _) = guard
            .call(&[Value::from("foo"), Value::from("2")], &[])
            .unwrap();
        assert_eq!(b, Value::Int(2));
    }

    #[test]
    fn test_forward_schema() {
        let forward = Forward::new();
        forward
            .bind(Dict::new().field("a", Int::new()))
            .unwrap();
        let guard = Guard::with_forward(forward, vec![Param::new("a")], |args: Value| args);
        let checked = guard.call::<Value>(&[Value::Int(1)], &[]).unwrap();
        assert_eq!(checked, Value::object([("a", Value::Int(1))]));
    }
}
