//! Numeric trafarets
//!
//! `Int` and `Float` coerce convertible input (textual or alternate numeric
//! representation) before applying their bounds. Bounds are configurable as
//! inclusive (`gte`/`lte`) or exclusive (`gt`/`lt`).

use std::collections::HashSet;
use std::fmt;

use crate::errors::DataError;
use crate::trafaret::{CheckResult, Trafaret};
use crate::types::Value;

// ============================================================================
// Bounds (generic over i64 and f64)
// ============================================================================

#[derive(Debug, Clone, Default)]
struct Bounds<T> {
    gte: Option<T>,
    lte: Option<T>,
    gt: Option<T>,
    lt: Option<T>,
}

impl<T> Bounds<T>
where
    T: PartialOrd + fmt::Display + Copy,
{
    fn check(&self, value: T) -> Result<(), DataError> {
        if let Some(gte) = self.gte {
            if value < gte {
                return Err(DataError::leaf(format!("value is less than {}", gte)));
            }
        }
        if let Some(lte) = self.lte {
            if value > lte {
                return Err(DataError::leaf(format!("value is greater than {}", lte)));
            }
        }
        if let Some(lt) = self.lt {
            if value >= lt {
                return Err(DataError::leaf(format!("value should be less than {}", lt)));
            }
        }
        if let Some(gt) = self.gt {
            if value <= gt {
                return Err(DataError::leaf(format!(
                    "value should be greater than {}",
                    gt
                )));
            }
        }
        Ok(())
    }

    fn describe(&self, name: &str) -> String {
        let mut options = Vec::new();
        if let Some(gte) = self.gte {
            options.push(format!("gte={}", gte));
        }
        if let Some(lte) = self.lte {
            options.push(format!("lte={}", lte));
        }
        if let Some(gt) = self.gt {
            options.push(format!("gt={}", gt));
        }
        if let Some(lt) = self.lt {
            options.push(format!("lt={}", lt));
        }
        if options.is_empty() {
            format!("<{}>", name)
        } else {
            format!("<{}({})>", name, options.join(", "))
        }
    }
}

// ============================================================================
// Float
// ============================================================================

/// Accepts floats; coerces integers and numeric strings
#[derive(Debug, Clone, Default)]
pub struct Float {
    bounds: Bounds<f64>,
}

impl Float {
    /// Create an unbounded `Float` trafaret
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the value to be at least `bound` (inclusive)
    pub fn gte(mut self, bound: f64) -> Self {
        self.bounds.gte = Some(bound);
        self
    }

    /// Require the value to be at most `bound` (inclusive)
    pub fn lte(mut self, bound: f64) -> Self {
        self.bounds.lte = Some(bound);
        self
    }

    /// Require the value to be strictly greater than `bound`
    pub fn gt(mut self, bound: f64) -> Self {
        self.bounds.gt = Some(bound);
        self
    }

    /// Require the value to be strictly less than `bound`
    pub fn lt(mut self, bound: f64) -> Self {
        self.bounds.lt = Some(bound);
        self
    }

    fn coerce(&self, value: &Value) -> Result<f64, DataError> {
        match value {
            Value::Float(x) => Ok(*x),
            Value::Int(i) => Ok(*i as f64),
            Value::String(s) => s
                .parse::<f64>()
                .map_err(|_| DataError::leaf("value can't be converted to float")),
            _ => Err(DataError::leaf("value is not float")),
        }
    }
}

impl Trafaret for Float {
    fn check_value(&self, value: &Value) -> CheckResult {
        let num = self.coerce(value)?;
        self.bounds.check(num)?;
        Ok(Value::Float(num))
    }

    fn repr(&self, _visiting: &mut HashSet<usize>) -> String {
        self.bounds.describe("Float")
    }
}

// ============================================================================
// Int
// ============================================================================

/// Accepts integers; coerces integral floats and numeric strings
///
/// Fractional floats are rejected, not truncated.
#[derive(Debug, Clone, Default)]
pub struct Int {
    bounds: Bounds<i64>,
}

impl Int {
    /// Create an unbounded `Int` trafaret
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the value to be at least `bound` (inclusive)
    pub fn gte(mut self, bound: i64) -> Self {
        self.bounds.gte = Some(bound);
        self
    }

    /// Require the value to be at most `bound` (inclusive)
    pub fn lte(mut self, bound: i64) -> Self {
        self.bounds.lte = Some(bound);
        self
    }

    /// Require the value to be strictly greater than `bound`
    pub fn gt(mut self, bound: i64) -> Self {
        self.bounds.gt = Some(bound);
        self
    }

    /// Require the value to be strictly less than `bound`
    pub fn lt(mut self, bound: i64) -> Self {
        self.bounds.lt = Some(bound);
        self
    }

    fn coerce(&self, value: &Value) -> Result<i64, DataError> {
        match value {
            Value::Int(i) => Ok(*i),
            Value::Float(x) => {
                if x.fract() == 0.0 && *x >= i64::MIN as f64 && *x <= i64::MAX as f64 {
                    Ok(*x as i64)
                } else {
                    Err(DataError::leaf("value is not int"))
                }
            }
            Value::String(s) => s
                .parse::<i64>()
                .map_err(|_| DataError::leaf("value can't be converted to int")),
            _ => Err(DataError::leaf("value is not int")),
        }
    }
}

impl Trafaret for Int {
    fn check_value(&self, value: &Value) -> CheckResult {
        let num = self.coerce(value)?;
        self.bounds.check(num)?;
        Ok(Value::Int(num))
    }

    fn repr(&self, _visiting: &mut HashSet<usize>) -> String {
        self.bounds.describe("Int")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_basic() {
        assert_eq!(Int::new().check(&Value::Int(5)), Ok(Value::Int(5)));
        let err = Int::new().check(&Value::Float(1.1)).unwrap_err();
        assert_eq!(err.to_string(), "value is not int");
        let err = Int::new().check(&Value::Bool(true)).unwrap_err();
        assert_eq!(err.to_string(), "value is not int");
    }

    #[test]
    fn test_int_coerces_integral_float() {
        assert_eq!(Int::new().check(&Value::Float(3.0)), Ok(Value::Int(3)));
    }

    #[test]
    fn test_int_coerces_string() {
        assert_eq!(Int::new().check(&Value::from("42")), Ok(Value::Int(42)));
        let err = Int::new().check(&Value::from("a")).unwrap_err();
        assert_eq!(err.to_string(), "value can't be converted to int");
    }

    #[test]
    fn test_int_bounds() {
        assert_eq!(Int::new().gt(5).check(&Value::Int(10)), Ok(Value::Int(10)));
        let err = Int::new().gt(5).check(&Value::Int(1)).unwrap_err();
        assert_eq!(err.to_string(), "value should be greater than 5");

        assert_eq!(Int::new().lt(3).check(&Value::Int(1)), Ok(Value::Int(1)));
        let err = Int::new().lt(3).check(&Value::Int(3)).unwrap_err();
        assert_eq!(err.to_string(), "value should be less than 3");

        let err = Int::new().gte(2).check(&Value::Int(1)).unwrap_err();
        assert_eq!(err.to_string(), "value is less than 2");
        let err = Int::new().lte(3).check(&Value::Int(5)).unwrap_err();
        assert_eq!(err.to_string(), "value is greater than 3");

        // Inclusive boundaries pass
        assert_eq!(
            Int::new().gte(1).lte(10).check(&Value::Int(1)),
            Ok(Value::Int(1))
        );
        assert_eq!(
            Int::new().gte(1).lte(10).check(&Value::Int(10)),
            Ok(Value::Int(10))
        );
    }

    #[test]
    fn test_float_basic() {
        assert_eq!(Float::new().check(&Value::Float(1.0)), Ok(Value::Float(1.0)));
        assert_eq!(Float::new().check(&Value::Int(1)), Ok(Value::Float(1.0)));
        assert_eq!(Float::new().check(&Value::from("5.0")), Ok(Value::Float(5.0)));
        let err = Float::new().check(&Value::Null).unwrap_err();
        assert_eq!(err.to_string(), "value is not float");
        let err = Float::new().check(&Value::from("abc")).unwrap_err();
        assert_eq!(err.to_string(), "value can't be converted to float");
    }

    #[test]
    fn test_float_bounds() {
        assert_eq!(
            Float::new().gte(2.0).check(&Value::Float(3.0)),
            Ok(Value::Float(3.0))
        );
        let err = Float::new().gte(2.0).check(&Value::Float(1.0)).unwrap_err();
        assert_eq!(err.to_string(), "value is less than 2");
        let err = Float::new().lte(3.0).check(&Value::Float(5.0)).unwrap_err();
        assert_eq!(err.to_string(), "value is greater than 3");
    }

    #[test]
    fn test_repr() {
        assert_eq!(Int::new().describe(), "<Int>");
        assert_eq!(Int::new().gte(1).describe(), "<Int(gte=1)>");
        assert_eq!(Int::new().gte(1).lte(10).describe(), "<Int(gte=1, lte=10)>");
        assert_eq!(Float::new().gt(1.0).lt(10.0).describe(), "<Float(gt=1, lt=10)>");
    }
}
