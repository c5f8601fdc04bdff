//! Sequence combinator

use std::collections::{BTreeMap, HashSet};

use crate::errors::{DataError, ErrorKey};
use crate::trafaret::{CheckResult, Trafaret};
use crate::types::Value;

/// Validates a homogeneous ordered collection
///
/// Every element is checked against the child trafaret; element failures
/// never short-circuit, so the branch error reports each failing index. A
/// single failing element discards the whole output: there is no partial
/// success value.
pub struct List {
    trafaret: Box<dyn Trafaret>,
    min_length: usize,
    max_length: Option<usize>,
}

impl List {
    /// Create a `List` over the given element trafaret
    pub fn new(trafaret: impl Trafaret + 'static) -> Self {
        Self {
            trafaret: Box::new(trafaret),
            min_length: 0,
            max_length: None,
        }
    }

    /// Require at least `length` elements (inclusive)
    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = length;
        self
    }

    /// Require at most `length` elements (inclusive)
    pub fn max_length(mut self, length: usize) -> Self {
        self.max_length = Some(length);
        self
    }
}

impl Trafaret for List {
    fn check_value(&self, value: &Value) -> CheckResult {
        let Value::List(items) = value else {
            return Err(DataError::leaf("value is not list"));
        };
        if items.len() < self.min_length {
            return Err(DataError::leaf(format!(
                "list length is less than {}",
                self.min_length
            )));
        }
        if let Some(max_length) = self.max_length {
            if items.len() > max_length {
                return Err(DataError::leaf(format!(
                    "list length is greater than {}",
                    max_length
                )));
            }
        }

        let mut collected = Vec::with_capacity(items.len());
        let mut errors = BTreeMap::new();
        for (index, item) in items.iter().enumerate() {
            match self.trafaret.check(item) {
                Ok(converted) => collected.push(converted),
                Err(err) => {
                    errors.insert(ErrorKey::Index(index), err);
                }
            }
        }
        if errors.is_empty() {
            Ok(Value::List(collected))
        } else {
            Err(DataError::branch(errors))
        }
    }

    fn repr(&self, visiting: &mut HashSet<usize>) -> String {
        let mut options = Vec::new();
        if self.min_length > 0 {
            options.push(format!("min_length={}", self.min_length));
        }
        if let Some(max_length) = self.max_length {
            options.push(format!("max_length={}", max_length));
        }
        let child = self.trafaret.repr(visiting);
        if options.is_empty() {
            format!("<List({})>", child)
        } else {
            format!("<List({} | {})>", options.join(", "), child)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FlatError;
    use crate::numeric::Int;
    use crate::strings::Str;

    #[test]
    fn test_list_basic() {
        let ints = List::new(Int::new());
        assert_eq!(
            ints.check(&Value::list([Value::Int(1), Value::Int(2), Value::Int(3)])),
            Ok(Value::list([Value::Int(1), Value::Int(2), Value::Int(3)]))
        );
        let err = ints.check(&Value::Int(1)).unwrap_err();
        assert_eq!(err.to_string(), "value is not list");
    }

    #[test]
    fn test_list_reports_every_failing_index() {
        let ints = List::new(Int::new());
        let input = Value::list([
            Value::Int(1),
            Value::from("x"),
            Value::Int(2),
            Value::from("y"),
        ]);
        let flat = ints.check(&input).unwrap_err().as_flat();
        assert_eq!(flat.len(), 2);
        assert!(flat.get("1").is_some());
        assert!(flat.get("3").is_some());
        assert!(flat.get("0").is_none());
        assert!(flat.get("2").is_none());
    }

    #[test]
    fn test_list_length_bounds() {
        let ints = List::new(Int::new()).min_length(1);
        let err = ints.check(&Value::List(vec![])).unwrap_err();
        assert_eq!(err.to_string(), "list length is less than 1");

        let ints = List::new(Int::new()).max_length(2);
        assert_eq!(
            ints.check(&Value::list([Value::Int(1), Value::Int(2)])),
            Ok(Value::list([Value::Int(1), Value::Int(2)]))
        );
        let err = ints
            .check(&Value::list([Value::Int(1), Value::Int(2), Value::Int(3)]))
            .unwrap_err();
        assert_eq!(err.to_string(), "list length is greater than 2");
    }

    #[test]
    fn test_list_elements_are_converted() {
        // Int coerces numeric strings; the output carries the coerced values.
        let ints = List::new(Int::new());
        assert_eq!(
            ints.check(&Value::list([Value::from("1"), Value::Int(2)])),
            Ok(Value::list([Value::Int(1), Value::Int(2)]))
        );
    }

    #[test]
    fn test_list_element_coercion_error_message() {
        let ints = List::new(Int::new());
        let flat = ints.check(&Value::list([Value::from("a")])).unwrap_err().as_flat();
        assert_eq!(
            flat.get("0").and_then(FlatError::message),
            Some("value can't be converted to int")
        );
    }

    #[test]
    fn test_repr() {
        assert_eq!(List::new(Int::new()).describe(), "<List(<Int>)>");
        assert_eq!(
            List::new(Str::new()).min_length(1).max_length(10).describe(),
            "<List(min_length=1, max_length=10 | <Str>)>"
        );
    }
}
