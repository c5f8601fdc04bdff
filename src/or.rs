//! Alternation combinator

use std::collections::{BTreeMap, HashSet};

use crate::errors::{DataError, ErrorKey};
use crate::trafaret::{CheckResult, Trafaret};
use crate::types::Value;

/// Tries alternatives in declaration order; first success wins
///
/// Order is a tie-break and is preserved: once an alternative succeeds no
/// further one is evaluated. If every alternative fails the result is a
/// branch error keyed by each alternative's 0-based position.
pub struct Or {
    trafarets: Vec<Box<dyn Trafaret>>,
}

impl Or {
    /// Create an alternation with a single candidate
    pub fn new(trafaret: impl Trafaret + 'static) -> Self {
        Self {
            trafarets: vec![Box::new(trafaret)],
        }
    }

    /// Append another candidate to the end of the order
    ///
    /// This shadows [`TrafaretExt::or`](crate::TrafaretExt::or) so composing
    /// into an existing `Or` appends rather than nesting.
    pub fn or(mut self, trafaret: impl Trafaret + 'static) -> Self {
        self.trafarets.push(Box::new(trafaret));
        self
    }
}

impl Trafaret for Or {
    fn check_value(&self, value: &Value) -> CheckResult {
        let mut errors = BTreeMap::new();
        for (index, trafaret) in self.trafarets.iter().enumerate() {
            match trafaret.check(value) {
                Ok(converted) => return Ok(converted),
                Err(err) => {
                    errors.insert(ErrorKey::Index(index), err);
                }
            }
        }
        Err(DataError::branch(errors))
    }

    fn repr(&self, visiting: &mut HashSet<usize>) -> String {
        let alternatives: Vec<String> =
            self.trafarets.iter().map(|t| t.repr(visiting)).collect();
        format!("<Or({})>", alternatives.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FlatError;
    use crate::numeric::Int;
    use crate::primitives::Null;
    use crate::strings::Str;
    use crate::trafaret::TrafaretExt;

    #[test]
    fn test_first_success_wins() {
        let null_string = Str::new().or(Null::new());
        assert_eq!(null_string.check(&Value::Null), Ok(Value::Null));
        assert_eq!(null_string.check(&Value::from("test")), Ok(Value::from("test")));
    }

    #[test]
    fn test_all_branches_reported_on_failure() {
        let null_string = Str::new().or(Null::new());
        let flat = null_string.check(&Value::Int(1)).unwrap_err().as_flat();
        assert_eq!(flat.len(), 2);
        assert_eq!(flat.get("0").and_then(FlatError::message), Some("value is not string"));
        assert_eq!(flat.get("1").and_then(FlatError::message), Some("value should be null"));
    }

    #[test]
    fn test_or_appends_instead_of_nesting() {
        let three = Int::new().or(Str::new()).or(Null::new());
        assert_eq!(three.describe(), "<Or(<Int>, <Str>, <Null>)>");
        let flat = three.check(&Value::List(vec![])).unwrap_err().as_flat();
        assert_eq!(flat.len(), 3);
    }

    #[test]
    fn test_declaration_order_is_a_tie_break() {
        // Int first coerces "5" to an integer; Str first keeps the string.
        let int_first = Int::new().or(Str::new());
        assert_eq!(int_first.check(&Value::from("5")), Ok(Value::Int(5)));

        let str_first = Str::new().or(Int::new());
        assert_eq!(str_first.check(&Value::from("5")), Ok(Value::from("5")));
    }
}
