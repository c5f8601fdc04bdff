//! Recursive reference
//!
//! `Forward` is a placeholder bound after construction, enabling
//! self-referential schemas: clone the forward into a schema under
//! construction, then bind it to that schema. Validation terminates because
//! recursion follows the finite input data, not the schema's structural
//! cycle.

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use crate::errors::{DataError, SchemaError};
use crate::trafaret::{CheckResult, Trafaret};
use crate::types::Value;

/// A bind-once placeholder trafaret
///
/// Clones share the binding slot, so a clone embedded in a schema resolves
/// once the original is bound. Binding must complete before the schema is
/// shared for checking; binding twice is a construction error.
#[derive(Clone, Default)]
pub struct Forward {
    slot: Arc<OnceLock<Box<dyn Trafaret>>>,
}

impl Forward {
    /// Create an unbound placeholder
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the real trafaret
    pub fn bind(&self, trafaret: impl Trafaret + 'static) -> Result<(), SchemaError> {
        self.slot
            .set(Box::new(trafaret))
            .map_err(|_| SchemaError::ForwardAlreadyBound)
    }

    /// Whether a trafaret has been bound
    pub fn is_bound(&self) -> bool {
        self.slot.get().is_some()
    }

    fn slot_id(&self) -> usize {
        Arc::as_ptr(&self.slot) as usize
    }
}

impl Trafaret for Forward {
    fn check_value(&self, value: &Value) -> CheckResult {
        match self.slot.get() {
            Some(trafaret) => trafaret.check(value),
            // A well-formed schema binds before checking; an unbound forward
            // is a schema-construction mistake surfaced here.
            None => Err(DataError::leaf("trafaret is not provided")),
        }
    }

    fn repr(&self, visiting: &mut HashSet<usize>) -> String {
        let id = self.slot_id();
        if !visiting.insert(id) {
            return "<recur>".to_string();
        }
        let described = match self.slot.get() {
            Some(trafaret) => format!("<Forward({})>", trafaret.repr(visiting)),
            None => "<Forward(unbound)>".to_string(),
        };
        visiting.remove(&id);
        described
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dict::Dict;
    use crate::errors::FlatError;
    use crate::list::List;
    use crate::strings::Str;

    fn node_schema() -> Forward {
        let node = Forward::new();
        let schema = Dict::new()
            .field("name", Str::new())
            .field("children", List::new(node.clone()));
        node.bind(schema).unwrap();
        node
    }

    #[test]
    fn test_recursive_schema_accepts_nested_input() {
        let node = node_schema();
        let input = Value::object([
            ("name", Value::from("foo")),
            (
                "children",
                Value::list([Value::object([
                    ("name", Value::from("bar")),
                    ("children", Value::List(vec![])),
                ])]),
            ),
        ]);
        assert_eq!(node.check(&input), Ok(input.clone()));
    }

    #[test]
    fn test_recursive_schema_rejects_bad_child() {
        let node = node_schema();
        let input = Value::object([
            ("name", Value::from("foo")),
            ("children", Value::list([Value::Int(1)])),
        ]);
        let flat = node.check(&input).unwrap_err().as_flat();
        let at_child = flat.get("children").and_then(|c| c.get("0"));
        assert_eq!(at_child.and_then(FlatError::message), Some("value is not dict"));
    }

    #[test]
    fn test_bind_twice_is_construction_error() {
        let forward = Forward::new();
        forward.bind(Str::new()).unwrap();
        let err = forward.bind(Str::new()).unwrap_err();
        assert!(matches!(err, SchemaError::ForwardAlreadyBound));
    }

    #[test]
    fn test_unbound_check_fails() {
        let forward = Forward::new();
        assert!(!forward.is_bound());
        let err = forward.check(&Value::Int(1)).unwrap_err();
        assert_eq!(err.to_string(), "trafaret is not provided");
    }

    #[test]
    fn test_recursive_repr_terminates() {
        let node = node_schema();
        assert_eq!(
            node.describe(),
            "<Forward(<Dict(children=<List(<recur>)>, name=<Str>)>)>"
        );
    }

    #[test]
    fn test_clones_share_the_binding() {
        let forward = Forward::new();
        let clone = forward.clone();
        forward.bind(Str::new()).unwrap();
        assert!(clone.is_bound());
        assert!(matches!(
            clone.bind(Str::new()).unwrap_err(),
            SchemaError::ForwardAlreadyBound
        ));
    }
}
