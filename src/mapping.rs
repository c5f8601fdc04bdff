//! Dynamic-mapping combinator

use std::collections::{BTreeMap, HashSet};

use crate::errors::{DataError, ErrorKey};
use crate::trafaret::{CheckResult, Trafaret};
use crate::types::Value;

/// Validates an arbitrary-size key-to-value collection
///
/// Every entry's key and value are checked against two independent
/// trafarets. Both are always attempted, even when one has already failed,
/// so a single check surfaces both problems of a bad entry. Entry failures
/// are branches keyed `"key"` / `"value"`, collected under the original
/// input key.
pub struct Mapping {
    key: Box<dyn Trafaret>,
    value: Box<dyn Trafaret>,
}

impl Mapping {
    /// Create a `Mapping` from a key trafaret and a value trafaret
    pub fn new(key: impl Trafaret + 'static, value: impl Trafaret + 'static) -> Self {
        Self {
            key: Box::new(key),
            value: Box::new(value),
        }
    }
}

// Validated keys may have been coerced away from strings; the output object
// needs them back in string form.
fn key_string(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl Trafaret for Mapping {
    fn check_value(&self, value: &Value) -> CheckResult {
        let Value::Object(pairs) = value else {
            return Err(DataError::leaf("value is not dict"));
        };
        let mut collected: Vec<(String, Value)> = Vec::new();
        let mut errors: BTreeMap<ErrorKey, DataError> = BTreeMap::new();

        for (name, entry) in pairs {
            let key_result = self.key.check(&Value::String(name.clone()));
            let value_result = self.value.check(entry);

            let mut entry_errors = BTreeMap::new();
            if let Err(err) = &key_result {
                entry_errors.insert(ErrorKey::from("key"), err.clone());
            }
            if let Err(err) = &value_result {
                entry_errors.insert(ErrorKey::from("value"), err.clone());
            }

            match (key_result, value_result) {
                (Ok(checked_key), Ok(checked_value)) => {
                    collected.push((key_string(&checked_key), checked_value));
                }
                _ => {
                    errors.insert(
                        ErrorKey::Name(name.clone()),
                        DataError::branch(entry_errors),
                    );
                }
            }
        }

        if errors.is_empty() {
            Ok(Value::Object(collected))
        } else {
            Err(DataError::branch(errors))
        }
    }

    fn repr(&self, visiting: &mut HashSet<usize>) -> String {
        format!(
            "<Mapping({} => {})>",
            self.key.repr(visiting),
            self.value.repr(visiting)
        )
    }
}
