//! Validation error tree and schema construction errors
//!
//! Every trafaret reports failure through [`DataError`], a recursive tree:
//! a *leaf* carries a single human-readable message, a *branch* aggregates
//! child errors keyed by sequence index or field name. The tree flattens
//! into [`FlatError`], the stable shape callers pattern-match on.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

// ============================================================================
// Error Keys
// ============================================================================

/// Key addressing a child error inside a branch
///
/// Sequence combinators key their children by 0-based index, mapping
/// combinators by field or entry name. `Ord` keeps branch iteration
/// deterministic: indices first in numeric order, then names lexically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKey {
    /// 0-based position in a sequence or alternation
    Index(usize),
    /// Field or entry name in a mapping
    Name(String),
}

impl fmt::Display for ErrorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{}", i),
            Self::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<usize> for ErrorKey {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for ErrorKey {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for ErrorKey {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

// ============================================================================
// Validation Error Tree
// ============================================================================

/// A validation failure, possibly nested
///
/// Composite trafarets never drop child failures: a branch collects every
/// child error produced in one pass over the input. A branch is never empty.
#[derive(Debug, Clone, PartialEq)]
pub enum DataError {
    /// A single failure message, optionally tagged with the field it
    /// concerns
    Leaf {
        /// Human-readable description of the failure
        message: String,
        /// Field name the failure is about, when known
        name: Option<String>,
    },
    /// Aggregated child failures keyed by index or name
    Branch(BTreeMap<ErrorKey, DataError>),
}

impl DataError {
    /// Create a leaf error from a message
    pub fn leaf(message: impl Into<String>) -> Self {
        Self::Leaf {
            message: message.into(),
            name: None,
        }
    }

    /// Create a leaf error tagged with a field name
    pub fn leaf_named(message: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Leaf {
            message: message.into(),
            name: Some(name.into()),
        }
    }

    /// Create a branch error from child errors
    ///
    /// Callers must supply at least one child.
    pub fn branch(children: BTreeMap<ErrorKey, DataError>) -> Self {
        debug_assert!(!children.is_empty(), "branch error must have children");
        Self::Branch(children)
    }

    /// Whether this error is a single message
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Flatten the tree into the plain nested shape used for presentation
    pub fn as_flat(&self) -> FlatError {
        match self {
            Self::Leaf { message, .. } => FlatError::Message(message.clone()),
            Self::Branch(children) => FlatError::Map(
                children
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.as_flat()))
                    .collect(),
            ),
        }
    }
}

// Leaves render as their message, branches as `{key: child, ...}` in key
// order.
impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf { message, .. } => write!(f, "{}", message),
            Self::Branch(children) => {
                write!(f, "{{")?;
                for (i, (key, child)) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, child)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl std::error::Error for DataError {}

// ============================================================================
// Flattened Error Shape
// ============================================================================

/// Flattened error tree for logging or user display
///
/// Branch keys are rendered as strings (indices in decimal). This shape is
/// the sole externally observed error structure and stays stable.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum FlatError {
    /// A leaf message
    Message(String),
    /// Nested child errors
    Map(BTreeMap<String, FlatError>),
}

impl FlatError {
    /// Get the leaf message, if this is a leaf
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Message(msg) => Some(msg),
            Self::Map(_) => None,
        }
    }

    /// Get a nested child by key, if this is a map
    pub fn get(&self, key: &str) -> Option<&FlatError> {
        match self {
            Self::Message(_) => None,
            Self::Map(children) => children.get(key),
        }
    }

    /// Number of direct children (0 for a leaf)
    pub fn len(&self) -> usize {
        match self {
            Self::Message(_) => 0,
            Self::Map(children) => children.len(),
        }
    }

    /// Whether this node has no children
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// Schema Construction Errors
// ============================================================================

/// Fatal error raised while building a schema, never during validation
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A `Forward` was bound twice
    #[error("trafaret for Forward is already specified")]
    ForwardAlreadyBound,

    /// A string pattern failed to compile
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}
