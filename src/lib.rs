//! Trafaret
//!
//! Composable data validation: small checker primitives ("trafarets") that
//! combine, via alternation, sequencing, nesting and recursion, into schemas
//! that check and coerce untrusted structured data and report every
//! violation found, not just the first.
//!
//! # Architecture
//!
//! ```text
//! DataError           == the uniform error tree every trafaret reports with
//! Trafaret            == the check contract + converter pipeline
//! Or / List / Dict /
//! Mapping / Forward   == the combinators
//! Int / Float / Str / == leaf checks schemas bottom out in
//! Email / Url / ...
//! ```
//!
//! # Features
//!
//! - **Default**: core validation without serialization
//! - **serde**: `Value` interop with `serde_json`
//!
//! # Example
//!
//! ```rust
//! use trafaret::{Dict, Int, Key, Str, Trafaret, Value};
//!
//! let schema = Dict::new()
//!     .field("name", Str::new())
//!     .key(Key::new("age", Int::new().gte(0)).optional());
//!
//! let input = Value::object([
//!     ("name", Value::from("alice")),
//!     ("age", Value::from(30)),
//! ]);
//! assert!(schema.check(&input).is_ok());
//!
//! let bad = Value::object([("age", Value::from(-1))]);
//! let err = schema.check(&bad).unwrap_err();
//! assert_eq!(err.to_string(), "{age: value is less than 0, name: is required}");
//! ```

// Public modules
pub mod dict;
pub mod errors;
pub mod formats;
pub mod forward;
pub mod guard;
pub mod list;
pub mod mapping;
pub mod numeric;
pub mod or;
pub mod primitives;
pub mod strings;
pub mod trafaret;
pub mod types;

// Re-export commonly used types
pub use dict::{Dict, Key};
pub use errors::{DataError, ErrorKey, FlatError, SchemaError};
pub use forward::Forward;
pub use guard::{Guard, GuardError, Param};
pub use list::List;
pub use mapping::Mapping;
pub use numeric::{Float, Int};
pub use or::Or;
pub use primitives::{Any, Atom, Bool, Call, Enum, IsType, Null};
pub use strings::{Email, Str, Url};
pub use trafaret::{CheckResult, Converted, Converter, Trafaret, TrafaretExt};
pub use types::{Value, ValueKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
