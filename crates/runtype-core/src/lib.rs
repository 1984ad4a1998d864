//! # Runtype Core
//!
//! Runtime shape checking for untyped values: a value arriving from
//! storage or the network is admitted into the program only after a
//! [`RuntimeType`] has vouched for its shape.
//!
//! This crate is **representation-agnostic**: it does not prescribe what
//! domain values look like (that is the codec layer's business). It only
//! prescribes how raw values are admitted at the boundary.
//!
//! ## Architecture
//!
//! ```text
//! Value                 ← The raw universe (null, undefined, numbers, …)
//!     │
//! RuntimeType           ← A predicate plus validated accessors
//!     │
//! or_null / or_undefined ← Nullability composition, memoized per instance
//!     │
//! with_default          ← Raw-slot fallback for undefined inputs
//! ```
//!
//! Every operation is synchronous and pure; the only mutation anywhere is
//! the one-time `OnceLock` initialization of a derived nullable sibling.

pub mod error;
pub mod primitive;
pub mod runtime;
pub mod value;

pub use error::InvalidTypeError;
pub use primitive::{boolean, date, null, number, object, string, strings, undefined, zero_or_one};
pub use runtime::RuntimeType;
pub use value::Value;
