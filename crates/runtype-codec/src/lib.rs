//! # Runtype Codec
//!
//! Bidirectional raw/domain conversion on top of [`runtype_core`].
//!
//! A [`Transformable`] pairs a runtime type over the raw universe with a
//! pure function pair mapping raw → domain and domain → raw. The domain
//! side is statically typed, so only the raw direction validates; the
//! domain direction is total by construction.
//!
//! ## Architecture
//!
//! ```text
//! RuntimeType            ← Raw-side admission (runtype-core)
//!     │
//! Transformable<D>       ← to()/from() pair, typed domain D
//!     │
//! Domain / or_null       ← Nullability propagated into the domain type
//!     │
//! named_transformable!   ← Domain-vocabulary method surface
//!     │
//! RecordSpec             ← Per-field descriptors lifted to whole records
//! ```
//!
//! Defaults are order-sensitive by design: a default attached to the
//! runtime type *before* `to()/from()` lives in the raw slot and flows
//! through the transform; a default attached to the transformable *after*
//! the pair lives in the domain slot and bypasses it. The two placements
//! take different types (`Value` vs `D`), so the chain position is visible
//! in the signature.

mod domain;
mod named;
mod record;
mod transform;

pub use domain::Domain;
pub use record::{FieldSpec, RecordSpec};
pub use transform::{ToBuilder, TransformExt, Transformable};

pub use runtype_core::{InvalidTypeError, RuntimeType, Value};
