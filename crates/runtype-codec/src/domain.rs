//! The domain-side type algebra.
//!
//! [`Domain`] closes nullability at the type level: `Nulled` is the
//! null-admitting form of a domain type, and it is idempotent —
//! `Option<T>::Nulled` is `Option<T>` itself, so an `or_null` chain can
//! never deepen, mirroring the runtime behavior of the raw side.

use chrono::{DateTime, Utc};
use runtype_core::Value;

/// A type usable as the domain side of a [`Transformable`].
///
/// [`Transformable`]: crate::Transformable
pub trait Domain: Clone + Send + Sync + 'static {
    /// The null-admitting form of this domain type. Idempotent.
    type Nulled: Domain<Nulled = Self::Nulled>;

    /// Widen a value into the null-admitting form.
    fn into_nulled(self) -> Self::Nulled;

    /// The null inhabitant of the widened form.
    fn null_value() -> Self::Nulled;

    /// Project the non-null part of a widened value, if present.
    fn as_non_null(nulled: &Self::Nulled) -> Option<&Self>;
}

/// Implements [`Domain`] for a base (non-nullable) domain type, widening
/// through `Option`.
#[macro_export]
macro_rules! impl_domain {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Domain for $ty {
                type Nulled = Option<$ty>;

                fn into_nulled(self) -> Option<$ty> {
                    Some(self)
                }

                fn null_value() -> Option<$ty> {
                    None
                }

                fn as_non_null(nulled: &Option<$ty>) -> Option<&$ty> {
                    nulled.as_ref()
                }
            }
        )+
    };
}

impl_domain!(bool, f64, i64, String, DateTime<Utc>, Vec<Value>);

/// `Option` is already null-admitting, so widening is the identity. The
/// `T: Domain<Nulled = Option<T>>` bound keeps the algebra flat: there is
/// no `Domain` impl for `Option<Option<T>>` at all.
impl<T> Domain for Option<T>
where
    T: Domain<Nulled = Option<T>>,
{
    type Nulled = Option<T>;

    fn into_nulled(self) -> Option<T> {
        self
    }

    fn null_value() -> Option<T> {
        None
    }

    fn as_non_null(nulled: &Option<T>) -> Option<&Option<T>> {
        if nulled.is_some() { Some(nulled) } else { None }
    }
}

/// The dynamic universe already contains `null`, so it is its own widened
/// form. This is what record composition converts through.
impl Domain for Value {
    type Nulled = Value;

    fn into_nulled(self) -> Value {
        self
    }

    fn null_value() -> Value {
        Value::Null
    }

    fn as_non_null(nulled: &Value) -> Option<&Value> {
        if nulled.is_null() { None } else { Some(nulled) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nulled_of<D: Domain>(value: D) -> D::Nulled {
        value.into_nulled()
    }

    #[test]
    fn base_types_widen_through_option() {
        assert_eq!(nulled_of(true), Some(true));
        assert_eq!(<bool as Domain>::null_value(), None::<bool>);
    }

    #[test]
    fn option_widening_is_identity() {
        assert_eq!(nulled_of(Some(1.5f64)), Some(1.5));
        assert_eq!(nulled_of(None::<f64>), None);
    }

    #[test]
    fn value_is_its_own_widened_form() {
        assert_eq!(nulled_of(Value::from(1)), Value::from(1));
        assert_eq!(<Value as Domain>::null_value(), Value::Null);
        assert_eq!(Value::as_non_null(&Value::Null), None);
        assert_eq!(Value::as_non_null(&Value::from(1)), Some(&Value::from(1)));
    }

    #[test]
    fn option_projection_skips_none() {
        assert_eq!(bool::as_non_null(&Some(true)), Some(&true));
        assert_eq!(bool::as_non_null(&None), None);
    }
}
