//! Domain-vocabulary method naming.
//!
//! Dynamic hosts compute conversion method names at construction time
//! (`toPerk`, `fromPerks`, …). Here the same surface is generated
//! statically: [`named_transformable!`] emits an extension trait whose
//! four method names are chosen at the call site, implemented for the
//! matching [`Transformable`](crate::Transformable). Call sites then read
//! as domain vocabulary while keeping the validated conversion contract —
//! failures report the named entry point, not the generic one.

/// Generates a named conversion trait for a domain type.
///
/// ```
/// use runtype_codec::{TransformExt, Value, named_transformable};
/// use runtype_core::zero_or_one;
///
/// named_transformable! {
///     /// Conversions between storage flags and offer state.
///     pub trait OfferedCodec for bool {
///         to_offered, from_offered, to_offereds, from_offereds
///     }
/// }
///
/// let codec = zero_or_one().as_transformable(
///     "Offered",
///     |value: &Value| value.as_f64() == Some(1.0),
///     |offered: &bool| Value::from(if *offered { 1.0 } else { 0.0 }),
/// );
/// assert!(codec.to_offered(&Value::from(1)).unwrap());
/// ```
#[macro_export]
macro_rules! named_transformable {
    (
        $(#[$meta:meta])*
        $vis:vis trait $name:ident for $domain:ty {
            $to_one:ident, $from_one:ident, $to_many:ident, $from_many:ident $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis trait $name {
            fn $to_one(
                &self,
                value: &$crate::Value,
            ) -> Result<$domain, $crate::InvalidTypeError>;

            fn $from_one(&self, domain: &$domain) -> $crate::Value;

            fn $to_many(
                &self,
                values: &[$crate::Value],
            ) -> Result<Vec<$domain>, $crate::InvalidTypeError>;

            fn $from_many(&self, domains: &[$domain]) -> Vec<$crate::Value>;
        }

        impl $name for $crate::Transformable<$domain> {
            fn $to_one(
                &self,
                value: &$crate::Value,
            ) -> Result<$domain, $crate::InvalidTypeError> {
                self.to_domain_via(value, stringify!($to_one))
            }

            fn $from_one(&self, domain: &$domain) -> $crate::Value {
                self.from_domain(domain)
            }

            fn $to_many(
                &self,
                values: &[$crate::Value],
            ) -> Result<Vec<$domain>, $crate::InvalidTypeError> {
                self.to_domains_via(values, stringify!($to_many))
            }

            fn $from_many(&self, domains: &[$domain]) -> Vec<$crate::Value> {
                self.from_domains(domains)
            }
        }
    };
}
