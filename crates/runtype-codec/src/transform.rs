//! Transformable runtime types: a raw-side runtime type plus a pure
//! raw→domain / domain→raw function pair.
//!
//! Construction is two-step by design — `ty.to(..)` returns a builder
//! that only [`ToBuilder::from`] completes — so both mapping directions
//! are supplied together and no half-built pair is observable.

use crate::domain::Domain;
use runtype_core::{InvalidTypeError, RuntimeType, Value};
use std::fmt;
use std::sync::{Arc, OnceLock};

type ToFn<D> = Arc<dyn Fn(&Value) -> D + Send + Sync>;
type FromFn<D> = Arc<dyn Fn(&D) -> Value + Send + Sync>;

/// A runtime type over a raw shape, coupled with a bidirectional mapping
/// into a typed domain `D`.
///
/// The raw direction validates before converting; the domain direction is
/// total — domain inputs are already well-typed by the caller's own type
/// system and are not separately checked.
pub struct Transformable<D: Domain> {
    inner: Arc<Inner<D>>,
}

struct Inner<D: Domain> {
    raw: RuntimeType,
    to_fn: ToFn<D>,
    from_fn: FromFn<D>,
    domain_default: Option<D>,
    or_null: OnceLock<Transformable<D::Nulled>>,
}

impl<D: Domain> Clone for Transformable<D> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// The intermediate of the two-step `to()/from()` construction. Holds the
/// raw→domain direction and waits for its inverse.
pub struct ToBuilder<D: Domain> {
    raw: RuntimeType,
    to_fn: ToFn<D>,
}

impl<D: Domain> ToBuilder<D> {
    /// Supply the domain→raw direction, completing the pair.
    pub fn from(self, from_fn: impl Fn(&D) -> Value + Send + Sync + 'static) -> Transformable<D> {
        Transformable::assemble(self.raw, self.to_fn, Arc::new(from_fn), None)
    }
}

/// Entry points that lift a [`RuntimeType`] into the transformable layer.
pub trait TransformExt {
    /// Begin a transform pair with the raw→domain direction.
    fn to<D: Domain>(
        &self,
        to_fn: impl Fn(&Value) -> D + Send + Sync + 'static,
    ) -> ToBuilder<D>;

    /// Build a named transformable in one step. The domain name becomes
    /// the expected-type label, so failures read as domain vocabulary.
    fn as_transformable<D: Domain>(
        &self,
        domain_name: &str,
        to_fn: impl Fn(&Value) -> D + Send + Sync + 'static,
        from_fn: impl Fn(&D) -> Value + Send + Sync + 'static,
    ) -> Transformable<D>;
}

impl TransformExt for RuntimeType {
    fn to<D: Domain>(
        &self,
        to_fn: impl Fn(&Value) -> D + Send + Sync + 'static,
    ) -> ToBuilder<D> {
        ToBuilder {
            raw: self.clone(),
            to_fn: Arc::new(to_fn),
        }
    }

    fn as_transformable<D: Domain>(
        &self,
        domain_name: &str,
        to_fn: impl Fn(&Value) -> D + Send + Sync + 'static,
        from_fn: impl Fn(&D) -> Value + Send + Sync + 'static,
    ) -> Transformable<D> {
        Transformable::assemble(
            self.renamed(domain_name),
            Arc::new(to_fn),
            Arc::new(from_fn),
            None,
        )
    }
}

impl<D: Domain> Transformable<D> {
    fn assemble(
        raw: RuntimeType,
        to_fn: ToFn<D>,
        from_fn: FromFn<D>,
        domain_default: Option<D>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                raw,
                to_fn,
                from_fn,
                domain_default,
                or_null: OnceLock::new(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.raw.name()
    }

    /// The raw-side runtime type.
    pub fn raw_type(&self) -> &RuntimeType {
        &self.inner.raw
    }

    /// The domain-slot default, when one has been attached.
    pub fn domain_default(&self) -> Option<&D> {
        self.inner.domain_default.as_ref()
    }

    pub fn is_type(&self, value: &Value) -> bool {
        self.inner.raw.is_type(value)
    }

    pub fn check(&self, value: &Value) -> Result<(), InvalidTypeError> {
        self.inner.raw.check(value)
    }

    pub fn from_value(&self, value: Value) -> Result<Value, InvalidTypeError> {
        self.inner.raw.from_value(value)
    }

    pub fn from_all(&self, values: Vec<Value>) -> Result<Vec<Value>, InvalidTypeError> {
        self.inner.raw.from_all(values)
    }

    /// Attach a domain-slot default: `to_domain` on an `Undefined` input
    /// returns it verbatim, bypassing the transform. Contrast with
    /// [`RuntimeType::with_default`], whose raw-slot default flows
    /// *through* the transform; the raw slot wins when both are set.
    pub fn with_default(&self, domain_default: D) -> Transformable<D> {
        Self::assemble(
            self.inner.raw.clone(),
            self.inner.to_fn.clone(),
            self.inner.from_fn.clone(),
            Some(domain_default),
        )
    }

    /// Validate the raw value, then map it into the domain.
    pub fn to_domain(&self, value: &Value) -> Result<D, InvalidTypeError> {
        self.convert_to(value, "to_domain", None)
    }

    /// Map a domain value back to its raw form. Total by construction.
    pub fn from_domain(&self, domain: &D) -> Value {
        (*self.inner.from_fn)(domain)
    }

    /// Element-wise [`to_domain`](Self::to_domain): preserves length and
    /// order, fails on the first offending element with its index.
    pub fn to_domains(&self, values: &[Value]) -> Result<Vec<D>, InvalidTypeError> {
        self.to_domains_via(values, "to_domains")
    }

    /// Element-wise [`from_domain`](Self::from_domain).
    pub fn from_domains(&self, domains: &[D]) -> Vec<Value> {
        domains.iter().map(|domain| self.from_domain(domain)).collect()
    }

    /// Backs the named conversion surface generated by
    /// [`named_transformable!`](crate::named_transformable): same contract
    /// as [`to_domain`](Self::to_domain) with the caller's method name
    /// threaded into failures.
    pub fn to_domain_via(
        &self,
        value: &Value,
        via: &'static str,
    ) -> Result<D, InvalidTypeError> {
        self.convert_to(value, via, None)
    }

    /// Plural counterpart of [`to_domain_via`](Self::to_domain_via).
    pub fn to_domains_via(
        &self,
        values: &[Value],
        via: &'static str,
    ) -> Result<Vec<D>, InvalidTypeError> {
        values
            .iter()
            .enumerate()
            .map(|(index, value)| self.convert_to(value, via, Some(index)))
            .collect()
    }

    fn convert_to(
        &self,
        value: &Value,
        via: &'static str,
        at_index: Option<usize>,
    ) -> Result<D, InvalidTypeError> {
        if value.is_undefined() {
            if let Some(raw_default) = self.inner.raw.default_value() {
                return Ok((*self.inner.to_fn)(raw_default));
            }
            if let Some(domain_default) = &self.inner.domain_default {
                return Ok(domain_default.clone());
            }
        }
        if !self.inner.raw.is_type(value) {
            let mut error = InvalidTypeError::new(value.clone(), self.name()).via(via);
            if let Some(index) = at_index {
                error = error.at_index(index);
            }
            return Err(error);
        }
        Ok((*self.inner.to_fn)(value))
    }

    /// The sibling transformable additionally admitting `null`, with the
    /// domain widened to [`D::Nulled`](Domain::Nulled).
    ///
    /// Derived on first access and cached on this instance. Conversions
    /// pass `null` through unchanged in both directions; defaults are
    /// inherited. Because `Nulled` is idempotent, repeated derivation
    /// stays at the same domain type.
    pub fn or_null(&self) -> &Transformable<D::Nulled> {
        self.inner.or_null.get_or_init(|| {
            let raw = self.inner.raw.or_null().clone();

            let to_fn = self.inner.to_fn.clone();
            let to_fn: ToFn<D::Nulled> = Arc::new(move |value: &Value| {
                if value.is_null() {
                    D::null_value()
                } else {
                    (*to_fn)(value).into_nulled()
                }
            });

            let from_fn = self.inner.from_fn.clone();
            let from_fn: FromFn<D::Nulled> =
                Arc::new(move |domain: &D::Nulled| match D::as_non_null(domain) {
                    Some(inner) => (*from_fn)(inner),
                    None => Value::Null,
                });

            let domain_default = self.inner.domain_default.clone().map(D::into_nulled);
            Transformable::assemble(raw, to_fn, from_fn, domain_default)
        })
    }
}

impl Transformable<Value> {
    /// The sibling codec additionally admitting `undefined`, passing it
    /// through both directions. Only the dynamic-domain form needs this —
    /// it is what record composition consumes for optional fields.
    pub fn or_undefined(&self) -> Transformable<Value> {
        if self.inner.raw.accepts_undefined() {
            return self.clone();
        }
        let raw = self.inner.raw.or_undefined().clone();

        let to_fn = self.inner.to_fn.clone();
        let to_fn: ToFn<Value> = Arc::new(move |value: &Value| {
            if value.is_undefined() {
                Value::Undefined
            } else {
                (*to_fn)(value)
            }
        });

        let from_fn = self.inner.from_fn.clone();
        let from_fn: FromFn<Value> = Arc::new(move |domain: &Value| {
            if domain.is_undefined() {
                Value::Undefined
            } else {
                (*from_fn)(domain)
            }
        });

        Self::assemble(raw, to_fn, from_fn, self.inner.domain_default.clone())
    }

    /// Raw→domain conversion for an already-validated record field:
    /// resolves defaults for `Undefined` and otherwise applies the
    /// transform directly.
    pub(crate) fn convert_field_to_domain(&self, value: &Value) -> Value {
        if value.is_undefined() {
            if let Some(raw_default) = self.inner.raw.default_value() {
                return (*self.inner.to_fn)(raw_default);
            }
            if let Some(domain_default) = &self.inner.domain_default {
                return domain_default.clone();
            }
        }
        (*self.inner.to_fn)(value)
    }

    /// Domain→raw counterpart of
    /// [`convert_field_to_domain`](Self::convert_field_to_domain): a
    /// missing domain property resolves to the domain default through the
    /// transform, or to the raw default verbatim.
    pub(crate) fn convert_field_to_raw(&self, domain: &Value) -> Value {
        if domain.is_undefined() {
            if let Some(domain_default) = &self.inner.domain_default {
                return (*self.inner.from_fn)(domain_default);
            }
            if let Some(raw_default) = self.inner.raw.default_value() {
                return raw_default.clone();
            }
        }
        (*self.inner.from_fn)(domain)
    }
}

impl<D: Domain> fmt::Debug for Transformable<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Transformable")
            .field(&self.inner.raw.name())
            .finish()
    }
}
