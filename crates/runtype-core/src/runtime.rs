//! Runtime types: a predicate plus validated accessors for one value shape.
//!
//! A [`RuntimeType`] is an immutable, cheaply-cloneable handle. Deriving a
//! nullable sibling (`or_null` / `or_undefined`) is lazy and memoized on
//! the instance, so repeated derivation returns the same sibling and the
//! chain never deepens: a type that already admits `null` is its own
//! `or_null`.

use crate::error::InvalidTypeError;
use crate::value::Value;
use std::fmt;
use std::sync::{Arc, OnceLock};

pub(crate) type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;
type Canonicalize = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// A runtime type over the raw [`Value`] universe.
///
/// Invariant: `is_type(v)` holds exactly when `from_value(v)` succeeds,
/// absent a default. A default makes `Undefined` acceptable as an *input*
/// to the `from`-family entry points without making it a valid instance
/// under `is_type`.
#[derive(Clone)]
pub struct RuntimeType {
    inner: Arc<Inner>,
}

struct Inner {
    name: String,
    predicate: Predicate,
    default: Option<Value>,
    canonicalize: Option<Canonicalize>,
    accepts_null: bool,
    accepts_undefined: bool,
    or_null: OnceLock<RuntimeType>,
    or_undefined: OnceLock<RuntimeType>,
}

impl RuntimeType {
    /// Wrap a predicate into a runtime type.
    pub fn new(
        name: impl Into<String>,
        predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self::assemble(name.into(), Arc::new(predicate), None, None)
    }

    fn assemble(
        name: String,
        predicate: Predicate,
        default: Option<Value>,
        canonicalize: Option<Canonicalize>,
    ) -> Self {
        let accepts_null = (*predicate)(&Value::Null);
        let accepts_undefined = (*predicate)(&Value::Undefined);
        Self {
            inner: Arc::new(Inner {
                name,
                predicate,
                default,
                canonicalize,
                accepts_null,
                accepts_undefined,
                or_null: OnceLock::new(),
                or_undefined: OnceLock::new(),
            }),
        }
    }

    /// The label used in error messages.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Whether the predicate admits `null`.
    pub fn accepts_null(&self) -> bool {
        self.inner.accepts_null
    }

    /// Whether the predicate admits `undefined`.
    pub fn accepts_undefined(&self) -> bool {
        self.inner.accepts_undefined
    }

    /// The raw-slot default, when one has been attached.
    pub fn default_value(&self) -> Option<&Value> {
        self.inner.default.as_ref()
    }

    /// Apply the predicate. Pure; never fails.
    pub fn is_type(&self, value: &Value) -> bool {
        (*self.inner.predicate)(value)
    }

    /// The assertion form: `Ok(())` exactly when `is_type` holds.
    pub fn check(&self, value: &Value) -> Result<(), InvalidTypeError> {
        if self.is_type(value) {
            Ok(())
        } else {
            Err(InvalidTypeError::new(value.clone(), self.name()).via("check"))
        }
    }

    /// Validate and return the value. An `Undefined` input is replaced by
    /// the raw default when one is attached; a composed type additionally
    /// canonicalizes the validated value.
    pub fn from_value(&self, value: Value) -> Result<Value, InvalidTypeError> {
        self.convert(value, "from_value", None)
    }

    /// Element-wise [`from_value`](Self::from_value): preserves length and
    /// order, fails on the first offending element with its index.
    pub fn from_all(&self, values: Vec<Value>) -> Result<Vec<Value>, InvalidTypeError> {
        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| self.convert(value, "from_all", Some(index)))
            .collect()
    }

    fn convert(
        &self,
        value: Value,
        via: &'static str,
        at_index: Option<usize>,
    ) -> Result<Value, InvalidTypeError> {
        if value.is_undefined() {
            if let Some(default) = &self.inner.default {
                return Ok(default.clone());
            }
        }
        if !self.is_type(&value) {
            let mut error = InvalidTypeError::new(value, self.name()).via(via);
            if let Some(index) = at_index {
                error = error.at_index(index);
            }
            return Err(error);
        }
        Ok(match &self.inner.canonicalize {
            Some(canonicalize) => (**canonicalize)(&value),
            None => value,
        })
    }

    /// The sibling type additionally admitting `null`.
    ///
    /// Derived on first access and cached on this instance; a type that
    /// already admits `null` returns itself, so chains never deepen.
    pub fn or_null(&self) -> &RuntimeType {
        if self.inner.accepts_null {
            return self;
        }
        self.inner.or_null.get_or_init(|| {
            self.derive(format!("{} or null", self.inner.name), Value::is_null)
        })
    }

    /// The sibling type additionally admitting `undefined`. Same algebra
    /// as [`or_null`](Self::or_null).
    pub fn or_undefined(&self) -> &RuntimeType {
        if self.inner.accepts_undefined {
            return self;
        }
        self.inner.or_undefined.get_or_init(|| {
            self.derive(
                format!("{} or undefined", self.inner.name),
                Value::is_undefined,
            )
        })
    }

    fn derive(&self, name: String, admit: fn(&Value) -> bool) -> RuntimeType {
        let predicate = self.inner.predicate.clone();
        let predicate: Predicate =
            Arc::new(move |value: &Value| admit(value) || (*predicate)(value));
        let canonicalize = self.inner.canonicalize.clone().map(|canonicalize| {
            let wrapped: Canonicalize = Arc::new(move |value: &Value| {
                if admit(value) {
                    value.clone()
                } else {
                    (*canonicalize)(value)
                }
            });
            wrapped
        });
        Self::assemble(name, predicate, self.inner.default.clone(), canonicalize)
    }

    /// Attach a raw-slot default: `from`-family entry points substitute it
    /// for `Undefined` inputs. `is_type` is unaffected.
    pub fn with_default(&self, default: Value) -> RuntimeType {
        Self::assemble(
            self.inner.name.clone(),
            self.inner.predicate.clone(),
            Some(default),
            self.inner.canonicalize.clone(),
        )
    }

    /// Attach a canonicalization step applied to validated values by the
    /// `from`-family entry points. Record composition uses this to inject
    /// per-field defaults and drop undeclared keys.
    pub fn with_canonicalizer(
        &self,
        canonicalize: impl Fn(&Value) -> Value + Send + Sync + 'static,
    ) -> RuntimeType {
        Self::assemble(
            self.inner.name.clone(),
            self.inner.predicate.clone(),
            self.inner.default.clone(),
            Some(Arc::new(canonicalize)),
        )
    }

    /// Same type under a different label.
    pub fn renamed(&self, name: impl Into<String>) -> RuntimeType {
        Self::assemble(
            name.into(),
            self.inner.predicate.clone(),
            self.inner.default.clone(),
            self.inner.canonicalize.clone(),
        )
    }
}

impl fmt::Debug for RuntimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RuntimeType").field(&self.inner.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{number, zero_or_one};

    #[test]
    fn guard_and_from_agree() {
        let ty = number();
        for value in [
            Value::from(1.5),
            Value::from("1.5"),
            Value::Null,
            Value::Undefined,
            Value::Array(vec![]),
        ] {
            assert_eq!(ty.is_type(&value), ty.from_value(value.clone()).is_ok());
        }
    }

    #[test]
    fn from_value_returns_the_input() {
        let ty = number();
        assert_eq!(ty.from_value(Value::from(2)).unwrap(), Value::from(2));
    }

    #[test]
    fn from_all_preserves_length_and_order() {
        let ty = number();
        let values = vec![Value::from(3), Value::from(1), Value::from(2)];
        assert_eq!(ty.from_all(values.clone()).unwrap(), values);
    }

    #[test]
    fn from_all_reports_first_offender_index() {
        let ty = number();
        let values = vec![Value::from(1), Value::from("two"), Value::from("three")];
        let error = ty.from_all(values).unwrap_err();
        assert_eq!(error.at_index, Some(1));
        assert_eq!(error.expected, "number");
    }

    #[test]
    fn or_null_admits_null_and_passes_it_through() {
        let ty = number();
        let nullable = ty.or_null();
        assert!(nullable.is_type(&Value::Null));
        assert_eq!(nullable.from_value(Value::Null).unwrap(), Value::Null);
        assert_eq!(nullable.name(), "number or null");
        assert!(!ty.is_type(&Value::Null));
    }

    #[test]
    fn or_null_is_memoized() {
        let ty = number();
        let first = ty.or_null();
        let second = ty.or_null();
        assert!(Arc::ptr_eq(&first.inner, &second.inner));
    }

    #[test]
    fn or_null_of_nullable_is_itself() {
        let ty = number();
        let nullable = ty.or_null();
        assert!(Arc::ptr_eq(&nullable.inner, &nullable.or_null().inner));
    }

    #[test]
    fn or_undefined_admits_undefined() {
        let ty = number();
        let optional = ty.or_undefined();
        assert!(optional.is_type(&Value::Undefined));
        assert_eq!(optional.name(), "number or undefined");
    }

    #[test]
    fn default_substitutes_for_undefined_only_in_from() {
        let ty = zero_or_one().with_default(Value::from(0));
        assert!(!ty.is_type(&Value::Undefined));
        assert_eq!(ty.from_value(Value::Undefined).unwrap(), Value::from(0));
        assert_eq!(ty.from_value(Value::from(1)).unwrap(), Value::from(1));
        assert!(ty.from_value(Value::from(2)).is_err());
    }

    #[test]
    fn default_applies_inside_from_all() {
        let ty = zero_or_one().with_default(Value::from(1));
        let values = vec![Value::from(0), Value::Undefined];
        assert_eq!(
            ty.from_all(values).unwrap(),
            vec![Value::from(0), Value::from(1)]
        );
    }

    #[test]
    fn or_null_keeps_the_default() {
        let ty = zero_or_one().with_default(Value::from(0));
        let nullable = ty.or_null();
        assert_eq!(
            nullable.from_value(Value::Undefined).unwrap(),
            Value::from(0)
        );
    }

    #[test]
    fn check_reports_the_expected_label() {
        let error = zero_or_one().check(&Value::from(7)).unwrap_err();
        assert_eq!(error.expected, "0 or 1");
        assert_eq!(error.via, Some("check"));
    }
}
