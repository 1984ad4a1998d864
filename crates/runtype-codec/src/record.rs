//! Record (object) composition.
//!
//! A [`RecordSpec`] maps property names to per-field descriptors and
//! lifts them two ways: [`into_type`](RecordSpec::into_type) builds the
//! validating runtime type over the raw record, and
//! [`into_codec`](RecordSpec::into_codec) builds a whole-record codec
//! that converts field-by-field, recursing into nested codecs.
//!
//! Validation is open-world for undeclared keys and closed-world for
//! declared ones; conversion and `from_value` both produce exactly the
//! declared keys.

use crate::transform::{TransformExt, Transformable};
use runtype_core::{RuntimeType, Value, primitive};
use std::collections::BTreeMap;
use std::sync::Arc;

/// What a single record property must be.
#[derive(Clone)]
pub enum FieldSpec {
    /// The property must always be literally `null`.
    Null,
    /// The property must always be literally `undefined`.
    Undefined,
    /// Validated against the type; passed through unchanged by codecs.
    Plain(RuntimeType),
    /// Validated and converted through a value-level codec, recursively.
    Codec(Transformable<Value>),
}

impl FieldSpec {
    fn type_label(&self) -> &str {
        match self {
            FieldSpec::Null => "null",
            FieldSpec::Undefined => "undefined",
            FieldSpec::Plain(ty) => ty.name(),
            FieldSpec::Codec(codec) => codec.name(),
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldSpec::Null => value.is_null(),
            FieldSpec::Undefined => value.is_undefined(),
            FieldSpec::Plain(ty) => ty.is_type(value),
            FieldSpec::Codec(codec) => codec.is_type(value),
        }
    }

    fn has_default(&self) -> bool {
        match self {
            FieldSpec::Null | FieldSpec::Undefined => false,
            FieldSpec::Plain(ty) => ty.default_value().is_some(),
            FieldSpec::Codec(codec) => {
                codec.raw_type().default_value().is_some() || codec.domain_default().is_some()
            }
        }
    }

    /// Whether a missing property is tolerated: it either has a default
    /// to fall back on, or the field admits `undefined` outright.
    fn accepts_missing(&self) -> bool {
        if self.has_default() {
            return true;
        }
        match self {
            FieldSpec::Undefined => true,
            FieldSpec::Null => false,
            FieldSpec::Plain(ty) => ty.accepts_undefined(),
            FieldSpec::Codec(codec) => codec.raw_type().accepts_undefined(),
        }
    }

    fn raw_default(&self) -> Option<Value> {
        match self {
            FieldSpec::Plain(ty) => ty.default_value().cloned(),
            FieldSpec::Codec(codec) => codec.raw_type().default_value().cloned(),
            FieldSpec::Null | FieldSpec::Undefined => None,
        }
    }

    fn to_domain_field(&self, value: &Value) -> Value {
        match self {
            FieldSpec::Null => Value::Null,
            FieldSpec::Undefined => Value::Undefined,
            FieldSpec::Plain(ty) => {
                if value.is_undefined() {
                    ty.default_value().cloned().unwrap_or(Value::Undefined)
                } else {
                    value.clone()
                }
            }
            FieldSpec::Codec(codec) => codec.convert_field_to_domain(value),
        }
    }

    fn to_raw_field(&self, domain: &Value) -> Value {
        match self {
            FieldSpec::Null => Value::Null,
            FieldSpec::Undefined => Value::Undefined,
            FieldSpec::Plain(ty) => {
                if domain.is_undefined() {
                    ty.default_value().cloned().unwrap_or(Value::Undefined)
                } else {
                    domain.clone()
                }
            }
            FieldSpec::Codec(codec) => codec.convert_field_to_raw(domain),
        }
    }

    fn optional(&self) -> FieldSpec {
        match self {
            FieldSpec::Null => FieldSpec::Plain(primitive::null().or_undefined().clone()),
            FieldSpec::Undefined => FieldSpec::Plain(primitive::undefined()),
            FieldSpec::Plain(ty) => FieldSpec::Plain(ty.or_undefined().clone()),
            FieldSpec::Codec(codec) => FieldSpec::Codec(codec.or_undefined()),
        }
    }
}

/// An ordered property-name → field descriptor map for one record shape.
///
/// Constructed once per distinct shape, then lifted with
/// [`into_type`](Self::into_type) or [`into_codec`](Self::into_codec).
#[derive(Clone, Default)]
pub struct RecordSpec {
    fields: Vec<(String, FieldSpec)>,
}

impl RecordSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.push((name.into(), spec));
        self
    }

    pub fn plain(self, name: impl Into<String>, ty: RuntimeType) -> Self {
        self.field(name, FieldSpec::Plain(ty))
    }

    pub fn codec(self, name: impl Into<String>, codec: Transformable<Value>) -> Self {
        self.field(name, FieldSpec::Codec(codec))
    }

    pub fn null_marker(self, name: impl Into<String>) -> Self {
        self.field(name, FieldSpec::Null)
    }

    pub fn undefined_marker(self, name: impl Into<String>) -> Self {
        self.field(name, FieldSpec::Undefined)
    }

    /// The descriptor with the named fields removed.
    pub fn without(&self, keys: &[&str]) -> RecordSpec {
        RecordSpec {
            fields: self
                .fields
                .iter()
                .filter(|(name, _)| !keys.contains(&name.as_str()))
                .cloned()
                .collect(),
        }
    }

    /// The descriptor with every field additionally admitting `undefined`.
    pub fn with_all_optional(&self) -> RecordSpec {
        RecordSpec {
            fields: self
                .fields
                .iter()
                .map(|(name, spec)| (name.clone(), spec.optional()))
                .collect(),
        }
    }

    fn label(&self) -> String {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(name, spec)| format!("{name}: {}", spec.type_label()))
            .collect();
        format!("{{{}}}", parts.join(", "))
    }

    /// The validating runtime type over the raw record.
    ///
    /// Its `from_value` canonicalizes: the result carries exactly the
    /// declared keys, with per-field raw defaults injected for
    /// missing/undefined properties. When every field has a raw default,
    /// the record itself gains a whole-record default.
    pub fn into_type(self) -> RuntimeType {
        let label = self.label();
        let fields = Arc::new(self.fields);

        let validated = Arc::clone(&fields);
        let ty = RuntimeType::new(label, move |value: &Value| validate(&validated, value));

        let ty = match whole_record_default(&fields) {
            Some(default) => ty.with_default(default),
            None => ty,
        };

        let canonical = Arc::clone(&fields);
        ty.with_canonicalizer(move |value: &Value| canonicalize(&canonical, value))
    }

    /// The whole-record codec. The domain name becomes the expected-type
    /// label. Conversion iterates the descriptor: markers force their
    /// literal, plain fields pass through, codec fields convert
    /// recursively.
    pub fn into_codec(self, domain_name: impl Into<String>) -> Transformable<Value> {
        let raw = self.clone().into_type().renamed(domain_name);
        let fields = Arc::new(self.fields);

        let to_fields = Arc::clone(&fields);
        let from_fields = fields;
        raw.to(move |value: &Value| to_domain_record(&to_fields, value))
            .from(move |domain: &Value| to_raw_record(&from_fields, domain))
    }
}

fn validate(fields: &[(String, FieldSpec)], value: &Value) -> bool {
    let Some(object) = value.as_object() else {
        return false;
    };
    fields.iter().all(|(name, spec)| match object.get(name) {
        None => spec.accepts_missing(),
        Some(given) if given.is_undefined() => spec.accepts(given) || spec.accepts_missing(),
        Some(given) => spec.accepts(given),
    })
}

fn canonicalize(fields: &[(String, FieldSpec)], value: &Value) -> Value {
    let Some(object) = value.as_object() else {
        return value.clone();
    };
    let mut out = BTreeMap::new();
    for (name, spec) in fields {
        let given = object.get(name).cloned().unwrap_or(Value::Undefined);
        let resolved = if given.is_undefined() {
            spec.raw_default().unwrap_or(given)
        } else {
            given
        };
        out.insert(name.clone(), resolved);
    }
    Value::Object(out)
}

fn whole_record_default(fields: &[(String, FieldSpec)]) -> Option<Value> {
    let mut defaults = BTreeMap::new();
    for (name, spec) in fields {
        defaults.insert(name.clone(), spec.raw_default()?);
    }
    Some(Value::Object(defaults))
}

fn to_domain_record(fields: &[(String, FieldSpec)], value: &Value) -> Value {
    let Some(object) = value.as_object() else {
        return value.clone();
    };
    let mut out = BTreeMap::new();
    for (name, spec) in fields {
        let given = object.get(name).cloned().unwrap_or(Value::Undefined);
        out.insert(name.clone(), spec.to_domain_field(&given));
    }
    Value::Object(out)
}

fn to_raw_record(fields: &[(String, FieldSpec)], domain: &Value) -> Value {
    let Some(object) = domain.as_object() else {
        return domain.clone();
    };
    let mut out = BTreeMap::new();
    for (name, spec) in fields {
        let given = object.get(name).cloned().unwrap_or(Value::Undefined);
        out.insert(name.clone(), spec.to_raw_field(&given));
    }
    Value::Object(out)
}
