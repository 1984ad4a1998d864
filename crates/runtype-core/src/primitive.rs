//! Built-in primitive runtime types.

use crate::runtime::RuntimeType;
use crate::value::Value;
use std::collections::BTreeSet;

pub fn number() -> RuntimeType {
    RuntimeType::new("number", Value::is_number)
}

pub fn string() -> RuntimeType {
    RuntimeType::new("string", Value::is_string)
}

pub fn boolean() -> RuntimeType {
    RuntimeType::new("boolean", Value::is_bool)
}

pub fn null() -> RuntimeType {
    RuntimeType::new("null", Value::is_null)
}

pub fn undefined() -> RuntimeType {
    RuntimeType::new("undefined", Value::is_undefined)
}

/// Any object, regardless of shape. Record descriptors refine this.
pub fn object() -> RuntimeType {
    RuntimeType::new("object", Value::is_object)
}

/// The storage-flag discriminator: admits exactly the numbers `0` and `1`.
pub fn zero_or_one() -> RuntimeType {
    RuntimeType::new("0 or 1", |value: &Value| {
        matches!(value, Value::Number(n) if *n == 0.0 || *n == 1.0)
    })
}

/// Chrono datetimes are valid by construction, so unlike dynamic hosts
/// there is no invalid-date case to reject here.
pub fn date() -> RuntimeType {
    RuntimeType::new("Date", Value::is_date)
}

/// A type over a fixed finite set of literal strings.
///
/// The label lists the literals in the order given; membership is tested
/// against the set.
pub fn strings<I, S>(allowed: I) -> RuntimeType
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let allowed: Vec<String> = allowed.into_iter().map(Into::into).collect();
    let name = allowed
        .iter()
        .map(|literal| format!("\"{literal}\""))
        .collect::<Vec<_>>()
        .join(" | ");
    let members: BTreeSet<String> = allowed.into_iter().collect();
    RuntimeType::new(name, move |value: &Value| {
        matches!(value, Value::String(s) if members.contains(s))
    })
}
