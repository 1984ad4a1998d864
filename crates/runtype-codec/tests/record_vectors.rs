//! Integration tests: run the record conversion test vectors.
//!
//! Each fixture in tests/fixtures/ has:
//! - case.json: which codec to build, the direction, and the input value
//! - expect.json: the expected conversion result, or the expected
//!   rejection label
//!
//! These tests load the fixtures, build the named codec, run the
//! conversion, and compare the output as JSON.

use runtype_codec::{RecordSpec, TransformExt, Transformable, Value};
use runtype_core::{number, string, zero_or_one};
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn offered_codec(default_raw: Option<f64>) -> Transformable<Value> {
    let raw = match default_raw {
        Some(default) => zero_or_one().with_default(Value::from(default)),
        None => zero_or_one(),
    };
    raw.as_transformable(
        "Offered",
        |value: &Value| Value::from(value.as_f64() == Some(1.0)),
        |offered: &Value| Value::from(if offered.as_bool().unwrap_or(false) { 1.0 } else { 0.0 }),
    )
}

fn perk_spec(with_defaults: bool) -> RecordSpec {
    if with_defaults {
        RecordSpec::new()
            .plain("id", number())
            .plain("name", string().with_default(Value::from("Unnamed")))
            .codec("wasOffered", offered_codec(Some(0.0)))
    } else {
        RecordSpec::new()
            .plain("id", number())
            .plain("name", string())
            .codec("wasOffered", offered_codec(None))
    }
}

fn build_codec(name: &str) -> Transformable<Value> {
    match name {
        "perk" => perk_spec(false).into_codec("Perk"),
        "perk_defaults" => perk_spec(true).into_codec("Perk"),
        "session" => RecordSpec::new()
            .plain("token", string())
            .codec("perk", perk_spec(false).into_codec("Perk"))
            .into_codec("Session"),
        other => panic!("unknown codec: {other}"),
    }
}

fn run_fixture(name: &str) {
    let dir = fixtures_dir().join(name);

    let case_path = dir.join("case.json");
    let expect_path = dir.join("expect.json");

    let case_str = std::fs::read_to_string(&case_path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", case_path.display()));
    let expect_str = std::fs::read_to_string(&expect_path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", expect_path.display()));

    let case: serde_json::Value = serde_json::from_str(&case_str)
        .unwrap_or_else(|e| panic!("failed to parse {}: {e}", case_path.display()));
    let expected: serde_json::Value = serde_json::from_str(&expect_str)
        .unwrap_or_else(|e| panic!("failed to parse {}: {e}", expect_path.display()));

    let codec = build_codec(case["codec"].as_str().expect("missing codec field"));
    let direction = case["direction"].as_str().expect("missing direction field");
    let input = Value::from_json(case["value"].clone());

    let result_json = match direction {
        "to_domain" => match codec.to_domain(&input) {
            Ok(domain) => serde_json::json!({ "ok": domain.to_json() }),
            Err(error) => serde_json::json!({ "invalid": { "expected": error.expected } }),
        },
        "from_domain" => serde_json::json!({ "ok": codec.from_domain(&input).to_json() }),
        other => panic!("unknown direction: {other}"),
    };

    assert_eq!(
        result_json,
        expected,
        "\n\nFixture: {name}\n\nGot:\n{}\n\nExpected:\n{}\n",
        serde_json::to_string_pretty(&result_json).unwrap(),
        serde_json::to_string_pretty(&expected).unwrap(),
    );
}

#[test]
fn golden_perk_to_domain() {
    run_fixture("golden_perk_to_domain");
}

#[test]
fn golden_perk_from_domain() {
    run_fixture("golden_perk_from_domain");
}

#[test]
fn golden_perk_defaults_fill_missing_fields() {
    run_fixture("golden_perk_defaults_fill_missing_fields");
}

#[test]
fn golden_session_nested_round() {
    run_fixture("golden_session_nested_round");
}

#[test]
fn adversarial_perk_domain_shaped_input() {
    run_fixture("adversarial_perk_domain_shaped_input");
}

#[test]
fn adversarial_perk_missing_field() {
    run_fixture("adversarial_perk_missing_field");
}
