//! Conversion of raw candidates into typed field values.
//!
//! Invalid input is not an error here: a candidate that does not parse, or
//! that does not fit the declared width, yields `None` and the caller leaves
//! the field alone.

use serde::de::DeserializeOwned;
use std::str::FromStr;
use tierconf_sdk::{FieldKind, FieldValue};

/// Coerces a raw string candidate into a value of `kind`.
///
/// Returns `None` for parse failures, out-of-range integers, floats that
/// overflow the declared width and for embedded fields. Strings are taken
/// verbatim.
#[must_use]
pub fn coerce(kind: FieldKind, raw: &str) -> Option<FieldValue> {
    let value = match kind {
        FieldKind::I8 => FieldValue::I8(parse_int(raw)?),
        FieldKind::I16 => FieldValue::I16(parse_int(raw)?),
        FieldKind::I32 => FieldValue::I32(parse_int(raw)?),
        FieldKind::I64 => FieldValue::I64(parse_int(raw)?),
        FieldKind::U8 => FieldValue::U8(parse_uint(raw)?),
        FieldKind::U16 => FieldValue::U16(parse_uint(raw)?),
        FieldKind::U32 => FieldValue::U32(parse_uint(raw)?),
        FieldKind::U64 => FieldValue::U64(parse_uint(raw)?),
        FieldKind::Bool => FieldValue::Bool(parse_bool(raw)?),
        FieldKind::F32 => FieldValue::F32(parse_float(raw)?),
        FieldKind::F64 => FieldValue::F64(parse_float(raw)?),
        FieldKind::Str => FieldValue::Str(raw.to_string()),
        FieldKind::Embedded => return None,
    };
    Some(value)
}

// Base 10 only. `from_str` rejects anything outside the target width.
fn parse_int<T: FromStr>(raw: &str) -> Option<T> {
    raw.parse().ok()
}

// Unsigned input takes no sign at all, `+` included.
fn parse_uint<T: FromStr>(raw: &str) -> Option<T> {
    if raw.starts_with('+') {
        return None;
    }
    parse_int(raw)
}

/// Accepts the usual textual boolean forms.
#[must_use]
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

trait Float: FromStr {
    fn is_infinite(&self) -> bool;
}

impl Float for f32 {
    fn is_infinite(&self) -> bool {
        f32::is_infinite(*self)
    }
}

impl Float for f64 {
    fn is_infinite(&self) -> bool {
        f64::is_infinite(*self)
    }
}

// `from_str` rounds out-of-range input to infinity; only an explicit
// infinity literal may produce one.
fn parse_float<T: Float>(raw: &str) -> Option<T> {
    let value: T = raw.parse().ok()?;
    if value.is_infinite() && !is_infinity_literal(raw) {
        return None;
    }
    Some(value)
}

fn is_infinity_literal(raw: &str) -> bool {
    let unsigned = raw
        .strip_prefix('+')
        .or_else(|| raw.strip_prefix('-'))
        .unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Decodes a value taken from a file document into `kind`.
///
/// Decoding follows serde semantics, so a string is not accepted for a
/// numeric field. A string field also takes a number or boolean scalar in its
/// textual form; sequences and mappings are rejected.
///
/// # Errors
///
/// Returns the decoder message when the value does not fit `kind`.
pub fn decode(kind: FieldKind, value: &serde_json::Value) -> Result<FieldValue, String> {
    let decoded = match kind {
        FieldKind::I8 => FieldValue::I8(from_json(value)?),
        FieldKind::I16 => FieldValue::I16(from_json(value)?),
        FieldKind::I32 => FieldValue::I32(from_json(value)?),
        FieldKind::I64 => FieldValue::I64(from_json(value)?),
        FieldKind::U8 => FieldValue::U8(from_json(value)?),
        FieldKind::U16 => FieldValue::U16(from_json(value)?),
        FieldKind::U32 => FieldValue::U32(from_json(value)?),
        FieldKind::U64 => FieldValue::U64(from_json(value)?),
        FieldKind::Bool => FieldValue::Bool(from_json(value)?),
        FieldKind::F32 => FieldValue::F32(narrow_f32(from_json(value)?)?),
        FieldKind::F64 => FieldValue::F64(from_json(value)?),
        FieldKind::Str => FieldValue::Str(scalar_text(value)?),
        FieldKind::Embedded => return Err("embedded fields are not decoded".to_string()),
    };
    Ok(decoded)
}

fn from_json<T: DeserializeOwned>(value: &serde_json::Value) -> Result<T, String> {
    serde_json::from_value(value.clone()).map_err(|e| e.to_string())
}

fn scalar_text(value: &serde_json::Value) -> Result<String, String> {
    match value {
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        _ => from_json(value),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn narrow_f32(value: f64) -> Result<f32, String> {
    let narrowed = value as f32;
    if narrowed.is_infinite() && value.is_finite() {
        return Err(format!("{value} overflows f32"));
    }
    Ok(narrowed)
}
