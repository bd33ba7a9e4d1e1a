//! String to typed-value coercion.

use std::num::IntErrorKind;

use crate::errors::CoerceError;
use crate::shape::{FloatWidth, IntWidth, Kind, UintWidth};
use crate::value::Value;

/// Separator between list elements. No trimming, no escaping.
pub const LIST_SEPARATOR: char = ',';

/// Coerce `raw` into a value of `kind`.
pub fn coerce(kind: &Kind, raw: &str) -> Result<Value, CoerceError> {
    match kind {
        Kind::String => Ok(Value::String(raw.to_string())),
        Kind::Bool => parse_bool(raw).map(Value::Bool),
        Kind::Int(width) => parse_int(*width, raw).map(Value::Int),
        Kind::Uint(width) => parse_uint(*width, raw).map(Value::Uint),
        Kind::Float(width) => parse_float(*width, raw).map(Value::Float),
        Kind::List(element) => coerce_list(element, raw),
        Kind::Record(_) => Err(CoerceError::Unsupported {
            kind: kind.to_string(),
        }),
    }
}

/// Split `raw` on commas and coerce every segment as `element`.
///
/// Empty segments are kept and fail for every element kind except string.
/// The first failing segment fails the whole list.
pub fn coerce_list(element: &Kind, raw: &str) -> Result<Value, CoerceError> {
    if matches!(element, Kind::List(_) | Kind::Record(_)) {
        return Err(CoerceError::UnsupportedElement {
            kind: element.to_string(),
        });
    }
    raw.split(LIST_SEPARATOR)
        .map(|item| coerce(element, item))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::List)
}

fn malformed(kind: impl ToString, raw: &str, reason: impl ToString) -> CoerceError {
    CoerceError::Malformed {
        kind: kind.to_string(),
        value: raw.to_string(),
        reason: reason.to_string(),
    }
}

fn overflow(kind: &Kind, raw: &str) -> CoerceError {
    CoerceError::Overflow {
        kind: kind.to_string(),
        value: raw.to_string(),
    }
}

fn parse_bool(raw: &str) -> Result<bool, CoerceError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(malformed("bool", raw, "expected one of 1, t, true, 0, f, false")),
    }
}

fn parse_int(width: IntWidth, raw: &str) -> Result<i64, CoerceError> {
    let kind = Kind::Int(width);
    let n = raw.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => overflow(&kind, raw),
        _ => malformed(&kind, raw, e),
    })?;
    let (min, max) = width.bounds();
    if n < min || n > max {
        return Err(overflow(&kind, raw));
    }
    Ok(n)
}

fn parse_uint(width: UintWidth, raw: &str) -> Result<u64, CoerceError> {
    let kind = Kind::Uint(width);
    if raw.starts_with('-') || raw.starts_with('+') {
        return Err(malformed(&kind, raw, "sign not allowed"));
    }
    let n = raw.parse::<u64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => overflow(&kind, raw),
        _ => malformed(&kind, raw, e),
    })?;
    if n > width.max() {
        return Err(overflow(&kind, raw));
    }
    Ok(n)
}

fn parse_float(width: FloatWidth, raw: &str) -> Result<f64, CoerceError> {
    let kind = Kind::Float(width);
    let n = raw.parse::<f64>().map_err(|e| malformed(&kind, raw, e))?;
    let narrowed = match width {
        FloatWidth::F32 => f64::from(n as f32),
        FloatWidth::F64 => n,
    };
    // infinity only when spelled out, never from a literal out of range
    if narrowed.is_infinite() && !spells_infinity(raw) {
        return Err(overflow(&kind, raw));
    }
    Ok(narrowed)
}

fn spells_infinity(raw: &str) -> bool {
    let digits = raw.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(raw);
    digits.eq_ignore_ascii_case("inf") || digits.eq_ignore_ascii_case("infinity")
}
