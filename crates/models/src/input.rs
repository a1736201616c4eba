//! Coercion of loosely-typed request values.
//!
//! Bodies arrive as arbitrary JSON; a field counts as present only when it is truthy
//! (not missing, `null`, `false`, `0` or `""`).

use sea_orm::Value as SqlValue;
use serde_json::Value;

use crate::errors::ModelError;

pub fn is_present(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Names of the fields that are not present, in declaration order.
pub fn missing<'a>(fields: &[(&'a str, Option<&Value>)]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|(_, v)| !is_present(*v))
        .map(|(name, _)| *name)
        .collect()
}

fn digits_end(b: &[u8], from: usize) -> usize {
    from + b[from..].iter().take_while(|c| c.is_ascii_digit()).count()
}

fn sign_len(b: &[u8]) -> usize {
    usize::from(matches!(b.first(), Some(b'+' | b'-')))
}

/// Leading signed integer, ignoring whatever follows it: `"12abc"` reads as 12,
/// `"2.9"` as 2. `None` when the text does not start with digits.
pub fn parse_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let b = s.as_bytes();
    let start = sign_len(b);
    let end = digits_end(b, start);
    if end == start {
        return None;
    }
    s[..end].parse::<i64>().ok()
}

/// Leading finite decimal (`"5abc"` reads as 5, `"-.5e2x"` as -50). `NaN` and
/// infinities are treated as unparseable.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let b = s.as_bytes();
    let start = sign_len(b);
    let int_end = digits_end(b, start);
    let mut end = int_end;
    if b.get(end) == Some(&b'.') {
        end = digits_end(b, end + 1);
    }
    if end == start || (end == start + 1 && int_end == start) {
        return None;
    }
    if matches!(b.get(end), Some(b'e' | b'E')) {
        let exp_start = end + 1 + sign_len(&b[end + 1..]);
        let exp_end = digits_end(b, exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }
    s[..end].parse::<f64>().ok().filter(|f| f.is_finite())
}

pub fn parse_positive_id(raw: &str, what: &str) -> Result<i64, ModelError> {
    match parse_int(raw) {
        Some(id) if id > 0 => Ok(id),
        _ => Err(ModelError::validation(format!("{what} must be a positive integer"))),
    }
}

/// Integer from a JSON number or numeric string. Fractions are truncated toward zero.
pub fn json_int(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .map(f64::trunc)
                .filter(|f| *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => parse_int(s),
        _ => None,
    }
}

pub fn json_decimal(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

/// Text rendering of a scalar field; arrays and objects are rejected.
pub fn json_text(v: &Value, field: &str) -> Result<String, ModelError> {
    match v {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(ModelError::validation(format!("{field} must be a string or number"))),
    }
}

/// Forward a scalar as a bind parameter with its JSON type preserved.
pub fn json_param(v: &Value, field: &str) -> Result<SqlValue, ModelError> {
    match v {
        Value::String(s) => Ok(SqlValue::from(s.clone())),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(SqlValue::from(i)),
            None => n
                .as_f64()
                .map(SqlValue::from)
                .ok_or_else(|| ModelError::validation(format!("{field} is out of range"))),
        },
        Value::Bool(b) => Ok(SqlValue::from(*b)),
        _ => Err(ModelError::validation(format!("{field} must be a string or number"))),
    }
}
