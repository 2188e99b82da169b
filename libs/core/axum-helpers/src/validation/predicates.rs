//! Field predicates with loose, string-based semantics.
//!
//! Every predicate first renders the raw value as text with [`to_text`], so a
//! JSON number `4000` and the string `"4000"` are treated alike.

use serde_json::{Number, Value};
use std::sync::LazyLock;

static INT_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^[+-]?[0-9]+$").unwrap());

static NUMERIC_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^[+-]?([0-9]*[.])?[0-9]+$").unwrap());

/// Text form of a raw value. Missing and `null` render as `""`.
pub fn to_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => number_text(n),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => "[object Object]".to_string(),
    }
}

/// Plain decimal for magnitudes in `[1e-6, 1e21)`, exponent form outside it.
fn number_text(number: &Number) -> String {
    let text = number.to_string();
    let plain = number
        .as_f64()
        .is_some_and(|n| (1e-6..1e21).contains(&n.abs()));

    match text.split_once(['e', 'E']) {
        Some((mantissa, exponent)) if plain => {
            expand_exponent(mantissa, exponent).unwrap_or(text)
        }
        _ => text,
    }
}

fn expand_exponent(mantissa: &str, exponent: &str) -> Option<String> {
    let exponent: i64 = exponent.parse().ok()?;
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let digits = format!("{int_part}{frac_part}");
    let point = int_part.len() as i64 + exponent;

    let body = if point <= 0 {
        format!("0.{}{digits}", "0".repeat(point.unsigned_abs() as usize))
    } else if point as usize >= digits.len() {
        format!("{digits}{}", "0".repeat(point as usize - digits.len()))
    } else {
        let (whole, fraction) = digits.split_at(point as usize);
        format!("{whole}.{fraction}")
    };

    Some(format!("{sign}{body}"))
}

/// Loose numeric coercion: numbers as-is, numeric strings parsed, booleans as
/// 1/0. Anything else has no numeric value.
pub fn to_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
            }
        }
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Integer that fits an `i32` identifier.
pub fn is_int(value: Option<&Value>) -> bool {
    let text = to_text(value);
    INT_RE.is_match(&text) && text.parse::<i32>().is_ok()
}

pub fn not_empty(value: Option<&Value>) -> bool {
    !to_text(value).is_empty()
}

/// Decimal number without exponent, e.g. `12`, `-3.5`, `.75`.
pub fn is_numeric(value: Option<&Value>) -> bool {
    NUMERIC_RE.is_match(&to_text(value))
}

/// `true`, `false`, `1` or `0`.
pub fn is_boolean(value: Option<&Value>) -> bool {
    matches!(to_text(value).as_str(), "true" | "false" | "1" | "0")
}

/// Strictly greater than zero after [`to_number`].
pub fn is_positive(value: Option<&Value>) -> bool {
    to_number(value).is_some_and(|n| n > 0.0)
}
