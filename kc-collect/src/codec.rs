use std::collections::BTreeMap;

use kc_core::prelude::*;
use thiserror::Error;

use crate::congroup::CongroupMetric;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuantityError {
    #[error("empty quantity string")]
    Empty,

    #[error("malformed quantity: {0}")]
    Malformed(String),

    #[error("unknown quantity suffix in {0}")]
    UnknownSuffix(String),

    #[error("quantity out of range: {0}")]
    Overflow(String),
}

pub fn field_key(kind: ResourceKind, field: &str) -> String {
    format!("{TAG_KEY_PREFIX}.{}.{field}", kind.tag_segment())
}

pub fn label_key(kind: ResourceKind, label: &str) -> String {
    field_key(kind, &format!("{LABEL_TAG_SEGMENT}.{label}"))
}

pub fn name_key(kind: ResourceKind) -> String {
    field_key(kind, NAME_TAG_SEGMENT)
}

// Label keys and values are copied verbatim; Kubernetes label keys can contain '/' and '.', and
// the backend expects to see them unchanged.
pub fn labels_to_tags(kind: ResourceKind, labels: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    labels.iter().map(|(k, v)| (label_key(kind, k), v.clone())).collect()
}

// Callers are responsible for not appending the same metric name twice in one conversion.
pub fn append_metric(metrics: &mut Vec<CongroupMetric>, name: String, value: i64) {
    metrics.push(CongroupMetric { name, value });
}

// Parse a Kubernetes quantity string ("500M", "1Gi", "250m", "1e3", ...) into an integer number
// of base units.  Fractional results are rounded up (away from zero), which is what the
// apimachinery Quantity.Value() function does.
//
// The grammar is documented at
// https://kubernetes.io/docs/reference/kubernetes-api/common-definitions/quantity/
pub fn quantity_to_i64(quantity: &str) -> Result<i64, QuantityError> {
    let q = quantity.trim();
    if q.is_empty() {
        return Err(QuantityError::Empty);
    }

    let (negative, unsigned) = match q.as_bytes()[0] {
        b'-' => (true, &q[1..]),
        b'+' => (false, &q[1..]),
        _ => (false, q),
    };

    let number_len = unsigned.find(|c: char| !c.is_ascii_digit() && c != '.').unwrap_or(unsigned.len());
    let (number, suffix) = unsigned.split_at(number_len);
    let (int_part, frac_part) = number.split_once('.').unwrap_or((number, ""));
    if (int_part.is_empty() && frac_part.is_empty()) || frac_part.contains('.') {
        return Err(QuantityError::Malformed(quantity.into()));
    }

    // The number is int_part.frac_part == mantissa / 10^frac_len
    let overflow = || QuantityError::Overflow(quantity.into());
    let mut mantissa: i128 = 0;
    for d in int_part.bytes().chain(frac_part.bytes()) {
        mantissa = mantissa
            .checked_mul(10)
            .and_then(|m| m.checked_add((d - b'0') as i128))
            .ok_or_else(overflow)?;
    }

    let (mul, exp10) = parse_suffix(suffix).ok_or_else(|| QuantityError::UnknownSuffix(quantity.into()))?;
    let exp10 = i32::try_from(frac_part.len())
        .ok()
        .and_then(|frac_len| exp10.checked_sub(frac_len))
        .ok_or_else(overflow)?;

    let mut numerator = mantissa.checked_mul(mul).ok_or_else(overflow)?;
    let mut denominator: i128 = 1;
    if exp10 >= 0 {
        numerator = numerator.checked_mul(pow10(exp10 as u32).ok_or_else(overflow)?).ok_or_else(overflow)?;
    } else {
        // Anything smaller than 10^-38 rounds up to one base unit (or zero), so cap the exponent
        // rather than failing
        denominator = pow10(exp10.unsigned_abs().min(38)).ok_or_else(overflow)?;
    }

    let mut value = numerator / denominator;
    if numerator % denominator != 0 {
        value += 1;
    }
    if negative {
        value = -value;
    }
    i64::try_from(value).map_err(|_| overflow())
}

// Returns the (binary multiplier, power of ten) for a quantity suffix
fn parse_suffix(suffix: &str) -> Option<(i128, i32)> {
    let parsed = match suffix {
        "" => (1, 0),
        "Ki" => (1 << 10, 0),
        "Mi" => (1 << 20, 0),
        "Gi" => (1 << 30, 0),
        "Ti" => (1 << 40, 0),
        "Pi" => (1 << 50, 0),
        "Ei" => (1 << 60, 0),
        "n" => (1, -9),
        "u" => (1, -6),
        "m" => (1, -3),
        "k" => (1, 3),
        "M" => (1, 6),
        "G" => (1, 9),
        "T" => (1, 12),
        "P" => (1, 15),
        "E" => (1, 18),
        _ => {
            let exp = suffix.strip_prefix('e').or_else(|| suffix.strip_prefix('E'))?;
            let digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            (1, exp.parse().ok()?)
        },
    };
    Some(parsed)
}

fn pow10(exp: u32) -> Option<i128> {
    10i128.checked_pow(exp)
}
