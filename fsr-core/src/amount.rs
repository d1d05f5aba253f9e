//! Permissive conversion of form values into [`Decimal`] amounts.
//!
//! Form payloads carry money as free text (`"$1,234.56"`), as JSON numbers,
//! or not at all. None of the helpers here fail: anything that cannot be read
//! as a number becomes zero.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde_json::{Number, Value};

/// Everything that is not a digit, a dot or a minus sign.
static NON_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.\-]").expect("valid currency strip pattern"));

/// The longest numeric prefix of a string, after optional leading whitespace.
/// Digit groups may be joined by single underscores and an exponent may follow.
static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+(?:_\d+)*(?:\.\d+(?:_\d+)*)?|\.\d+(?:_\d+)*)(?:[eE][+-]?\d+)?)")
        .expect("valid numeric prefix pattern")
});

/// Powers of ten beyond this move any non-zero mantissa out of range.
const MAX_EXPONENT: u32 = 28;

/// Parses plain or scientific decimal text (`"12.5"`, `"6e28"`,
/// `"2.5E-1"`). Returns `None` when the value is out of range.
fn decimal_from_text(text: &str) -> Option<Decimal> {
    let cleaned = text.replace('_', "");
    let unsigned = cleaned.strip_prefix('+').unwrap_or(&cleaned);
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i64>().ok()?),
        None => (unsigned, 0),
    };

    let mut value = Decimal::from_str(mantissa).ok()?;
    if value.is_zero() {
        return Some(Decimal::ZERO);
    }
    if exponent >= 0 {
        if exponent.unsigned_abs() > u64::from(MAX_EXPONENT) {
            return None;
        }
        for _ in 0..exponent {
            value = value.checked_mul(Decimal::TEN)?;
        }
    } else {
        // Tiny values underflow to zero long before this bound.
        let steps = exponent.unsigned_abs().min(u64::from(2 * MAX_EXPONENT + 1));
        for _ in 0..steps {
            value = value.checked_div(Decimal::TEN)?;
        }
    }
    Some(value)
}

/// Reads the leading numeric prefix of `raw`.
///
/// Trailing garbage is ignored (`"12abc"` is 12, `"1.2.3"` is 1.2) and a
/// string without a numeric prefix is 0. Underscores between digits and an
/// exponent are part of the number (`"1_000"` and `"1e3"` are both 1000).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use fsr_core::amount::lenient_decimal;
///
/// assert_eq!(lenient_decimal("  250.5 per month"), dec!(250.5));
/// assert_eq!(lenient_decimal("1e3"), dec!(1000));
/// assert_eq!(lenient_decimal("$250"), dec!(0));
/// ```
pub fn lenient_decimal(raw: &str) -> Decimal {
    let Some(prefix) = NUMERIC_PREFIX.captures(raw).and_then(|c| c.get(1)) else {
        return Decimal::ZERO;
    };

    decimal_from_text(prefix.as_str()).unwrap_or_else(|| {
        tracing::warn!(input = %raw, "amount out of range, using 0");
        Decimal::ZERO
    })
}

/// Parses a free-text currency amount.
///
/// Every character other than digits, `.` and `-` is removed before the
/// numeric prefix is read, so currency symbols and thousands separators are
/// tolerated.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use fsr_core::amount::parse_currency;
///
/// assert_eq!(parse_currency("$1,234.56"), dec!(1234.56));
/// assert_eq!(parse_currency("abc"), dec!(0));
/// ```
pub fn parse_currency(raw: &str) -> Decimal {
    let stripped = NON_NUMERIC.replace_all(raw, "");
    lenient_decimal(&stripped)
}

/// Converts a JSON number into a [`Decimal`], going through its shortest
/// textual form so `0.1` stays `0.1`.
pub fn number_to_decimal(number: &Number) -> Decimal {
    if let Some(i) = number.as_i64() {
        return Decimal::from(i);
    }
    if let Some(u) = number.as_u64() {
        return Decimal::from(u);
    }

    let text = number.to_string();
    decimal_from_text(&text).unwrap_or_else(|| {
        tracing::warn!(input = %text, "number not representable as decimal, using 0");
        Decimal::ZERO
    })
}

/// Reads any form value as a number: numbers as-is, strings by their numeric
/// prefix, everything else (null, booleans, containers) as 0.
pub fn value_to_decimal(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => number_to_decimal(n),
        Value::String(s) => lenient_decimal(s),
        _ => Decimal::ZERO,
    }
}

/// Reads a form value as a currency amount. Strings go through
/// [`parse_currency`]; numbers are taken as-is; everything else is 0.
pub fn value_to_currency(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => number_to_decimal(n),
        Value::String(s) => parse_currency(s),
        _ => Decimal::ZERO,
    }
}
