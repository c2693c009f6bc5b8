//! Numeric token parsing under invariant-culture number styles.
//!
//! Path tokens go through two passes. [`is_numeric`] decides whether a token
//! is a number at all, using the permissive [`Styles::ANY`] rules. The
//! arithmetic then converts with the stricter [`to_decimal`] ([`Styles::NUMBER`])
//! or [`to_double`] ([`Styles::FLOAT`]). A token can pass the first pass and
//! fail the second (`1e3`, `(5)`, `NaN` are numbers but not decimals); that
//! failure is a [`ConversionError`], not a validation failure.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Why a validated token could not be converted.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error("Input string was not in a correct format.")]
    Format,

    #[error("Value was either too large or too small for a Decimal.")]
    Overflow,
}

/// Which lexical elements a token may contain.
#[derive(Clone, Copy, Debug)]
pub struct Styles {
    pub leading_white: bool,
    pub trailing_white: bool,
    pub leading_sign: bool,
    pub trailing_sign: bool,
    pub parentheses: bool,
    pub decimal_point: bool,
    pub thousands: bool,
    pub exponent: bool,
    pub currency: bool,
}

impl Styles {
    /// Everything allowed.
    pub const ANY: Self = Self {
        leading_white: true,
        trailing_white: true,
        leading_sign: true,
        trailing_sign: true,
        parentheses: true,
        decimal_point: true,
        thousands: true,
        exponent: true,
        currency: true,
    };

    /// Plain decimal numbers: signs, point and group separators, no exponent.
    pub const NUMBER: Self = Self {
        leading_white: true,
        trailing_white: true,
        leading_sign: true,
        trailing_sign: true,
        parentheses: false,
        decimal_point: true,
        thousands: true,
        exponent: false,
        currency: false,
    };

    /// Floating-point numbers with group separators.
    pub const FLOAT: Self = Self {
        leading_white: true,
        trailing_white: true,
        leading_sign: true,
        trailing_sign: false,
        parentheses: false,
        decimal_point: true,
        thousands: true,
        exponent: true,
        currency: false,
    };
}

const CURRENCY: char = '¤';

/// A token split into its parts, separators removed.
#[derive(Debug, PartialEq)]
struct Parsed {
    negative: bool,
    integral: String,
    fraction: String,
    exponent: i64,
}

/// True when `token` parses as a floating-point number under [`Styles::ANY`].
pub fn is_numeric(token: &str) -> bool {
    parse_double(token, Styles::ANY).is_some()
}

/// Converts a token to a 96-bit decimal under [`Styles::NUMBER`].
pub fn to_decimal(token: &str) -> Result<Decimal, ConversionError> {
    let parsed = parse(token, Styles::NUMBER).ok_or(ConversionError::Format)?;

    let integral = parsed.integral.trim_start_matches('0');
    let literal = match (integral.is_empty(), parsed.fraction.is_empty()) {
        (true, true) => "0".to_owned(),
        (true, false) => format!("0.{}", parsed.fraction),
        (false, true) => integral.to_owned(),
        (false, false) => format!("{integral}.{}", parsed.fraction),
    };

    // The literal is syntactically clean here; a parse failure means range.
    let mut value = Decimal::from_str(&literal).map_err(|_| ConversionError::Overflow)?;
    if parsed.negative && !value.is_zero() {
        value.set_sign_negative(true);
    }
    Ok(value)
}

/// Converts a token to an `f64` under [`Styles::FLOAT`].
pub fn to_double(token: &str) -> Result<f64, ConversionError> {
    parse_double(token, Styles::FLOAT).ok_or(ConversionError::Format)
}

fn parse_double(token: &str, styles: Styles) -> Option<f64> {
    if let Some(special) = special_symbol(token) {
        return Some(special);
    }
    let p = parse(token, styles)?;
    let integral = if p.integral.is_empty() { "0" } else { &p.integral };
    let fraction = if p.fraction.is_empty() { "0" } else { &p.fraction };
    let sign = if p.negative { "-" } else { "" };
    format!("{sign}{integral}.{fraction}e{}", p.exponent).parse().ok()
}

/// `NaN` and the infinity spellings, accepted by every floating style.
fn special_symbol(token: &str) -> Option<f64> {
    let t = token.trim_matches(is_white);
    let (negative, rest) = match t.as_bytes().first() {
        Some(b'-') => (true, &t[1..]),
        Some(b'+') => (false, &t[1..]),
        _ => (false, t),
    };
    let value = if rest.eq_ignore_ascii_case("infinity") || rest == "∞" {
        f64::INFINITY
    } else if t.eq_ignore_ascii_case("nan") {
        return Some(f64::NAN);
    } else {
        return None;
    };
    Some(if negative { -value } else { value })
}

fn is_white(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r')
}

fn parse(token: &str, styles: Styles) -> Option<Parsed> {
    let mut s = token;
    if styles.leading_white {
        s = s.trim_start_matches(is_white);
    }
    if styles.trailing_white {
        s = s.trim_end_matches(is_white);
    }

    let mut negative = false;
    if styles.parentheses && s.starts_with('(') && s.ends_with(')') && s.len() >= 2 {
        negative = true;
        s = &s[1..s.len() - 1];
    }

    if styles.currency {
        s = strip_currency(s);
    }

    let mut signed = negative;
    if styles.leading_sign && !signed {
        if let Some(rest) = s.strip_prefix('-') {
            negative = true;
            signed = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('+') {
            signed = true;
            s = rest;
        }
        if signed && styles.currency {
            s = s.strip_prefix(CURRENCY).unwrap_or(s);
        }
    }
    if styles.trailing_sign && !signed {
        if let Some(rest) = s.strip_suffix('-') {
            negative = true;
            s = rest;
        } else if let Some(rest) = s.strip_suffix('+') {
            s = rest;
        }
        if styles.currency {
            s = s.strip_suffix(CURRENCY).unwrap_or(s);
        }
    }

    let mut chars = s.chars().peekable();

    let mut integral = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            integral.push(c);
        } else if c != ',' || !styles.thousands || integral.is_empty() {
            // a group separator only counts once a digit has been seen
            break;
        }
        chars.next();
    }

    let mut fraction = String::new();
    if styles.decimal_point && chars.peek() == Some(&'.') {
        chars.next();
        while let Some(&c) = chars.peek().filter(|c| c.is_ascii_digit()) {
            fraction.push(c);
            chars.next();
        }
    }

    if integral.is_empty() && fraction.is_empty() {
        return None;
    }

    let mut exponent: i64 = 0;
    if styles.exponent && matches!(chars.peek(), Some('e' | 'E')) {
        chars.next();
        let exp_negative = match chars.peek() {
            Some('-') => {
                chars.next();
                true
            }
            Some('+') => {
                chars.next();
                false
            }
            _ => false,
        };
        let mut seen = false;
        while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
            seen = true;
            // saturates far beyond any f64 exponent
            exponent = (exponent * 10 + i64::from(d)).min(1_000_000);
            chars.next();
        }
        if !seen {
            return None;
        }
        if exp_negative {
            exponent = -exponent;
        }
    }

    if chars.next().is_some() {
        return None;
    }

    Some(Parsed { negative, integral, fraction, exponent })
}

fn strip_currency(s: &str) -> &str {
    if let Some(rest) = s.strip_prefix(CURRENCY) {
        rest
    } else if let Some(rest) = s.strip_suffix(CURRENCY) {
        rest
    } else {
        s
    }
}

/// Renders an `f64` in shortest round-trip form.
///
/// Exponents of 15 and above or below -4 switch to scientific notation with a
/// signed, at-least-two-digit exponent (`1E+15`, `1E-05`). Not-a-number is
/// `NaN` and infinities are `∞`/`-∞`.
pub fn format_double(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_owned();
    }
    if x.is_infinite() {
        return if x > 0.0 { "∞".to_owned() } else { "-∞".to_owned() };
    }
    if x == 0.0 {
        return format!("{x}");
    }

    let sci = format!("{x:e}");
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => return format!("{x}"),
    };

    if (-4..15).contains(&exp) {
        format!("{x}")
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}E{sign}{:02}", exp.abs())
    }
}
