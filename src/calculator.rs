//! Arithmetic over numeric path tokens.
//!
//! Every operation is a pure function of its tokens. Checks run in a fixed
//! order: empty tokens, then [`is_numeric`], then conversion and arithmetic.
//! Failures in the last step are [`Rejection::Internal`].

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::numeric::{self, ConversionError, is_numeric};
use crate::rejection::{Outcome, Rejection};

pub const INVALID_INPUT: &str = "Invalid Input";
pub const INVALID_INPUT_BANG: &str = "Invalid Input!";
pub const MISSING_OPERAND: &str = "Ooops! É impossível uma operação com apenas um número ou nenhum!";
pub const MISSING_RADICAND: &str = "Oooops! É necessário informar um número.";
pub const MISSING_AVERAGE_OPERAND: &str =
    "Oooops! Não é possível obter a média de um ou nenhum número!";
pub const DIVIDEND_TOO_SMALL: &str =
    "Ooops! Em uma divisão o primeiro número não pode ser menor que o segundo...";
pub const DIVIDE_BY_ZERO: &str = "Attempted to divide by zero.";

/// `a + b`.
///
/// Unlike the other operations there is no separate empty-token check; an
/// empty token simply is not numeric.
pub fn sum(a: &str, b: &str) -> Outcome<String> {
    debug!(a, b, "sum");
    if !(is_numeric(a) && is_numeric(b)) {
        return Err(Rejection::invalid(INVALID_INPUT));
    }
    let (x, y) = decimals(a, b)?;
    checked(x.checked_add(y)).map(|v| v.to_string()).inspect_err(log_internal)
}

/// `a - b`.
pub fn minus(a: &str, b: &str) -> Outcome<String> {
    debug!(a, b, "minus");
    binary(a, b, MISSING_OPERAND, |x, y| checked(x.checked_sub(y)))
}

/// `a / b`, refused when `a < b`.
pub fn division(a: &str, b: &str) -> Outcome<String> {
    debug!(a, b, "division");
    binary(a, b, MISSING_OPERAND, |x, y| {
        if x < y {
            return Err(Rejection::invalid(DIVIDEND_TOO_SMALL));
        }
        if y.is_zero() {
            return Err(Rejection::Internal(DIVIDE_BY_ZERO.to_owned()));
        }
        checked(x.checked_div(y))
    })
}

/// `a * b`.
pub fn multiplication(a: &str, b: &str) -> Outcome<String> {
    debug!(a, b, "multiplication");
    binary(a, b, MISSING_OPERAND, |x, y| checked(x.checked_mul(y)))
}

/// `√n` in double precision. Negative input yields `NaN`.
pub fn sqrt(n: &str) -> Outcome<String> {
    debug!(n, "sqrt");
    if n.is_empty() {
        return Err(Rejection::invalid(MISSING_RADICAND));
    }
    if !is_numeric(n) {
        return Err(Rejection::invalid(INVALID_INPUT_BANG));
    }
    let x = numeric::to_double(n).map_err(Rejection::internal).inspect_err(log_internal)?;
    Ok(numeric::format_double(x.sqrt()))
}

/// `a + b / 2`.
///
/// This is literal operator precedence, not the arithmetic mean: `medium("2", "4")`
/// is `4`. Existing clients depend on it.
pub fn medium(a: &str, b: &str) -> Outcome<String> {
    debug!(a, b, "medium");
    binary(a, b, MISSING_AVERAGE_OPERAND, |x, y| {
        let half = checked(y.checked_div(Decimal::TWO))?;
        checked(x.checked_add(half))
    })
}

/// Shared flow of the two-operand operations other than [`sum`].
fn binary<F>(a: &str, b: &str, missing: &str, op: F) -> Outcome<String>
where
    F: FnOnce(Decimal, Decimal) -> Outcome<Decimal>,
{
    if a.is_empty() || b.is_empty() {
        return Err(Rejection::invalid(missing));
    }
    if !(is_numeric(a) && is_numeric(b)) {
        return Err(Rejection::invalid(INVALID_INPUT_BANG));
    }
    let (x, y) = decimals(a, b)?;
    op(x, y).map(|v| v.to_string()).inspect_err(log_internal)
}

fn decimals(a: &str, b: &str) -> Outcome<(Decimal, Decimal)> {
    let convert = |t: &str| numeric::to_decimal(t).map_err(Rejection::internal);
    let pair = convert(a).and_then(|x| Ok((x, convert(b)?)));
    pair.inspect_err(log_internal)
}

fn checked(value: Option<Decimal>) -> Outcome<Decimal> {
    value.ok_or_else(|| Rejection::internal(ConversionError::Overflow))
}

fn log_internal(rejection: &Rejection) {
    if let Rejection::Internal(msg) = rejection {
        warn!(error = %msg, "arithmetic failed");
    }
}
