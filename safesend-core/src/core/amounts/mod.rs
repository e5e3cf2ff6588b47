//! Fixed-point token amount conversion
//!
//! Converts between raw integer amounts (smallest token unit) and human
//! decimal strings. Works on decimal digit strings and `U256` only, never
//! on floating point.

use crate::shared::error::SafeSendError;
use crate::shared::types::{Decimals, SafeSendResult, U256};

/// Parse a human decimal amount into the token's raw integer unit.
///
/// Accepts digits with at most one `.` (`"1."` and `".5"` included) and
/// ignores surrounding whitespace. Fractional digits beyond `decimals` are
/// rejected unless they are all zero.
pub fn to_raw(human: &str, decimals: Decimals) -> SafeSendResult<U256> {
    let input = human.trim();
    if input.is_empty() {
        return Err(SafeSendError::invalid_amount("Amount cannot be empty"));
    }

    let (whole, fraction) = input.split_once('.').unwrap_or((input, ""));

    if whole.is_empty() && fraction.is_empty() {
        return Err(SafeSendError::invalid_amount(format!("{:?} is not a number", human)));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err(SafeSendError::invalid_amount(format!(
            "{:?} is not a non-negative decimal number",
            human
        )));
    }

    let decimals = decimals as usize;
    let (kept, excess) = if fraction.len() > decimals {
        fraction.split_at(decimals)
    } else {
        (fraction, "")
    };
    if excess.chars().any(|c| c != '0') {
        return Err(SafeSendError::invalid_amount(format!(
            "{:?} has more than {} decimal places",
            human, decimals
        )));
    }

    let mut digits = String::with_capacity(whole.len() + decimals);
    digits.push_str(whole);
    digits.push_str(kept);
    digits.extend(std::iter::repeat('0').take(decimals - kept.len()));

    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::zero());
    }

    U256::from_dec_str(digits)
        .map_err(|_| SafeSendError::invalid_amount(format!("{:?} exceeds the maximum token amount", human)))
}

/// Render a raw integer amount given as a decimal string.
///
/// An empty string renders as `"0"`.
pub fn to_human(raw: &str, decimals: Decimals) -> SafeSendResult<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok("0".to_string());
    }
    if !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(SafeSendError::invalid_amount(format!("{:?} is not a raw integer amount", raw)));
    }
    let value = U256::from_dec_str(raw)
        .map_err(|_| SafeSendError::invalid_amount(format!("{:?} exceeds the maximum token amount", raw)))?;
    Ok(format_units(value, decimals))
}

/// Render a raw amount with trailing fractional zeros stripped.
pub fn format_units(value: U256, decimals: Decimals) -> String {
    let digits = value.to_string();
    let decimals = decimals as usize;

    let (whole, fraction) = if digits.len() > decimals {
        let (whole, fraction) = digits.split_at(digits.len() - decimals);
        (whole.to_string(), fraction.to_string())
    } else {
        let mut fraction = "0".repeat(decimals - digits.len());
        fraction.push_str(&digits);
        ("0".to_string(), fraction)
    };

    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        whole
    } else {
        format!("{}.{}", whole, fraction)
    }
}
