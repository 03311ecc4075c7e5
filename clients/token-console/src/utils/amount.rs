//! Token amounts
//!
//! Users type amounts in display units ("12.5"); instructions carry base
//! units (`12_500_000` at 6 decimals). Conversion is exact string
//! arithmetic, never floating point.

use crate::error::{ConsoleError, ConsoleResult};
use num_traits::checked_pow;

/// Largest decimals value the console accepts when creating a mint.
pub const MAX_DECIMALS: u8 = 9;

/// `10^decimals`, or None if it does not fit in a u64.
fn scale(decimals: u8) -> Option<u64> {
    checked_pow(10u64, decimals as usize)
}

/// Reject decimals above [`MAX_DECIMALS`].
pub fn validate_decimals(decimals: u8) -> ConsoleResult<u8> {
    if decimals > MAX_DECIMALS {
        return Err(ConsoleError::InvalidDecimals {
            value: decimals,
            max: MAX_DECIMALS,
        });
    }
    Ok(decimals)
}

/// Convert a display amount to base units.
///
/// Rejects blank, signed, non-numeric and zero amounts, more fractional
/// digits than `decimals`, and results that overflow a u64.
pub fn ui_amount_to_raw(value: &str, decimals: u8) -> ConsoleResult<u64> {
    let trimmed = value.trim();
    let invalid = |reason: &str| ConsoleError::InvalidAmount {
        value: trimmed.to_string(),
        reason: reason.to_string(),
    };

    if trimmed.is_empty() {
        return Err(ConsoleError::MissingField("amount"));
    }

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid("not a number"));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("must be a positive decimal number"));
    }
    if fraction.len() > decimals as usize {
        return Err(invalid(&format!(
            "at most {} decimal places allowed",
            decimals
        )));
    }

    let overflow = || invalid("amount too large");
    let unit = scale(decimals).ok_or_else(overflow)?;

    let whole_units: u64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| overflow())?
    };

    let mut fraction_units: u64 = 0;
    if !fraction.is_empty() {
        let padding = decimals as usize - fraction.len();
        let digits: u64 = fraction.parse().map_err(|_| overflow())?;
        let pad = checked_pow(10u64, padding).ok_or_else(overflow)?;
        fraction_units = digits.checked_mul(pad).ok_or_else(overflow)?;
    }

    let raw = whole_units
        .checked_mul(unit)
        .and_then(|w| w.checked_add(fraction_units))
        .ok_or_else(overflow)?;

    if raw == 0 {
        return Err(invalid("must be greater than zero"));
    }
    Ok(raw)
}

/// Format base units with exactly `decimals` fractional digits.
pub fn raw_to_ui_amount(raw: u64, decimals: u8) -> String {
    if decimals == 0 {
        return raw.to_string();
    }
    let digits = format!("{:0>width$}", raw, width = decimals as usize + 1);
    let split = digits.len() - decimals as usize;
    format!("{}.{}", &digits[..split], &digits[split..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_and_fractional() {
        assert_eq!(ui_amount_to_raw("12.5", 6).unwrap(), 12_500_000);
        assert_eq!(ui_amount_to_raw("1", 9).unwrap(), 1_000_000_000);
        assert_eq!(ui_amount_to_raw(".25", 2).unwrap(), 25);
        assert_eq!(ui_amount_to_raw("7.", 0).unwrap(), 7);
        assert_eq!(ui_amount_to_raw(" 0.000001 ", 6).unwrap(), 1);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(ui_amount_to_raw("", 6), Err(ConsoleError::MissingField("amount"))));
        for bad in [".", "-1", "+1", "abc", "1e3", "1.2.3", "0", "0.000"] {
            assert!(
                matches!(ui_amount_to_raw(bad, 6), Err(ConsoleError::InvalidAmount { .. })),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_rejects_excess_precision() {
        assert!(ui_amount_to_raw("0.1234567", 6).is_err());
        assert!(ui_amount_to_raw("1.5", 0).is_err());
    }

    #[test]
    fn test_overflow() {
        assert_eq!(ui_amount_to_raw("18446744073709551615", 0).unwrap(), u64::MAX);
        assert!(ui_amount_to_raw("18446744073709551616", 0).is_err());
        assert!(ui_amount_to_raw("18446744074", 9).is_err());
    }

    #[test]
    fn test_formatting() {
        assert_eq!(raw_to_ui_amount(5_000_000, 6), "5.000000");
        assert_eq!(raw_to_ui_amount(1, 9), "0.000000001");
        assert_eq!(raw_to_ui_amount(42, 0), "42");
        assert_eq!(raw_to_ui_amount(0, 2), "0.00");
        assert_eq!(raw_to_ui_amount(u64::MAX, 9), "18446744073.709551615");
    }

    #[test]
    fn test_decimals_limit() {
        assert_eq!(validate_decimals(9).unwrap(), 9);
        assert!(matches!(
            validate_decimals(10),
            Err(ConsoleError::InvalidDecimals { value: 10, max: 9 })
        ));
    }
}
