//! Assertion Helper Functions
//!
//! Input checks shared by every operation. They run before any RPC call
//! that costs the user anything, so a bad form never reaches the network.
//!
//! # Usage Pattern
//!
//! ```ignore
//! let mint = parse_address("mint", &input.mint)?;
//! let recipient = parse_recipient(&input.recipient)?;
//! let amount = ui_amount_to_raw(&input.amount, mint_state.decimals)?;
//! assert_sufficient_balance(amount, source.amount, mint_state.decimals)?;
//! ```

use crate::error::{ConsoleError, ConsoleResult};
use crate::utils::amount::raw_to_ui_amount;
use solana_program::pubkey::Pubkey;
use std::str::FromStr;

// =============================================================================
// ADDRESS CHECKS
// =============================================================================

/// True when `value` is base58 for exactly 32 bytes.
pub fn is_valid_address(value: &str) -> bool {
    Pubkey::from_str(value.trim()).is_ok()
}

/// True when `value` is a valid address **and** a point on ed25519.
///
/// Program-derived addresses are off the curve; nobody holds a private
/// key for them, so tokens sent to one as a "wallet" are unreachable.
pub fn is_on_curve_address(value: &str) -> bool {
    Pubkey::from_str(value.trim())
        .map(|key| key.is_on_curve())
        .unwrap_or(false)
}

/// Parse a form field into a public key.
///
/// # Errors
///
/// * `MissingField` - the field is blank
/// * `InvalidAddress` - not base58 of a 32-byte key
pub fn parse_address(field: &'static str, value: &str) -> ConsoleResult<Pubkey> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConsoleError::MissingField(field));
    }
    Pubkey::from_str(trimmed).map_err(|_| ConsoleError::InvalidAddress {
        field,
        value: trimmed.to_string(),
    })
}

/// Parse a transfer recipient: a valid address that is on the curve.
pub fn parse_recipient(value: &str) -> ConsoleResult<Pubkey> {
    let key = parse_address("recipient", value)?;
    if !key.is_on_curve() {
        return Err(ConsoleError::AddressOffCurve {
            field: "recipient",
            value: value.trim().to_string(),
        });
    }
    Ok(key)
}

/// Parse an optional address field; blank means "none".
pub fn parse_optional_address(field: &'static str, value: Option<&str>) -> ConsoleResult<Option<Pubkey>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_address(field, v).map(Some),
    }
}

// =============================================================================
// BALANCE CHECKS
// =============================================================================

/// Reject amounts above the current balance.
///
/// Both sides are base units; the error shows them with `decimals`.
pub fn assert_sufficient_balance(amount: u64, balance: u64, decimals: u8) -> ConsoleResult<()> {
    if amount > balance {
        return Err(ConsoleError::AmountExceedsBalance {
            requested: raw_to_ui_amount(amount, decimals),
            available: raw_to_ui_amount(balance, decimals),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signature::{Keypair, Signer};

    #[test]
    fn test_rejects_malformed_addresses() {
        for bad in [
            "",
            "not-an-address",
            "0OIl0OIl0OIl0OIl0OIl0OIl0OIl0OIl",   // characters outside base58
            "3yZe7d",                             // too short
            "11111111111111111111111111111111111111111111111", // too long
        ] {
            assert!(!is_valid_address(bad), "{} should be invalid", bad);
            assert!(!is_on_curve_address(bad));
        }
    }

    #[test]
    fn test_accepts_wallet_address() {
        let wallet = Keypair::new().pubkey().to_string();
        assert!(is_valid_address(&wallet));
        assert!(is_on_curve_address(&wallet));
        assert_eq!(parse_recipient(&format!("  {}  ", wallet)).unwrap().to_string(), wallet);
    }

    #[test]
    fn test_pda_is_valid_but_off_curve() {
        let (pda, _) = Pubkey::find_program_address(&[b"vault"], &crate::token_program::id());
        let text = pda.to_string();
        assert!(is_valid_address(&text));
        assert!(!is_on_curve_address(&text));
        assert!(matches!(
            parse_recipient(&text),
            Err(ConsoleError::AddressOffCurve { field: "recipient", .. })
        ));
    }

    #[test]
    fn test_parse_address_names_the_field() {
        match parse_address("mint", "xyz") {
            Err(ConsoleError::InvalidAddress { field, value }) => {
                assert_eq!(field, "mint");
                assert_eq!(value, "xyz");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(parse_address("mint", "   "), Err(ConsoleError::MissingField("mint"))));
        assert_eq!(parse_optional_address("authority", Some(" ")).unwrap(), None);
    }

    #[test]
    fn test_balance_check() {
        assert!(assert_sufficient_balance(100, 100, 2).is_ok());
        match assert_sufficient_balance(101, 100, 2) {
            Err(ConsoleError::AmountExceedsBalance { requested, available }) => {
                assert_eq!(requested, "1.01");
                assert_eq!(available, "1.00");
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
