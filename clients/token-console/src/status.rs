//! Status Lines
//!
//! Every operation ends in one status line. Errors are turned into
//! something a token admin can act on by matching substrings of the raw
//! message; anything unrecognized is shown verbatim.

use crate::error::ConsoleError;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: StatusKind::Info, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: StatusKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: StatusKind::Error, message: message.into() }
    }

    /// Status line for a failed operation.
    pub fn from_error(error: &ConsoleError) -> Self {
        match error {
            ConsoleError::MintNotFound(mint) => Self::error(format!(
                "The token mint {} does not exist on this network.",
                mint
            )),
            ConsoleError::MetadataNotFound(mint) => Self::error(format!(
                "The token mint {} has no metadata account.",
                mint
            )),
            other => Self::error(user_message(&other.to_string())),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.kind {
            StatusKind::Info => "info",
            StatusKind::Success => "ok",
            StatusKind::Error => "error",
        };
        write!(f, "[{}] {}", tag, self.message)
    }
}

// =============================================================================
// ERROR MAPPER
// =============================================================================

/// Rules are tried in order; the first match wins.
const RULES: &[(&[&str], &str)] = &[
    (
        &["custom program error: 0x11"],
        "This token account is frozen and cannot send or burn tokens.",
    ),
    (
        &["TokenOwnerOffCurveError"],
        "The recipient address is not on the ed25519 curve and cannot own a token account.",
    ),
    (
        &["insufficient funds for fee", "insufficient lamports", "Attempt to debit an account but found no record of a prior credit"],
        "Not enough SOL to pay the transaction fee.",
    ),
    (
        &["Transaction was not confirmed"],
        "The transaction was not confirmed in time. Check the network status and the explorer before retrying.",
    ),
    (
        &["owner does not match"],
        "The connected wallet is not the owner of this token account.",
    ),
    (
        &["authority does not match"],
        "The connected wallet does not hold this authority.",
    ),
    (
        &["Account does not exist", "AccountNotFound"],
        "The token account does not exist.",
    ),
    (
        &["account already exists", "already in use"],
        "The associated token account already exists.",
    ),
];

/// Token-program `0x1` (InsufficientFunds); must not swallow `0x10`, `0x11`...
const INSUFFICIENT_TOKENS: &str = "custom program error: 0x1";
const INSUFFICIENT_TOKENS_MESSAGE: &str =
    "Token balance too low, or the token account does not exist.";

/// Map a raw error message to user-facing text.
pub fn user_message(raw: &str) -> String {
    if contains_code(raw, INSUFFICIENT_TOKENS) {
        return INSUFFICIENT_TOKENS_MESSAGE.to_string();
    }
    for (needles, message) in RULES {
        if needles.iter().any(|n| raw.contains(n)) {
            return message.to_string();
        }
    }
    // Plain "insufficient funds" comes from the fee payer, after the
    // token-specific rules had their chance.
    if raw.contains("insufficient funds") {
        return "Not enough SOL to pay the transaction fee.".to_string();
    }
    raw.to_string()
}

/// `raw` contains `code` not followed by another hex digit.
fn contains_code(raw: &str, code: &str) -> bool {
    raw.match_indices(code).any(|(i, _)| {
        raw[i + code.len()..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_ascii_hexdigit())
    })
}
