//! Console Error Types
//!
//! Every failure an operation can hit, grouped the way the console reports
//! them. None of these are fatal: the caller renders the error as a status
//! line and the user may retry.
//!
//! # Categories
//!
//! | Category | Raised |
//! |----------|--------|
//! | Validation | Before any transaction is built |
//! | Authorization | Wallet does not hold (or nobody holds) the authority |
//! | Network | Send failures, on-chain failures, confirmation timeout |
//! | State | Missing, foreign or undecodable accounts |
//! | Storage | Local history file |

use crate::submitter::SubmissionState;
use crate::utils::authority::AuthorityKind;
use solana_program::{program_error::ProgramError, pubkey::Pubkey};
use solana_sdk::signature::Signature;
use thiserror::Error;

/// Result alias used across the crate.
pub type ConsoleResult<T> = Result<T, ConsoleError>;

// =============================================================================
// ERROR ENUM
// =============================================================================

/// Errors returned by console operations.
#[derive(Error, Debug)]
pub enum ConsoleError {
    // =========================================================================
    // INPUT VALIDATION
    // =========================================================================

    /// A required form field was left empty.
    #[error("Required field missing: {0}")]
    MissingField(&'static str),

    /// The string is not a base58-encoded 32-byte public key.
    #[error("Invalid {field} address: {value}")]
    InvalidAddress { field: &'static str, value: String },

    /// The key decodes but is not an ed25519 point, so no wallet can own it.
    #[error("Invalid {field} address (not on the ed25519 curve): {value}")]
    AddressOffCurve { field: &'static str, value: String },

    /// The amount string could not be turned into base units.
    #[error("Invalid amount '{value}': {reason}")]
    InvalidAmount { value: String, reason: String },

    /// The requested amount is larger than what the account holds.
    #[error("Amount {requested} exceeds balance {available}")]
    AmountExceedsBalance { requested: String, available: String },

    /// Decimals outside the supported range.
    #[error("Decimals must be between 0 and {max}, got {value}")]
    InvalidDecimals { value: u8, max: u8 },

    /// Metadata name/symbol/uri too long for the metadata program.
    #[error("Metadata {field} is too long ({len} > {max} bytes)")]
    MetadataTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// Metadata update authority can only be handed over, never cleared.
    #[error("The metadata update authority cannot be revoked, only transferred")]
    RevokeNotSupported,

    // =========================================================================
    // AUTHORIZATION
    // =========================================================================

    /// The mint (or metadata) has no holder for this authority.
    #[error("This token has no {0} set")]
    AuthorityNotSet(AuthorityKind),

    /// The connected wallet is not the on-chain authority.
    #[error("The {kind} belongs to {expected}; wallet {actual} cannot use it")]
    AuthorityMismatch {
        kind: AuthorityKind,
        expected: Pubkey,
        actual: Pubkey,
    },

    // =========================================================================
    // NETWORK / RPC
    // =========================================================================

    /// The RPC endpoint rejected or failed a request.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// The wallet could not sign the transaction.
    #[error("Signing failed: {0}")]
    Signing(String),

    /// The transaction landed but the program returned an error.
    #[error("Transaction {signature} failed: {reason}")]
    TransactionFailed { signature: Signature, reason: String },

    /// The submitter was driven out of order.
    #[error("Illegal submission transition {from:?} -> {to:?}")]
    InvalidTransition {
        from: SubmissionState,
        to: SubmissionState,
    },

    /// No confirmation was observed within the retry budget.
    #[error("Transaction was not confirmed after {attempts} attempts: {signature}")]
    ConfirmationTimeout { signature: Signature, attempts: u32 },

    // =========================================================================
    // LEDGER STATE
    // =========================================================================

    /// No account lives at this address.
    #[error("Account does not exist: {0}")]
    AccountNotFound(Pubkey),

    /// The mint address holds nothing on the selected network.
    #[error("Token mint does not exist: {0}")]
    MintNotFound(Pubkey),

    /// The mint was created without display metadata.
    #[error("No metadata account for mint {0}")]
    MetadataNotFound(Pubkey),

    /// The account exists but is owned by a different program.
    #[error("Account {address} is not owned by {expected_owner}")]
    InvalidAccountOwner {
        address: Pubkey,
        expected_owner: Pubkey,
    },

    /// The account data does not decode as the expected layout.
    #[error("Invalid account data: {0}")]
    InvalidAccountData(String),

    /// Creating an account that is already there.
    #[error("Associated token account already exists: {0}")]
    AccountAlreadyExists(Pubkey),

    /// A token account belongs to a different mint than the one requested.
    #[error("Token account {account} holds mint {actual}, not {expected}")]
    MintMismatch {
        account: Pubkey,
        expected: Pubkey,
        actual: Pubkey,
    },

    /// Source account is frozen and cannot move tokens.
    #[error("Token account {0} is frozen")]
    AccountFrozen(Pubkey),

    /// Freeze on a frozen account, or thaw on a thawed one.
    #[error("Token account {account} is already {state}")]
    AccountStateUnchanged { account: Pubkey, state: &'static str },

    /// The metadata account exists but cannot be changed anymore.
    #[error("Metadata for mint {0} is immutable")]
    MetadataImmutable(Pubkey),

    // =========================================================================
    // LOCAL STORAGE
    // =========================================================================

    /// History file could not be read or written.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// History file is not valid JSON for the expected record type.
    #[error("Storage format error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

// =============================================================================
// CONVERSIONS
// =============================================================================

/// SPL layout decoding reports through `ProgramError`.
impl From<ProgramError> for ConsoleError {
    fn from(e: ProgramError) -> Self {
        ConsoleError::InvalidAccountData(e.to_string())
    }
}

/// Keep the RPC message text intact so the status mapper can match on it.
impl From<solana_client::client_error::ClientError> for ConsoleError {
    fn from(e: solana_client::client_error::ClientError) -> Self {
        ConsoleError::Rpc(e.to_string())
    }
}

impl From<solana_sdk::signer::SignerError> for ConsoleError {
    fn from(e: solana_sdk::signer::SignerError) -> Self {
        ConsoleError::Signing(e.to_string())
    }
}

impl ConsoleError {
    /// True for errors raised before anything was sent to the network.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ConsoleError::MissingField(_)
                | ConsoleError::InvalidAddress { .. }
                | ConsoleError::AddressOffCurve { .. }
                | ConsoleError::InvalidAmount { .. }
                | ConsoleError::AmountExceedsBalance { .. }
                | ConsoleError::InvalidDecimals { .. }
                | ConsoleError::MetadataTooLong { .. }
                | ConsoleError::RevokeNotSupported
        )
    }

    /// True when the wallet lacks the authority the operation needs.
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            ConsoleError::AuthorityNotSet(_) | ConsoleError::AuthorityMismatch { .. }
        )
    }
}
