//! Authority Validation
//!
//! The token programs reject an instruction signed by the wrong authority,
//! but only after the user paid the fee. These checks read the authority
//! from the fetched mint (or metadata) and compare it with the connected
//! wallet first.
//!
//! ```text
//! on-chain authority == None       -> AuthorityNotSet
//! on-chain authority != wallet     -> AuthorityMismatch
//! otherwise                        -> Ok(authority)
//! ```

use crate::error::{ConsoleError, ConsoleResult};
use crate::instruction::AuthorityType;
use solana_program::pubkey::Pubkey;
use std::fmt;

/// The authorities the console manages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthorityKind {
    /// Mint authority on the mint.
    MintTokens,
    /// Freeze authority on the mint.
    FreezeAccount,
    /// Update authority on the metadata account.
    MetadataUpdate,
}

impl AuthorityKind {
    /// SPL Token authority type, None for the metadata authority.
    pub fn token_authority_type(self) -> Option<AuthorityType> {
        match self {
            AuthorityKind::MintTokens => Some(AuthorityType::MintTokens),
            AuthorityKind::FreezeAccount => Some(AuthorityType::FreezeAccount),
            AuthorityKind::MetadataUpdate => None,
        }
    }
}

impl fmt::Display for AuthorityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AuthorityKind::MintTokens => "mint authority",
            AuthorityKind::FreezeAccount => "freeze authority",
            AuthorityKind::MetadataUpdate => "metadata update authority",
        })
    }
}

impl std::str::FromStr for AuthorityKind {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mint" | "mint-tokens" | "mint_tokens" => Ok(AuthorityKind::MintTokens),
            "freeze" | "freeze-account" | "freeze_account" => Ok(AuthorityKind::FreezeAccount),
            "metadata" | "update" | "metadata-update" => Ok(AuthorityKind::MetadataUpdate),
            other => Err(ConsoleError::Config(format!("unknown authority type '{}'", other))),
        }
    }
}

/// Require that `wallet` currently holds the `kind` authority.
pub fn assert_authority(
    current: Option<Pubkey>,
    wallet: &Pubkey,
    kind: AuthorityKind,
) -> ConsoleResult<Pubkey> {
    let expected = current.ok_or(ConsoleError::AuthorityNotSet(kind))?;
    if expected != *wallet {
        return Err(ConsoleError::AuthorityMismatch {
            kind,
            expected,
            actual: *wallet,
        });
    }
    Ok(expected)
}
