//! Account State Structures
//!
//! Decoders for the SPL Token account layouts the console reads back from
//! RPC `getAccountInfo` responses.
//!
//! # Account Types
//!
//! | Type | Size | Description |
//! |------|------|-------------|
//! | Mint | 82 bytes | Token type: supply, decimals, authorities |
//! | Account | 165 bytes | Balance of one mint held by one owner |
//!
//! # Serialization
//!
//! Fixed-size, little-endian, no padding. Optional keys use the 4-byte tag
//! `COption` layout of the SPL Token program.
//!
//! ```ignore
//! let mint = Mint::unpack_from_slice(&ledger_account.data)?;
//! ```

// =============================================================================
// SUBMODULES
// =============================================================================

pub mod account;
pub mod mint;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use account::{Account, AccountState};
pub use mint::Mint;

use arrayref::{array_refs, mut_array_refs};
use solana_program::{program_error::ProgramError, pubkey::Pubkey};

// =============================================================================
// PACK TRAIT
// =============================================================================

/// Packing/unpacking of fixed-size account state.
///
/// `pack` is only needed by tests and local fixtures; the console never
/// writes account data itself.
pub trait Pack: Sized {
    /// The fixed size in bytes when serialized.
    const LEN: usize;

    /// Deserialize from a byte slice of at least `LEN` bytes.
    fn unpack(input: &[u8]) -> Result<Self, ProgramError>;

    /// Serialize into a byte slice of at least `LEN` bytes.
    fn pack(&self, output: &mut [u8]) -> Result<(), ProgramError>;

    /// Unpack with length validation.
    ///
    /// RPC data is untrusted: a wrong-sized buffer means the address is not
    /// the kind of account the caller expected.
    fn unpack_from_slice(src: &[u8]) -> Result<Self, ProgramError> {
        if src.len() != Self::LEN {
            return Err(ProgramError::InvalidAccountData);
        }
        Self::unpack(src)
    }

    /// Pack with length validation.
    fn pack_into_slice(&self, dst: &mut [u8]) -> Result<(), ProgramError> {
        if dst.len() != Self::LEN {
            return Err(ProgramError::InvalidAccountData);
        }
        self.pack(dst)
    }

    /// Pack into a freshly allocated buffer.
    fn pack_to_vec(&self) -> Result<Vec<u8>, ProgramError> {
        let mut buf = vec![0u8; Self::LEN];
        self.pack(&mut buf)?;
        Ok(buf)
    }
}

// =============================================================================
// COPTION - COMPACT OPTIONAL TYPE
// =============================================================================

/// Optional value with the SPL on-chain layout.
///
/// ```text
/// COption<Pubkey>: [tag: u32 LE][value: 32 bytes]
/// COption<u64>:    [tag: u32 LE][value: 8 bytes]
/// ```
///
/// Tag 0 is None (value bytes zeroed), tag 1 is Some.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct COption<T> {
    value: Option<T>,
}

impl<T> COption<T> {
    pub fn some(value: T) -> Self {
        Self { value: Some(value) }
    }

    pub fn none() -> Self {
        Self { value: None }
    }

    pub fn is_some(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_none(&self) -> bool {
        self.value.is_none()
    }

    /// Get a reference to the inner value, if present.
    pub fn as_ref(&self) -> Option<&T> {
        self.value.as_ref()
    }
}

impl<T: Copy> COption<T> {
    /// Copy the inner value out as a standard `Option`.
    pub fn get(&self) -> Option<T> {
        self.value
    }
}

impl<T> From<Option<T>> for COption<T> {
    fn from(opt: Option<T>) -> Self {
        Self { value: opt }
    }
}

impl<T> From<COption<T>> for Option<T> {
    fn from(copt: COption<T>) -> Self {
        copt.value
    }
}

// =============================================================================
// COPTION CODECS
// =============================================================================

pub(crate) fn unpack_coption_pubkey(src: &[u8; 36]) -> Result<COption<Pubkey>, ProgramError> {
    let (tag, body) = array_refs![src, 4, 32];
    match u32::from_le_bytes(*tag) {
        0 => Ok(COption::none()),
        1 => Ok(COption::some(Pubkey::new_from_array(*body))),
        _ => Err(ProgramError::InvalidAccountData),
    }
}

pub(crate) fn pack_coption_pubkey(src: &COption<Pubkey>, dst: &mut [u8; 36]) {
    let (tag, body) = mut_array_refs![dst, 4, 32];
    match src.as_ref() {
        Some(pubkey) => {
            *tag = 1u32.to_le_bytes();
            body.copy_from_slice(pubkey.as_ref());
        }
        None => {
            *tag = 0u32.to_le_bytes();
            body.fill(0);
        }
    }
}

pub(crate) fn unpack_coption_u64(src: &[u8; 12]) -> Result<COption<u64>, ProgramError> {
    let (tag, body) = array_refs![src, 4, 8];
    match u32::from_le_bytes(*tag) {
        0 => Ok(COption::none()),
        1 => Ok(COption::some(u64::from_le_bytes(*body))),
        _ => Err(ProgramError::InvalidAccountData),
    }
}

pub(crate) fn pack_coption_u64(src: &COption<u64>, dst: &mut [u8; 12]) {
    let (tag, body) = mut_array_refs![dst, 4, 8];
    match src.as_ref() {
        Some(value) => {
            *tag = 1u32.to_le_bytes();
            *body = value.to_le_bytes();
        }
        None => {
            *tag = 0u32.to_le_bytes();
            body.fill(0);
        }
    }
}

/*
=============================================================================
DETAILED EXPLANATION
=============================================================================

WHY DECODE BY HAND?
===================

The console only ever reads two account types, and their layouts have
been frozen since the SPL Token program shipped. Decoding 82 and 165
bytes with arrayref keeps the client independent of the on-chain crate
versions and makes every offset visible in one place.

COPTION VS OPTION
=================

Option<Pubkey> has no stable byte layout. The program stores a 4-byte
tag followed by the full value width, zeroed when absent. A tag other
than 0 or 1 means the bytes are not a real SPL account, so decoding
fails with InvalidAccountData instead of guessing.
*/
