//! Token Account State
//!
//! A token account holds the balance of one mint for one owner. The
//! console reads it to check balances before burning or transferring and
//! to report the frozen flag.
//!
//! # Size: 165 bytes (SPL Token layout)

use crate::state::{
    pack_coption_pubkey, pack_coption_u64, unpack_coption_pubkey, unpack_coption_u64, COption,
    Pack,
};
use arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs};
use solana_program::{program_error::ProgramError, pubkey::Pubkey};

// =============================================================================
// ACCOUNT STATE ENUM
// =============================================================================

/// Lifecycle state byte of a token account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccountState {
    #[default]
    Uninitialized,

    Initialized,

    /// Frozen by the mint's freeze authority; no transfers or burns.
    Frozen,
}

impl AccountState {
    pub fn from_u8(value: u8) -> Result<Self, ProgramError> {
        match value {
            0 => Ok(AccountState::Uninitialized),
            1 => Ok(AccountState::Initialized),
            2 => Ok(AccountState::Frozen),
            _ => Err(ProgramError::InvalidAccountData),
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            AccountState::Uninitialized => 0,
            AccountState::Initialized => 1,
            AccountState::Frozen => 2,
        }
    }

    /// Word used in status lines.
    pub fn label(self) -> &'static str {
        match self {
            AccountState::Uninitialized => "uninitialized",
            AccountState::Initialized => "active",
            AccountState::Frozen => "frozen",
        }
    }
}

// =============================================================================
// ACCOUNT STRUCTURE
// =============================================================================

/// Token account data.
///
/// # Memory Layout (165 bytes total)
///
/// ```text
/// ┌────────┬──────┬──────────────────┬─────────────────┐
/// │ Offset │ Size │ Field            │ Type            │
/// ├────────┼──────┼──────────────────┼─────────────────┤
/// │ 0      │ 32   │ mint             │ Pubkey          │
/// │ 32     │ 32   │ owner            │ Pubkey          │
/// │ 64     │ 8    │ amount           │ u64             │
/// │ 72     │ 36   │ delegate         │ COption<Pubkey> │
/// │ 108    │ 1    │ state            │ AccountState    │
/// │ 109    │ 12   │ is_native        │ COption<u64>    │
/// │ 121    │ 8    │ delegated_amount │ u64             │
/// │ 129    │ 36   │ close_authority  │ COption<Pubkey> │
/// └────────┴──────┴──────────────────┴─────────────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Account {
    pub mint: Pubkey,
    pub owner: Pubkey,
    /// Balance in base units.
    pub amount: u64,
    pub delegate: COption<Pubkey>,
    pub state: AccountState,
    /// Rent-exempt reserve for wrapped SOL accounts.
    pub is_native: COption<u64>,
    pub delegated_amount: u64,
    pub close_authority: COption<Pubkey>,
}

impl Account {
    pub const LEN: usize = 165;

    pub fn is_frozen(&self) -> bool {
        self.state == AccountState::Frozen
    }

    pub fn is_initialized(&self) -> bool {
        self.state != AccountState::Uninitialized
    }

    pub fn is_native(&self) -> bool {
        self.is_native.is_some()
    }
}

// =============================================================================
// PACK IMPLEMENTATION
// =============================================================================

impl Pack for Account {
    const LEN: usize = 165;

    fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        if input.len() < Account::LEN {
            return Err(ProgramError::InvalidAccountData);
        }
        let input = array_ref![input, 0, Account::LEN];

        #[allow(clippy::ptr_offset_with_cast)]
        let (mint, owner, amount, delegate, state, is_native, delegated_amount, close_authority) =
            array_refs![input, 32, 32, 8, 36, 1, 12, 8, 36];

        Ok(Account {
            mint: Pubkey::new_from_array(*mint),
            owner: Pubkey::new_from_array(*owner),
            amount: u64::from_le_bytes(*amount),
            delegate: unpack_coption_pubkey(delegate)?,
            state: AccountState::from_u8(state[0])?,
            is_native: unpack_coption_u64(is_native)?,
            delegated_amount: u64::from_le_bytes(*delegated_amount),
            close_authority: unpack_coption_pubkey(close_authority)?,
        })
    }

    fn pack(&self, output: &mut [u8]) -> Result<(), ProgramError> {
        if output.len() < Account::LEN {
            return Err(ProgramError::InvalidAccountData);
        }
        let output = array_mut_ref![output, 0, Account::LEN];

        #[allow(clippy::ptr_offset_with_cast)]
        let (
            mint_dst,
            owner_dst,
            amount_dst,
            delegate_dst,
            state_dst,
            is_native_dst,
            delegated_amount_dst,
            close_authority_dst,
        ) = mut_array_refs![output, 32, 32, 8, 36, 1, 12, 8, 36];

        mint_dst.copy_from_slice(self.mint.as_ref());
        owner_dst.copy_from_slice(self.owner.as_ref());
        *amount_dst = self.amount.to_le_bytes();
        pack_coption_pubkey(&self.delegate, delegate_dst);
        state_dst[0] = self.state.to_u8();
        pack_coption_u64(&self.is_native, is_native_dst);
        *delegated_amount_dst = self.delegated_amount.to_le_bytes();
        pack_coption_pubkey(&self.close_authority, close_authority_dst);

        Ok(())
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
