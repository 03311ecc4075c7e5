//! Mint Account State
//!
//! A Mint defines a token type: how many exist, how they are displayed and
//! who may mint more or freeze holders.
//!
//! # Size: 82 bytes (SPL Token layout)

use crate::state::{pack_coption_pubkey, unpack_coption_pubkey, COption, Pack};
use crate::utils::amount::raw_to_ui_amount;
use arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs};
use solana_program::{program_error::ProgramError, pubkey::Pubkey};

// =============================================================================
// MINT STRUCTURE
// =============================================================================

/// Mint account data.
///
/// # Memory Layout (82 bytes total)
///
/// ```text
/// ┌────────┬──────┬──────────────────┬─────────────────┐
/// │ Offset │ Size │ Field            │ Type            │
/// ├────────┼──────┼──────────────────┼─────────────────┤
/// │ 0      │ 36   │ mint_authority   │ COption<Pubkey> │
/// │ 36     │ 8    │ supply           │ u64             │
/// │ 44     │ 1    │ decimals         │ u8              │
/// │ 45     │ 1    │ is_initialized   │ bool            │
/// │ 46     │ 36   │ freeze_authority │ COption<Pubkey> │
/// └────────┴──────┴──────────────────┴─────────────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Mint {
    /// Who can mint new tokens. None once minting is disabled for good.
    pub mint_authority: COption<Pubkey>,

    /// Total base units in circulation.
    pub supply: u64,

    /// Display precision.
    pub decimals: u8,

    pub is_initialized: bool,

    /// Who can freeze/thaw token accounts. None means nobody ever can.
    pub freeze_authority: COption<Pubkey>,
}

impl Mint {
    pub const LEN: usize = 82;

    /// Supply formatted with the mint's decimals.
    pub fn ui_supply(&self) -> String {
        raw_to_ui_amount(self.supply, self.decimals)
    }
}

// =============================================================================
// PACK IMPLEMENTATION
// =============================================================================

impl Pack for Mint {
    const LEN: usize = 82;

    fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        if input.len() < Mint::LEN {
            return Err(ProgramError::InvalidAccountData);
        }
        let input = array_ref![input, 0, Mint::LEN];

        #[allow(clippy::ptr_offset_with_cast)]
        let (mint_authority, supply, decimals, is_initialized, freeze_authority) =
            array_refs![input, 36, 8, 1, 1, 36];

        let is_initialized = match is_initialized[0] {
            0 => false,
            1 => true,
            _ => return Err(ProgramError::InvalidAccountData),
        };

        Ok(Mint {
            mint_authority: unpack_coption_pubkey(mint_authority)?,
            supply: u64::from_le_bytes(*supply),
            decimals: decimals[0],
            is_initialized,
            freeze_authority: unpack_coption_pubkey(freeze_authority)?,
        })
    }

    fn pack(&self, output: &mut [u8]) -> Result<(), ProgramError> {
        if output.len() < Mint::LEN {
            return Err(ProgramError::InvalidAccountData);
        }
        let output = array_mut_ref![output, 0, Mint::LEN];

        #[allow(clippy::ptr_offset_with_cast)]
        let (
            mint_authority_dst,
            supply_dst,
            decimals_dst,
            is_initialized_dst,
            freeze_authority_dst,
        ) = mut_array_refs![output, 36, 8, 1, 1, 36];

        pack_coption_pubkey(&self.mint_authority, mint_authority_dst);
        *supply_dst = self.supply.to_le_bytes();
        decimals_dst[0] = self.decimals;
        is_initialized_dst[0] = self.is_initialized as u8;
        pack_coption_pubkey(&self.freeze_authority, freeze_authority_dst);

        Ok(())
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
