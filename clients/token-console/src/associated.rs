//! Associated Token Accounts
//!
//! Every (owner, mint) pair has exactly one canonical token account, a
//! program-derived address under the ATA program:
//!
//! ```text
//! seeds = [owner, token_program_id, mint]
//! ```
//!
//! The console uses it as the source for transfers and burns and creates
//! it lazily for recipients.

use crate::{associated_token_program, token_program};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};

/// Derive the associated token account address for `owner` and `mint`.
pub fn get_associated_token_address(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    get_associated_token_address_and_bump(owner, mint).0
}

/// Same as [`get_associated_token_address`], also returning the bump seed.
pub fn get_associated_token_address_and_bump(owner: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[owner.as_ref(), token_program::id().as_ref(), mint.as_ref()],
        &associated_token_program::id(),
    )
}

/// Create the associated token account of `owner` for `mint`, paid by `payer`.
///
/// Fails on-chain if the account already exists.
///
/// | # | Account | Writable | Signer |
/// |---|---------|----------|--------|
/// | 0 | payer | ✓ | ✓ |
/// | 1 | associated account | ✓ | |
/// | 2 | owner | | |
/// | 3 | mint | | |
/// | 4 | system program | | |
/// | 5 | token program | | |
pub fn create_associated_token_account(payer: &Pubkey, owner: &Pubkey, mint: &Pubkey) -> Instruction {
    let address = get_associated_token_address(owner, mint);
    Instruction {
        program_id: associated_token_program::id(),
        accounts: vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(address, false),
            AccountMeta::new_readonly(*owner, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(token_program::id(), false),
        ],
        data: vec![0],
    }
}
