//! SPL Token Instructions
//!
//! Encoding of the SPL Token instructions the console issues, plus builders
//! that attach the account lists the program expects.
//!
//! # Instruction Format
//!
//! ```text
//! [discriminant: u8][data: varies]
//! ```
//!
//! # Discriminant Values (SPL Token)
//!
//! | Value | Instruction |
//! |-------|-------------|
//! | 0 | InitializeMint |
//! | 6 | SetAuthority |
//! | 7 | MintTo |
//! | 10 | FreezeAccount |
//! | 11 | ThawAccount |
//! | 12 | TransferChecked |
//! | 15 | BurnChecked |

use crate::token_program;
use solana_program::{
    instruction::{AccountMeta, Instruction},
    program_error::ProgramError,
    pubkey::Pubkey,
    sysvar,
};

// =============================================================================
// AUTHORITY TYPE
// =============================================================================

/// Authority slots that `SetAuthority` can change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthorityType {
    /// Permission to mint new tokens (on Mint accounts)
    MintTokens = 0,

    /// Permission to freeze/thaw token accounts (on Mint accounts)
    FreezeAccount = 1,
}

impl AuthorityType {
    pub fn from_u8(value: u8) -> Result<Self, ProgramError> {
        match value {
            0 => Ok(AuthorityType::MintTokens),
            1 => Ok(AuthorityType::FreezeAccount),
            _ => Err(ProgramError::InvalidInstructionData),
        }
    }
}

// =============================================================================
// TOKEN INSTRUCTION ENUM
// =============================================================================

/// Instructions the console sends to the SPL Token program.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenInstruction {
    /// Initialize a freshly allocated mint.
    ///
    /// | # | Account | Writable | Signer |
    /// |---|---------|----------|--------|
    /// | 0 | mint | ✓ | |
    /// | 1 | rent sysvar | | |
    ///
    /// ```text
    /// [0]: 0
    /// [1]: decimals
    /// [2..34]: mint_authority
    /// [34]: freeze_authority option (0 = None, 1 = Some)
    /// [35..67]: freeze_authority
    /// ```
    InitializeMint {
        decimals: u8,
        mint_authority: Pubkey,
        freeze_authority: Option<Pubkey>,
    },

    /// Change or clear an authority.
    ///
    /// | # | Account | Writable | Signer |
    /// |---|---------|----------|--------|
    /// | 0 | mint or account | ✓ | |
    /// | 1 | current authority | | ✓ |
    ///
    /// ```text
    /// [0]: 6
    /// [1]: authority_type
    /// [2]: new_authority option (0 = revoke, 1 = Some)
    /// [3..35]: new_authority
    /// ```
    SetAuthority {
        authority_type: AuthorityType,
        new_authority: Option<Pubkey>,
    },

    /// Mint new tokens.
    ///
    /// | # | Account | Writable | Signer |
    /// |---|---------|----------|--------|
    /// | 0 | mint | ✓ | |
    /// | 1 | destination | ✓ | |
    /// | 2 | mint authority | | ✓ |
    MintTo { amount: u64 },

    /// Freeze a token account.
    ///
    /// | # | Account | Writable | Signer |
    /// |---|---------|----------|--------|
    /// | 0 | account | ✓ | |
    /// | 1 | mint | | |
    /// | 2 | freeze authority | | ✓ |
    FreezeAccount,

    /// Thaw a frozen token account. Same accounts as `FreezeAccount`.
    ThawAccount,

    /// Transfer with the mint's decimals asserted on-chain.
    ///
    /// | # | Account | Writable | Signer |
    /// |---|---------|----------|--------|
    /// | 0 | source | ✓ | |
    /// | 1 | mint | | |
    /// | 2 | destination | ✓ | |
    /// | 3 | owner | | ✓ |
    ///
    /// ```text
    /// [0]: 12
    /// [1..9]: amount (u64 LE)
    /// [9]: decimals
    /// ```
    TransferChecked { amount: u64, decimals: u8 },

    /// Burn with the mint's decimals asserted on-chain.
    ///
    /// | # | Account | Writable | Signer |
    /// |---|---------|----------|--------|
    /// | 0 | account | ✓ | |
    /// | 1 | mint | ✓ | |
    /// | 2 | owner | | ✓ |
    BurnChecked { amount: u64, decimals: u8 },
}

// =============================================================================
// INSTRUCTION PARSING (UNPACK)
// =============================================================================

fn unpack_u64(input: &[u8]) -> Result<(u64, &[u8]), ProgramError> {
    if input.len() < 8 {
        return Err(ProgramError::InvalidInstructionData);
    }
    let (amount, rest) = input.split_at(8);
    let amount = amount
        .try_into()
        .map(u64::from_le_bytes)
        .map_err(|_| ProgramError::InvalidInstructionData)?;
    Ok((amount, rest))
}

fn unpack_pubkey_option(input: &[u8]) -> Result<(Option<Pubkey>, &[u8]), ProgramError> {
    match input.split_first() {
        Some((&0, rest)) => Ok((None, rest)),
        Some((&1, rest)) if rest.len() >= 32 => {
            let (key, rest) = rest.split_at(32);
            let key = key
                .try_into()
                .map(Pubkey::new_from_array)
                .map_err(|_| ProgramError::InvalidInstructionData)?;
            Ok((Some(key), rest))
        }
        _ => Err(ProgramError::InvalidInstructionData),
    }
}

fn pack_pubkey_option(value: &Option<Pubkey>, buf: &mut Vec<u8>) {
    match value {
        Some(key) => {
            buf.push(1);
            buf.extend_from_slice(key.as_ref());
        }
        None => buf.push(0),
    }
}

impl TokenInstruction {
    /// Decode instruction data. Used to inspect assembled transactions.
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        let (&discriminant, rest) = input
            .split_first()
            .ok_or(ProgramError::InvalidInstructionData)?;

        Ok(match discriminant {
            0 => {
                let (&decimals, rest) = rest
                    .split_first()
                    .ok_or(ProgramError::InvalidInstructionData)?;
                if rest.len() < 32 {
                    return Err(ProgramError::InvalidInstructionData);
                }
                let (mint_authority, rest) = rest.split_at(32);
                let mint_authority = mint_authority
                    .try_into()
                    .map(Pubkey::new_from_array)
                    .map_err(|_| ProgramError::InvalidInstructionData)?;
                let (freeze_authority, _) = unpack_pubkey_option(rest)?;
                TokenInstruction::InitializeMint {
                    decimals,
                    mint_authority,
                    freeze_authority,
                }
            }
            6 => {
                let (&authority_type, rest) = rest
                    .split_first()
                    .ok_or(ProgramError::InvalidInstructionData)?;
                let authority_type = AuthorityType::from_u8(authority_type)?;
                let (new_authority, _) = unpack_pubkey_option(rest)?;
                TokenInstruction::SetAuthority {
                    authority_type,
                    new_authority,
                }
            }
            7 => {
                let (amount, _) = unpack_u64(rest)?;
                TokenInstruction::MintTo { amount }
            }
            10 => TokenInstruction::FreezeAccount,
            11 => TokenInstruction::ThawAccount,
            12 | 15 => {
                let (amount, rest) = unpack_u64(rest)?;
                let &decimals = rest.first().ok_or(ProgramError::InvalidInstructionData)?;
                if discriminant == 12 {
                    TokenInstruction::TransferChecked { amount, decimals }
                } else {
                    TokenInstruction::BurnChecked { amount, decimals }
                }
            }
            _ => return Err(ProgramError::InvalidInstructionData),
        })
    }

    // =========================================================================
    // INSTRUCTION PACKING
    // =========================================================================

    /// Encode into instruction data bytes.
    pub fn pack(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(67);

        match self {
            TokenInstruction::InitializeMint {
                decimals,
                mint_authority,
                freeze_authority,
            } => {
                buf.push(0);
                buf.push(*decimals);
                buf.extend_from_slice(mint_authority.as_ref());
                pack_pubkey_option(freeze_authority, &mut buf);
            }

            TokenInstruction::SetAuthority {
                authority_type,
                new_authority,
            } => {
                buf.push(6);
                buf.push(*authority_type as u8);
                pack_pubkey_option(new_authority, &mut buf);
            }

            TokenInstruction::MintTo { amount } => {
                buf.push(7);
                buf.extend_from_slice(&amount.to_le_bytes());
            }

            TokenInstruction::FreezeAccount => buf.push(10),

            TokenInstruction::ThawAccount => buf.push(11),

            TokenInstruction::TransferChecked { amount, decimals } => {
                buf.push(12);
                buf.extend_from_slice(&amount.to_le_bytes());
                buf.push(*decimals);
            }

            TokenInstruction::BurnChecked { amount, decimals } => {
                buf.push(15);
                buf.extend_from_slice(&amount.to_le_bytes());
                buf.push(*decimals);
            }
        }

        buf
    }
}

// =============================================================================
// INSTRUCTION BUILDERS
// =============================================================================

/// `InitializeMint` for a mint account already allocated to the token program.
pub fn initialize_mint(
    mint: &Pubkey,
    mint_authority: &Pubkey,
    freeze_authority: Option<&Pubkey>,
    decimals: u8,
) -> Instruction {
    Instruction {
        program_id: token_program::id(),
        accounts: vec![
            AccountMeta::new(*mint, false),
            AccountMeta::new_readonly(sysvar::rent::id(), false),
        ],
        data: TokenInstruction::InitializeMint {
            decimals,
            mint_authority: *mint_authority,
            freeze_authority: freeze_authority.copied(),
        }
        .pack(),
    }
}

/// `MintTo` into `destination`, signed by the mint authority.
pub fn mint_to(mint: &Pubkey, destination: &Pubkey, authority: &Pubkey, amount: u64) -> Instruction {
    Instruction {
        program_id: token_program::id(),
        accounts: vec![
            AccountMeta::new(*mint, false),
            AccountMeta::new(*destination, false),
            AccountMeta::new_readonly(*authority, true),
        ],
        data: TokenInstruction::MintTo { amount }.pack(),
    }
}

/// `TransferChecked` from `source` to `destination`, signed by the owner.
pub fn transfer_checked(
    source: &Pubkey,
    mint: &Pubkey,
    destination: &Pubkey,
    owner: &Pubkey,
    amount: u64,
    decimals: u8,
) -> Instruction {
    Instruction {
        program_id: token_program::id(),
        accounts: vec![
            AccountMeta::new(*source, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new(*destination, false),
            AccountMeta::new_readonly(*owner, true),
        ],
        data: TokenInstruction::TransferChecked { amount, decimals }.pack(),
    }
}

/// `BurnChecked` from `account`, signed by its owner.
pub fn burn_checked(
    account: &Pubkey,
    mint: &Pubkey,
    owner: &Pubkey,
    amount: u64,
    decimals: u8,
) -> Instruction {
    Instruction {
        program_id: token_program::id(),
        accounts: vec![
            AccountMeta::new(*account, false),
            AccountMeta::new(*mint, false),
            AccountMeta::new_readonly(*owner, true),
        ],
        data: TokenInstruction::BurnChecked { amount, decimals }.pack(),
    }
}

/// `FreezeAccount`, signed by the mint's freeze authority.
pub fn freeze_account(account: &Pubkey, mint: &Pubkey, freeze_authority: &Pubkey) -> Instruction {
    freeze_or_thaw(TokenInstruction::FreezeAccount, account, mint, freeze_authority)
}

/// `ThawAccount`, signed by the mint's freeze authority.
pub fn thaw_account(account: &Pubkey, mint: &Pubkey, freeze_authority: &Pubkey) -> Instruction {
    freeze_or_thaw(TokenInstruction::ThawAccount, account, mint, freeze_authority)
}

fn freeze_or_thaw(
    instruction: TokenInstruction,
    account: &Pubkey,
    mint: &Pubkey,
    freeze_authority: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: token_program::id(),
        accounts: vec![
            AccountMeta::new(*account, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(*freeze_authority, true),
        ],
        data: instruction.pack(),
    }
}

/// `SetAuthority`; `new_authority = None` revokes the authority for good.
pub fn set_authority(
    owned: &Pubkey,
    new_authority: Option<&Pubkey>,
    authority_type: AuthorityType,
    current_authority: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: token_program::id(),
        accounts: vec![
            AccountMeta::new(*owned, false),
            AccountMeta::new_readonly(*current_authority, true),
        ],
        data: TokenInstruction::SetAuthority {
            authority_type,
            new_authority: new_authority.copied(),
        }
        .pack(),
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
