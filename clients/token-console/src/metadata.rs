//! Token Metadata
//!
//! Display metadata (name, symbol, uri) lives in a Metaplex Token Metadata
//! account next to the mint:
//!
//! ```text
//! seeds = ["metadata", metadata_program_id, mint]
//! ```
//!
//! The console creates it with `CreateMetadataAccountV3` and hands over its
//! update authority with `UpdateMetadataAccountV2`. Both are Borsh encoded
//! with a one-byte discriminant.

use crate::error::{ConsoleError, ConsoleResult};
use crate::metadata_program;
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};

pub const MAX_NAME_LENGTH: usize = 32;
pub const MAX_SYMBOL_LENGTH: usize = 10;
pub const MAX_URI_LENGTH: usize = 200;

const CREATE_METADATA_ACCOUNT_V3: u8 = 33;
const UPDATE_METADATA_ACCOUNT_V2: u8 = 15;

/// `Key::MetadataV1` tag stored in the first byte of a metadata account.
const METADATA_V1_KEY: u8 = 4;

// =============================================================================
// USER-FACING METADATA
// =============================================================================

/// What the user fills in when creating a token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    /// Whether the update authority may edit the metadata later.
    pub is_mutable: bool,
}

impl TokenMetadata {
    /// Enforce the metadata program's length limits before submission.
    pub fn validate(&self) -> ConsoleResult<()> {
        if self.name.trim().is_empty() {
            return Err(ConsoleError::MissingField("name"));
        }
        if self.symbol.trim().is_empty() {
            return Err(ConsoleError::MissingField("symbol"));
        }
        for (field, value, max) in [
            ("name", &self.name, MAX_NAME_LENGTH),
            ("symbol", &self.symbol, MAX_SYMBOL_LENGTH),
            ("uri", &self.uri, MAX_URI_LENGTH),
        ] {
            if value.len() > max {
                return Err(ConsoleError::MetadataTooLong {
                    field,
                    len: value.len(),
                    max,
                });
            }
        }
        Ok(())
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
struct Creator {
    address: [u8; 32],
    verified: bool,
    share: u8,
}

#[derive(BorshSerialize, Clone, Debug)]
struct DataV2 {
    name: String,
    symbol: String,
    uri: String,
    seller_fee_basis_points: u16,
    creators: Option<Vec<Creator>>,
    // Option<Collection> and Option<Uses>; the console never sets them.
    collection: Option<()>,
    uses: Option<()>,
}

#[derive(BorshSerialize, Clone, Debug)]
struct CreateMetadataAccountArgsV3 {
    data: DataV2,
    is_mutable: bool,
    collection_details: Option<()>,
}

#[derive(BorshSerialize, Clone, Debug)]
struct UpdateMetadataAccountArgsV2 {
    data: Option<DataV2>,
    new_update_authority: Option<[u8; 32]>,
    primary_sale_happened: Option<bool>,
    is_mutable: Option<bool>,
}

/// Leading fields of a `MetadataV1` account; trailing fields are ignored.
#[derive(BorshDeserialize, Debug)]
struct MetadataPrefix {
    key: u8,
    update_authority: [u8; 32],
    mint: [u8; 32],
    name: String,
    symbol: String,
    uri: String,
    _seller_fee_basis_points: u16,
    _creators: Option<Vec<Creator>>,
    _primary_sale_happened: bool,
    is_mutable: bool,
}

// =============================================================================
// DECODED ACCOUNT
// =============================================================================

/// Metadata fields the console reads back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataAccount {
    pub update_authority: Pubkey,
    pub mint: Pubkey,
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub is_mutable: bool,
}

impl MetadataAccount {
    /// Decode a metadata account; stored strings are NUL padded.
    pub fn unpack(data: &[u8]) -> ConsoleResult<Self> {
        let prefix = MetadataPrefix::deserialize(&mut &data[..])
            .map_err(|e| ConsoleError::InvalidAccountData(e.to_string()))?;
        if prefix.key != METADATA_V1_KEY {
            return Err(ConsoleError::InvalidAccountData(format!(
                "unexpected metadata key {}",
                prefix.key
            )));
        }
        Ok(MetadataAccount {
            update_authority: Pubkey::new_from_array(prefix.update_authority),
            mint: Pubkey::new_from_array(prefix.mint),
            name: trim_padding(prefix.name),
            symbol: trim_padding(prefix.symbol),
            uri: trim_padding(prefix.uri),
            is_mutable: prefix.is_mutable,
        })
    }
}

fn trim_padding(value: String) -> String {
    value.trim_end_matches('\0').to_string()
}

// =============================================================================
// ADDRESSES AND INSTRUCTIONS
// =============================================================================

/// Derive the metadata account address of `mint`.
pub fn find_metadata_address(mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[
            b"metadata",
            metadata_program::id().as_ref(),
            mint.as_ref(),
        ],
        &metadata_program::id(),
    )
    .0
}

/// `CreateMetadataAccountV3` with `payer` as the update authority.
///
/// | # | Account | Writable | Signer |
/// |---|---------|----------|--------|
/// | 0 | metadata | ✓ | |
/// | 1 | mint | | |
/// | 2 | mint authority | | ✓ |
/// | 3 | payer | ✓ | ✓ |
/// | 4 | update authority | | ✓ |
/// | 5 | system program | | |
pub fn create_metadata_account(
    mint: &Pubkey,
    mint_authority: &Pubkey,
    payer: &Pubkey,
    metadata: &TokenMetadata,
) -> ConsoleResult<Instruction> {
    let args = CreateMetadataAccountArgsV3 {
        data: DataV2 {
            name: metadata.name.clone(),
            symbol: metadata.symbol.clone(),
            uri: metadata.uri.clone(),
            seller_fee_basis_points: 0,
            creators: None,
            collection: None,
            uses: None,
        },
        is_mutable: metadata.is_mutable,
        collection_details: None,
    };

    Ok(Instruction {
        program_id: metadata_program::id(),
        accounts: vec![
            AccountMeta::new(find_metadata_address(mint), false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(*mint_authority, true),
            AccountMeta::new(*payer, true),
            AccountMeta::new_readonly(*payer, true),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: encode(CREATE_METADATA_ACCOUNT_V3, &args)?,
    })
}

/// `UpdateMetadataAccountV2` that only replaces the update authority.
pub fn update_metadata_authority(
    mint: &Pubkey,
    current_authority: &Pubkey,
    new_authority: &Pubkey,
) -> ConsoleResult<Instruction> {
    let args = UpdateMetadataAccountArgsV2 {
        data: None,
        new_update_authority: Some(new_authority.to_bytes()),
        primary_sale_happened: None,
        is_mutable: None,
    };

    Ok(Instruction {
        program_id: metadata_program::id(),
        accounts: vec![
            AccountMeta::new(find_metadata_address(mint), false),
            AccountMeta::new_readonly(*current_authority, true),
        ],
        data: encode(UPDATE_METADATA_ACCOUNT_V2, &args)?,
    })
}

fn encode<T: BorshSerialize>(discriminant: u8, args: &T) -> ConsoleResult<Vec<u8>> {
    let mut data = vec![discriminant];
    args.serialize(&mut data)?;
    Ok(data)
}
