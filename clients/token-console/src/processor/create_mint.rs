//! CreateMint Operation
//!
//! Creates a new token in a single transaction:
//!
//! ```text
//! 0. system create_account(mint, 82 bytes, rent exempt)
//! 1. InitializeMint(decimals, mint authority = wallet, freeze authority?)
//! 2. create the wallet's associated token account
//! 3. MintTo(initial supply -> wallet ATA)
//! 4. [CreateMetadataAccountV3]
//! 5. [SetAuthority(MintTokens) -> None | chosen authority]
//! ```
//!
//! The wallet starts as mint authority because it has to sign `MintTo` and
//! the metadata instruction. A different authority, or none at all, is
//! installed by the final `SetAuthority`.

use crate::associated::{create_associated_token_account, get_associated_token_address};
use crate::error::ConsoleResult;
use crate::instruction::{initialize_mint, mint_to, set_authority, AuthorityType};
use crate::metadata::{create_metadata_account, find_metadata_address, TokenMetadata};
use crate::processor::{Console, Outcome};
use crate::rpc::TokenRpc;
use crate::state::Mint;
use crate::token_program;
use crate::utils::{parse_optional_address, ui_amount_to_raw, validate_decimals};
use solana_program::{instruction::Instruction, pubkey::Pubkey, system_instruction};
use solana_sdk::signature::{Keypair, Signer};
use tracing::info;

#[derive(Clone, Debug)]
pub struct CreateMintInput {
    pub decimals: u8,
    /// Initial supply in display units, minted to the wallet.
    pub initial_supply: String,
    pub metadata: Option<TokenMetadata>,
    /// Mint (and freeze) authority; blank means the wallet.
    pub authority: Option<String>,
    pub enable_freeze: bool,
    /// Revoke the mint authority once the initial supply is minted.
    pub disable_minting: bool,
}

/// Instruction list for a new mint; `mint` is the fresh mint address.
#[allow(clippy::too_many_arguments)]
pub fn build_instructions(
    payer: &Pubkey,
    mint: &Pubkey,
    rent_lamports: u64,
    decimals: u8,
    raw_supply: u64,
    authority: &Pubkey,
    enable_freeze: bool,
    disable_minting: bool,
    metadata: Option<&TokenMetadata>,
) -> ConsoleResult<Vec<Instruction>> {
    let token_account = get_associated_token_address(payer, mint);
    let freeze_authority = enable_freeze.then_some(authority);

    let mut instructions = vec![
        system_instruction::create_account(
            payer,
            mint,
            rent_lamports,
            Mint::LEN as u64,
            &token_program::id(),
        ),
        initialize_mint(mint, payer, freeze_authority, decimals),
        create_associated_token_account(payer, payer, mint),
        mint_to(mint, &token_account, payer, raw_supply),
    ];

    if let Some(metadata) = metadata {
        instructions.push(create_metadata_account(mint, payer, payer, metadata)?);
    }

    if disable_minting {
        instructions.push(set_authority(mint, None, AuthorityType::MintTokens, payer));
    } else if authority != payer {
        instructions.push(set_authority(
            mint,
            Some(authority),
            AuthorityType::MintTokens,
            payer,
        ));
    }

    Ok(instructions)
}

pub async fn process<R: TokenRpc>(console: &Console<R>, input: CreateMintInput) -> ConsoleResult<Outcome> {
    let payer = console.wallet_pubkey();

    // Validate everything before touching the network
    let decimals = validate_decimals(input.decimals)?;
    let raw_supply = ui_amount_to_raw(&input.initial_supply, decimals)?;
    let authority = parse_optional_address("authority", input.authority.as_deref())?.unwrap_or(payer);
    if let Some(metadata) = &input.metadata {
        metadata.validate()?;
    }

    let mint_keypair = Keypair::new();
    let mint = mint_keypair.pubkey();
    let rent = console.rpc().get_minimum_balance_for_rent_exemption(Mint::LEN).await?;

    let instructions = build_instructions(
        &payer,
        &mint,
        rent,
        decimals,
        raw_supply,
        &authority,
        input.enable_freeze,
        input.disable_minting,
        input.metadata.as_ref(),
    )?;

    let signature = console.submit(&instructions, &[&mint_keypair]).await?;
    info!(%mint, %signature, decimals, raw_supply, "mint created");

    Ok(Outcome::MintCreated {
        signature,
        mint,
        token_account: get_associated_token_address(&payer, &mint),
        metadata: input.metadata.as_ref().map(|_| find_metadata_address(&mint)),
    })
}
