//! SetAuthority Operation
//!
//! Hands an authority over to another key, or revokes it.
//!
//! | Authority | Instruction | Revocable |
//! |-----------|-------------|-----------|
//! | mint | SPL `SetAuthority(MintTokens)` | yes |
//! | freeze | SPL `SetAuthority(FreezeAccount)` | yes |
//! | metadata update | Metaplex `UpdateMetadataAccountV2` | no |
//!
//! Revoking is permanent: nobody can ever mint (or freeze) again.

use crate::error::{ConsoleError, ConsoleResult};
use crate::instruction::set_authority;
use crate::metadata::update_metadata_authority;
use crate::processor::{Console, Outcome};
use crate::rpc::{get_metadata, get_mint, TokenRpc};
use crate::utils::authority::{assert_authority, AuthorityKind};
use crate::utils::{parse_address, parse_optional_address};
use solana_program::{instruction::Instruction, pubkey::Pubkey};
use tracing::info;

#[derive(Clone, Debug)]
pub struct SetAuthorityInput {
    pub mint: String,
    pub kind: AuthorityKind,
    pub new_authority: Option<String>,
    /// Clear the authority instead of handing it over.
    pub revoke: bool,
}

async fn token_authority_instruction<R: TokenRpc>(
    console: &Console<R>,
    mint: &Pubkey,
    kind: AuthorityKind,
    new_authority: Option<&Pubkey>,
) -> ConsoleResult<Instruction> {
    let wallet = console.wallet_pubkey();
    let authority_type = kind
        .token_authority_type()
        .ok_or_else(|| ConsoleError::Config(format!("{} is not a mint authority", kind)))?;
    let mint_state = get_mint(console.rpc(), mint).await?;
    let current = match kind {
        AuthorityKind::MintTokens => mint_state.mint_authority.get(),
        _ => mint_state.freeze_authority.get(),
    };
    assert_authority(current, &wallet, kind)?;
    Ok(set_authority(mint, new_authority, authority_type, &wallet))
}

async fn metadata_authority_instruction<R: TokenRpc>(
    console: &Console<R>,
    mint: &Pubkey,
    new_authority: &Pubkey,
) -> ConsoleResult<Instruction> {
    let wallet = console.wallet_pubkey();
    let metadata = get_metadata(console.rpc(), mint)
        .await?
        .ok_or(ConsoleError::MetadataNotFound(*mint))?;
    if !metadata.is_mutable {
        return Err(ConsoleError::MetadataImmutable(*mint));
    }
    assert_authority(Some(metadata.update_authority), &wallet, AuthorityKind::MetadataUpdate)?;
    update_metadata_authority(mint, &wallet, new_authority)
}

pub async fn process<R: TokenRpc>(console: &Console<R>, input: SetAuthorityInput) -> ConsoleResult<Outcome> {
    let mint = parse_address("mint", &input.mint)?;
    let new_authority = if input.revoke {
        if input.kind == AuthorityKind::MetadataUpdate {
            return Err(ConsoleError::RevokeNotSupported);
        }
        None
    } else {
        Some(
            parse_optional_address("new authority", input.new_authority.as_deref())?
                .ok_or(ConsoleError::MissingField("new authority"))?,
        )
    };

    let instruction = match (input.kind, new_authority.as_ref()) {
        (AuthorityKind::MetadataUpdate, Some(to)) => {
            metadata_authority_instruction(console, &mint, to).await?
        }
        (AuthorityKind::MetadataUpdate, None) => return Err(ConsoleError::RevokeNotSupported),
        (kind, to) => token_authority_instruction(console, &mint, kind, to).await?,
    };

    let signature = console.submit(&[instruction], &[]).await?;
    info!(%signature, %mint, kind = %input.kind, new_authority = ?new_authority, "authority changed");

    Ok(Outcome::AuthorityChanged {
        signature,
        kind: input.kind,
        new_authority,
    })
}
