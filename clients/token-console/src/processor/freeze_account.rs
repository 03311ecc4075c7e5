//! Freeze / Thaw Operation
//!
//! Freezes or thaws a holder's token account. Only the mint's freeze
//! authority may do either, and a mint created without one can never
//! freeze anything.

use crate::associated::get_associated_token_address;
use crate::error::{ConsoleError, ConsoleResult};
use crate::instruction::{freeze_account, thaw_account};
use crate::processor::{Console, Outcome};
use crate::rpc::{get_mint, get_token_account, TokenRpc};
use crate::state::{Account, AccountState, Pack};
use crate::token_program;
use crate::utils::authority::{assert_authority, AuthorityKind};
use crate::utils::parse_address;
use solana_program::pubkey::Pubkey;
use tracing::info;

#[derive(Clone, Debug)]
pub struct FreezeInput {
    pub mint: String,
    /// Token account address, or a wallet whose associated account is meant.
    pub target: String,
}

/// Resolve `target` to a token account: itself if it is one, otherwise
/// the associated account it owns for `mint`.
async fn resolve_token_account<R: TokenRpc>(
    console: &Console<R>,
    target: &Pubkey,
    mint: &Pubkey,
) -> ConsoleResult<(Pubkey, Account)> {
    if let Some(raw) = console.rpc().get_account(target).await? {
        if raw.owner == token_program::id() && raw.data.len() == Account::LEN {
            return Ok((*target, Account::unpack_from_slice(&raw.data)?));
        }
    }
    let ata = get_associated_token_address(target, mint);
    let account = get_token_account(console.rpc(), &ata)
        .await?
        .ok_or(ConsoleError::AccountNotFound(ata))?;
    Ok((ata, account))
}

pub async fn process<R: TokenRpc>(
    console: &Console<R>,
    input: FreezeInput,
    freeze: bool,
) -> ConsoleResult<Outcome> {
    let wallet = console.wallet_pubkey();
    let mint = parse_address("mint", &input.mint)?;
    let target = parse_address("account", &input.target)?;

    let mint_state = get_mint(console.rpc(), &mint).await?;
    assert_authority(mint_state.freeze_authority.get(), &wallet, AuthorityKind::FreezeAccount)?;

    let (address, account) = resolve_token_account(console, &target, &mint).await?;
    if account.mint != mint {
        return Err(ConsoleError::MintMismatch {
            account: address,
            expected: mint,
            actual: account.mint,
        });
    }
    if account.is_frozen() == freeze {
        return Err(ConsoleError::AccountStateUnchanged {
            account: address,
            state: account.state.label(),
        });
    }

    let instruction = if freeze {
        freeze_account(&address, &mint, &wallet)
    } else {
        thaw_account(&address, &mint, &wallet)
    };
    let signature = console.submit(&[instruction], &[]).await?;

    let state = if freeze {
        AccountState::Frozen
    } else {
        AccountState::Initialized
    };
    info!(%signature, account = %address, state = state.label(), "freeze state changed");

    Ok(Outcome::FreezeChanged {
        signature,
        account: address,
        state,
    })
}
