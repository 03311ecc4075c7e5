//! Token account inspection and creation, plus mint lookups.

use crate::associated::{create_associated_token_account, get_associated_token_address};
use crate::error::{ConsoleError, ConsoleResult};
use crate::processor::{Console, Outcome};
use crate::rpc::{get_metadata, get_mint, get_token_account, TokenRpc};
use crate::state::AccountState;
use crate::utils::{parse_address, parse_optional_address, raw_to_ui_amount};
use solana_program::pubkey::Pubkey;
use tracing::{info, warn};

/// Mint fields shown by `mint-info`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintSummary {
    pub address: Pubkey,
    pub supply: String,
    pub decimals: u8,
    pub mint_authority: Option<Pubkey>,
    pub freeze_authority: Option<Pubkey>,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub update_authority: Option<Pubkey>,
}

/// Associated account of one owner for one mint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountSummary {
    pub address: Pubkey,
    pub owner: Pubkey,
    pub mint: Pubkey,
    /// `None` when the account was never created.
    pub balance: Option<String>,
    pub state: Option<AccountState>,
}

impl AccountSummary {
    pub fn exists(&self) -> bool {
        self.state.is_some()
    }

    pub fn describe(&self) -> String {
        match (&self.balance, self.state) {
            (Some(balance), Some(state)) => format!(
                "Token account {} holds {} ({})",
                self.address,
                balance,
                state.label()
            ),
            _ => format!(
                "No token account for owner {} yet (would be {})",
                self.owner, self.address
            ),
        }
    }
}

pub async fn process_mint_info<R: TokenRpc>(console: &Console<R>, mint: &str) -> ConsoleResult<Outcome> {
    let address = parse_address("mint", mint)?;
    let mint = get_mint(console.rpc(), &address).await?;

    // Metadata is optional decoration; a broken account must not hide the mint.
    let metadata = match get_metadata(console.rpc(), &address).await {
        Ok(metadata) => metadata,
        Err(e) => {
            warn!(%address, error = %e, "metadata unreadable");
            None
        }
    };

    Ok(Outcome::MintInfo(MintSummary {
        address,
        supply: mint.ui_supply(),
        decimals: mint.decimals,
        mint_authority: mint.mint_authority.get(),
        freeze_authority: mint.freeze_authority.get(),
        name: metadata.as_ref().map(|m| m.name.clone()),
        symbol: metadata.as_ref().map(|m| m.symbol.clone()),
        update_authority: metadata.map(|m| m.update_authority),
    }))
}

pub async fn process_status<R: TokenRpc>(
    console: &Console<R>,
    mint: &str,
    owner: Option<&str>,
) -> ConsoleResult<Outcome> {
    let mint = parse_address("mint", mint)?;
    let owner = parse_optional_address("owner", owner)?.unwrap_or_else(|| console.wallet_pubkey());
    let mint_state = get_mint(console.rpc(), &mint).await?;

    let address = get_associated_token_address(&owner, &mint);
    let account = get_token_account(console.rpc(), &address).await?;

    Ok(Outcome::AccountStatus(AccountSummary {
        address,
        owner,
        mint,
        balance: account
            .as_ref()
            .map(|a| raw_to_ui_amount(a.amount, mint_state.decimals)),
        state: account.map(|a| a.state),
    }))
}

pub async fn process_create<R: TokenRpc>(
    console: &Console<R>,
    mint: &str,
    owner: Option<&str>,
) -> ConsoleResult<Outcome> {
    let payer = console.wallet_pubkey();
    let mint = parse_address("mint", mint)?;
    let owner = parse_optional_address("owner", owner)?.unwrap_or(payer);

    get_mint(console.rpc(), &mint).await?;
    let address = get_associated_token_address(&owner, &mint);
    if get_token_account(console.rpc(), &address).await?.is_some() {
        return Err(ConsoleError::AccountAlreadyExists(address));
    }

    let instruction = create_associated_token_account(&payer, &owner, &mint);
    let signature = console.submit(&[instruction], &[]).await?;
    info!(%signature, %address, %owner, "token account created");

    Ok(Outcome::AccountCreated { signature, address })
}
