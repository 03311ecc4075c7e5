//! Transfer Operation
//!
//! Moves tokens from the wallet's associated account to the recipient's.
//! A recipient who never held the token gets an associated account created
//! in the same transaction, ahead of the transfer.

use crate::associated::{create_associated_token_account, get_associated_token_address};
use crate::error::{ConsoleError, ConsoleResult};
use crate::instruction::transfer_checked;
use crate::processor::{Console, Outcome};
use crate::rpc::{get_mint, get_token_account, TokenRpc};
use crate::utils::{assert_sufficient_balance, parse_address, parse_recipient, ui_amount_to_raw};
use tracing::{debug, info};

#[derive(Clone, Debug)]
pub struct TransferInput {
    pub mint: String,
    /// Recipient wallet (not token account) address.
    pub recipient: String,
    pub amount: String,
}

pub async fn process<R: TokenRpc>(console: &Console<R>, input: TransferInput) -> ConsoleResult<Outcome> {
    let owner = console.wallet_pubkey();

    // Form checks
    let mint = parse_address("mint", &input.mint)?;
    let recipient = parse_recipient(&input.recipient)?;

    // Ledger checks
    let mint_state = get_mint(console.rpc(), &mint).await?;
    let amount = ui_amount_to_raw(&input.amount, mint_state.decimals)?;

    let source = get_associated_token_address(&owner, &mint);
    let source_account = get_token_account(console.rpc(), &source)
        .await?
        .ok_or(ConsoleError::AccountNotFound(source))?;
    if source_account.is_frozen() {
        return Err(ConsoleError::AccountFrozen(source));
    }
    assert_sufficient_balance(amount, source_account.amount, mint_state.decimals)?;

    // Assemble
    let destination = get_associated_token_address(&recipient, &mint);
    let mut instructions = Vec::with_capacity(2);
    let create_destination = get_token_account(console.rpc(), &destination).await?.is_none();
    if create_destination {
        debug!(%destination, "recipient has no token account, creating it");
        instructions.push(create_associated_token_account(&owner, &recipient, &mint));
    }
    instructions.push(transfer_checked(
        &source,
        &mint,
        &destination,
        &owner,
        amount,
        mint_state.decimals,
    ));

    let signature = console.submit(&instructions, &[]).await?;
    info!(%signature, %mint, %recipient, amount, "transfer confirmed");

    Ok(Outcome::Transferred {
        signature,
        recipient_account: destination,
        created_recipient_account: create_destination,
        amount: input.amount.trim().to_string(),
    })
}
