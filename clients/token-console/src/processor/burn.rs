//! Burn Operation
//!
//! Destroys tokens held in the wallet's associated account and appends the
//! confirmed burn to the local history.

use crate::associated::get_associated_token_address;
use crate::error::{ConsoleError, ConsoleResult};
use crate::history::{OperationRecord, RecordStatus};
use crate::instruction::burn_checked;
use crate::processor::{Console, Outcome};
use crate::rpc::{get_mint, get_token_account, TokenRpc};
use crate::utils::{assert_sufficient_balance, parse_address, ui_amount_to_raw};
use chrono::Utc;
use tracing::{info, warn};

#[derive(Clone, Debug)]
pub struct BurnInput {
    pub mint: String,
    pub amount: String,
}

pub async fn process<R: TokenRpc>(console: &Console<R>, input: BurnInput) -> ConsoleResult<Outcome> {
    let owner = console.wallet_pubkey();
    let mint = parse_address("mint", &input.mint)?;

    let mint_state = get_mint(console.rpc(), &mint).await?;
    let amount = ui_amount_to_raw(&input.amount, mint_state.decimals)?;

    let account = get_associated_token_address(&owner, &mint);
    let token_account = get_token_account(console.rpc(), &account)
        .await?
        .ok_or(ConsoleError::AccountNotFound(account))?;
    if token_account.is_frozen() {
        return Err(ConsoleError::AccountFrozen(account));
    }
    assert_sufficient_balance(amount, token_account.amount, mint_state.decimals)?;

    let instruction = burn_checked(&account, &mint, &owner, amount, mint_state.decimals);
    let signature = console.submit(&[instruction], &[]).await?;
    info!(%signature, %mint, amount, "burn confirmed");

    let record = OperationRecord {
        signature: signature.to_string(),
        mint_address: mint.to_string(),
        amount: input.amount.trim().to_string(),
        raw_amount: amount.to_string(),
        decimals: mint_state.decimals,
        timestamp: Utc::now(),
        network: console.config().network,
        status: RecordStatus::Confirmed,
    };

    // The burn is on-chain at this point.
    if let Err(e) = console.history().record(record.clone()) {
        warn!(error = %e, "could not record burn history");
    }

    Ok(Outcome::Burned { signature, record })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MAX_RECORDS;
    use crate::instruction::TokenInstruction;
    use crate::processor::fixtures::fixture;
    use crate::state::AccountState;

    fn input(fx: &crate::processor::fixtures::Fixture, amount: &str) -> BurnInput {
        BurnInput {
            mint: fx.mint.to_string(),
            amount: amount.to_string(),
        }
    }

    #[tokio::test]
    async fn test_burn_records_history_at_head() {
        let fx = fixture("burn-history");
        fx.fund(&fx.wallet, 10_000_000, AccountState::Initialized);

        process(&fx.console, input(&fx, "1")).await.unwrap();
        let outcome = process(&fx.console, input(&fx, "0.5")).await.unwrap();

        let records = fx.console.history().list().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].amount, "0.5");
        assert_eq!(records[0].raw_amount, "500000");
        match outcome {
            Outcome::Burned { signature, .. } => assert_eq!(records[0].signature, signature.to_string()),
            other => panic!("unexpected {:?}", other),
        }
        assert!(records.len() <= MAX_RECORDS);

        let path = fx.console.history().store().path().to_path_buf();
        assert!(path.exists());
        fx.cleanup();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_burn_instruction() {
        let fx = fixture("burn-ix");
        fx.fund(&fx.wallet, 10_000_000, AccountState::Initialized);

        process(&fx.console, input(&fx, "3.25")).await.unwrap();

        let ixs = fx.sent_instructions();
        assert_eq!(ixs.len(), 1);
        assert_eq!(
            TokenInstruction::unpack(&ixs[0].data).unwrap(),
            TokenInstruction::BurnChecked { amount: 3_250_000, decimals: 6 }
        );
        fx.cleanup();
    }

    #[tokio::test]
    async fn test_burn_above_balance() {
        let fx = fixture("burn-balance");
        fx.fund(&fx.wallet, 100, AccountState::Initialized);

        let err = process(&fx.console, input(&fx, "1")).await.unwrap_err();

        assert!(matches!(err, ConsoleError::AmountExceedsBalance { .. }));
        assert!(fx.console.rpc().sent().is_empty());
        assert!(fx.console.history().list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_burn_is_not_recorded() {
        let fx = fixture("burn-failed");
        fx.fund(&fx.wallet, 10_000_000, AccountState::Initialized);
        fx.console.rpc().fail_on_chain("custom program error: 0x1");

        assert!(process(&fx.console, input(&fx, "1")).await.is_err());
        assert!(fx.console.history().list().unwrap().is_empty());
    }
}
