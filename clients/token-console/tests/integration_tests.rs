//! Integration Tests for the Token Console
//!
//! Every workflow runs against the real SPL Token and Associated Token
//! Account programs inside `solana-program-test`. The bank is reached
//! through a small `TokenRpc` adapter over `BanksClient`.
//!
//! The Token Metadata program is not loaded, so mints here are created
//! without display metadata.

use async_trait::async_trait;
use solana_program::{hash::Hash, pubkey::Pubkey};
use solana_program_test::*;
use solana_sdk::{
    account::Account as LedgerAccount,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use spl_token_console::{
    associated::get_associated_token_address,
    error::{ConsoleError, ConsoleResult},
    processor::{BurnInput, CreateMintInput, FreezeInput, SetAuthorityInput, TransferInput},
    rpc::{get_mint, get_token_account},
    store::LocalStore,
    utils::authority::AuthorityKind,
    AccountState, Console, ConsoleConfig, KeypairWallet, Operation, Outcome, Processor, TokenRpc,
};
use std::collections::HashMap;
use std::sync::Mutex;

// =============================================================================
// BANKS ADAPTER
// =============================================================================

/// `TokenRpc` over the in-process bank.
///
/// `process_transaction` waits for execution, so a signature that made it
/// through `send_transaction` is reported as confirmed on the first poll.
struct BanksRpc {
    client: BanksClient,
    processed: Mutex<HashMap<Signature, Result<(), String>>>,
}

impl BanksRpc {
    fn new(client: BanksClient) -> Self {
        Self {
            client,
            processed: Mutex::new(HashMap::new()),
        }
    }
}

fn rpc_error(e: BanksClientError) -> ConsoleError {
    ConsoleError::Rpc(e.to_string())
}

#[async_trait]
impl TokenRpc for BanksRpc {
    async fn get_latest_blockhash(&self) -> ConsoleResult<Hash> {
        self.client.clone().get_latest_blockhash().await.map_err(rpc_error)
    }

    async fn get_account(&self, address: &Pubkey) -> ConsoleResult<Option<LedgerAccount>> {
        self.client.clone().get_account(*address).await.map_err(rpc_error)
    }

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> ConsoleResult<u64> {
        let rent = self.client.clone().get_rent().await.map_err(rpc_error)?;
        Ok(rent.minimum_balance(data_len))
    }

    async fn send_transaction(&self, transaction: &Transaction) -> ConsoleResult<Signature> {
        let signature = transaction.signatures[0];
        self.client
            .clone()
            .process_transaction(transaction.clone())
            .await
            .map_err(rpc_error)?;
        self.processed.lock().unwrap().insert(signature, Ok(()));
        Ok(signature)
    }

    async fn get_signature_status(
        &self,
        signature: &Signature,
    ) -> ConsoleResult<Option<Result<(), String>>> {
        Ok(self.processed.lock().unwrap().get(signature).cloned())
    }
}

// =============================================================================
// TEST SETUP HELPERS
// =============================================================================

struct TestConsole {
    console: Console<BanksRpc>,
    wallet: Pubkey,
}

impl TestConsole {
    /// Remove the history file written by this console.
    fn cleanup(&self) {
        let history = self.console.history();
        history.clear().unwrap();
        let path = history.store().path();
        if path.exists() {
            std::fs::remove_file(path).unwrap();
        }
    }
}

fn temp_store(name: &str) -> LocalStore {
    let path = std::env::temp_dir().join(format!(
        "token-console-it-{}-{}.json",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    LocalStore::open(path)
}

/// Console whose wallet is the funded payer of a fresh bank.
async fn start(name: &str) -> TestConsole {
    let (banks_client, payer, _recent_blockhash) = ProgramTest::default().start().await;
    let wallet = payer.pubkey();

    let mut config = ConsoleConfig::default();
    config.confirm_interval_ms = 1;

    TestConsole {
        console: Console::with_store(
            BanksRpc::new(banks_client),
            Box::new(KeypairWallet::new(payer)),
            config,
            temp_store(name),
        ),
        wallet,
    }
}

fn mint_input(supply: &str, enable_freeze: bool) -> CreateMintInput {
    CreateMintInput {
        decimals: 6,
        initial_supply: supply.to_string(),
        metadata: None,
        authority: None,
        enable_freeze,
        disable_minting: false,
    }
}

async fn create_mint(tc: &TestConsole, input: CreateMintInput) -> Pubkey {
    match Processor::process(&tc.console, Operation::CreateMint(input))
        .await
        .unwrap()
    {
        Outcome::MintCreated { mint, .. } => mint,
        other => panic!("unexpected outcome {:?}", other),
    }
}

async fn balance(tc: &TestConsole, owner: &Pubkey, mint: &Pubkey) -> Option<u64> {
    let address = get_associated_token_address(owner, mint);
    get_token_account(tc.console.rpc(), &address)
        .await
        .unwrap()
        .map(|a| a.amount)
}

async fn transfer(tc: &TestConsole, mint: &Pubkey, recipient: &Pubkey, amount: &str) -> Outcome {
    Processor::process(
        &tc.console,
        Operation::Transfer(TransferInput {
            mint: mint.to_string(),
            recipient: recipient.to_string(),
            amount: amount.to_string(),
        }),
    )
    .await
    .unwrap()
}

// =============================================================================
// CREATE MINT
// =============================================================================

#[tokio::test]
async fn test_create_mint() {
    let tc = start("create").await;

    let mint = create_mint(&tc, mint_input("1000", true)).await;

    let state = get_mint(tc.console.rpc(), &mint).await.unwrap();
    assert!(state.is_initialized);
    assert_eq!(state.decimals, 6);
    assert_eq!(state.supply, 1_000_000_000);
    assert_eq!(state.mint_authority.get(), Some(tc.wallet));
    assert_eq!(state.freeze_authority.get(), Some(tc.wallet));
    assert_eq!(balance(&tc, &tc.wallet, &mint).await, Some(1_000_000_000));

    match Processor::process(&tc.console, Operation::MintInfo { mint: mint.to_string() })
        .await
        .unwrap()
    {
        Outcome::MintInfo(summary) => assert_eq!(summary.supply, "1000.000000"),
        other => panic!("unexpected outcome {:?}", other),
    }

    tc.cleanup();
}

#[tokio::test]
async fn test_create_mint_with_minting_disabled() {
    let tc = start("create-disabled").await;
    let mut input = mint_input("21", false);
    input.disable_minting = true;

    let mint = create_mint(&tc, input).await;

    let state = get_mint(tc.console.rpc(), &mint).await.unwrap();
    assert!(state.mint_authority.is_none());
    assert!(state.freeze_authority.is_none());
    assert_eq!(state.supply, 21_000_000);

    tc.cleanup();
}

#[tokio::test]
async fn test_create_mint_with_other_authority() {
    let tc = start("create-authority").await;
    let authority = Keypair::new().pubkey();
    let mut input = mint_input("5", true);
    input.authority = Some(authority.to_string());

    let mint = create_mint(&tc, input).await;

    let state = get_mint(tc.console.rpc(), &mint).await.unwrap();
    assert_eq!(state.mint_authority.get(), Some(authority));
    assert_eq!(state.freeze_authority.get(), Some(authority));
    // the wallet still received the initial supply
    assert_eq!(balance(&tc, &tc.wallet, &mint).await, Some(5_000_000));

    tc.cleanup();
}

// =============================================================================
// TRANSFER
// =============================================================================

#[tokio::test]
async fn test_transfer_creates_recipient_account() {
    let tc = start("transfer").await;
    let mint = create_mint(&tc, mint_input("1000", false)).await;
    let recipient = Keypair::new().pubkey();
    assert_eq!(balance(&tc, &recipient, &mint).await, None);

    let outcome = transfer(&tc, &mint, &recipient, "250").await;
    assert!(matches!(outcome, Outcome::Transferred { created_recipient_account: true, .. }));

    let outcome = transfer(&tc, &mint, &recipient, "0.5").await;
    assert!(matches!(outcome, Outcome::Transferred { created_recipient_account: false, .. }));

    assert_eq!(balance(&tc, &recipient, &mint).await, Some(250_500_000));
    assert_eq!(balance(&tc, &tc.wallet, &mint).await, Some(749_500_000));

    tc.cleanup();
}

#[tokio::test]
async fn test_transfer_above_balance_is_rejected() {
    let tc = start("transfer-balance").await;
    let mint = create_mint(&tc, mint_input("10", false)).await;
    let recipient = Keypair::new().pubkey();

    let err = Processor::process(
        &tc.console,
        Operation::Transfer(TransferInput {
            mint: mint.to_string(),
            recipient: recipient.to_string(),
            amount: "10.000001".to_string(),
        }),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ConsoleError::AmountExceedsBalance { .. }));
    assert_eq!(balance(&tc, &recipient, &mint).await, None);

    tc.cleanup();
}

// =============================================================================
// BURN
// =============================================================================

#[tokio::test]
async fn test_burn_updates_supply_and_history() {
    let tc = start("burn").await;
    let mint = create_mint(&tc, mint_input("100", false)).await;

    let outcome = Processor::process(
        &tc.console,
        Operation::Burn(BurnInput {
            mint: mint.to_string(),
            amount: "40".to_string(),
        }),
    )
    .await
    .unwrap();

    let state = get_mint(tc.console.rpc(), &mint).await.unwrap();
    assert_eq!(state.supply, 60_000_000);
    assert_eq!(balance(&tc, &tc.wallet, &mint).await, Some(60_000_000));

    let records = tc.console.history().list().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].mint_address, mint.to_string());
    assert_eq!(Some(records[0].signature.clone()), outcome.signature().map(|s| s.to_string()));

    let history_file = tc.console.history().store().path().to_path_buf();
    assert!(history_file.exists());
    tc.cleanup();
    assert!(!history_file.exists());
}

// =============================================================================
// FREEZE / THAW
// =============================================================================

async fn account_state(tc: &TestConsole, owner: &Pubkey, mint: &Pubkey) -> AccountState {
    let address = get_associated_token_address(owner, mint);
    get_token_account(tc.console.rpc(), &address)
        .await
        .unwrap()
        .unwrap()
        .state
}

#[tokio::test]
async fn test_freeze_and_thaw() {
    let tc = start("freeze").await;
    let mint = create_mint(&tc, mint_input("100", true)).await;
    let holder = Keypair::new().pubkey();
    transfer(&tc, &mint, &holder, "1").await;

    let form = FreezeInput {
        mint: mint.to_string(),
        target: holder.to_string(),
    };

    Processor::process(&tc.console, Operation::Freeze(form.clone())).await.unwrap();
    assert_eq!(account_state(&tc, &holder, &mint).await, AccountState::Frozen);

    let err = Processor::process(&tc.console, Operation::Freeze(form.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, ConsoleError::AccountStateUnchanged { .. }));

    // thaw by token account address this time
    let ata = get_associated_token_address(&holder, &mint);
    Processor::process(
        &tc.console,
        Operation::Thaw(FreezeInput {
            mint: mint.to_string(),
            target: ata.to_string(),
        }),
    )
    .await
    .unwrap();
    assert_eq!(account_state(&tc, &holder, &mint).await, AccountState::Initialized);

    tc.cleanup();
}

#[tokio::test]
async fn test_frozen_wallet_cannot_transfer() {
    let tc = start("freeze-self").await;
    let mint = create_mint(&tc, mint_input("100", true)).await;
    Processor::process(
        &tc.console,
        Operation::Freeze(FreezeInput {
            mint: mint.to_string(),
            target: tc.wallet.to_string(),
        }),
    )
    .await
    .unwrap();

    let err = Processor::process(
        &tc.console,
        Operation::Transfer(TransferInput {
            mint: mint.to_string(),
            recipient: Keypair::new().pubkey().to_string(),
            amount: "1".to_string(),
        }),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ConsoleError::AccountFrozen(_)));

    tc.cleanup();
}

#[tokio::test]
async fn test_freeze_blocked_without_freeze_authority() {
    let tc = start("freeze-none").await;
    let mint = create_mint(&tc, mint_input("100", false)).await;

    let (status, outcome) = Processor::run(
        &tc.console,
        Operation::Freeze(FreezeInput {
            mint: mint.to_string(),
            target: tc.wallet.to_string(),
        }),
    )
    .await;

    assert!(outcome.is_none());
    assert_eq!(status.message, "This token has no freeze authority set");
    assert_eq!(account_state(&tc, &tc.wallet, &mint).await, AccountState::Initialized);

    tc.cleanup();
}

// =============================================================================
// AUTHORITIES
// =============================================================================

#[tokio::test]
async fn test_revoke_mint_authority() {
    let tc = start("revoke").await;
    let mint = create_mint(&tc, mint_input("100", true)).await;

    let form = SetAuthorityInput {
        mint: mint.to_string(),
        kind: AuthorityKind::MintTokens,
        new_authority: None,
        revoke: true,
    };
    Processor::process(&tc.console, Operation::SetAuthority(form.clone()))
        .await
        .unwrap();

    let state = get_mint(tc.console.rpc(), &mint).await.unwrap();
    assert!(state.mint_authority.is_none());

    let err = Processor::process(&tc.console, Operation::SetAuthority(form))
        .await
        .unwrap_err();
    assert!(matches!(err, ConsoleError::AuthorityNotSet(AuthorityKind::MintTokens)));

    tc.cleanup();
}

#[tokio::test]
async fn test_transfer_freeze_authority() {
    let tc = start("freeze-authority").await;
    let mint = create_mint(&tc, mint_input("100", true)).await;
    let new_authority = Keypair::new().pubkey();

    Processor::process(
        &tc.console,
        Operation::SetAuthority(SetAuthorityInput {
            mint: mint.to_string(),
            kind: AuthorityKind::FreezeAccount,
            new_authority: Some(new_authority.to_string()),
            revoke: false,
        }),
    )
    .await
    .unwrap();

    let state = get_mint(tc.console.rpc(), &mint).await.unwrap();
    assert_eq!(state.freeze_authority.get(), Some(new_authority));

    // the wallet lost the power to freeze
    let err = Processor::process(
        &tc.console,
        Operation::Freeze(FreezeInput {
            mint: mint.to_string(),
            target: tc.wallet.to_string(),
        }),
    )
    .await
    .unwrap_err();
    assert!(err.is_authorization());

    tc.cleanup();
}

// =============================================================================
// TOKEN ACCOUNTS
// =============================================================================

#[tokio::test]
async fn test_create_account_for_target() {
    let tc = start("create-account").await;
    let mint = create_mint(&tc, mint_input("1", false)).await;
    let owner = Keypair::new().pubkey();

    let create = || Operation::CreateAccount {
        mint: mint.to_string(),
        owner: Some(owner.to_string()),
    };

    Processor::process(&tc.console, create()).await.unwrap();
    assert_eq!(balance(&tc, &owner, &mint).await, Some(0));

    let err = Processor::process(&tc.console, create()).await.unwrap_err();
    assert!(matches!(err, ConsoleError::AccountAlreadyExists(_)));

    match Processor::process(
        &tc.console,
        Operation::AccountStatus {
            mint: mint.to_string(),
            owner: Some(owner.to_string()),
        },
    )
    .await
    .unwrap()
    {
        Outcome::AccountStatus(summary) => {
            assert!(summary.exists());
            assert_eq!(summary.balance.as_deref(), Some("0.000000"));
        }
        other => panic!("unexpected outcome {:?}", other),
    }

    tc.cleanup();
}
