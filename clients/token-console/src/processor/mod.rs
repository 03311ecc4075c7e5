//! Operation Processors
//!
//! One file per console operation. Each one validates its form input,
//! reads whatever ledger state it needs, assembles the instruction list and
//! hands it to the [`Submitter`](crate::submitter::Submitter).

pub mod burn;
pub mod create_mint;
pub mod freeze_account;
pub mod set_authority;
pub mod token_account;
pub mod transfer;

pub use burn::BurnInput;
pub use create_mint::CreateMintInput;
pub use freeze_account::FreezeInput;
pub use set_authority::SetAuthorityInput;
pub use token_account::{AccountSummary, MintSummary};
pub use transfer::TransferInput;

use crate::config::{ConsoleConfig, Network};
use crate::error::ConsoleResult;
use crate::history::{OperationLog, OperationRecord};
use crate::rpc::TokenRpc;
use crate::state::AccountState;
use crate::status::Status;
use crate::store::LocalStore;
use crate::submitter::Submitter;
use crate::utils::authority::AuthorityKind;
use crate::wallet::Wallet;
use solana_program::{instruction::Instruction, pubkey::Pubkey};
use solana_sdk::signature::{Keypair, Signature};
use tracing::{info, warn};

// =============================================================================
// CONSOLE
// =============================================================================

/// Everything an operation needs: network access, a wallet, settings and
/// the local history.
pub struct Console<R: TokenRpc> {
    rpc: R,
    wallet: Box<dyn Wallet>,
    config: ConsoleConfig,
    history: OperationLog,
}

impl<R: TokenRpc> Console<R> {
    pub fn new(rpc: R, wallet: Box<dyn Wallet>, config: ConsoleConfig) -> Self {
        let store = LocalStore::open(config.storage_path.clone());
        Self::with_store(rpc, wallet, config, store)
    }

    pub fn with_store(
        rpc: R,
        wallet: Box<dyn Wallet>,
        config: ConsoleConfig,
        store: LocalStore,
    ) -> Self {
        Self {
            rpc,
            wallet,
            config,
            history: OperationLog::burns(store),
        }
    }

    pub fn rpc(&self) -> &R {
        &self.rpc
    }

    pub fn wallet_pubkey(&self) -> Pubkey {
        self.wallet.pubkey()
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn history(&self) -> &OperationLog {
        &self.history
    }

    /// Sign and submit `instructions`, waiting for confirmation.
    pub(crate) async fn submit(
        &self,
        instructions: &[Instruction],
        co_signers: &[&Keypair],
    ) -> ConsoleResult<Signature> {
        Submitter::new(&self.rpc, self.config.confirm_policy())
            .submit(self.wallet.as_ref(), instructions, co_signers)
            .await
    }
}

// =============================================================================
// OPERATIONS AND OUTCOMES
// =============================================================================

/// A console request, fields as the user entered them.
#[derive(Clone, Debug)]
pub enum Operation {
    CreateMint(CreateMintInput),
    MintInfo { mint: String },
    Transfer(TransferInput),
    Burn(BurnInput),
    Freeze(FreezeInput),
    Thaw(FreezeInput),
    AccountStatus { mint: String, owner: Option<String> },
    CreateAccount { mint: String, owner: Option<String> },
    SetAuthority(SetAuthorityInput),
    History,
}

/// What a successful operation produced.
#[derive(Clone, Debug)]
pub enum Outcome {
    MintCreated {
        signature: Signature,
        mint: Pubkey,
        token_account: Pubkey,
        metadata: Option<Pubkey>,
    },
    MintInfo(MintSummary),
    Transferred {
        signature: Signature,
        recipient_account: Pubkey,
        created_recipient_account: bool,
        amount: String,
    },
    Burned {
        signature: Signature,
        record: OperationRecord,
    },
    FreezeChanged {
        signature: Signature,
        account: Pubkey,
        state: AccountState,
    },
    AccountStatus(AccountSummary),
    AccountCreated {
        signature: Signature,
        address: Pubkey,
    },
    AuthorityChanged {
        signature: Signature,
        kind: AuthorityKind,
        new_authority: Option<Pubkey>,
    },
    History(Vec<OperationRecord>),
}

impl Outcome {
    pub fn signature(&self) -> Option<Signature> {
        match self {
            Outcome::MintCreated { signature, .. }
            | Outcome::Transferred { signature, .. }
            | Outcome::Burned { signature, .. }
            | Outcome::FreezeChanged { signature, .. }
            | Outcome::AccountCreated { signature, .. }
            | Outcome::AuthorityChanged { signature, .. } => Some(*signature),
            Outcome::MintInfo(_) | Outcome::AccountStatus(_) | Outcome::History(_) => None,
        }
    }

    /// Success line, with an explorer link when a transaction was sent.
    pub fn status(&self, network: Network) -> Status {
        let message = match self {
            Outcome::MintCreated { mint, .. } => format!("Token created: {}", mint),
            Outcome::MintInfo(summary) => format!(
                "Mint {}: supply {}, {} decimals",
                summary.address, summary.supply, summary.decimals
            ),
            Outcome::Transferred { amount, recipient_account, created_recipient_account, .. } => {
                if *created_recipient_account {
                    format!("Transferred {} (created token account {})", amount, recipient_account)
                } else {
                    format!("Transferred {} to {}", amount, recipient_account)
                }
            }
            Outcome::Burned { record, .. } => format!("Burned {} of {}", record.amount, record.mint_address),
            Outcome::FreezeChanged { account, state, .. } => {
                format!("Token account {} is now {}", account, state.label())
            }
            Outcome::AccountStatus(summary) => summary.describe(),
            Outcome::AccountCreated { address, .. } => format!("Token account created: {}", address),
            Outcome::AuthorityChanged { kind, new_authority: Some(to), .. } => {
                format!("The {} now belongs to {}", kind, to)
            }
            Outcome::AuthorityChanged { kind, new_authority: None, .. } => {
                format!("The {} has been revoked", kind)
            }
            Outcome::History(records) => format!("{} burn record(s)", records.len()),
        };
        match self.signature() {
            Some(signature) => Status::success(format!(
                "{} ({})",
                message,
                network.explorer_tx_url(&signature)
            )),
            None => Status::info(message),
        }
    }
}

// =============================================================================
// PROCESSOR
// =============================================================================

/// Routes operations to their handlers.
pub struct Processor;

impl Processor {
    pub async fn process<R: TokenRpc>(
        console: &Console<R>,
        operation: Operation,
    ) -> ConsoleResult<Outcome> {
        match operation {
            Operation::CreateMint(input) => {
                info!("Operation: CreateMint");
                create_mint::process(console, input).await
            }

            Operation::MintInfo { mint } => {
                info!("Operation: MintInfo");
                token_account::process_mint_info(console, &mint).await
            }

            Operation::Transfer(input) => {
                info!("Operation: Transfer");
                transfer::process(console, input).await
            }

            Operation::Burn(input) => {
                info!("Operation: Burn");
                burn::process(console, input).await
            }

            Operation::Freeze(input) => {
                info!("Operation: Freeze");
                freeze_account::process(console, input, true).await
            }

            Operation::Thaw(input) => {
                info!("Operation: Thaw");
                freeze_account::process(console, input, false).await
            }

            Operation::AccountStatus { mint, owner } => {
                info!("Operation: AccountStatus");
                token_account::process_status(console, &mint, owner.as_deref()).await
            }

            Operation::CreateAccount { mint, owner } => {
                info!("Operation: CreateAccount");
                token_account::process_create(console, &mint, owner.as_deref()).await
            }

            Operation::SetAuthority(input) => {
                info!("Operation: SetAuthority");
                set_authority::process(console, input).await
            }

            Operation::History => {
                info!("Operation: History");
                Self::history(console.history())
            }
        }
    }

    /// Recorded burns, newest first. Needs neither a wallet nor the network.
    pub fn history(log: &OperationLog) -> ConsoleResult<Outcome> {
        Ok(Outcome::History(log.list()?))
    }

    /// Run `operation` and render the result as a status line.
    pub async fn run<R: TokenRpc>(console: &Console<R>, operation: Operation) -> (Status, Option<Outcome>) {
        Self::render(Self::process(console, operation).await, console.config().network)
    }

    /// Turn an operation result into its status line.
    pub fn render(result: ConsoleResult<Outcome>, network: Network) -> (Status, Option<Outcome>) {
        match result {
            Ok(outcome) => (outcome.status(network), Some(outcome)),
            Err(error) => {
                warn!(error = %error, "operation failed");
                (Status::from_error(&error), None)
            }
        }
    }
}

// =============================================================================
// TEST FIXTURES
// =============================================================================
