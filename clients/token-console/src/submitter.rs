//! Transaction Submitter
//!
//! Drives one transaction from instructions to a confirmed signature.
//!
//! # State Machine
//!
//! ```text
//! Idle ──build──► Built ──sign──► Signed ──send──► Submitted ──poll──► Confirmed
//!                   │               │                │
//!                   └───────────────┴────────────────┴──────────────► Failed
//! ```
//!
//! Polling is bounded: after `retries` unconfirmed polls the submission
//! fails with `ConfirmationTimeout`. The interval doubles after every
//! unconfirmed poll.
//!
//! A submitted transaction cannot be withdrawn. A timeout only means the
//! console stopped looking; the signature is still reported.

use crate::error::{ConsoleError, ConsoleResult};
use crate::rpc::TokenRpc;
use crate::wallet::Wallet;
use solana_program::instruction::Instruction;
use solana_sdk::{
    signature::{Keypair, Signature},
    transaction::Transaction,
};
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_CONFIRM_RETRIES: u32 = 5;
pub const DEFAULT_CONFIRM_INTERVAL_MS: u64 = 500;

// =============================================================================
// STATES
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Built,
    Signed,
    Submitted,
    Confirmed,
    Failed,
}

impl SubmissionState {
    /// Legal successor states.
    fn can_move_to(self, next: SubmissionState) -> bool {
        use SubmissionState::*;
        matches!(
            (self, next),
            (Idle, Built)
                | (Built, Signed)
                | (Signed, Submitted)
                | (Submitted, Confirmed)
                | (Built | Signed | Submitted, Failed)
                | (Idle, Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, SubmissionState::Confirmed | SubmissionState::Failed)
    }
}

/// Progress of one transaction through the state machine.
#[derive(Debug)]
pub struct Submission {
    state: SubmissionState,
    transaction: Option<Transaction>,
    signature: Option<Signature>,
    attempts: u32,
}

impl Default for Submission {
    fn default() -> Self {
        Self::new()
    }
}

impl Submission {
    pub fn new() -> Self {
        Self {
            state: SubmissionState::Idle,
            transaction: None,
            signature: None,
            attempts: 0,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn signature(&self) -> Option<Signature> {
        self.signature
    }

    /// Status polls issued so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    fn advance(&mut self, next: SubmissionState) -> ConsoleResult<()> {
        if !self.state.can_move_to(next) {
            return Err(ConsoleError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        debug!(from = ?self.state, to = ?next, "submission transition");
        self.state = next;
        Ok(())
    }

    /// Record a failure and hand the error back.
    fn fail(&mut self, error: ConsoleError) -> ConsoleError {
        if !self.state.is_terminal() {
            self.state = SubmissionState::Failed;
        }
        warn!(error = %error, signature = ?self.signature, "submission failed");
        error
    }
}

// =============================================================================
// CONFIRMATION POLICY
// =============================================================================

/// How long to wait for a confirmation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfirmPolicy {
    pub retries: u32,
    pub initial_interval: Duration,
}

impl Default for ConfirmPolicy {
    fn default() -> Self {
        Self {
            retries: DEFAULT_CONFIRM_RETRIES,
            initial_interval: Duration::from_millis(DEFAULT_CONFIRM_INTERVAL_MS),
        }
    }
}

// =============================================================================
// SUBMITTER
// =============================================================================

pub struct Submitter<'a, R: TokenRpc + ?Sized> {
    rpc: &'a R,
    policy: ConfirmPolicy,
}

impl<'a, R: TokenRpc + ?Sized> Submitter<'a, R> {
    pub fn new(rpc: &'a R, policy: ConfirmPolicy) -> Self {
        Self { rpc, policy }
    }

    /// Build, sign, send and confirm `instructions` with the wallet as fee payer.
    pub async fn submit(
        &self,
        wallet: &dyn Wallet,
        instructions: &[Instruction],
        co_signers: &[&Keypair],
    ) -> ConsoleResult<Signature> {
        let mut submission = Submission::new();
        self.execute(&mut submission, wallet, instructions, co_signers)
            .await
    }

    /// Same as [`Submitter::submit`], leaving the final state in `submission`.
    pub async fn execute(
        &self,
        submission: &mut Submission,
        wallet: &dyn Wallet,
        instructions: &[Instruction],
        co_signers: &[&Keypair],
    ) -> ConsoleResult<Signature> {
        if submission.state != SubmissionState::Idle {
            return Err(ConsoleError::InvalidTransition {
                from: submission.state,
                to: SubmissionState::Built,
            });
        }

        // Built
        let blockhash = match self.rpc.get_latest_blockhash().await {
            Ok(hash) => hash,
            Err(e) => return Err(submission.fail(e)),
        };
        let payer = wallet.pubkey();
        submission.transaction = Some(Transaction::new_with_payer(instructions, Some(&payer)));
        submission.advance(SubmissionState::Built)?;

        // Signed
        let signed = match submission.transaction.as_mut() {
            Some(tx) => wallet.sign_transaction(tx, co_signers, blockhash),
            None => Err(ConsoleError::Signing("no transaction built".to_string())),
        };
        if let Err(e) = signed {
            return Err(submission.fail(e));
        }
        submission.advance(SubmissionState::Signed)?;

        // Submitted
        let sent = match submission.transaction.as_ref() {
            Some(tx) => self.rpc.send_transaction(tx).await,
            None => Err(ConsoleError::Signing("no transaction built".to_string())),
        };
        let signature = match sent {
            Ok(signature) => signature,
            Err(e) => return Err(submission.fail(e)),
        };
        submission.signature = Some(signature);
        submission.advance(SubmissionState::Submitted)?;
        info!(%signature, instructions = instructions.len(), "transaction submitted");

        // Confirmed | Failed
        self.confirm(submission, signature).await
    }

    async fn confirm(
        &self,
        submission: &mut Submission,
        signature: Signature,
    ) -> ConsoleResult<Signature> {
        let retries = self.policy.retries.max(1);
        let mut interval = self.policy.initial_interval;

        for attempt in 1..=retries {
            submission.attempts = attempt;
            match self.rpc.get_signature_status(&signature).await {
                Ok(Some(Ok(()))) => {
                    submission.advance(SubmissionState::Confirmed)?;
                    info!(%signature, attempt, "transaction confirmed");
                    return Ok(signature);
                }
                Ok(Some(Err(reason))) => {
                    return Err(submission.fail(ConsoleError::TransactionFailed { signature, reason }));
                }
                Ok(None) => debug!(%signature, attempt, "not confirmed yet"),
                // counts as a miss
                Err(e) => warn!(%signature, attempt, error = %e, "status poll failed"),
            }
            if attempt < retries {
                tokio::time::sleep(interval).await;
                interval = interval.saturating_mul(2);
            }
        }

        Err(submission.fail(ConsoleError::ConfirmationTimeout {
            signature,
            attempts: retries,
        }))
    }
}
