//! In-memory `TokenRpc` for unit tests.
//!
//! Accounts are plain byte vectors keyed by address. Sent transactions are
//! recorded, never executed, so tests assert on the instructions a workflow
//! assembled and on how the submitter reacts to scripted statuses.

use crate::error::{ConsoleError, ConsoleResult};
use crate::rpc::TokenRpc;
use crate::state::{Account, Mint, Pack};
use crate::{metadata_program, token_program};
use async_trait::async_trait;
use solana_program::{hash::Hash, pubkey::Pubkey};
use solana_sdk::{account::Account as LedgerAccount, signature::Signature, transaction::Transaction};
use std::collections::HashMap;
use std::sync::Mutex;

pub const RENT_LAMPORTS: u64 = 1_461_600;

#[derive(Default)]
struct MockState {
    accounts: HashMap<Pubkey, LedgerAccount>,
    sent: Vec<Transaction>,
    status_polls: u32,
    /// Polls that report "not yet seen" before the final status.
    confirm_after: u32,
    on_chain_error: Option<String>,
    send_error: Option<String>,
    never_confirm: bool,
}

#[derive(Default)]
pub struct MockRpc {
    state: Mutex<MockState>,
}

impl MockRpc {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut MockState) -> T) -> T {
        let mut guard = self.state.lock().unwrap();
        f(&mut guard)
    }

    pub fn set_account_with_owner(&self, address: Pubkey, data: Vec<u8>, owner: Pubkey) {
        self.with_state(|s| {
            s.accounts.insert(
                address,
                LedgerAccount {
                    lamports: RENT_LAMPORTS,
                    data,
                    owner,
                    executable: false,
                    rent_epoch: 0,
                },
            );
        });
    }

    pub fn set_mint(&self, address: Pubkey, mint: &Mint) {
        self.set_account_with_owner(address, mint.pack_to_vec().unwrap(), token_program::id());
    }

    pub fn set_token_account(&self, address: Pubkey, account: &Account) {
        self.set_account_with_owner(address, account.pack_to_vec().unwrap(), token_program::id());
    }

    pub fn set_metadata(&self, address: Pubkey, data: Vec<u8>) {
        self.set_account_with_owner(address, data, metadata_program::id());
    }

    pub fn confirm_after(&self, polls: u32) {
        self.with_state(|s| s.confirm_after = polls);
    }

    pub fn fail_on_chain(&self, error: &str) {
        self.with_state(|s| s.on_chain_error = Some(error.to_string()));
    }

    pub fn fail_send(&self, error: &str) {
        self.with_state(|s| s.send_error = Some(error.to_string()));
    }

    pub fn never_confirm(&self) {
        self.with_state(|s| s.never_confirm = true);
    }

    pub fn sent(&self) -> Vec<Transaction> {
        self.with_state(|s| s.sent.clone())
    }

    pub fn status_polls(&self) -> u32 {
        self.with_state(|s| s.status_polls)
    }
}

#[async_trait]
impl TokenRpc for MockRpc {
    async fn get_latest_blockhash(&self) -> ConsoleResult<Hash> {
        Ok(Hash::new_unique())
    }

    async fn get_account(&self, address: &Pubkey) -> ConsoleResult<Option<LedgerAccount>> {
        Ok(self.with_state(|s| s.accounts.get(address).cloned()))
    }

    async fn get_minimum_balance_for_rent_exemption(&self, _data_len: usize) -> ConsoleResult<u64> {
        Ok(RENT_LAMPORTS)
    }

    async fn send_transaction(&self, transaction: &Transaction) -> ConsoleResult<Signature> {
        self.with_state(|s| {
            if let Some(error) = &s.send_error {
                return Err(ConsoleError::Rpc(error.clone()));
            }
            s.sent.push(transaction.clone());
            Ok(transaction.signatures[0])
        })
    }

    async fn get_signature_status(
        &self,
        _signature: &Signature,
    ) -> ConsoleResult<Option<Result<(), String>>> {
        Ok(self.with_state(|s| {
            s.status_polls += 1;
            if s.never_confirm || s.status_polls <= s.confirm_after {
                return None;
            }
            Some(match &s.on_chain_error {
                Some(error) => Err(error.clone()),
                None => Ok(()),
            })
        }))
    }
}
