//! `TokenRpc` over the nonblocking JSON-RPC client.

use crate::error::ConsoleResult;
use crate::rpc::TokenRpc;
use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_program::{hash::Hash, pubkey::Pubkey};
use solana_sdk::{
    account::Account as LedgerAccount, commitment_config::CommitmentConfig, signature::Signature,
    transaction::Transaction,
};
use tracing::debug;

/// Build a client for `url` reading at `commitment`.
pub fn connect(url: &str, commitment: CommitmentConfig) -> RpcClient {
    debug!(url, ?commitment, "connecting rpc client");
    RpcClient::new_with_commitment(url.to_string(), commitment)
}

#[async_trait]
impl TokenRpc for RpcClient {
    async fn get_latest_blockhash(&self) -> ConsoleResult<Hash> {
        Ok(RpcClient::get_latest_blockhash(self).await?)
    }

    async fn get_account(&self, address: &Pubkey) -> ConsoleResult<Option<LedgerAccount>> {
        let response = self
            .get_account_with_commitment(address, self.commitment())
            .await?;
        Ok(response.value)
    }

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> ConsoleResult<u64> {
        Ok(RpcClient::get_minimum_balance_for_rent_exemption(self, data_len).await?)
    }

    async fn send_transaction(&self, transaction: &Transaction) -> ConsoleResult<Signature> {
        Ok(RpcClient::send_transaction(self, transaction).await?)
    }

    async fn get_signature_status(
        &self,
        signature: &Signature,
    ) -> ConsoleResult<Option<Result<(), String>>> {
        let status = self
            .get_signature_status_with_commitment(signature, self.commitment())
            .await?;
        Ok(status.map(|result| result.map_err(|e| e.to_string())))
    }
}
