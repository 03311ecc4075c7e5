//! RPC Capability
//!
//! The handful of JSON-RPC calls the console needs, behind a trait so the
//! operation workflows run the same against a live cluster, the in-process
//! test bank, or an in-memory mock.
//!
//! On top of the raw calls sit typed fetchers that check the owning
//! program before decoding, so a random address never decodes as a mint.

pub mod client;
#[cfg(test)]
pub mod mock;

use crate::error::{ConsoleError, ConsoleResult};
use crate::metadata::{find_metadata_address, MetadataAccount};
use crate::state::{Account, Mint, Pack};
use crate::{metadata_program, token_program};
use async_trait::async_trait;
use solana_program::{hash::Hash, pubkey::Pubkey};
use solana_sdk::{account::Account as LedgerAccount, signature::Signature, transaction::Transaction};

/// Network calls issued by the console.
#[async_trait]
pub trait TokenRpc: Send + Sync {
    async fn get_latest_blockhash(&self) -> ConsoleResult<Hash>;

    /// `Ok(None)` when nothing lives at `address`.
    async fn get_account(&self, address: &Pubkey) -> ConsoleResult<Option<LedgerAccount>>;

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> ConsoleResult<u64>;

    /// Submit a signed transaction, returning its signature.
    async fn send_transaction(&self, transaction: &Transaction) -> ConsoleResult<Signature>;

    /// `None` while the cluster has not seen the signature at the
    /// configured commitment, otherwise the execution result.
    async fn get_signature_status(
        &self,
        signature: &Signature,
    ) -> ConsoleResult<Option<Result<(), String>>>;
}

// =============================================================================
// TYPED FETCHERS
// =============================================================================

fn assert_owner(address: &Pubkey, account: &LedgerAccount, expected: &Pubkey) -> ConsoleResult<()> {
    if account.owner != *expected {
        return Err(ConsoleError::InvalidAccountOwner {
            address: *address,
            expected_owner: *expected,
        });
    }
    Ok(())
}

/// Fetch and decode a mint. A missing mint is an error.
pub async fn get_mint<R: TokenRpc + ?Sized>(rpc: &R, address: &Pubkey) -> ConsoleResult<Mint> {
    let account = rpc
        .get_account(address)
        .await?
        .ok_or(ConsoleError::MintNotFound(*address))?;
    assert_owner(address, &account, &token_program::id())?;
    let mint = Mint::unpack_from_slice(&account.data)?;
    if !mint.is_initialized {
        return Err(ConsoleError::InvalidAccountData(format!(
            "mint {} is not initialized",
            address
        )));
    }
    Ok(mint)
}

/// Fetch and decode a token account; `None` if it was never created.
pub async fn get_token_account<R: TokenRpc + ?Sized>(
    rpc: &R,
    address: &Pubkey,
) -> ConsoleResult<Option<Account>> {
    match rpc.get_account(address).await? {
        None => Ok(None),
        Some(account) => {
            assert_owner(address, &account, &token_program::id())?;
            Ok(Some(Account::unpack_from_slice(&account.data)?))
        }
    }
}

/// Fetch the metadata of `mint`, if any was created.
pub async fn get_metadata<R: TokenRpc + ?Sized>(
    rpc: &R,
    mint: &Pubkey,
) -> ConsoleResult<Option<MetadataAccount>> {
    let address = find_metadata_address(mint);
    match rpc.get_account(&address).await? {
        None => Ok(None),
        Some(account) => {
            assert_owner(&address, &account, &metadata_program::id())?;
            Ok(Some(MetadataAccount::unpack(&account.data)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockRpc;
    use super::*;
    use crate::state::{AccountState, COption};

    #[tokio::test]
    async fn test_get_mint_checks_owner() {
        let rpc = MockRpc::new();
        let address = Pubkey::new_unique();
        let mint = Mint {
            mint_authority: COption::some(Pubkey::new_unique()),
            supply: 10,
            decimals: 2,
            is_initialized: true,
            freeze_authority: COption::none(),
        };
        rpc.set_account_with_owner(address, mint.pack_to_vec().unwrap(), Pubkey::new_unique());

        assert!(matches!(
            get_mint(&rpc, &address).await,
            Err(ConsoleError::InvalidAccountOwner { .. })
        ));

        rpc.set_mint(address, &mint);
        assert_eq!(get_mint(&rpc, &address).await.unwrap(), mint);
    }

    #[tokio::test]
    async fn test_get_mint_missing() {
        let rpc = MockRpc::new();
        let address = Pubkey::new_unique();
        assert!(matches!(
            get_mint(&rpc, &address).await,
            Err(ConsoleError::MintNotFound(a)) if a == address
        ));
    }

    #[tokio::test]
    async fn test_get_token_account() {
        let rpc = MockRpc::new();
        let address = Pubkey::new_unique();
        assert!(get_token_account(&rpc, &address).await.unwrap().is_none());

        let account = Account {
            mint: Pubkey::new_unique(),
            owner: Pubkey::new_unique(),
            amount: 7,
            state: AccountState::Initialized,
            ..Account::default()
        };
        rpc.set_token_account(address, &account);
        assert_eq!(get_token_account(&rpc, &address).await.unwrap(), Some(account));
    }

    #[tokio::test]
    async fn test_mint_address_is_not_a_token_account() {
        let rpc = MockRpc::new();
        let address = Pubkey::new_unique();
        rpc.set_mint(address, &Mint { is_initialized: true, ..Mint::default() });
        assert!(matches!(
            get_token_account(&rpc, &address).await,
            Err(ConsoleError::InvalidAccountData(_))
        ));
    }
}
