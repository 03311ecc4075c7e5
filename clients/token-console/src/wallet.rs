//! Wallet Capability
//!
//! A wallet exposes its public key and signs transactions. The console
//! never touches key material beyond that.

use crate::error::{ConsoleError, ConsoleResult};
use solana_program::{hash::Hash, pubkey::Pubkey};
use solana_sdk::{
    signature::{read_keypair_file, Keypair, Signer},
    transaction::Transaction,
};
use std::path::Path;

/// Public key plus signing.
pub trait Wallet: Send + Sync {
    fn pubkey(&self) -> Pubkey;

    /// Sign `transaction` at `blockhash` together with `co_signers`.
    ///
    /// Co-signers cover fresh accounts created in the same transaction,
    /// such as a new mint.
    fn sign_transaction(
        &self,
        transaction: &mut Transaction,
        co_signers: &[&Keypair],
        blockhash: Hash,
    ) -> ConsoleResult<()>;
}

/// Wallet backed by a local keypair.
pub struct KeypairWallet {
    keypair: Keypair,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }

    /// Load a keypair file in the Solana CLI JSON format.
    pub fn from_file(path: impl AsRef<Path>) -> ConsoleResult<Self> {
        let path = path.as_ref();
        let keypair = read_keypair_file(path).map_err(|e| {
            ConsoleError::Config(format!("cannot read keypair {}: {}", path.display(), e))
        })?;
        Ok(Self::new(keypair))
    }
}

impl Wallet for KeypairWallet {
    fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    fn sign_transaction(
        &self,
        transaction: &mut Transaction,
        co_signers: &[&Keypair],
        blockhash: Hash,
    ) -> ConsoleResult<()> {
        let mut signers: Vec<&dyn Signer> = vec![&self.keypair];
        signers.extend(co_signers.iter().map(|k| *k as &dyn Signer));
        transaction.try_sign(&signers, blockhash)?;
        Ok(())
    }
}
