//! # SPL Token Console
//!
//! Client-side administration for fungible SPL tokens.
//!
//! ## Overview
//!
//! This crate allows a wallet holder to:
//! - Create token mints (with optional Metaplex display metadata)
//! - Transfer tokens, creating the recipient's associated account on demand
//! - Burn tokens and keep a local burn history
//! - Freeze and thaw token accounts
//! - Transfer or revoke mint, freeze and metadata-update authorities
//! - Inspect and create associated token accounts
//!
//! Every operation follows the same path:
//!
//! ```text
//! input -> validation -> instruction assembly -> signing
//!       -> submission -> confirmation polling -> status
//! ```
//!
//! ## Programs Used
//!
//! | Program | Address |
//! |---------|---------|
//! | SPL Token | `TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA` |
//! | Associated Token Account | `ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL` |
//! | Token Metadata | `metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s` |

// =============================================================================
// MODULE DECLARATIONS
// =============================================================================

/// Associated token account derivation and creation
pub mod associated;

/// Network selection, RPC endpoint and confirmation policy
pub mod config;

/// Error taxonomy shared by every operation
pub mod error;

/// Burn history persisted to local storage
pub mod history;

/// SPL Token instruction encoding and builders
pub mod instruction;

/// Token Metadata (Metaplex) instruction builders and account decoding
pub mod metadata;

/// Operation workflows (create, transfer, burn, freeze, authority)
pub mod processor;

/// RPC capability and typed account fetchers
pub mod rpc;

/// SPL account layouts (Mint, token Account)
pub mod state;

/// Raw error text to user-facing status lines
pub mod status;

/// JSON key/value storage file
pub mod store;

/// Transaction build/sign/submit/confirm state machine
pub mod submitter;

/// Address, amount and authority checks
pub mod utils;

/// Wallet capability (public key + signing)
pub mod wallet;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use config::{ConsoleConfig, Network};
pub use error::ConsoleError;
pub use instruction::{AuthorityType, TokenInstruction};
pub use processor::{Console, Operation, Outcome, Processor};
pub use rpc::TokenRpc;
pub use state::{Account, AccountState, Mint, Pack};
pub use submitter::{SubmissionState, Submitter};
pub use wallet::{KeypairWallet, Wallet};

// =============================================================================
// PROGRAM IDS
// =============================================================================

/// The SPL Token program.
pub mod token_program {
    solana_program::declare_id!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
}

/// The SPL Associated Token Account program.
pub mod associated_token_program {
    solana_program::declare_id!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");
}

/// The Metaplex Token Metadata program.
pub mod metadata_program {
    solana_program::declare_id!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");
}
