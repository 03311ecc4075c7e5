//! Configuration
//!
//! Settings come in layers, later ones winning:
//!
//! 1. built-in defaults
//! 2. a `.env` file in the working directory
//! 3. `TOKEN_CONSOLE_*` environment variables
//! 4. command-line flags (applied by the binary)
//!
//! | Variable | Default |
//! |----------|---------|
//! | `TOKEN_CONSOLE_NETWORK` | `devnet` |
//! | `TOKEN_CONSOLE_RPC_URL` | cluster default |
//! | `TOKEN_CONSOLE_COMMITMENT` | `confirmed` |
//! | `TOKEN_CONSOLE_KEYPAIR_PATH` | `~/.config/solana/id.json` |
//! | `TOKEN_CONSOLE_STORAGE_PATH` | `~/.config/token-console/storage.json` |
//! | `TOKEN_CONSOLE_CONFIRM_RETRIES` | `5` |
//! | `TOKEN_CONSOLE_CONFIRM_INTERVAL_MS` | `500` |

use crate::error::{ConsoleError, ConsoleResult};
use crate::submitter::{ConfirmPolicy, DEFAULT_CONFIRM_INTERVAL_MS, DEFAULT_CONFIRM_RETRIES};
use serde::{Deserialize, Serialize};
use solana_sdk::commitment_config::{CommitmentConfig, CommitmentLevel};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_PREFIX: &str = "TOKEN_CONSOLE_";

// =============================================================================
// NETWORK
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    #[default]
    Devnet,
    Testnet,
    Localnet,
}

impl Network {
    pub fn default_rpc_url(self) -> &'static str {
        match self {
            Network::Mainnet => "https://api.mainnet-beta.solana.com",
            Network::Devnet => "https://api.devnet.solana.com",
            Network::Testnet => "https://api.testnet.solana.com",
            Network::Localnet => "http://127.0.0.1:8899",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Devnet => "devnet",
            Network::Testnet => "testnet",
            Network::Localnet => "localnet",
        }
    }

    fn explorer_suffix(self) -> &'static str {
        match self {
            Network::Mainnet => "",
            Network::Devnet => "?cluster=devnet",
            Network::Testnet => "?cluster=testnet",
            Network::Localnet => "?cluster=custom&customUrl=http%3A%2F%2F127.0.0.1%3A8899",
        }
    }

    pub fn explorer_tx_url(self, signature: &impl fmt::Display) -> String {
        format!("https://explorer.solana.com/tx/{}{}", signature, self.explorer_suffix())
    }

    pub fn explorer_address_url(self, address: &impl fmt::Display) -> String {
        format!("https://explorer.solana.com/address/{}{}", address, self.explorer_suffix())
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Network {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "mainnet-beta" => Ok(Network::Mainnet),
            "devnet" => Ok(Network::Devnet),
            "testnet" => Ok(Network::Testnet),
            "localnet" | "localhost" => Ok(Network::Localnet),
            other => Err(ConsoleError::Config(format!("unknown network '{}'", other))),
        }
    }
}

// =============================================================================
// CONSOLE CONFIG
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub network: Network,
    /// Overrides the network's public endpoint.
    pub rpc_url: Option<String>,
    pub commitment: CommitmentLevel,
    pub keypair_path: PathBuf,
    pub storage_path: PathBuf,
    pub confirm_retries: u32,
    pub confirm_interval_ms: u64,
}

/// Environment layer; every field optional so unset variables keep defaults.
#[derive(Debug, Default, Deserialize)]
struct EnvOverrides {
    network: Option<String>,
    rpc_url: Option<String>,
    commitment: Option<String>,
    keypair_path: Option<PathBuf>,
    storage_path: Option<PathBuf>,
    confirm_retries: Option<u32>,
    confirm_interval_ms: Option<u64>,
}

fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        let home = home_dir();
        Self {
            network: Network::default(),
            rpc_url: None,
            commitment: CommitmentLevel::Confirmed,
            keypair_path: home.join(".config").join("solana").join("id.json"),
            storage_path: home.join(".config").join("token-console").join("storage.json"),
            confirm_retries: DEFAULT_CONFIRM_RETRIES,
            confirm_interval_ms: DEFAULT_CONFIRM_INTERVAL_MS,
        }
    }
}

impl ConsoleConfig {
    /// Defaults, then `.env`, then `TOKEN_CONSOLE_*` variables.
    pub fn from_env() -> ConsoleResult<Self> {
        dotenv::dotenv().ok();
        let overrides = envy::prefixed(ENV_PREFIX)
            .from_env::<EnvOverrides>()
            .map_err(|e| ConsoleError::Config(e.to_string()))?;
        let mut config = Self::default();
        config.apply(overrides)?;
        Ok(config)
    }

    fn apply(&mut self, env: EnvOverrides) -> ConsoleResult<()> {
        if let Some(network) = env.network {
            self.network = network.parse()?;
        }
        if let Some(url) = env.rpc_url.filter(|u| !u.trim().is_empty()) {
            self.rpc_url = Some(url);
        }
        if let Some(commitment) = env.commitment {
            self.commitment = parse_commitment(&commitment)?;
        }
        if let Some(path) = env.keypair_path {
            self.keypair_path = path;
        }
        if let Some(path) = env.storage_path {
            self.storage_path = path;
        }
        if let Some(retries) = env.confirm_retries {
            self.confirm_retries = retries;
        }
        if let Some(ms) = env.confirm_interval_ms {
            self.confirm_interval_ms = ms;
        }
        Ok(())
    }

    pub fn rpc_url(&self) -> &str {
        self.rpc_url
            .as_deref()
            .unwrap_or_else(|| self.network.default_rpc_url())
    }

    pub fn commitment_config(&self) -> CommitmentConfig {
        CommitmentConfig {
            commitment: self.commitment,
        }
    }

    pub fn confirm_policy(&self) -> ConfirmPolicy {
        ConfirmPolicy {
            retries: self.confirm_retries,
            initial_interval: Duration::from_millis(self.confirm_interval_ms),
        }
    }
}

pub fn parse_commitment(value: &str) -> ConsoleResult<CommitmentLevel> {
    match value.trim().to_ascii_lowercase().as_str() {
        "processed" => Ok(CommitmentLevel::Processed),
        "confirmed" => Ok(CommitmentLevel::Confirmed),
        "finalized" => Ok(CommitmentLevel::Finalized),
        other => Err(ConsoleError::Config(format!("unknown commitment '{}'", other))),
    }
}
