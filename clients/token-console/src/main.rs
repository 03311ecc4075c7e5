use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use spl_token_console::{
    config::{parse_commitment, ConsoleConfig, Network},
    error::ConsoleResult,
    history::OperationLog,
    metadata::TokenMetadata,
    processor::{BurnInput, CreateMintInput, FreezeInput, SetAuthorityInput, TransferInput},
    rpc::client::connect,
    status::{Status, StatusKind},
    store::LocalStore,
    utils::authority::AuthorityKind,
    Console, KeypairWallet, Operation, Outcome, Processor,
};
use std::path::PathBuf;
use tracing::{debug, info, span, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

#[derive(Debug, Parser)]
#[clap(name = "token-console", version, about = "Issue and manage SPL tokens")]
struct Cli {
    /// mainnet, devnet, testnet or localnet
    #[clap(long, global = true)]
    network: Option<Network>,

    /// RPC endpoint, overrides the network default
    #[clap(long, global = true)]
    rpc_url: Option<String>,

    /// processed, confirmed or finalized
    #[clap(long, global = true)]
    commitment: Option<String>,

    /// Wallet keypair file
    #[clap(long, short = 'k', global = true)]
    keypair: Option<PathBuf>,

    /// Local history file
    #[clap(long, global = true)]
    storage: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a new token and mint its initial supply to the wallet
    CreateMint {
        #[clap(long, default_value = "9")]
        decimals: u8,
        #[clap(long)]
        supply: String,
        #[clap(long, requires = "symbol")]
        name: Option<String>,
        #[clap(long, requires = "name")]
        symbol: Option<String>,
        #[clap(long, default_value = "")]
        uri: String,
        /// Lock the metadata after creation
        #[clap(long)]
        immutable: bool,
        /// Mint and freeze authority (defaults to the wallet)
        #[clap(long)]
        authority: Option<String>,
        #[clap(long)]
        enable_freeze: bool,
        /// Revoke the mint authority after the initial mint
        #[clap(long)]
        disable_minting: bool,
    },
    /// Show supply, decimals, authorities and metadata of a mint
    MintInfo { mint: String },
    /// Send tokens from the wallet's account
    Transfer {
        mint: String,
        recipient: String,
        amount: String,
    },
    /// Burn tokens from the wallet's account
    Burn { mint: String, amount: String },
    /// Freeze a token account (or the associated account of a wallet)
    Freeze { mint: String, account: String },
    /// Thaw a token account (or the associated account of a wallet)
    Thaw { mint: String, account: String },
    /// Show the associated token account of an owner
    AccountStatus {
        mint: String,
        #[clap(long)]
        owner: Option<String>,
    },
    /// Create the associated token account of an owner
    CreateAccount {
        mint: String,
        #[clap(long)]
        owner: Option<String>,
    },
    /// Transfer or revoke an authority (mint, freeze, metadata)
    SetAuthority {
        mint: String,
        kind: AuthorityKind,
        #[clap(long, conflicts_with = "revoke")]
        new_authority: Option<String>,
        #[clap(long)]
        revoke: bool,
    },
    /// List recorded burns, newest first
    History,
}

impl Command {
    fn into_operation(self) -> Operation {
        match self {
            Command::CreateMint {
                decimals,
                supply,
                name,
                symbol,
                uri,
                immutable,
                authority,
                enable_freeze,
                disable_minting,
            } => Operation::CreateMint(CreateMintInput {
                decimals,
                initial_supply: supply,
                metadata: match (name, symbol) {
                    (Some(name), Some(symbol)) => Some(TokenMetadata {
                        name,
                        symbol,
                        uri,
                        is_mutable: !immutable,
                    }),
                    _ => None,
                },
                authority,
                enable_freeze,
                disable_minting,
            }),
            Command::MintInfo { mint } => Operation::MintInfo { mint },
            Command::Transfer { mint, recipient, amount } => {
                Operation::Transfer(TransferInput { mint, recipient, amount })
            }
            Command::Burn { mint, amount } => Operation::Burn(BurnInput { mint, amount }),
            Command::Freeze { mint, account } => Operation::Freeze(FreezeInput { mint, target: account }),
            Command::Thaw { mint, account } => Operation::Thaw(FreezeInput { mint, target: account }),
            Command::AccountStatus { mint, owner } => Operation::AccountStatus { mint, owner },
            Command::CreateAccount { mint, owner } => Operation::CreateAccount { mint, owner },
            Command::SetAuthority { mint, kind, new_authority, revoke } => {
                Operation::SetAuthority(SetAuthorityInput { mint, kind, new_authority, revoke })
            }
            Command::History => Operation::History,
        }
    }
}

fn init_tracing() -> Result<()> {
    // Route `log` records from the Solana crates into tracing
    tracing_log::LogTracer::init().context("setting log tracer failed")?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().with_target(false);

    let subscriber = Registry::default().with(env_filter).with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;
    Ok(())
}

fn load_config(cli: &Cli) -> ConsoleResult<ConsoleConfig> {
    let mut config = ConsoleConfig::from_env()?;
    if let Some(network) = cli.network {
        config.network = network;
    }
    if let Some(url) = &cli.rpc_url {
        config.rpc_url = Some(url.clone());
    }
    if let Some(commitment) = &cli.commitment {
        config.commitment = parse_commitment(commitment)?;
    }
    if let Some(path) = &cli.keypair {
        config.keypair_path = path.clone();
    }
    if let Some(path) = &cli.storage {
        config.storage_path = path.clone();
    }
    Ok(config)
}

fn print_outcome(outcome: &Outcome, network: Network) {
    match outcome {
        Outcome::MintCreated { mint, token_account, metadata, .. } => {
            println!("  mint:          {}", network.explorer_address_url(mint));
            println!("  token account: {}", token_account);
            if let Some(metadata) = metadata {
                println!("  metadata:      {}", metadata);
            }
        }
        Outcome::MintInfo(summary) => {
            let show = |key: &Option<_>| match key {
                Some(k) => format!("{}", k),
                None => "none".to_string(),
            };
            println!("  mint authority:   {}", show(&summary.mint_authority));
            println!("  freeze authority: {}", show(&summary.freeze_authority));
            if let (Some(name), Some(symbol)) = (&summary.name, &summary.symbol) {
                println!("  metadata:         {} ({})", name, symbol);
                println!("  update authority: {}", show(&summary.update_authority));
            }
        }
        Outcome::History(records) => {
            for record in records {
                println!(
                    "  {}  {:>20}  {}  {}  {}",
                    record.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    record.amount,
                    record.mint_address,
                    record.network,
                    record.network.explorer_tx_url(&record.signature)
                );
            }
        }
        _ => {}
    }
}

/// Run `operation`. Only operations that reach the network load the wallet.
async fn dispatch(config: ConsoleConfig, operation: Operation) -> (Status, Option<Outcome>) {
    let network = config.network;
    if matches!(operation, Operation::History) {
        info!("Operation: History");
        let log = OperationLog::burns(LocalStore::open(config.storage_path.clone()));
        return Processor::render(Processor::history(&log), network);
    }

    let wallet = match KeypairWallet::from_file(&config.keypair_path) {
        Ok(wallet) => wallet,
        Err(e) => return Processor::render(Err(e), network),
    };
    let rpc = connect(config.rpc_url(), config.commitment_config());
    let console = Console::new(rpc, Box::new(wallet), config);
    Processor::run(&console, operation).await
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing()?;
    let main_span = span!(Level::INFO, "token-console");
    let _guard = main_span.enter();

    let (status, outcome, network) = match load_config(&cli) {
        Ok(config) => {
            debug!(network = %config.network, rpc = config.rpc_url(), "configuration loaded");
            let network = config.network;
            let (status, outcome) = dispatch(config, cli.command.into_operation()).await;
            (status, outcome, network)
        }
        Err(e) => (Status::from_error(&e), None, Network::default()),
    };

    println!("{}", status);
    if let Some(outcome) = &outcome {
        print_outcome(outcome, network);
    }

    if status.kind == StatusKind::Error {
        std::process::exit(1);
    }
    Ok(())
}
