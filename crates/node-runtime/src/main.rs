//! # Quantum-Chain Node Runtime
//!
//! `node-runtime init --repo <dir>` creates a repository and bootstraps it.
//!
//! ## Key Files
//!
//! - `--peer-key`: PKCS#1 DER RSA private key
//! - `--default-key`, `--import-key`: JSON `{"key_type": ..., "private_key": "<hex>"}`
//!
//! ## Environment
//!
//! - `RUST_LOG`: log filter (default `info`)
//! - `QC_P2P_PORT`, `QC_RPC_PORT`: override the initial configuration

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use node_runtime::init::{init, InitOptions};
use node_runtime::{DefaultGenesis, GenesisConfig};
use qc_repo::{FsRepo, NodeConfig};
use qc_wallet::KeyInfo;
use shared_crypto::PeerKeyPair;

#[derive(Parser)]
#[command(name = "node-runtime")]
#[command(about = "Quantum-Chain node runtime", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create and bootstrap a node repository
    Init(InitArgs),
}

#[derive(clap::Args)]
struct InitArgs {
    /// Repository directory (created if missing)
    #[arg(long)]
    repo: PathBuf,

    /// Peer identity key (PKCS#1 DER). Generated if omitted
    #[arg(long)]
    peer_key: Option<PathBuf>,

    /// Default wallet key (JSON). Generated if omitted
    #[arg(long)]
    default_key: Option<PathBuf>,

    /// Additional wallet key to import (JSON). Repeatable, imported in order
    #[arg(long = "import-key")]
    import_keys: Vec<PathBuf>,

    /// Genesis chain ID
    #[arg(long, default_value_t = 1)]
    chain_id: u64,

    /// Genesis timestamp (Unix seconds). Current time if omitted
    #[arg(long)]
    genesis_timestamp: Option<u64>,
}

/// Initial configuration: defaults plus environment overrides.
fn load_config(chain_id: u64) -> NodeConfig {
    let mut config = NodeConfig::default();
    config.api.chain_id = chain_id;

    if let Ok(port) = std::env::var("QC_P2P_PORT") {
        match port.parse() {
            Ok(p) => config.network.p2p_port = p,
            Err(_) => warn!("Ignoring invalid QC_P2P_PORT {:?}", port),
        }
    }
    if let Ok(port) = std::env::var("QC_RPC_PORT") {
        match port.parse() {
            Ok(p) => config.api.rpc_port = p,
            Err(_) => warn!("Ignoring invalid QC_RPC_PORT {:?}", port),
        }
    }

    config
}

fn read_key_info(path: &Path) -> Result<KeyInfo> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing key file {}", path.display()))
}

fn read_options(args: &InitArgs) -> Result<InitOptions> {
    let mut options = InitOptions::new();

    if let Some(path) = &args.peer_key {
        let der = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let key = PeerKeyPair::from_bytes(&der)
            .with_context(|| format!("decoding peer key {}", path.display()))?;
        options = options.peer_key(key);
    }
    if let Some(path) = &args.default_key {
        options = options.default_key(read_key_info(path)?);
    }
    for path in &args.import_keys {
        options = options.import_key(read_key_info(path)?);
    }

    Ok(options)
}

async fn run_init(args: InitArgs) -> Result<()> {
    let options = read_options(&args)?;
    let genesis = DefaultGenesis::new(GenesisConfig {
        chain_id: args.chain_id,
        timestamp: args.genesis_timestamp,
        ..Default::default()
    });

    FsRepo::init(&args.repo, &load_config(args.chain_id))
        .with_context(|| format!("creating repository at {}", args.repo.display()))?;
    let mut repo = FsRepo::open(&args.repo)
        .with_context(|| format!("opening repository at {}", args.repo.display()))?;

    let ctx = CancellationToken::new();
    let shutdown = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling initialization");
            shutdown.cancel();
        }
    });

    init(&ctx, &mut repo, &genesis, options)
        .await
        .with_context(|| format!("initializing repository at {}", args.repo.display()))?;

    info!("Repository ready at {}", args.repo.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    match cli.command {
        Commands::Init(args) => run_init(args).await,
    }
}
