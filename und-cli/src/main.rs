mod keys;
mod query;
mod tx;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use und_signer::SignerConfig;

#[derive(Parser)]
#[command(name = "und")]
#[command(about = "Key management and transaction signing for Unification FUND")]
struct Cli {
    /// Directory holding default.toml / local.toml
    #[arg(long, global = true, default_value = "config")]
    config_dir: String,

    #[command(subcommand)]
    command: Commands,
}

/// Where the signing key comes from.
#[derive(Args, Clone, Default)]
pub struct KeySource {
    /// Encrypted keystore file; the password is prompted
    #[arg(long)]
    keystore: Option<PathBuf>,
    /// Address index under 44'/5555'/0'/0 when using UND_MNEMONIC
    #[arg(long)]
    index: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new 24-word mnemonic
    Mnemonic,
    /// Show the address of the configured key
    Address {
        #[command(flatten)]
        key: KeySource,
    },
    /// Encrypt or decrypt keystore files
    Keystore {
        #[command(subcommand)]
        command: keys::KeystoreCommand,
    },
    /// Sign and broadcast a transaction
    Tx {
        #[command(flatten)]
        key: KeySource,
        #[command(flatten)]
        options: tx::TxOptions,
        #[command(subcommand)]
        command: tx::TxCommand,
    },
    /// Read chain state from the node
    Query {
        #[command(subcommand)]
        command: query::QueryCommand,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "und_signer=info,und=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = SignerConfig::load_from(&cli.config_dir)?;

    match cli.command {
        Commands::Mnemonic => keys::new_mnemonic(&config),
        Commands::Address { key } => keys::show_address(&config, &key),
        Commands::Keystore { command } => keys::run_keystore(&config, command),
        Commands::Tx {
            key,
            options,
            command,
        } => tx::run(&config, &key, &options, command).await,
        Commands::Query { command } => query::run(&config, command).await,
    }
}
