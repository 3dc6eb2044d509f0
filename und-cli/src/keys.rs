use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Subcommand;
use tracing::info;
use und_signer::crypto::{address_from_public_key, generate_mnemonic, keystore, VALIDATOR_PREFIX};
use und_signer::{Account, Keystore, SignerConfig};
use zeroize::Zeroizing;

use crate::KeySource;

const MNEMONIC_ENV: &str = "UND_MNEMONIC";
const PRIVATE_KEY_ENV: &str = "UND_PRIVATE_KEY";

#[derive(Subcommand)]
pub enum KeystoreCommand {
    /// Encrypt the key from UND_MNEMONIC or UND_PRIVATE_KEY into a file
    Encrypt {
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        index: Option<u32>,
    },
    /// Decrypt a keystore file and show its address
    Decrypt {
        #[arg(long)]
        file: PathBuf,
        /// Print the raw private key
        #[arg(long)]
        show_private_key: bool,
    },
}

fn prompt_password(prompt: &str) -> anyhow::Result<Zeroizing<String>> {
    let password = rpassword::prompt_password_stdout(prompt).context("failed to read password")?;
    Ok(Zeroizing::new(password))
}

fn account_from_env(config: &SignerConfig, index: Option<u32>) -> anyhow::Result<Account> {
    if let Ok(mnemonic) = env::var(MNEMONIC_ENV) {
        let mnemonic = Zeroizing::new(mnemonic);
        let index = index.unwrap_or(config.keys.account_index);
        return Ok(Account::from_mnemonic(&mnemonic, index)?);
    }
    if let Ok(private_key) = env::var(PRIVATE_KEY_ENV) {
        let private_key = Zeroizing::new(private_key);
        return Ok(Account::from_private_key_hex(&private_key)?);
    }
    bail!("no key configured: pass --keystore or set {MNEMONIC_ENV} / {PRIVATE_KEY_ENV}")
}

/// Resolve the signing account from a keystore file or the environment.
pub fn load_account(config: &SignerConfig, source: &KeySource) -> anyhow::Result<Account> {
    match &source.keystore {
        Some(path) => {
            let keystore = Keystore::load(path)
                .with_context(|| format!("failed to read keystore {}", path.display()))?;
            let password = prompt_password("Keystore password: ")?;
            Ok(Account::from_keystore(&keystore, &password)?)
        }
        None => account_from_env(config, source.index),
    }
}

pub fn new_mnemonic(config: &SignerConfig) -> anyhow::Result<()> {
    let mnemonic = Zeroizing::new(generate_mnemonic()?);
    let account = Account::from_mnemonic(&mnemonic, config.keys.account_index)?;

    println!("Mnemonic (store it offline, it controls all derived accounts):");
    println!("{}", mnemonic.as_str());
    println!();
    println!("Address {}: {}", config.keys.account_index, account.address);
    Ok(())
}

pub fn show_address(config: &SignerConfig, source: &KeySource) -> anyhow::Result<()> {
    let account = load_account(config, source)?;
    let operator = address_from_public_key(&account.public_key, VALIDATOR_PREFIX)?;

    println!("address:    {}", account.address);
    println!("operator:   {operator}");
    println!("public key: {}", account.public_key.to_hex());
    if let Some(path) = &account.hd_path {
        println!("hd path:    {path}");
    }
    Ok(())
}

pub fn run_keystore(config: &SignerConfig, command: KeystoreCommand) -> anyhow::Result<()> {
    match command {
        KeystoreCommand::Encrypt { out, index } => {
            if out.exists() {
                bail!("{} already exists", out.display());
            }
            let account = account_from_env(config, index)?;
            let password = prompt_password("New keystore password: ")?;
            let confirm = prompt_password("Repeat password: ")?;
            if *password != *confirm {
                bail!("passwords do not match");
            }

            let keystore = keystore::encrypt(&account.private_key, &password)?;
            keystore.save(&out)?;
            info!(address = %account.address, path = %out.display(), "keystore written");
            println!("{}", account.address);
        }
        KeystoreCommand::Decrypt {
            file,
            show_private_key,
        } => {
            let account = load_account(
                config,
                &KeySource {
                    keystore: Some(file),
                    index: None,
                },
            )?;
            println!("address: {}", account.address);
            if show_private_key {
                println!("private key: {}", account.private_key.to_hex());
            }
        }
    }
    Ok(())
}
