use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::bail;
use clap::{Args, Subcommand};
use tracing::{info, warn};
use und_signer::session::WrkChainBlock;
use und_signer::{
    BroadcastMode, Broadcaster, Coin, Fee, Session, SignedTransaction, SignerConfig,
};

use crate::keys::load_account;
use crate::KeySource;

#[derive(Args)]
pub struct TxOptions {
    #[arg(long, default_value = "")]
    memo: String,
    /// Fee amount, e.g. 25000000nund or 0.025fund
    #[arg(long)]
    fee: Option<Coin>,
    /// Gas limit
    #[arg(long)]
    gas: Option<u64>,
    /// sync, async or block
    #[arg(long)]
    mode: Option<BroadcastMode>,
    /// Print the signed transaction instead of broadcasting it
    #[arg(long)]
    dry_run: bool,
    /// Poll the node until the transaction is included
    #[arg(long)]
    wait: bool,
}

impl TxOptions {
    fn fee(&self, config: &SignerConfig) -> Fee {
        let mut fee = config.fees.to_fee();
        if let Some(amount) = &self.fee {
            fee.amount = amount.clone();
        }
        if let Some(gas) = self.gas {
            fee.gas_limit = gas;
        }
        fee
    }
}

#[derive(Subcommand)]
pub enum TxCommand {
    /// Send tokens to another account
    Send {
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: Coin,
    },
    /// Transfer tokens to another chain over IBC
    IbcTransfer {
        #[arg(long)]
        to: String,
        #[arg(long)]
        channel: String,
        #[arg(long)]
        amount: Coin,
    },
    Delegate {
        #[arg(long)]
        validator: String,
        #[arg(long)]
        amount: Coin,
    },
    Undelegate {
        #[arg(long)]
        validator: String,
        #[arg(long)]
        amount: Coin,
    },
    Redelegate {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: Coin,
    },
    /// Withdraw staking rewards, and commission for the validator's own key
    Withdraw {
        #[arg(long)]
        validator: String,
        #[arg(long)]
        commission: bool,
    },
    /// Vote yes, no, abstain or no_with_veto on a proposal (any case)
    Vote {
        #[arg(long)]
        proposal: u64,
        #[arg(long)]
        option: String,
    },
    RegisterBeacon {
        #[arg(long)]
        moniker: String,
        #[arg(long, default_value = "")]
        name: String,
    },
    RecordBeacon {
        #[arg(long)]
        beacon_id: u64,
        #[arg(long)]
        hash: String,
        /// Unix seconds, defaults to now
        #[arg(long)]
        submit_time: Option<u64>,
    },
    RegisterWrkchain {
        #[arg(long)]
        moniker: String,
        #[arg(long)]
        base_type: String,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        genesis_hash: String,
    },
    RecordWrkchain {
        #[arg(long)]
        wrkchain_id: u64,
        #[arg(long)]
        height: u64,
        #[arg(long)]
        block_hash: String,
        #[arg(long, default_value = "")]
        parent_hash: String,
        #[arg(long, default_value = "")]
        hash1: String,
        #[arg(long, default_value = "")]
        hash2: String,
        #[arg(long, default_value = "")]
        hash3: String,
    },
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

async fn sign(
    session: &Session,
    fee: &Fee,
    options: &TxOptions,
    command: TxCommand,
) -> und_signer::SignerResult<SignedTransaction> {
    let memo = options.memo.as_str();
    match command {
        TxCommand::Send { to, amount } => session.send(&to, amount, fee, memo).await,
        TxCommand::IbcTransfer { to, channel, amount } => {
            session.transfer_ibc(&to, &channel, amount, fee, memo).await
        }
        TxCommand::Delegate { validator, amount } => {
            session.delegate(&validator, amount, fee, memo).await
        }
        TxCommand::Undelegate { validator, amount } => {
            session.undelegate(&validator, amount, fee, memo).await
        }
        TxCommand::Redelegate { from, to, amount } => {
            session.redelegate(&from, &to, amount, fee, memo).await
        }
        TxCommand::Withdraw {
            validator,
            commission,
        } => {
            session
                .withdraw_delegation_reward(&validator, commission, fee, memo)
                .await
        }
        TxCommand::Vote { proposal, option } => {
            let option = option.trim().to_ascii_uppercase();
            session.vote(proposal, &option, fee, memo).await
        }
        TxCommand::RegisterBeacon { moniker, name } => {
            session.register_beacon(&moniker, &name, options.gas).await
        }
        TxCommand::RecordBeacon {
            beacon_id,
            hash,
            submit_time,
        } => {
            let submit_time = submit_time.unwrap_or_else(unix_now);
            session
                .record_beacon_timestamp(beacon_id, &hash, submit_time, options.gas)
                .await
        }
        TxCommand::RegisterWrkchain {
            moniker,
            base_type,
            name,
            genesis_hash,
        } => {
            session
                .register_wrkchain(&moniker, &base_type, &name, &genesis_hash, options.gas)
                .await
        }
        TxCommand::RecordWrkchain {
            wrkchain_id,
            height,
            block_hash,
            parent_hash,
            hash1,
            hash2,
            hash3,
        } => {
            let block = WrkChainBlock {
                wrkchain_id,
                height,
                block_hash,
                parent_hash,
                hash1,
                hash2,
                hash3,
            };
            session.record_wrkchain_block(block, options.gas).await
        }
    }
}

pub async fn run(
    config: &SignerConfig,
    key: &KeySource,
    options: &TxOptions,
    command: TxCommand,
) -> anyhow::Result<()> {
    let account = load_account(config, key)?;
    let client = Arc::new(config.lcd_client()?);

    let mut session = Session::new(client.clone());
    if let Some(chain_id) = &config.network.chain_id {
        session = session.with_chain_id(chain_id.clone());
    }
    session.init_chain().await?;
    session.set_private_key(account.private_key.clone()).await?;

    let fee = options.fee(config);
    let signed = sign(&session, &fee, options, command).await?;

    if options.dry_run {
        println!("{}", signed.to_base64());
        eprintln!("txhash: {}", signed.hash());
        return Ok(());
    }

    let mode = options.mode.unwrap_or(config.network.broadcast_mode);
    let mut result = client.broadcast(&signed, mode).await?;
    if !result.is_success() {
        bail!("transaction rejected (code {}): {}", result.code, result.raw_log);
    }

    if options.wait && mode != BroadcastMode::Block {
        let timeout = Duration::from_secs(config.network.timeout_secs);
        result = client.wait_for_tx(&result.txhash, timeout).await?;
        if !result.is_success() {
            warn!(code = result.code, raw_log = %result.raw_log, "transaction failed in block");
            bail!("transaction failed (code {}): {}", result.code, result.raw_log);
        }
        info!(height = result.height, "transaction included");
    }

    println!("{}", result.txhash);
    Ok(())
}
