use anyhow::Context;
use clap::{Subcommand, ValueEnum};
use serde_json::{json, Value};
use und_signer::node::lcd::{Page, TxOrder, ValidatorStatus};
use und_signer::node::FeeModule;
use und_signer::{NodeQuery, SignerConfig};

#[derive(Clone, Copy, ValueEnum)]
pub enum Module {
    Beacon,
    Wrkchain,
}

impl From<Module> for FeeModule {
    fn from(module: Module) -> Self {
        match module {
            Module::Beacon => FeeModule::Beacon,
            Module::Wrkchain => FeeModule::WrkChain,
        }
    }
}

#[derive(Subcommand)]
pub enum QueryCommand {
    /// Chain id reported by the node
    ChainId,
    /// Account number and sequence
    Account { address: String },
    Balance {
        address: String,
        #[arg(long)]
        denom: Option<String>,
    },
    Tx { hash: String },
    /// Transactions sent by (or, with --received, to) an address
    Txs {
        address: String,
        #[arg(long)]
        received: bool,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
        #[arg(long)]
        ascending: bool,
    },
    Validators {
        #[arg(long, default_value = "BOND_STATUS_BONDED")]
        status: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 100)]
        limit: u32,
    },
    Validator { operator: String },
    Delegations { address: String },
    Rewards {
        address: String,
        #[arg(long)]
        validator: Option<String>,
    },
    Proposals {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 100)]
        limit: u32,
    },
    Tally { proposal: u64 },
    Supply,
    /// Registration and record fees of the BEACON or WRKChain module
    ModuleFees {
        #[arg(value_enum)]
        module: Module,
    },
}

pub async fn run(config: &SignerConfig, command: QueryCommand) -> anyhow::Result<()> {
    let client = config.lcd_client()?;

    let value: Value = match command {
        QueryCommand::ChainId => json!({ "chain_id": client.get_chain_id().await? }),
        QueryCommand::Account { address } => {
            let account = client
                .get_account(&address)
                .await?
                .with_context(|| format!("account {address} not found"))?;
            json!({
                "address": address,
                "account_number": account.account_number,
                "sequence": account.sequence,
            })
        }
        QueryCommand::Balance { address, denom } => match denom {
            Some(denom) => client.get_balance(&address, &denom).await?,
            None => client.get_balances(&address).await?,
        },
        QueryCommand::Tx { hash } => client.get_tx(&hash).await?,
        QueryCommand::Txs {
            address,
            received,
            page,
            limit,
            ascending,
        } => {
            let page = Page::new(page, limit);
            let order = if ascending { TxOrder::Asc } else { TxOrder::Desc };
            if received {
                client.get_transactions_received(&address, page, order).await?
            } else {
                client.get_transactions(&address, page, order).await?
            }
        }
        QueryCommand::Validators {
            status,
            page,
            limit,
        } => {
            client
                .get_validators(ValidatorStatus::parse_or_bonded(&status), Page::new(page, limit))
                .await?
        }
        QueryCommand::Validator { operator } => client.get_validator(&operator).await?,
        QueryCommand::Delegations { address } => client.get_delegations(&address).await?,
        QueryCommand::Rewards { address, validator } => {
            client
                .get_delegator_rewards(&address, validator.as_deref())
                .await?
        }
        QueryCommand::Proposals { page, limit } => {
            client.get_governance_proposals(Page::new(page, limit)).await?
        }
        QueryCommand::Tally { proposal } => client.get_governance_proposal_tally(proposal).await?,
        QueryCommand::Supply => client.get_total_supply().await?,
        QueryCommand::ModuleFees { module } => {
            let params = client.get_module_fee_params(module.into()).await?;
            json!({
                "fee_register": params.fee_register.to_string(),
                "fee_record": params.fee_record.to_string(),
                "denom": params.denom,
            })
        }
    };

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
