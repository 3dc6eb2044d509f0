//! Capabilities the signer needs from a chain node, and a REST implementation.

pub mod lcd;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{SignerError, SignerResult};
use crate::tx::SignedTransaction;

pub use lcd::LcdClient;

/// Account state needed for signing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountInfo {
    pub account_number: u64,
    pub sequence: u64,
}

/// Chain modules that charge their own registration/record fees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeModule {
    Beacon,
    WrkChain,
}

impl FeeModule {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeeModule::Beacon => "beacon",
            FeeModule::WrkChain => "wrkchain",
        }
    }
}

impl fmt::Display for FeeModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Module fee parameters, amounts in `denom`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleFeeParams {
    pub fee_register: u128,
    pub fee_record: u128,
    pub denom: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BroadcastMode {
    Unspecified,
    Block,
    #[default]
    Sync,
    Async,
}

impl BroadcastMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BroadcastMode::Unspecified => "BROADCAST_MODE_UNSPECIFIED",
            BroadcastMode::Block => "BROADCAST_MODE_BLOCK",
            BroadcastMode::Sync => "BROADCAST_MODE_SYNC",
            BroadcastMode::Async => "BROADCAST_MODE_ASYNC",
        }
    }
}

impl fmt::Display for BroadcastMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BroadcastMode {
    type Err = SignerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let short = upper.strip_prefix("BROADCAST_MODE_").unwrap_or(&upper);
        match short {
            "UNSPECIFIED" => Ok(BroadcastMode::Unspecified),
            "BLOCK" => Ok(BroadcastMode::Block),
            "SYNC" => Ok(BroadcastMode::Sync),
            "ASYNC" => Ok(BroadcastMode::Async),
            _ => Err(SignerError::encoding(format!("unknown broadcast mode {s}"))),
        }
    }
}

/// Outcome reported by the node for a broadcast transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastResult {
    pub txhash: String,
    pub code: u32,
    pub raw_log: String,
    pub height: u64,
}

impl BroadcastResult {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

/// Read access to chain state.
#[async_trait]
pub trait NodeQuery: Send + Sync {
    /// `None` when the address has never received funds.
    async fn get_account(&self, address: &str) -> SignerResult<Option<AccountInfo>>;

    async fn get_chain_id(&self) -> SignerResult<String>;

    async fn get_module_fee_params(&self, module: FeeModule) -> SignerResult<ModuleFeeParams>;
}

/// Submission of signed transactions.
#[async_trait]
pub trait Broadcaster: Send + Sync {
    async fn broadcast(
        &self,
        tx: &SignedTransaction,
        mode: BroadcastMode,
    ) -> SignerResult<BroadcastResult>;
}
