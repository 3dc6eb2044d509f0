use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::SignerResult;
use crate::messages::Coin;
use crate::node::{BroadcastMode, LcdClient};
use crate::tx::Fee;

/// Node connection settings
#[derive(Debug, Deserialize, Clone)]
pub struct NetworkConfig {
    /// REST (gRPC-gateway) endpoint of a FUND node
    #[serde(default = "default_lcd_url")]
    pub lcd_url: String,
    /// Overrides the chain id reported by the node
    #[serde(default)]
    pub chain_id: Option<String>,
    #[serde(default)]
    pub broadcast_mode: BroadcastMode,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_lcd_url() -> String {
    "http://localhost:1317".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            lcd_url: default_lcd_url(),
            chain_id: None,
            broadcast_mode: BroadcastMode::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Default fee attached to transactions that do not carry module fees
#[derive(Debug, Deserialize, Clone)]
pub struct FeeConfig {
    #[serde(default = "default_fee_denom")]
    pub denom: String,
    #[serde(default = "default_fee_amount")]
    pub amount: u64,
    #[serde(default = "default_fee_gas")]
    pub gas: u64,
}

fn default_fee_denom() -> String {
    "nund".to_string()
}

fn default_fee_amount() -> u64 {
    25_000_000
}

fn default_fee_gas() -> u64 {
    200_000
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            denom: default_fee_denom(),
            amount: default_fee_amount(),
            gas: default_fee_gas(),
        }
    }
}

impl FeeConfig {
    pub fn to_fee(&self) -> Fee {
        Fee::new(Coin::new(u128::from(self.amount), &self.denom), self.gas)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct KeysConfig {
    /// Address index in `44'/5555'/0'/0/<index>`
    #[serde(default)]
    pub account_index: u32,
}

/// Root signer configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SignerConfig {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub fees: FeeConfig,
    #[serde(default)]
    pub keys: KeysConfig,
}

impl SignerConfig {
    /// Load configuration from `config/` files and environment variables
    pub fn load() -> SignerResult<Self> {
        Self::load_from("config")
    }

    pub fn load_from(dir: &str) -> SignerResult<Self> {
        let config = Config::builder()
            .add_source(File::with_name(&format!("{dir}/default")).required(false))
            .add_source(File::with_name(&format!("{dir}/local")).required(false))
            // e.g., UND_NETWORK__LCD_URL, UND_FEES__GAS
            .add_source(
                Environment::with_prefix("UND")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn lcd_client(&self) -> SignerResult<LcdClient> {
        LcdClient::with_timeout(
            &self.network.lcd_url,
            Duration::from_secs(self.network.timeout_secs),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn defaults_without_files() {
        let config = SignerConfig::default();
        assert_eq!(config.network.lcd_url, "http://localhost:1317");
        assert_eq!(config.network.broadcast_mode, BroadcastMode::Sync);
        assert_eq!(config.fees.to_fee(), Fee::new(Coin::nund(25_000_000), 200_000));
        assert_eq!(config.keys.account_index, 0);
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = env::temp_dir().join(format!("und-signer-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("default.toml"),
            r#"
[network]
lcd_url = "https://rest.testnet.unification.io"
chain_id = "FUND-TestNet-2"
broadcast_mode = "block"

[fees]
gas = 300000
"#,
        )
        .unwrap();

        let config = SignerConfig::load_from(dir.to_str().unwrap()).unwrap();
        assert_eq!(config.network.lcd_url, "https://rest.testnet.unification.io");
        assert_eq!(config.network.chain_id.as_deref(), Some("FUND-TestNet-2"));
        assert_eq!(config.network.broadcast_mode, BroadcastMode::Block);
        assert_eq!(config.fees.gas, 300_000);
        assert_eq!(config.fees.amount, 25_000_000);

        // cleanup
        let _ = fs::remove_dir_all(&dir);
    }
}
