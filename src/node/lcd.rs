use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::{
    AccountInfo, BroadcastMode, BroadcastResult, Broadcaster, FeeModule, ModuleFeeParams,
    NodeQuery,
};
use crate::error::{SignerError, SignerResult};
use crate::tx::SignedTransaction;

/// Largest page the node serves; larger requests are clamped.
pub const MAX_PAGE_LIMIT: u32 = 100;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const TX_POLL_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TxOrder {
    Asc,
    #[default]
    Desc,
}

impl TxOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxOrder::Asc => "ORDER_BY_ASC",
            TxOrder::Desc => "ORDER_BY_DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidatorStatus {
    #[default]
    Bonded,
    Unbonded,
    Unbonding,
}

impl ValidatorStatus {
    /// Unknown filters fall back to [`ValidatorStatus::Bonded`].
    pub fn parse_or_bonded(status: &str) -> Self {
        match status.trim().to_ascii_uppercase().as_str() {
            "BOND_STATUS_UNBONDED" | "UNBONDED" => ValidatorStatus::Unbonded,
            "BOND_STATUS_UNBONDING" | "UNBONDING" => ValidatorStatus::Unbonding,
            _ => ValidatorStatus::Bonded,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValidatorStatus::Bonded => "BOND_STATUS_BONDED",
            ValidatorStatus::Unbonded => "BOND_STATUS_UNBONDED",
            ValidatorStatus::Unbonding => "BOND_STATUS_UNBONDING",
        }
    }
}

/// 1-based page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u32,
    pub limit: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 1,
            limit: MAX_PAGE_LIMIT,
        }
    }
}

impl Page {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    fn query(&self) -> String {
        let limit = self.limit.clamp(1, MAX_PAGE_LIMIT);
        let offset = u64::from(self.page.max(1) - 1) * u64::from(limit);
        format!("pagination.limit={limit}&pagination.count_total=true&pagination.offset={offset}")
    }
}

// --- Internal LCD response types ---

#[derive(Deserialize)]
struct LcdAccount {
    account_number: Option<String>,
    sequence: Option<String>,
    base_account: Option<Box<LcdAccount>>,
    base_vesting_account: Option<Box<LcdAccount>>,
}

impl LcdAccount {
    fn innermost(&self) -> &LcdAccount {
        if let Some(vesting) = self.base_vesting_account.as_deref() {
            return vesting.innermost();
        }
        match self.base_account.as_deref() {
            Some(base) => base.innermost(),
            None => self,
        }
    }
}

#[derive(Deserialize)]
struct LcdModuleParamsResp {
    params: LcdModuleParams,
}

#[derive(Deserialize)]
struct LcdModuleParams {
    fee_register: String,
    fee_record: String,
    denom: String,
}

#[derive(Serialize)]
struct BroadcastTxReq {
    tx_bytes: String,
    mode: String,
}

#[derive(Deserialize)]
struct BroadcastTxResp {
    tx_response: Option<TxResp>,
}

#[derive(Deserialize)]
struct TxResp {
    txhash: Option<String>,
    code: Option<u32>,
    raw_log: Option<String>,
    height: Option<String>,
}

impl From<TxResp> for BroadcastResult {
    fn from(resp: TxResp) -> Self {
        BroadcastResult {
            txhash: resp.txhash.unwrap_or_default(),
            code: resp.code.unwrap_or(0),
            raw_log: resp.raw_log.unwrap_or_default(),
            height: resp.height.and_then(|h| h.parse().ok()).unwrap_or(0),
        }
    }
}

fn parse_u64(field: &str, value: Option<&str>) -> SignerResult<u64> {
    value
        .unwrap_or("0")
        .parse()
        .map_err(|_| SignerError::node(format!("non-numeric {field} in node response")))
}

fn parse_account(body: Value) -> SignerResult<Option<AccountInfo>> {
    let Some(account) = body.get("account") else {
        return Ok(None);
    };
    let account: LcdAccount = serde_json::from_value(account.clone())?;
    let base = account.innermost();
    Ok(Some(AccountInfo {
        account_number: parse_u64("account_number", base.account_number.as_deref())?,
        sequence: parse_u64("sequence", base.sequence.as_deref())?,
    }))
}

fn parse_module_params(body: Value) -> SignerResult<ModuleFeeParams> {
    let resp: LcdModuleParamsResp = serde_json::from_value(body)?;
    let amount = |field: &str, value: &str| {
        value
            .parse::<u128>()
            .map_err(|_| SignerError::node(format!("non-numeric {field} in module params")))
    };
    Ok(ModuleFeeParams {
        fee_register: amount("fee_register", &resp.params.fee_register)?,
        fee_record: amount("fee_record", &resp.params.fee_record)?,
        denom: resp.params.denom,
    })
}

fn error_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// REST client for the node's gRPC-gateway API.
#[derive(Debug, Clone)]
pub struct LcdClient {
    pub base_url: String,
    http: reqwest::Client,
}

impl LcdClient {
    pub fn new(base_url: &str) -> SignerResult<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> SignerResult<Self> {
        if base_url.trim().is_empty() {
            return Err(SignerError::MissingRequiredField("lcd_url"));
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `path`, returning the JSON body or the node's error message.
    async fn get_json(&self, path: &str) -> SignerResult<Value> {
        let url = self.url(path);
        debug!(url = %url, "lcd query");
        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        let body: Value = resp.json().await?;
        if !status.is_success() {
            let message = error_message(&body).unwrap_or_else(|| status.to_string());
            return Err(SignerError::node(format!("{path}: {message}")));
        }
        Ok(body)
    }

    pub async fn get_balances(&self, address: &str) -> SignerResult<Value> {
        self.get_json(&format!("/cosmos/bank/v1beta1/balances/{address}"))
            .await
    }

    pub async fn get_balance(&self, address: &str, denom: &str) -> SignerResult<Value> {
        self.get_json(&format!(
            "/cosmos/bank/v1beta1/balances/{address}/by_denom?denom={denom}"
        ))
        .await
    }

    /// Transactions sent by `address`.
    pub async fn get_transactions(
        &self,
        address: &str,
        page: Page,
        order: TxOrder,
    ) -> SignerResult<Value> {
        self.get_json(&tx_search_path("message.sender", address, page, order))
            .await
    }

    /// Transfers received by `address`.
    pub async fn get_transactions_received(
        &self,
        address: &str,
        page: Page,
        order: TxOrder,
    ) -> SignerResult<Value> {
        self.get_json(&tx_search_path("transfer.recipient", address, page, order))
            .await
    }

    pub async fn get_tx(&self, hash: &str) -> SignerResult<Value> {
        self.get_json(&format!("/cosmos/tx/v1beta1/txs/{hash}")).await
    }

    pub async fn get_governance_proposals(&self, page: Page) -> SignerResult<Value> {
        self.get_json(&format!("/cosmos/gov/v1beta1/proposals?{}", page.query()))
            .await
    }

    pub async fn get_governance_proposal_votes(
        &self,
        proposal_id: u64,
        page: Page,
    ) -> SignerResult<Value> {
        self.get_json(&format!(
            "/cosmos/gov/v1beta1/proposals/{proposal_id}/votes?{}",
            page.query()
        ))
        .await
    }

    pub async fn get_governance_proposal_tally(&self, proposal_id: u64) -> SignerResult<Value> {
        self.get_json(&format!("/cosmos/gov/v1beta1/proposals/{proposal_id}/tally"))
            .await
    }

    pub async fn get_delegations(&self, delegator: &str) -> SignerResult<Value> {
        self.get_json(&format!("/cosmos/staking/v1beta1/delegations/{delegator}"))
            .await
    }

    pub async fn get_unbonding_delegations(&self, delegator: &str) -> SignerResult<Value> {
        self.get_json(&format!(
            "/cosmos/staking/v1beta1/delegators/{delegator}/unbonding_delegations"
        ))
        .await
    }

    pub async fn get_redelegations(&self, delegator: &str) -> SignerResult<Value> {
        self.get_json(&format!(
            "/cosmos/staking/v1beta1/delegators/{delegator}/redelegations"
        ))
        .await
    }

    /// Rewards across all validators, or from one when `validator` is given.
    pub async fn get_delegator_rewards(
        &self,
        delegator: &str,
        validator: Option<&str>,
    ) -> SignerResult<Value> {
        let suffix = validator.map(|v| format!("/{v}")).unwrap_or_default();
        self.get_json(&format!(
            "/cosmos/distribution/v1beta1/delegators/{delegator}/rewards{suffix}"
        ))
        .await
    }

    pub async fn get_delegator_withdraw_address(&self, delegator: &str) -> SignerResult<Value> {
        self.get_json(&format!(
            "/cosmos/distribution/v1beta1/delegators/{delegator}/withdraw_address"
        ))
        .await
    }

    pub async fn get_validators(&self, status: ValidatorStatus, page: Page) -> SignerResult<Value> {
        self.get_json(&format!(
            "/cosmos/staking/v1beta1/validators?status={}&{}",
            status.as_str(),
            page.query()
        ))
        .await
    }

    pub async fn get_validator(&self, operator: &str) -> SignerResult<Value> {
        self.get_json(&format!("/cosmos/staking/v1beta1/validators/{operator}"))
            .await
    }

    pub async fn get_validator_commission(&self, operator: &str) -> SignerResult<Value> {
        self.get_json(&format!(
            "/cosmos/distribution/v1beta1/validators/{operator}/commission"
        ))
        .await
    }

    pub async fn get_total_supply(&self) -> SignerResult<Value> {
        self.get_json("/mainchain/enterprise/v1/supply").await
    }

    /// One lookup of `txhash`; `None` while the node does not know it yet.
    async fn poll_tx(&self, url: &str) -> SignerResult<Option<BroadcastResult>> {
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(SignerError::node(format!("tx lookup returned {status}")));
        }
        let body: BroadcastTxResp = resp.json().await?;
        Ok(body.tx_response.map(BroadcastResult::from))
    }

    /// Poll for a transaction until it is included or `timeout` elapses.
    ///
    /// The timeout error carries the last failed lookup, if any.
    pub async fn wait_for_tx(&self, txhash: &str, timeout: Duration) -> SignerResult<BroadcastResult> {
        let url = self.url(&format!("/cosmos/tx/v1beta1/txs/{txhash}"));
        let deadline = tokio::time::Instant::now() + timeout;
        let mut last_error = None;

        loop {
            match self.poll_tx(&url).await {
                Ok(Some(result)) => return Ok(result),
                Ok(None) => {}
                Err(e) => {
                    debug!(txhash, error = %e, "tx lookup failed");
                    last_error = Some(e.to_string());
                }
            }

            let now = tokio::time::Instant::now();
            if now >= deadline {
                return Err(wait_timeout(txhash, last_error.as_deref()));
            }
            tokio::time::sleep(TX_POLL_INTERVAL.min(deadline - now)).await;
        }
    }
}

fn wait_timeout(txhash: &str, last_error: Option<&str>) -> SignerError {
    match last_error {
        Some(error) => SignerError::node(format!(
            "timeout waiting for tx {txhash} (last error: {error})"
        )),
        None => SignerError::node(format!("timeout waiting for tx {txhash}")),
    }
}

fn tx_search_path(event: &str, address: &str, page: Page, order: TxOrder) -> String {
    format!(
        "/cosmos/tx/v1beta1/txs?events={event}%3D'{address}'&order_by={}&{}",
        order.as_str(),
        page.query()
    )
}

#[async_trait]
impl NodeQuery for LcdClient {
    async fn get_account(&self, address: &str) -> SignerResult<Option<AccountInfo>> {
        let url = self.url(&format!("/cosmos/auth/v1beta1/accounts/{address}"));
        let resp = self.http.get(&url).send().await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let status = resp.status();
        let body: Value = resp.json().await?;
        if !status.is_success() {
            let message = error_message(&body).unwrap_or_else(|| status.to_string());
            if message.contains("not found") {
                return Ok(None);
            }
            return Err(SignerError::node(message));
        }
        parse_account(body)
    }

    async fn get_chain_id(&self) -> SignerResult<String> {
        let body = self
            .get_json("/cosmos/base/tendermint/v1beta1/node_info")
            .await?;
        body["default_node_info"]["network"]
            .as_str()
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .ok_or_else(|| SignerError::node("node_info has no network"))
    }

    async fn get_module_fee_params(&self, module: FeeModule) -> SignerResult<ModuleFeeParams> {
        let body = self
            .get_json(&format!("/mainchain/{}/v1/params", module.as_str()))
            .await?;
        parse_module_params(body)
    }
}

#[async_trait]
impl Broadcaster for LcdClient {
    async fn broadcast(
        &self,
        tx: &SignedTransaction,
        mode: BroadcastMode,
    ) -> SignerResult<BroadcastResult> {
        let url = self.url("/cosmos/tx/v1beta1/txs");
        let req = BroadcastTxReq {
            tx_bytes: BASE64.encode(tx.to_bytes()),
            mode: mode.as_str().to_string(),
        };
        let resp = self.http.post(&url).json(&req).send().await?;
        let status = resp.status();
        let body: Value = resp.json().await?;
        if !status.is_success() {
            let message = error_message(&body).unwrap_or_else(|| status.to_string());
            return Err(SignerError::node(message));
        }
        let parsed: BroadcastTxResp = serde_json::from_value(body)?;
        let result: BroadcastResult = parsed
            .tx_response
            .ok_or_else(|| SignerError::node("no tx_response in broadcast result"))?
            .into();
        info!(txhash = %result.txhash, code = result.code, mode = %mode, "broadcast transaction");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn client_trims_trailing_slash() {
        let client = LcdClient::new("https://rest.unification.io/").unwrap();
        assert_eq!(client.base_url, "https://rest.unification.io");
        assert!(LcdClient::new("  ").is_err());
    }

    #[test]
    fn page_limit_is_clamped() {
        assert_eq!(
            Page::new(1, 500).query(),
            "pagination.limit=100&pagination.count_total=true&pagination.offset=0"
        );
        assert_eq!(
            Page::new(3, 20).query(),
            "pagination.limit=20&pagination.count_total=true&pagination.offset=40"
        );
        assert_eq!(
            Page::new(0, 0).query(),
            "pagination.limit=1&pagination.count_total=true&pagination.offset=0"
        );
    }

    #[test]
    fn unknown_validator_status_falls_back_to_bonded() {
        assert_eq!(ValidatorStatus::parse_or_bonded("jailed"), ValidatorStatus::Bonded);
        assert_eq!(
            ValidatorStatus::parse_or_bonded("BOND_STATUS_UNBONDING"),
            ValidatorStatus::Unbonding
        );
        assert_eq!(ValidatorStatus::parse_or_bonded("unbonded").as_str(), "BOND_STATUS_UNBONDED");
    }

    #[test]
    fn tx_search_path_encodes_event_filter() {
        let path = tx_search_path("message.sender", "und1abc", Page::default(), TxOrder::Desc);
        assert!(path.starts_with("/cosmos/tx/v1beta1/txs?events=message.sender%3D'und1abc'"));
        assert!(path.contains("order_by=ORDER_BY_DESC"));
    }

    #[test]
    fn parses_plain_and_nested_accounts() {
        let plain = json!({
            "account": {
                "@type": "/cosmos.auth.v1beta1.BaseAccount",
                "address": "und1...",
                "account_number": "5",
                "sequence": "3"
            }
        });
        assert_eq!(
            parse_account(plain).unwrap(),
            Some(AccountInfo {
                account_number: 5,
                sequence: 3
            })
        );

        let vesting = json!({
            "account": {
                "@type": "/cosmos.vesting.v1beta1.DelayedVestingAccount",
                "base_vesting_account": {
                    "base_account": { "account_number": "12", "sequence": "0" }
                }
            }
        });
        assert_eq!(
            parse_account(vesting).unwrap(),
            Some(AccountInfo {
                account_number: 12,
                sequence: 0
            })
        );

        assert_eq!(parse_account(json!({})).unwrap(), None);
        assert!(parse_account(json!({"account": {"account_number": "x"}})).is_err());
    }

    #[test]
    fn parses_module_fee_params() {
        let body = json!({
            "params": {
                "fee_register": "1000000000000",
                "fee_record": "1000000000",
                "denom": "nund"
            }
        });
        assert_eq!(
            parse_module_params(body).unwrap(),
            ModuleFeeParams {
                fee_register: 1_000_000_000_000,
                fee_record: 1_000_000_000,
                denom: "nund".to_string()
            }
        );
    }

    #[test]
    fn tx_response_conversion() {
        let resp: BroadcastTxResp = serde_json::from_value(json!({
            "tx_response": { "txhash": "ABC", "code": 5, "raw_log": "insufficient funds", "height": "0" }
        }))
        .unwrap();
        let result: BroadcastResult = resp.tx_response.unwrap().into();
        assert_eq!(result.txhash, "ABC");
        assert!(!result.is_success());
    }

    #[test]
    fn wait_timeout_reports_last_error() {
        let plain = wait_timeout("ABC", None).to_string();
        assert!(plain.ends_with("timeout waiting for tx ABC"));

        let detailed = wait_timeout("ABC", Some("connection refused")).to_string();
        assert!(detailed.contains("timeout waiting for tx ABC"));
        assert!(detailed.contains("last error: connection refused"));
    }

    #[tokio::test]
    async fn wait_for_tx_surfaces_transport_error() {
        // Bind then drop to get a local port nothing listens on.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client =
            LcdClient::with_timeout(&format!("http://127.0.0.1:{port}"), Duration::from_secs(1))
                .unwrap();

        let err = client
            .wait_for_tx("ABC", Duration::from_millis(0))
            .await
            .unwrap_err()
            .to_string();
        assert!(err.contains("timeout waiting for tx ABC"), "{err}");
        assert!(err.contains("last error:"), "{err}");
    }
}
