//! Per-account signing session.
//!
//! A [`Session`] owns the active key, its address and the cached account
//! number. Operations fetch the current sequence from the node, build and
//! validate the body, then sign synchronously.
//!
//! Two concurrent operations on the same account read the same sequence and
//! one of the resulting transactions will be rejected by the chain. Callers
//! that sign in parallel must serialise fetch, sign and broadcast per account,
//! e.g. by holding the session in a `tokio::sync::Mutex`.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::crypto::keys::{HdPath, PrivateKey, PublicKey};
use crate::crypto::Account;
use crate::error::{SignerError, SignerResult};
use crate::messages::{parse_vote_option, Coin, IbcHeight, Msg, TxBody, DEFAULT_IBC_TIMEOUT};
use crate::node::{FeeModule, NodeQuery};
use crate::tx::{sign_transaction, Fee, SignedTransaction, TxContext};

/// Gas limit for BEACON registration and timestamps.
pub const BEACON_GAS: u64 = 100_000;
/// Gas limit for WRKChain registration.
pub const WRKCHAIN_REGISTER_GAS: u64 = 100_000;
/// Gas limit for WRKChain block records.
pub const WRKCHAIN_RECORD_GAS: u64 = 120_000;

/// Header data of a WRKChain block to record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrkChainBlock {
    pub wrkchain_id: u64,
    pub height: u64,
    pub block_hash: String,
    pub parent_hash: String,
    pub hash1: String,
    pub hash2: String,
    pub hash3: String,
}

pub struct Session {
    node: Arc<dyn NodeQuery>,
    chain_id: Option<String>,
    account: Option<Account>,
    account_number: Option<u64>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("chain_id", &self.chain_id)
            .field("address", &self.address())
            .field("account_number", &self.account_number)
            .finish()
    }
}

impl Session {
    pub fn new(node: Arc<dyn NodeQuery>) -> Self {
        Self {
            node,
            chain_id: None,
            account: None,
            account_number: None,
        }
    }

    /// Use `chain_id` instead of asking the node.
    pub fn with_chain_id(mut self, chain_id: impl Into<String>) -> Self {
        self.chain_id = Some(chain_id.into());
        self
    }

    /// Fetch the chain id from the node unless one is already set.
    pub async fn init_chain(&mut self) -> SignerResult<&str> {
        if self.chain_id.is_none() {
            let chain_id = self.node.get_chain_id().await?;
            info!(chain_id = %chain_id, "initialised chain");
            self.chain_id = Some(chain_id);
        }
        self.chain_id
            .as_deref()
            .ok_or(SignerError::MissingRequiredField("chain_id"))
    }

    /// Activate `private_key`, returning its address. Caches the account
    /// number when the account already exists on chain.
    pub async fn set_private_key(&mut self, private_key: PrivateKey) -> SignerResult<&str> {
        let account = Account::from_private_key(private_key)?;
        self.activate(account).await
    }

    /// Activate the key at `44'/5555'/0'/0/<index>` of `mnemonic`.
    pub async fn set_mnemonic(&mut self, mnemonic: &str, index: u32) -> SignerResult<&str> {
        let account = Account::from_mnemonic_with_path(mnemonic, "", &HdPath::und(index)?)?;
        self.activate(account).await
    }

    async fn activate(&mut self, account: Account) -> SignerResult<&str> {
        let info = self.node.get_account(&account.address).await?;
        self.account_number = info.map(|info| info.account_number);
        debug!(
            address = %account.address,
            account_number = ?self.account_number,
            "activated signing key"
        );
        self.account = Some(account);
        self.address()
            .ok_or(SignerError::NoSigningKeyConfigured)
    }

    /// Drop the key, address and cached account number. The chain id and
    /// node handle carry over.
    pub fn clear(self) -> Session {
        Session {
            node: self.node.clone(),
            chain_id: self.chain_id.clone(),
            account: None,
            account_number: None,
        }
    }

    pub fn address(&self) -> Option<&str> {
        self.account.as_ref().map(|a| a.address.as_str())
    }

    pub fn public_key(&self) -> Option<PublicKey> {
        self.account.as_ref().map(|a| a.public_key)
    }

    pub fn account_number(&self) -> Option<u64> {
        self.account_number
    }

    pub fn chain_id(&self) -> Option<&str> {
        self.chain_id.as_deref()
    }

    fn active_account(&self) -> SignerResult<&Account> {
        self.account.as_ref().ok_or(SignerError::NoSigningKeyConfigured)
    }

    async fn context(&self, address: &str) -> SignerResult<TxContext> {
        let chain_id = self
            .chain_id
            .clone()
            .ok_or(SignerError::MissingRequiredField("chain_id"))?;
        let info = self
            .node
            .get_account(address)
            .await?
            .ok_or_else(|| SignerError::AccountNotFound(address.to_string()))?;
        Ok(TxContext {
            chain_id,
            account_number: self.account_number.unwrap_or(info.account_number),
            sequence: info.sequence,
        })
    }

    /// Validate, fetch the sequence and sign `msgs` with the active key.
    ///
    /// Every message must name the session address as its signer.
    pub async fn sign_msgs(
        &self,
        msgs: &[Msg],
        fee: &Fee,
        memo: &str,
    ) -> SignerResult<SignedTransaction> {
        let account = self.active_account()?;
        let body = TxBody::new(msgs, memo)?;
        fee.validate()?;
        if let Some(msg) = msgs.iter().find(|m| m.signer() != account.address) {
            return Err(SignerError::invalid_address("signer", msg.signer()));
        }

        let context = self.context(&account.address).await?;
        sign_transaction(&body, fee, &context, &account.private_key)
    }

    async fn module_fee(&self, module: FeeModule, register: bool, gas: u64) -> SignerResult<Fee> {
        let params = self.node.get_module_fee_params(module).await?;
        let amount = if register {
            params.fee_register
        } else {
            params.fee_record
        };
        Ok(Fee::new(Coin::new(amount, params.denom), gas))
    }

    fn own_address(&self) -> SignerResult<String> {
        Ok(self.active_account()?.address.clone())
    }

    pub async fn send(
        &self,
        to_address: &str,
        amount: Coin,
        fee: &Fee,
        memo: &str,
    ) -> SignerResult<SignedTransaction> {
        let msg = Msg::Send {
            from_address: self.own_address()?,
            to_address: to_address.to_string(),
            amount,
        };
        self.sign_msgs(&[msg], fee, memo).await
    }

    /// IBC transfer over `channel` with the default timeout height.
    pub async fn transfer_ibc(
        &self,
        receiver: &str,
        channel: &str,
        amount: Coin,
        fee: &Fee,
        memo: &str,
    ) -> SignerResult<SignedTransaction> {
        self.transfer_ibc_with_timeout(receiver, channel, amount, DEFAULT_IBC_TIMEOUT, 0, fee, memo)
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn transfer_ibc_with_timeout(
        &self,
        receiver: &str,
        channel: &str,
        amount: Coin,
        timeout_height: IbcHeight,
        timeout_timestamp: u64,
        fee: &Fee,
        memo: &str,
    ) -> SignerResult<SignedTransaction> {
        let msg = Msg::IbcTransfer {
            sender: self.own_address()?,
            receiver: receiver.to_string(),
            source_channel: channel.to_string(),
            token: amount,
            timeout_height,
            timeout_timestamp,
        };
        self.sign_msgs(&[msg], fee, memo).await
    }

    /// Register a BEACON, paying the module's registration fee.
    pub async fn register_beacon(
        &self,
        moniker: &str,
        name: &str,
        gas: Option<u64>,
    ) -> SignerResult<SignedTransaction> {
        let msg = Msg::RegisterBeacon {
            moniker: moniker.to_string(),
            name: name.to_string(),
            owner: self.own_address()?,
        };
        msg.validate()?;
        let fee = self
            .module_fee(FeeModule::Beacon, true, gas.unwrap_or(BEACON_GAS))
            .await?;
        self.sign_msgs(&[msg], &fee, "").await
    }

    pub async fn record_beacon_timestamp(
        &self,
        beacon_id: u64,
        hash: &str,
        submit_time: u64,
        gas: Option<u64>,
    ) -> SignerResult<SignedTransaction> {
        let msg = Msg::RecordBeaconTimestamp {
            beacon_id,
            hash: hash.to_string(),
            submit_time,
            owner: self.own_address()?,
        };
        msg.validate()?;
        let fee = self
            .module_fee(FeeModule::Beacon, false, gas.unwrap_or(BEACON_GAS))
            .await?;
        self.sign_msgs(&[msg], &fee, "").await
    }

    pub async fn register_wrkchain(
        &self,
        moniker: &str,
        base_type: &str,
        name: &str,
        genesis_hash: &str,
        gas: Option<u64>,
    ) -> SignerResult<SignedTransaction> {
        let msg = Msg::RegisterWrkChain {
            moniker: moniker.to_string(),
            name: name.to_string(),
            genesis_hash: genesis_hash.to_string(),
            base_type: base_type.to_string(),
            owner: self.own_address()?,
        };
        msg.validate()?;
        let fee = self
            .module_fee(FeeModule::WrkChain, true, gas.unwrap_or(WRKCHAIN_REGISTER_GAS))
            .await?;
        self.sign_msgs(&[msg], &fee, "").await
    }

    pub async fn record_wrkchain_block(
        &self,
        block: WrkChainBlock,
        gas: Option<u64>,
    ) -> SignerResult<SignedTransaction> {
        let msg = Msg::RecordWrkChainBlock {
            wrkchain_id: block.wrkchain_id,
            height: block.height,
            block_hash: block.block_hash,
            parent_hash: block.parent_hash,
            hash1: block.hash1,
            hash2: block.hash2,
            hash3: block.hash3,
            owner: self.own_address()?,
        };
        msg.validate()?;
        let fee = self
            .module_fee(FeeModule::WrkChain, false, gas.unwrap_or(WRKCHAIN_RECORD_GAS))
            .await?;
        self.sign_msgs(&[msg], &fee, "").await
    }

    pub async fn delegate(
        &self,
        validator: &str,
        amount: Coin,
        fee: &Fee,
        memo: &str,
    ) -> SignerResult<SignedTransaction> {
        let msg = Msg::Delegate {
            delegator_address: self.own_address()?,
            validator_address: validator.to_string(),
            amount,
        };
        self.sign_msgs(&[msg], fee, memo).await
    }

    pub async fn undelegate(
        &self,
        validator: &str,
        amount: Coin,
        fee: &Fee,
        memo: &str,
    ) -> SignerResult<SignedTransaction> {
        let msg = Msg::Undelegate {
            delegator_address: self.own_address()?,
            validator_address: validator.to_string(),
            amount,
        };
        self.sign_msgs(&[msg], fee, memo).await
    }

    pub async fn redelegate(
        &self,
        validator_from: &str,
        validator_to: &str,
        amount: Coin,
        fee: &Fee,
        memo: &str,
    ) -> SignerResult<SignedTransaction> {
        let msg = Msg::BeginRedelegate {
            delegator_address: self.own_address()?,
            validator_src_address: validator_from.to_string(),
            validator_dst_address: validator_to.to_string(),
            amount,
        };
        self.sign_msgs(&[msg], fee, memo).await
    }

    /// Withdraw staking rewards; with `with_commission` the session key must
    /// belong to the validator operator.
    pub async fn withdraw_delegation_reward(
        &self,
        validator: &str,
        with_commission: bool,
        fee: &Fee,
        memo: &str,
    ) -> SignerResult<SignedTransaction> {
        let msg = Msg::WithdrawDelegatorReward {
            delegator_address: self.own_address()?,
            validator_address: validator.to_string(),
            with_commission,
        };
        self.sign_msgs(&[msg], fee, memo).await
    }

    /// Vote on a governance proposal. `option` is `YES`, `NO`, `ABSTAIN`,
    /// `NO_WITH_VETO` or the matching `VOTE_OPTION_*` name.
    pub async fn vote(
        &self,
        proposal_id: u64,
        option: &str,
        fee: &Fee,
        memo: &str,
    ) -> SignerResult<SignedTransaction> {
        let msg = Msg::Vote {
            proposal_id,
            voter: self.own_address()?,
            option: parse_vote_option(option)?,
        };
        self.sign_msgs(&[msg], fee, memo).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::address::{address_from_public_key, VALIDATOR_PREFIX};
    use crate::crypto::keys::generate_mnemonic;
    use crate::node::{AccountInfo, ModuleFeeParams};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio_test::{assert_err, assert_ok};

    #[derive(Default)]
    struct MockNode {
        accounts: Mutex<HashMap<String, AccountInfo>>,
        account_queries: AtomicUsize,
    }

    impl MockNode {
        fn fund(&self, address: &str, account_number: u64, sequence: u64) {
            self.accounts.lock().unwrap().insert(
                address.to_string(),
                AccountInfo {
                    account_number,
                    sequence,
                },
            );
        }

        fn queries(&self) -> usize {
            self.account_queries.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl NodeQuery for MockNode {
        async fn get_account(&self, address: &str) -> SignerResult<Option<AccountInfo>> {
            self.account_queries.fetch_add(1, Ordering::SeqCst);
            Ok(self.accounts.lock().unwrap().get(address).copied())
        }

        async fn get_chain_id(&self) -> SignerResult<String> {
            Ok("TEST-1".to_string())
        }

        async fn get_module_fee_params(&self, module: FeeModule) -> SignerResult<ModuleFeeParams> {
            Ok(match module {
                FeeModule::Beacon => ModuleFeeParams {
                    fee_register: 1_000_000_000_000,
                    fee_record: 1_000_000_000,
                    denom: "nund".to_string(),
                },
                FeeModule::WrkChain => ModuleFeeParams {
                    fee_register: 2_000_000_000_000,
                    fee_record: 2_000_000_000,
                    denom: "nund".to_string(),
                },
            })
        }
    }

    fn fee() -> Fee {
        Fee::new(Coin::nund(25_000_000), 200_000)
    }

    async fn funded_session() -> (Arc<MockNode>, Session, PrivateKey) {
        let node = Arc::new(MockNode::default());
        let key = PrivateKey::generate();
        let account = Account::from_private_key(key.clone()).unwrap();
        node.fund(&account.address, 5, 3);

        let mut session = Session::new(node.clone());
        session.init_chain().await.unwrap();
        session.set_private_key(key.clone()).await.unwrap();
        (node, session, key)
    }

    fn other_address() -> String {
        Account::generate().unwrap().address
    }

    #[tokio::test]
    async fn signing_without_key_fails() {
        let session = Session::new(Arc::new(MockNode::default())).with_chain_id("TEST-1");
        let result = session
            .sign_msgs(
                &[Msg::Send {
                    from_address: other_address(),
                    to_address: other_address(),
                    amount: Coin::nund(1),
                }],
                &fee(),
                "",
            )
            .await;
        assert!(matches!(result, Err(SignerError::NoSigningKeyConfigured)));
        assert_err!(session.send(&other_address(), Coin::nund(1), &fee(), "").await);
    }

    #[tokio::test]
    async fn set_key_caches_address_and_account_number() {
        let (_, session, key) = funded_session().await;
        let expected = Account::from_private_key(key).unwrap().address;
        assert_eq!(session.address(), Some(expected.as_str()));
        assert_eq!(session.account_number(), Some(5));
        assert_eq!(session.chain_id(), Some("TEST-1"));
    }

    #[tokio::test]
    async fn unfunded_account_has_no_account_number() {
        let node = Arc::new(MockNode::default());
        let mut session = Session::new(node).with_chain_id("TEST-1");
        let mnemonic = generate_mnemonic().unwrap();
        assert_ok!(session.set_mnemonic(&mnemonic, 0).await);
        assert_eq!(session.account_number(), None);

        let result = session.send(&other_address(), Coin::nund(1), &fee(), "").await;
        assert!(matches!(result, Err(SignerError::AccountNotFound(_))));
    }

    #[tokio::test]
    async fn send_uses_fetched_sequence() {
        let (_, session, key) = funded_session().await;
        let tx = session
            .send(&other_address(), Coin::nund(100_000_000), &fee(), "memo")
            .await
            .unwrap();

        let decoded = cosmrs::Tx::from_bytes(&tx.to_bytes()).unwrap();
        assert_eq!(decoded.body.memo, "memo");
        assert_eq!(decoded.auth_info.signer_infos[0].sequence, 3);
        assert_eq!(decoded.auth_info.fee.gas_limit, 200_000);
        assert_eq!(decoded.auth_info.fee.amount[0].amount, 25_000_000);
        assert_eq!(session.public_key(), Some(key.public_key().unwrap()));
    }

    #[tokio::test]
    async fn validation_runs_before_any_query() {
        let (node, session, _) = funded_session().await;
        let before = node.queries();

        let zero = session.send(&other_address(), Coin::nund(0), &fee(), "").await;
        assert!(matches!(zero, Err(SignerError::InvalidAmount { .. })));

        let bad_vote = session.vote(1, "yes", &fee(), "").await;
        assert!(matches!(bad_vote, Err(SignerError::InvalidVoteOption(_))));

        let stranger = session
            .sign_msgs(
                &[Msg::Send {
                    from_address: other_address(),
                    to_address: other_address(),
                    amount: Coin::nund(1),
                }],
                &fee(),
                "",
            )
            .await;
        assert!(matches!(
            stranger,
            Err(SignerError::InvalidAddress { field: "signer", .. })
        ));

        assert_eq!(node.queries(), before);
    }

    #[tokio::test]
    async fn beacon_and_wrkchain_pay_module_fees() {
        let (_, session, _) = funded_session().await;

        let register = session.register_beacon("mybeacon", "My Beacon", None).await.unwrap();
        let decoded = cosmrs::Tx::from_bytes(&register.to_bytes()).unwrap();
        assert_eq!(decoded.auth_info.fee.amount[0].amount, 1_000_000_000_000);
        assert_eq!(decoded.auth_info.fee.gas_limit, BEACON_GAS);
        assert_eq!(
            decoded.body.messages[0].type_url,
            "/mainchain.beacon.v1.MsgRegisterBeacon"
        );

        let record = session
            .record_wrkchain_block(
                WrkChainBlock {
                    wrkchain_id: 1,
                    height: 42,
                    block_hash: "0xabc".to_string(),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();
        let decoded = cosmrs::Tx::from_bytes(&record.to_bytes()).unwrap();
        assert_eq!(decoded.auth_info.fee.amount[0].amount, 2_000_000_000);
        assert_eq!(decoded.auth_info.fee.gas_limit, WRKCHAIN_RECORD_GAS);

        assert!(matches!(
            session.register_beacon("", "", None).await,
            Err(SignerError::MissingRequiredField("moniker"))
        ));
    }

    #[tokio::test]
    async fn self_delegator_may_withdraw_commission() {
        let (_, session, key) = funded_session().await;
        let own_operator =
            address_from_public_key(&key.public_key().unwrap(), VALIDATOR_PREFIX).unwrap();
        let foreign_operator = address_from_public_key(
            &PrivateKey::generate().public_key().unwrap(),
            VALIDATOR_PREFIX,
        )
        .unwrap();

        let tx = session
            .withdraw_delegation_reward(&own_operator, true, &fee(), "")
            .await
            .unwrap();
        let decoded = cosmrs::Tx::from_bytes(&tx.to_bytes()).unwrap();
        assert_eq!(decoded.body.messages.len(), 2);

        assert!(matches!(
            session
                .withdraw_delegation_reward(&foreign_operator, true, &fee(), "")
                .await,
            Err(SignerError::SelfDelegationRequired { .. })
        ));
        assert_ok!(
            session
                .withdraw_delegation_reward(&foreign_operator, false, &fee(), "")
                .await
        );
    }

    #[tokio::test]
    async fn clear_resets_key_state() {
        let (_, session, _) = funded_session().await;
        let cleared = session.clear();
        assert_eq!(cleared.address(), None);
        assert_eq!(cleared.account_number(), None);
        assert_eq!(cleared.public_key(), None);
        assert_eq!(cleared.chain_id(), Some("TEST-1"));
        assert!(matches!(
            cleared.send(&other_address(), Coin::nund(1), &fee(), "").await,
            Err(SignerError::NoSigningKeyConfigured)
        ));
    }
}
