//! Typed chain messages, their validation and `Any` envelopes.

pub mod amount;

use cosmrs::Any;
use und_types::cosmos::bank::v1beta1 as bank;
use und_types::cosmos::distribution::v1beta1 as distribution;
use und_types::cosmos::gov::v1beta1 as gov;
use und_types::cosmos::staking::v1beta1 as staking;
use und_types::ibc::applications::transfer::v1 as transfer;
use und_types::ibc::core::client::v1 as client;
use und_types::mainchain::beacon::v1 as beacon;
use und_types::mainchain::wrkchain::v1 as wrkchain;
use und_types::{Message, Name};

use crate::crypto::address::{
    check_address, decode_address, is_self_delegator, require_address, ACCOUNT_PREFIX,
    VALIDATOR_PREFIX,
};
use crate::error::{SignerError, SignerResult};

pub use amount::{check_amount, parse_amount, Coin, BASE_DENOM, DISPLAY_DENOM};
pub use gov::VoteOption;

/// IBC port used by fungible token transfers.
pub const IBC_TRANSFER_PORT: &str = "transfer";

/// Default IBC timeout: revision 1, height 7 000 000.
pub const DEFAULT_IBC_TIMEOUT: IbcHeight = IbcHeight {
    revision_number: 1,
    revision_height: 7_000_000,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IbcHeight {
    pub revision_number: u64,
    pub revision_height: u64,
}

impl IbcHeight {
    fn is_zero(&self) -> bool {
        self.revision_number == 0 && self.revision_height == 0
    }
}

/// Every message kind the signer can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Send {
        from_address: String,
        to_address: String,
        amount: Coin,
    },
    IbcTransfer {
        sender: String,
        receiver: String,
        source_channel: String,
        token: Coin,
        timeout_height: IbcHeight,
        /// Nanoseconds since the epoch; 0 disables the timestamp timeout.
        timeout_timestamp: u64,
    },
    RegisterBeacon {
        moniker: String,
        name: String,
        owner: String,
    },
    RecordBeaconTimestamp {
        beacon_id: u64,
        hash: String,
        submit_time: u64,
        owner: String,
    },
    RegisterWrkChain {
        moniker: String,
        name: String,
        genesis_hash: String,
        base_type: String,
        owner: String,
    },
    RecordWrkChainBlock {
        wrkchain_id: u64,
        height: u64,
        block_hash: String,
        parent_hash: String,
        hash1: String,
        hash2: String,
        hash3: String,
        owner: String,
    },
    Delegate {
        delegator_address: String,
        validator_address: String,
        amount: Coin,
    },
    Undelegate {
        delegator_address: String,
        validator_address: String,
        amount: Coin,
    },
    BeginRedelegate {
        delegator_address: String,
        validator_src_address: String,
        validator_dst_address: String,
        amount: Coin,
    },
    /// With `with_commission`, also withdraws the validator's commission;
    /// only the validator's own account may do that.
    WithdrawDelegatorReward {
        delegator_address: String,
        validator_address: String,
        with_commission: bool,
    },
    Vote {
        proposal_id: u64,
        voter: String,
        option: VoteOption,
    },
}

impl Msg {
    /// An IBC transfer over `transfer/<channel>` with the default timeout.
    pub fn ibc_transfer(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        source_channel: impl Into<String>,
        token: Coin,
    ) -> Self {
        Msg::IbcTransfer {
            sender: sender.into(),
            receiver: receiver.into(),
            source_channel: source_channel.into(),
            token,
            timeout_height: DEFAULT_IBC_TIMEOUT,
            timeout_timestamp: 0,
        }
    }

    /// The account expected to sign this message.
    pub fn signer(&self) -> &str {
        match self {
            Msg::Send { from_address, .. } => from_address,
            Msg::IbcTransfer { sender, .. } => sender,
            Msg::RegisterBeacon { owner, .. }
            | Msg::RecordBeaconTimestamp { owner, .. }
            | Msg::RegisterWrkChain { owner, .. }
            | Msg::RecordWrkChainBlock { owner, .. } => owner,
            Msg::Delegate {
                delegator_address, ..
            }
            | Msg::Undelegate {
                delegator_address, ..
            }
            | Msg::BeginRedelegate {
                delegator_address, ..
            }
            | Msg::WithdrawDelegatorReward {
                delegator_address, ..
            } => delegator_address,
            Msg::Vote { voter, .. } => voter,
        }
    }

    /// Field-level checks run before anything is serialized or signed.
    pub fn validate(&self) -> SignerResult<()> {
        match self {
            Msg::Send {
                from_address,
                to_address,
                amount,
            } => {
                require_non_empty("from_address", from_address)?;
                require_non_empty("to_address", to_address)?;
                amount.validate("amount")?;
                require_address("to_address", to_address, ACCOUNT_PREFIX)?;
                require_address("from_address", from_address, ACCOUNT_PREFIX)
            }
            Msg::IbcTransfer {
                sender,
                receiver,
                source_channel,
                token,
                timeout_height,
                timeout_timestamp,
            } => {
                require_non_empty("sender", sender)?;
                require_non_empty("source_channel", source_channel)?;
                require_non_empty("receiver", receiver)?;
                token.validate("amount")?;
                require_address("sender", sender, ACCOUNT_PREFIX)?;
                if decode_address(receiver).is_err() {
                    return Err(SignerError::invalid_address("receiver", receiver.as_str()));
                }
                if timeout_height.is_zero() && *timeout_timestamp == 0 {
                    return Err(SignerError::MissingRequiredField("timeout"));
                }
                Ok(())
            }
            Msg::RegisterBeacon { moniker, owner, .. } => {
                require_owner(owner)?;
                require_non_empty("moniker", moniker)
            }
            Msg::RecordBeaconTimestamp {
                beacon_id,
                hash,
                submit_time,
                owner,
            } => {
                require_owner(owner)?;
                require_positive("beacon_id", *beacon_id)?;
                require_non_empty("hash", hash)?;
                require_positive("submit_time", *submit_time)
            }
            Msg::RegisterWrkChain {
                moniker,
                base_type,
                owner,
                ..
            } => {
                require_owner(owner)?;
                require_non_empty("moniker", moniker)?;
                require_non_empty("base_type", base_type)
            }
            Msg::RecordWrkChainBlock {
                wrkchain_id,
                height,
                block_hash,
                owner,
                ..
            } => {
                require_owner(owner)?;
                require_positive("wrkchain_id", *wrkchain_id)?;
                require_non_empty("block_hash", block_hash)?;
                require_positive("height", *height)
            }
            Msg::Delegate {
                delegator_address,
                validator_address,
                amount,
            }
            | Msg::Undelegate {
                delegator_address,
                validator_address,
                amount,
            } => {
                require_delegator(delegator_address)?;
                require_validator("validator_address", validator_address)?;
                amount.validate("amount")
            }
            Msg::BeginRedelegate {
                delegator_address,
                validator_src_address,
                validator_dst_address,
                amount,
            } => {
                require_delegator(delegator_address)?;
                require_validator("validator_src_address", validator_src_address)?;
                require_validator("validator_dst_address", validator_dst_address)?;
                amount.validate("amount")
            }
            Msg::WithdrawDelegatorReward {
                delegator_address,
                validator_address,
                with_commission,
            } => {
                require_delegator(delegator_address)?;
                require_validator("validator_address", validator_address)?;
                if *with_commission && !is_self_delegator(validator_address, delegator_address) {
                    return Err(SignerError::SelfDelegationRequired {
                        validator: validator_address.clone(),
                        delegator: delegator_address.clone(),
                    });
                }
                Ok(())
            }
            Msg::Vote {
                proposal_id,
                voter,
                option,
            } => {
                require_non_empty("voter", voter)?;
                require_address("voter", voter, ACCOUNT_PREFIX)?;
                require_positive("proposal_id", *proposal_id)?;
                if *option == VoteOption::Unspecified {
                    return Err(SignerError::InvalidVoteOption(
                        option.as_str_name().to_string(),
                    ));
                }
                Ok(())
            }
        }
    }

    /// Wrap the message in protobuf `Any` envelopes. A reward withdrawal with
    /// commission yields two envelopes, reward first.
    pub fn to_any(&self) -> Vec<Any> {
        match self {
            Msg::Send {
                from_address,
                to_address,
                amount,
            } => vec![encode_msg(&bank::MsgSend {
                from_address: from_address.clone(),
                to_address: to_address.clone(),
                amount: vec![amount.to_proto()],
            })],
            Msg::IbcTransfer {
                sender,
                receiver,
                source_channel,
                token,
                timeout_height,
                timeout_timestamp,
            } => vec![encode_msg(&transfer::MsgTransfer {
                source_port: IBC_TRANSFER_PORT.to_string(),
                source_channel: source_channel.clone(),
                token: Some(token.to_proto()),
                sender: sender.clone(),
                receiver: receiver.clone(),
                timeout_height: Some(client::Height {
                    revision_number: timeout_height.revision_number,
                    revision_height: timeout_height.revision_height,
                }),
                timeout_timestamp: *timeout_timestamp,
                memo: String::new(),
            })],
            Msg::RegisterBeacon {
                moniker,
                name,
                owner,
            } => vec![encode_msg(&beacon::MsgRegisterBeacon {
                moniker: moniker.clone(),
                name: name.clone(),
                owner: owner.clone(),
            })],
            Msg::RecordBeaconTimestamp {
                beacon_id,
                hash,
                submit_time,
                owner,
            } => vec![encode_msg(&beacon::MsgRecordBeaconTimestamp {
                beacon_id: *beacon_id,
                hash: hash.clone(),
                submit_time: *submit_time,
                owner: owner.clone(),
            })],
            Msg::RegisterWrkChain {
                moniker,
                name,
                genesis_hash,
                base_type,
                owner,
            } => vec![encode_msg(&wrkchain::MsgRegisterWrkChain {
                moniker: moniker.clone(),
                name: name.clone(),
                genesis_hash: genesis_hash.clone(),
                base_type: base_type.clone(),
                owner: owner.clone(),
            })],
            Msg::RecordWrkChainBlock {
                wrkchain_id,
                height,
                block_hash,
                parent_hash,
                hash1,
                hash2,
                hash3,
                owner,
            } => vec![encode_msg(&wrkchain::MsgRecordWrkChainBlock {
                wrkchain_id: *wrkchain_id,
                height: *height,
                block_hash: block_hash.clone(),
                parent_hash: parent_hash.clone(),
                hash1: hash1.clone(),
                hash2: hash2.clone(),
                hash3: hash3.clone(),
                owner: owner.clone(),
            })],
            Msg::Delegate {
                delegator_address,
                validator_address,
                amount,
            } => vec![encode_msg(&staking::MsgDelegate {
                delegator_address: delegator_address.clone(),
                validator_address: validator_address.clone(),
                amount: Some(amount.to_proto()),
            })],
            Msg::Undelegate {
                delegator_address,
                validator_address,
                amount,
            } => vec![encode_msg(&staking::MsgUndelegate {
                delegator_address: delegator_address.clone(),
                validator_address: validator_address.clone(),
                amount: Some(amount.to_proto()),
            })],
            Msg::BeginRedelegate {
                delegator_address,
                validator_src_address,
                validator_dst_address,
                amount,
            } => vec![encode_msg(&staking::MsgBeginRedelegate {
                delegator_address: delegator_address.clone(),
                validator_src_address: validator_src_address.clone(),
                validator_dst_address: validator_dst_address.clone(),
                amount: Some(amount.to_proto()),
            })],
            Msg::WithdrawDelegatorReward {
                delegator_address,
                validator_address,
                with_commission,
            } => {
                let mut envelopes = vec![encode_msg(&distribution::MsgWithdrawDelegatorReward {
                    delegator_address: delegator_address.clone(),
                    validator_address: validator_address.clone(),
                })];
                if *with_commission {
                    envelopes.push(encode_msg(&distribution::MsgWithdrawValidatorCommission {
                        validator_address: validator_address.clone(),
                    }));
                }
                envelopes
            }
            Msg::Vote {
                proposal_id,
                voter,
                option,
            } => vec![encode_msg(&gov::MsgVote {
                proposal_id: *proposal_id,
                voter: voter.clone(),
                option: *option as i32,
            })],
        }
    }
}

/// Encode a prost message into a Cosmos SDK `Any`.
pub fn encode_msg<M: Message + Name>(msg: &M) -> Any {
    Any {
        type_url: M::type_url(),
        value: msg.encode_to_vec(),
    }
}

/// Accepts `YES`, `NO`, `ABSTAIN`, `NO_WITH_VETO`, with or without the
/// `VOTE_OPTION_` prefix. Names are case-sensitive.
pub fn parse_vote_option(option: &str) -> SignerResult<VoteOption> {
    let name = if option.starts_with("VOTE_OPTION_") {
        option.to_string()
    } else {
        format!("VOTE_OPTION_{option}")
    };
    match VoteOption::from_str_name(&name) {
        Some(VoteOption::Unspecified) | None => {
            Err(SignerError::InvalidVoteOption(option.to_string()))
        }
        Some(parsed) => Ok(parsed),
    }
}

/// The ordered envelopes and memo of a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TxBody {
    messages: Vec<Any>,
    memo: String,
}

impl TxBody {
    /// Validate every message and collect their envelopes in order.
    pub fn new(msgs: &[Msg], memo: impl Into<String>) -> SignerResult<Self> {
        if msgs.is_empty() {
            return Err(SignerError::EmptyTxBody);
        }
        for msg in msgs {
            msg.validate()?;
        }
        Ok(Self {
            messages: msgs.iter().flat_map(Msg::to_any).collect(),
            memo: memo.into(),
        })
    }

    pub fn messages(&self) -> &[Any] {
        &self.messages
    }

    pub fn memo(&self) -> &str {
        &self.memo
    }

    pub(crate) fn to_cosmos(&self) -> cosmrs::tx::Body {
        cosmrs::tx::Body::new(self.messages.clone(), self.memo.clone(), 0u32)
    }

    /// Canonical protobuf bytes of `cosmos.tx.v1beta1.TxBody`.
    pub fn to_bytes(&self) -> SignerResult<Vec<u8>> {
        self.to_cosmos().into_bytes().map_err(SignerError::encoding)
    }
}

fn require_non_empty(field: &'static str, value: &str) -> SignerResult<()> {
    if value.trim().is_empty() {
        return Err(SignerError::MissingRequiredField(field));
    }
    Ok(())
}

fn require_positive(field: &'static str, value: u64) -> SignerResult<()> {
    if value == 0 {
        return Err(SignerError::MissingRequiredField(field));
    }
    Ok(())
}

fn require_owner(owner: &str) -> SignerResult<()> {
    require_non_empty("owner", owner)?;
    require_address("owner", owner, ACCOUNT_PREFIX)
}

fn require_delegator(delegator: &str) -> SignerResult<()> {
    require_non_empty("delegator_address", delegator)?;
    require_address("delegator_address", delegator, ACCOUNT_PREFIX)
}

fn require_validator(field: &'static str, validator: &str) -> SignerResult<()> {
    require_non_empty(field, validator)?;
    if !check_address(validator, VALIDATOR_PREFIX) {
        return Err(SignerError::invalid_address(field, validator));
    }
    Ok(())
}
