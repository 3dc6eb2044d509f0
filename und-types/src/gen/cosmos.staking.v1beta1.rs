/// MsgDelegate defines a SDK message for performing a delegation of coins
/// from a delegator to a validator.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgDelegate {
    #[prost(string, tag = "1")]
    pub delegator_address: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub validator_address: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "3")]
    pub amount: ::core::option::Option<super::super::base::v1beta1::Coin>,
}
impl ::prost::Name for MsgDelegate {
    const NAME: &'static str = "MsgDelegate";
    const PACKAGE: &'static str = "cosmos.staking.v1beta1";
    fn full_name() -> ::prost::alloc::string::String {
        "cosmos.staking.v1beta1.MsgDelegate".into()
    }
    fn type_url() -> ::prost::alloc::string::String {
        "/cosmos.staking.v1beta1.MsgDelegate".into()
    }
}
/// MsgUndelegate defines a SDK message for performing an undelegation from a
/// delegate and a validator.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgUndelegate {
    #[prost(string, tag = "1")]
    pub delegator_address: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub validator_address: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "3")]
    pub amount: ::core::option::Option<super::super::base::v1beta1::Coin>,
}
impl ::prost::Name for MsgUndelegate {
    const NAME: &'static str = "MsgUndelegate";
    const PACKAGE: &'static str = "cosmos.staking.v1beta1";
    fn full_name() -> ::prost::alloc::string::String {
        "cosmos.staking.v1beta1.MsgUndelegate".into()
    }
    fn type_url() -> ::prost::alloc::string::String {
        "/cosmos.staking.v1beta1.MsgUndelegate".into()
    }
}
/// MsgBeginRedelegate defines a SDK message for performing a redelegation
/// of coins from a delegator and source validator to a destination validator.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgBeginRedelegate {
    #[prost(string, tag = "1")]
    pub delegator_address: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub validator_src_address: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub validator_dst_address: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "4")]
    pub amount: ::core::option::Option<super::super::base::v1beta1::Coin>,
}
impl ::prost::Name for MsgBeginRedelegate {
    const NAME: &'static str = "MsgBeginRedelegate";
    const PACKAGE: &'static str = "cosmos.staking.v1beta1";
    fn full_name() -> ::prost::alloc::string::String {
        "cosmos.staking.v1beta1.MsgBeginRedelegate".into()
    }
    fn type_url() -> ::prost::alloc::string::String {
        "/cosmos.staking.v1beta1.MsgBeginRedelegate".into()
    }
}
