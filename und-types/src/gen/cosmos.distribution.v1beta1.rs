/// MsgWithdrawDelegatorReward represents delegation withdrawal to a delegator
/// from a single validator.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgWithdrawDelegatorReward {
    #[prost(string, tag = "1")]
    pub delegator_address: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub validator_address: ::prost::alloc::string::String,
}
impl ::prost::Name for MsgWithdrawDelegatorReward {
    const NAME: &'static str = "MsgWithdrawDelegatorReward";
    const PACKAGE: &'static str = "cosmos.distribution.v1beta1";
    fn full_name() -> ::prost::alloc::string::String {
        "cosmos.distribution.v1beta1.MsgWithdrawDelegatorReward".into()
    }
    fn type_url() -> ::prost::alloc::string::String {
        "/cosmos.distribution.v1beta1.MsgWithdrawDelegatorReward".into()
    }
}
/// MsgWithdrawValidatorCommission withdraws the full commission to the validator
/// address.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgWithdrawValidatorCommission {
    #[prost(string, tag = "1")]
    pub validator_address: ::prost::alloc::string::String,
}
impl ::prost::Name for MsgWithdrawValidatorCommission {
    const NAME: &'static str = "MsgWithdrawValidatorCommission";
    const PACKAGE: &'static str = "cosmos.distribution.v1beta1";
    fn full_name() -> ::prost::alloc::string::String {
        "cosmos.distribution.v1beta1.MsgWithdrawValidatorCommission".into()
    }
    fn type_url() -> ::prost::alloc::string::String {
        "/cosmos.distribution.v1beta1.MsgWithdrawValidatorCommission".into()
    }
}
