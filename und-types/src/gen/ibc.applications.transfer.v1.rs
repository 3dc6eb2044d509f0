/// MsgTransfer defines a msg to transfer fungible tokens (i.e Coins) between
/// ICS20 enabled chains.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgTransfer {
    #[prost(string, tag = "1")]
    pub source_port: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub source_channel: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "3")]
    pub token: ::core::option::Option<
        super::super::super::super::cosmos::base::v1beta1::Coin,
    >,
    #[prost(string, tag = "4")]
    pub sender: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub receiver: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "6")]
    pub timeout_height: ::core::option::Option<
        super::super::super::core::client::v1::Height,
    >,
    #[prost(uint64, tag = "7")]
    pub timeout_timestamp: u64,
    #[prost(string, tag = "8")]
    pub memo: ::prost::alloc::string::String,
}
impl ::prost::Name for MsgTransfer {
    const NAME: &'static str = "MsgTransfer";
    const PACKAGE: &'static str = "ibc.applications.transfer.v1";
    fn full_name() -> ::prost::alloc::string::String {
        "ibc.applications.transfer.v1.MsgTransfer".into()
    }
    fn type_url() -> ::prost::alloc::string::String {
        "/ibc.applications.transfer.v1.MsgTransfer".into()
    }
}
