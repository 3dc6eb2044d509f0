/// MsgSend represents a message to send coins from one account to another.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgSend {
    #[prost(string, tag = "1")]
    pub from_address: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub to_address: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "3")]
    pub amount: ::prost::alloc::vec::Vec<super::super::base::v1beta1::Coin>,
}
impl ::prost::Name for MsgSend {
    const NAME: &'static str = "MsgSend";
    const PACKAGE: &'static str = "cosmos.bank.v1beta1";
    fn full_name() -> ::prost::alloc::string::String {
        "cosmos.bank.v1beta1.MsgSend".into()
    }
    fn type_url() -> ::prost::alloc::string::String {
        "/cosmos.bank.v1beta1.MsgSend".into()
    }
}
