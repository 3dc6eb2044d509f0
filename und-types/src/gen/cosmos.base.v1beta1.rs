/// Coin defines a token with a denomination and an amount.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Coin {
    #[prost(string, tag = "1")]
    pub denom: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub amount: ::prost::alloc::string::String,
}
impl ::prost::Name for Coin {
    const NAME: &'static str = "Coin";
    const PACKAGE: &'static str = "cosmos.base.v1beta1";
    fn full_name() -> ::prost::alloc::string::String {
        "cosmos.base.v1beta1.Coin".into()
    }
    fn type_url() -> ::prost::alloc::string::String {
        "/cosmos.base.v1beta1.Coin".into()
    }
}
