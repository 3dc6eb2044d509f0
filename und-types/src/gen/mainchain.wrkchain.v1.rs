/// MsgRegisterWrkChain defines a SDK message for registering a new WRKChain.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgRegisterWrkChain {
    #[prost(string, tag = "1")]
    pub moniker: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub genesis_hash: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub base_type: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub owner: ::prost::alloc::string::String,
}
impl ::prost::Name for MsgRegisterWrkChain {
    const NAME: &'static str = "MsgRegisterWrkChain";
    const PACKAGE: &'static str = "mainchain.wrkchain.v1";
    fn full_name() -> ::prost::alloc::string::String {
        "mainchain.wrkchain.v1.MsgRegisterWrkChain".into()
    }
    fn type_url() -> ::prost::alloc::string::String {
        "/mainchain.wrkchain.v1.MsgRegisterWrkChain".into()
    }
}
/// MsgRecordWrkChainBlock defines a SDK message for recording WRKChain block hashes.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgRecordWrkChainBlock {
    #[prost(uint64, tag = "1")]
    pub wrkchain_id: u64,
    #[prost(uint64, tag = "2")]
    pub height: u64,
    #[prost(string, tag = "3")]
    pub block_hash: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub parent_hash: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub hash1: ::prost::alloc::string::String,
    #[prost(string, tag = "6")]
    pub hash2: ::prost::alloc::string::String,
    #[prost(string, tag = "7")]
    pub hash3: ::prost::alloc::string::String,
    #[prost(string, tag = "8")]
    pub owner: ::prost::alloc::string::String,
}
impl ::prost::Name for MsgRecordWrkChainBlock {
    const NAME: &'static str = "MsgRecordWrkChainBlock";
    const PACKAGE: &'static str = "mainchain.wrkchain.v1";
    fn full_name() -> ::prost::alloc::string::String {
        "mainchain.wrkchain.v1.MsgRecordWrkChainBlock".into()
    }
    fn type_url() -> ::prost::alloc::string::String {
        "/mainchain.wrkchain.v1.MsgRecordWrkChainBlock".into()
    }
}
