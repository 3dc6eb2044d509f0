/// MsgRegisterBeacon defines a SDK message for registering a new BEACON.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgRegisterBeacon {
    #[prost(string, tag = "1")]
    pub moniker: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub owner: ::prost::alloc::string::String,
}
impl ::prost::Name for MsgRegisterBeacon {
    const NAME: &'static str = "MsgRegisterBeacon";
    const PACKAGE: &'static str = "mainchain.beacon.v1";
    fn full_name() -> ::prost::alloc::string::String {
        "mainchain.beacon.v1.MsgRegisterBeacon".into()
    }
    fn type_url() -> ::prost::alloc::string::String {
        "/mainchain.beacon.v1.MsgRegisterBeacon".into()
    }
}
/// MsgRecordBeaconTimestamp defines a SDK message for recording a BEACON timestamp.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgRecordBeaconTimestamp {
    #[prost(uint64, tag = "1")]
    pub beacon_id: u64,
    #[prost(string, tag = "2")]
    pub hash: ::prost::alloc::string::String,
    #[prost(uint64, tag = "3")]
    pub submit_time: u64,
    #[prost(string, tag = "4")]
    pub owner: ::prost::alloc::string::String,
}
impl ::prost::Name for MsgRecordBeaconTimestamp {
    const NAME: &'static str = "MsgRecordBeaconTimestamp";
    const PACKAGE: &'static str = "mainchain.beacon.v1";
    fn full_name() -> ::prost::alloc::string::String {
        "mainchain.beacon.v1.MsgRecordBeaconTimestamp".into()
    }
    fn type_url() -> ::prost::alloc::string::String {
        "/mainchain.beacon.v1.MsgRecordBeaconTimestamp".into()
    }
}
