/// Height is a monotonically increasing data type that can be compared against
/// another Height for the purposes of updating and freezing clients.
#[derive(Clone, Copy, PartialEq, Eq, Hash, ::prost::Message)]
pub struct Height {
    #[prost(uint64, tag = "1")]
    pub revision_number: u64,
    #[prost(uint64, tag = "2")]
    pub revision_height: u64,
}
impl ::prost::Name for Height {
    const NAME: &'static str = "Height";
    const PACKAGE: &'static str = "ibc.core.client.v1";
    fn full_name() -> ::prost::alloc::string::String {
        "ibc.core.client.v1.Height".into()
    }
    fn type_url() -> ::prost::alloc::string::String {
        "/ibc.core.client.v1.Height".into()
    }
}
