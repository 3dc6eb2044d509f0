//! Protobuf definitions for the Unification mainchain, the Cosmos SDK and IBC.
//!
//! This crate contains the Rust types for every message the signer emits,
//! plus the `SignDoc` and `TxRaw` envelopes used to produce and carry
//! SIGN_MODE_DIRECT signatures.

#![allow(clippy::derive_partial_eq_without_eq)]
#![allow(non_snake_case)]

pub use prost::{Message, Name};

pub mod cosmos {
    pub mod base {
        pub mod v1beta1 {
            include!("gen/cosmos.base.v1beta1.rs");
        }
    }
    pub mod bank {
        pub mod v1beta1 {
            include!("gen/cosmos.bank.v1beta1.rs");
        }
    }
    pub mod staking {
        pub mod v1beta1 {
            include!("gen/cosmos.staking.v1beta1.rs");
        }
    }
    pub mod distribution {
        pub mod v1beta1 {
            include!("gen/cosmos.distribution.v1beta1.rs");
        }
    }
    pub mod gov {
        pub mod v1beta1 {
            include!("gen/cosmos.gov.v1beta1.rs");
        }
    }
    pub mod tx {
        pub mod v1beta1 {
            include!("gen/cosmos.tx.v1beta1.rs");
        }
    }
}

pub mod ibc {
    pub mod core {
        pub mod client {
            pub mod v1 {
                include!("gen/ibc.core.client.v1.rs");
            }
        }
    }
    pub mod applications {
        pub mod transfer {
            pub mod v1 {
                include!("gen/ibc.applications.transfer.v1.rs");
            }
        }
    }
}

pub mod mainchain {
    pub mod beacon {
        pub mod v1 {
            include!("gen/mainchain.beacon.v1.rs");
        }
    }
    pub mod wrkchain {
        pub mod v1 {
            include!("gen/mainchain.wrkchain.v1.rs");
        }
    }
}
