//! Client-side transaction signing for the Unification FUND mainchain.

pub mod config;
pub mod crypto;
pub mod error;
pub mod messages;
pub mod node;
pub mod session;
pub mod tx;

pub use config::SignerConfig;
pub use crypto::{Account, HdPath, Keystore, PrivateKey, PublicKey};
pub use error::{SignerError, SignerResult};
pub use messages::{Coin, Msg, TxBody};
pub use node::{BroadcastMode, Broadcaster, LcdClient, NodeQuery};
pub use session::Session;
pub use tx::{Fee, SignedTransaction, TxContext};
