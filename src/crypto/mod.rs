//! Key derivation, addresses and encrypted keystores.

pub mod account;
pub mod address;
pub mod hash;
pub mod keys;
pub mod keystore;

pub use account::Account;
pub use address::{
    account_address, address_from_public_key, check_address, decode_address,
    is_self_delegator, operator_to_account, ACCOUNT_PREFIX, VALIDATOR_PREFIX,
};
pub use keys::{
    derive_private_key, derive_seed, generate_mnemonic, HdPath, PrivateKey, PublicKey, Seed,
};
pub use keystore::Keystore;

/// A random private key from OS entropy.
pub fn generate_private_key() -> PrivateKey {
    PrivateKey::generate()
}
