//! Bech32 account and validator-operator addresses.

use cosmrs::AccountId;

use super::hash::hash160;
use super::keys::PublicKey;
use crate::error::{SignerError, SignerResult};

/// Human-readable part of account addresses.
pub const ACCOUNT_PREFIX: &str = "und";
/// Human-readable part of validator operator addresses.
pub const VALIDATOR_PREFIX: &str = "undvaloper";

const DECODED_ADDRESS_LEN: usize = 20;

/// Encode `RIPEMD160(SHA256(pubkey))` under `prefix`.
pub fn address_from_public_key(public_key: &PublicKey, prefix: &str) -> SignerResult<String> {
    let hash = hash160(public_key.as_bytes());
    encode_address(prefix, &hash)
}

/// The `und1…` account address of `public_key`.
pub fn account_address(public_key: &PublicKey) -> SignerResult<String> {
    address_from_public_key(public_key, ACCOUNT_PREFIX)
}

pub fn encode_address(prefix: &str, bytes: &[u8]) -> SignerResult<String> {
    AccountId::new(prefix, bytes)
        .map(|id| id.to_string())
        .map_err(|e| SignerError::encoding(format!("bech32 encode under {prefix}: {e}")))
}

/// Decode any bech32 address into its payload bytes.
pub fn decode_address(address: &str) -> SignerResult<Vec<u8>> {
    parse_account_id(address).map(|id| id.to_bytes())
}

fn parse_account_id(address: &str) -> SignerResult<AccountId> {
    address
        .parse::<AccountId>()
        .map_err(|_| SignerError::invalid_address("address", address))
}

/// True when `address` carries exactly `prefix`, a valid checksum and a
/// 20-byte payload. Never fails.
pub fn check_address(address: &str, prefix: &str) -> bool {
    if !address.starts_with(prefix) {
        return false;
    }
    match parse_account_id(address) {
        Ok(id) => id.prefix() == prefix && id.to_bytes().len() == DECODED_ADDRESS_LEN,
        Err(_) => false,
    }
}

/// Like [`check_address`] but reports which field failed.
pub fn require_address(field: &'static str, address: &str, prefix: &str) -> SignerResult<()> {
    if check_address(address, prefix) {
        Ok(())
    } else {
        Err(SignerError::invalid_address(field, address))
    }
}

/// Re-encode a validator operator address under the account prefix.
pub fn operator_to_account(operator: &str) -> SignerResult<String> {
    require_address("validator_address", operator, VALIDATOR_PREFIX)?;
    let bytes = decode_address(operator)?;
    encode_address(ACCOUNT_PREFIX, &bytes)
}

/// Whether `delegator` is the account that operates `operator`.
pub fn is_self_delegator(operator: &str, delegator: &str) -> bool {
    match operator_to_account(operator) {
        Ok(account) => account == delegator,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::{private_key_from_mnemonic, HdPath, PrivateKey};

    const ABANDON_ABOUT: &str = "abandon abandon abandon abandon abandon abandon \
        abandon abandon abandon abandon abandon about";

    #[test]
    fn well_known_cosmos_address() {
        let path = HdPath::bip44(118, 0, 0, 0).unwrap();
        let key = private_key_from_mnemonic(ABANDON_ABOUT, "", &path).unwrap();
        let public = key.public_key().unwrap();
        assert_eq!(
            address_from_public_key(&public, "cosmos").unwrap(),
            "cosmos19rl4cm2hmr8afy4kldpxz3fka4jguq0auqdal4"
        );
    }

    #[test]
    fn address_payload_is_hash160_of_compressed_key() {
        let key = PrivateKey::generate();
        let public = key.public_key().unwrap();
        let address = account_address(&public).unwrap();

        assert!(address.starts_with("und1"));
        assert_eq!(decode_address(&address).unwrap(), hash160(public.as_bytes()).to_vec());
        assert!(check_address(&address, ACCOUNT_PREFIX));
    }

    #[test]
    fn check_address_rejects_wrong_shapes() {
        let public = PrivateKey::generate().public_key().unwrap();
        let account = account_address(&public).unwrap();
        let operator = address_from_public_key(&public, VALIDATOR_PREFIX).unwrap();

        assert!(!check_address(&account, VALIDATOR_PREFIX));
        assert!(!check_address(&operator, ACCOUNT_PREFIX));
        assert!(check_address(&operator, VALIDATOR_PREFIX));

        let mut corrupted = account.clone();
        let last = corrupted.pop().unwrap();
        corrupted.push(if last == 'q' { 'p' } else { 'q' });
        assert!(!check_address(&corrupted, ACCOUNT_PREFIX));

        let long_payload = encode_address(ACCOUNT_PREFIX, &[7u8; 32]).unwrap();
        assert!(!check_address(&long_payload, ACCOUNT_PREFIX));

        assert!(!check_address("", ACCOUNT_PREFIX));
        assert!(!check_address("und1", ACCOUNT_PREFIX));
        assert!(!check_address("hello world", ACCOUNT_PREFIX));
    }

    #[test]
    fn decode_address_rejects_garbage() {
        assert!(matches!(
            decode_address("und1notanaddress"),
            Err(SignerError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn self_delegator_detection() {
        let public = PrivateKey::generate().public_key().unwrap();
        let account = account_address(&public).unwrap();
        let operator = address_from_public_key(&public, VALIDATOR_PREFIX).unwrap();
        let stranger = account_address(&PrivateKey::generate().public_key().unwrap()).unwrap();

        assert_eq!(operator_to_account(&operator).unwrap(), account);
        assert!(is_self_delegator(&operator, &account));
        assert!(!is_self_delegator(&operator, &stranger));
        assert!(!is_self_delegator(&account, &account));
    }
}
