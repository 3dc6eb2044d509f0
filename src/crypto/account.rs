use super::address::account_address;
use super::keys::{derive_private_key, derive_seed, HdPath, PrivateKey, PublicKey};
use super::keystore::{self, Keystore};
use crate::error::SignerResult;

/// A recovered account identity.
#[derive(Debug, Clone)]
pub struct Account {
    pub private_key: PrivateKey,
    pub public_key: PublicKey,
    pub address: String,
    /// Set when the key came from a mnemonic.
    pub hd_path: Option<HdPath>,
}

impl Account {
    pub fn from_private_key(private_key: PrivateKey) -> SignerResult<Self> {
        let public_key = private_key.public_key()?;
        let address = account_address(&public_key)?;
        Ok(Self {
            private_key,
            public_key,
            address,
            hd_path: None,
        })
    }

    pub fn from_private_key_hex(hex_key: &str) -> SignerResult<Self> {
        Self::from_private_key(PrivateKey::from_hex(hex_key)?)
    }

    /// Recover the account at `44'/5555'/0'/0/<index>` with an empty passphrase.
    pub fn from_mnemonic(mnemonic: &str, index: u32) -> SignerResult<Self> {
        Self::from_mnemonic_with_path(mnemonic, "", &HdPath::und(index)?)
    }

    pub fn from_mnemonic_with_path(
        mnemonic: &str,
        passphrase: &str,
        path: &HdPath,
    ) -> SignerResult<Self> {
        let seed = derive_seed(mnemonic, passphrase)?;
        let private_key = derive_private_key(&seed, path)?;
        let mut account = Self::from_private_key(private_key)?;
        account.hd_path = Some(path.clone());
        Ok(account)
    }

    pub fn from_keystore(keystore: &Keystore, password: &str) -> SignerResult<Self> {
        Self::from_private_key(keystore::decrypt(keystore, password)?)
    }

    /// A brand-new random account.
    pub fn generate() -> SignerResult<Self> {
        Self::from_private_key(PrivateKey::generate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::address::{check_address, ACCOUNT_PREFIX};
    use crate::crypto::keys::generate_mnemonic;

    #[test]
    fn mnemonic_recovery_is_stable() {
        let mnemonic = generate_mnemonic().unwrap();
        let first = Account::from_mnemonic(&mnemonic, 0).unwrap();
        let again = Account::from_mnemonic(&mnemonic, 0).unwrap();
        let next = Account::from_mnemonic(&mnemonic, 1).unwrap();

        assert_eq!(first.address, again.address);
        assert_ne!(first.address, next.address);
        assert!(check_address(&first.address, ACCOUNT_PREFIX));
        assert_eq!(first.hd_path.unwrap().to_string(), "44'/5555'/0'/0/0");
    }

    #[test]
    fn hex_and_keystore_recovery_agree() {
        let account = Account::generate().unwrap();
        let from_hex = Account::from_private_key_hex(&account.private_key.to_hex()).unwrap();
        assert_eq!(from_hex.address, account.address);
        assert!(from_hex.hd_path.is_none());

        let keystore =
            keystore::encrypt_with_iterations(&account.private_key, "pw", 32).unwrap();
        let restored = Account::from_keystore(&keystore, "pw").unwrap();
        assert_eq!(restored.address, account.address);
        assert_eq!(restored.public_key, account.public_key);
    }
}
