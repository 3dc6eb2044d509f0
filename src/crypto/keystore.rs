//! Password-encrypted private key files.
//!
//! Keys are wrapped with AES-256-CTR under a PBKDF2-HMAC-SHA256 derived key.
//! The MAC is Keccak-256 over `derived_key[16..32] || ciphertext`. Keystores
//! written before mainnet used SHA-256 for the MAC; those still decrypt.

use std::fs;
use std::path::Path;

use ctr::cipher::{KeyIvInit, StreamCipher};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::{debug, warn};
use uuid::Uuid;
use zeroize::{Zeroize, Zeroizing};

use super::hash::{keccak256, sha256};
use super::keys::PrivateKey;
use crate::error::{SignerError, SignerResult};

type Aes256Ctr = ctr::Ctr128BE<aes::Aes256>;

pub const KEYSTORE_VERSION: u32 = 1;
pub const CIPHER: &str = "aes-256-ctr";
pub const KDF: &str = "pbkdf2";
pub const PRF: &str = "hmac-sha256";
pub const PBKDF2_ITERATIONS: u32 = 262_144;

const SALT_LEN: usize = 32;
const IV_LEN: usize = 16;
const DKLEN: u32 = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keystore {
    pub version: u32,
    pub id: String,
    pub crypto: KeystoreCrypto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeystoreCrypto {
    pub ciphertext: String,
    pub cipherparams: CipherParams,
    pub cipher: String,
    pub kdf: String,
    pub kdfparams: KdfParams,
    pub mac: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherParams {
    pub iv: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    pub dklen: u32,
    pub salt: String,
    pub c: u32,
    pub prf: String,
}

impl Keystore {
    pub fn from_json(json: &str) -> SignerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> SignerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> SignerResult<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> SignerResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Encrypt `private_key` under `password` with fresh salt, IV and id.
pub fn encrypt(private_key: &PrivateKey, password: &str) -> SignerResult<Keystore> {
    encrypt_with_iterations(private_key, password, PBKDF2_ITERATIONS)
}

pub(crate) fn encrypt_with_iterations(
    private_key: &PrivateKey,
    password: &str,
    iterations: u32,
) -> SignerResult<Keystore> {
    if password.is_empty() {
        return Err(SignerError::MissingRequiredField("password"));
    }

    let mut rng = rand::thread_rng();
    let mut salt = [0u8; SALT_LEN];
    let mut iv = [0u8; IV_LEN];
    rng.fill_bytes(&mut salt);
    rng.fill_bytes(&mut iv);

    let derived = derive_key(password, &salt, iterations);
    let mut ciphertext = private_key.as_bytes().to_vec();
    apply_keystream(&derived, &iv, &mut ciphertext)?;
    let mac = keccak256(&mac_input(&derived, &ciphertext));

    debug!(iterations, "encrypted keystore");
    Ok(Keystore {
        version: KEYSTORE_VERSION,
        id: Uuid::new_v4().to_string(),
        crypto: KeystoreCrypto {
            ciphertext: hex::encode(&ciphertext),
            cipherparams: CipherParams {
                iv: hex::encode(iv),
            },
            cipher: CIPHER.to_string(),
            kdf: KDF.to_string(),
            kdfparams: KdfParams {
                dklen: DKLEN,
                salt: hex::encode(salt),
                c: iterations,
                prf: PRF.to_string(),
            },
            mac: hex::encode(mac),
        },
    })
}

/// Recover the private key from `keystore`. Any password, including an
/// empty one, is checked against the MAC.
///
/// Returns [`SignerError::MacMismatch`] when neither the Keccak-256 nor the
/// legacy SHA-256 MAC matches, which almost always means a wrong password.
pub fn decrypt(keystore: &Keystore, password: &str) -> SignerResult<PrivateKey> {
    let crypto = &keystore.crypto;
    check_parameters(crypto)?;

    let salt = hex::decode(&crypto.kdfparams.salt)?;
    let iv = hex::decode(&crypto.cipherparams.iv)?;
    let ciphertext = hex::decode(&crypto.ciphertext)?;
    let expected_mac = hex::decode(&crypto.mac)?;

    let derived = derive_key(password, &salt, crypto.kdfparams.c);
    let input = mac_input(&derived, &ciphertext);
    if keccak256(&input)[..] != expected_mac[..] {
        if sha256(&input)[..] != expected_mac[..] {
            return Err(SignerError::MacMismatch);
        }
        warn!(id = %keystore.id, "keystore authenticated with legacy sha256 mac");
    }

    let mut plaintext = ciphertext;
    apply_keystream(&derived, &iv, &mut plaintext)?;
    let key = PrivateKey::from_slice(&plaintext);
    plaintext.zeroize();
    key
}

fn check_parameters(crypto: &KeystoreCrypto) -> SignerResult<()> {
    if crypto.cipher != CIPHER {
        return Err(SignerError::UnsupportedCipherOrKdf(format!(
            "cipher {}",
            crypto.cipher
        )));
    }
    if crypto.kdf != KDF {
        return Err(SignerError::UnsupportedCipherOrKdf(format!(
            "kdf {}",
            crypto.kdf
        )));
    }
    let params = &crypto.kdfparams;
    if params.prf != PRF {
        return Err(SignerError::UnsupportedCipherOrKdf(format!(
            "prf {}",
            params.prf
        )));
    }
    if params.dklen != DKLEN {
        return Err(SignerError::UnsupportedCipherOrKdf(format!(
            "dklen {}",
            params.dklen
        )));
    }
    if params.c == 0 {
        return Err(SignerError::UnsupportedCipherOrKdf(
            "zero pbkdf2 iterations".to_string(),
        ));
    }
    Ok(())
}

fn derive_key(password: &str, salt: &[u8], iterations: u32) -> Zeroizing<[u8; 32]> {
    let mut key = Zeroizing::new([0u8; 32]);
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, key.as_mut_slice());
    key
}

fn mac_input(derived: &[u8; 32], ciphertext: &[u8]) -> Vec<u8> {
    let mut input = Vec::with_capacity(16 + ciphertext.len());
    input.extend_from_slice(&derived[16..32]);
    input.extend_from_slice(ciphertext);
    input
}

fn apply_keystream(derived: &[u8; 32], iv: &[u8], buf: &mut [u8]) -> SignerResult<()> {
    let mut cipher = Aes256Ctr::new_from_slices(derived, iv)
        .map_err(|_| SignerError::encoding(format!("iv must be {IV_LEN} bytes")))?;
    cipher.apply_keystream(buf);
    Ok(())
}
