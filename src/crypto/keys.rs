//! BIP-39 mnemonics, BIP-32 hierarchical derivation and secp256k1 key types.

use std::fmt;
use std::str::FromStr;

use bip39::Mnemonic;
use cosmrs::bip32::{DerivationPath, XPrv};
use cosmrs::crypto::secp256k1::SigningKey;
use k256::ecdsa::VerifyingKey;
use rand::RngCore;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{SignerError, SignerResult};

/// BIP-44 purpose segment.
pub const HD_PURPOSE: u32 = 44;
/// Registered SLIP-44 coin type of the FUND mainchain.
pub const COIN_TYPE: u32 = 5555;

const PRIVKEY_LEN: usize = 32;
const PUBKEY_LEN: usize = 33;
/// 256 bits of entropy = 24 words.
const MNEMONIC_ENTROPY_LEN: usize = 32;

/// Generate a new 24-word BIP-39 mnemonic using OS entropy.
pub fn generate_mnemonic() -> SignerResult<String> {
    let mut entropy = [0u8; MNEMONIC_ENTROPY_LEN];
    rand::thread_rng().fill_bytes(&mut entropy);
    let mnemonic = Mnemonic::from_entropy(&entropy)
        .map_err(|e| SignerError::InvalidMnemonic(e.to_string()));
    entropy.zeroize();
    Ok(mnemonic?.to_string())
}

/// Parse and checksum-validate an English mnemonic phrase.
pub fn parse_mnemonic(phrase: &str) -> SignerResult<Mnemonic> {
    phrase
        .trim()
        .parse::<Mnemonic>()
        .map_err(|e| SignerError::InvalidMnemonic(e.to_string()))
}

/// BIP-32 seed material, zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Seed(Vec<u8>);

impl Seed {
    /// Wrap raw seed bytes. BIP-32 accepts 128 to 512 bits.
    pub fn from_bytes(bytes: &[u8]) -> SignerResult<Self> {
        if !(16..=64).contains(&bytes.len()) {
            return Err(SignerError::encoding(format!(
                "seed must be 16..=64 bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Self(bytes.to_vec()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(<redacted>)")
    }
}

/// Derive the 64-byte BIP-39 seed for `(mnemonic, passphrase)`.
///
/// Fails with [`SignerError::InvalidMnemonic`] when a word is unknown or the
/// checksum does not match.
pub fn derive_seed(mnemonic: &str, passphrase: &str) -> SignerResult<Seed> {
    let parsed = parse_mnemonic(mnemonic)?;
    let mut seed = parsed.to_seed(passphrase);
    let out = Seed(seed.to_vec());
    seed.zeroize();
    Ok(out)
}

/// Hierarchical derivation coordinates.
///
/// Text form is `<purpose>'/<coin-type>'/<account>'/<change>/<index>`; a leading
/// `m/` is accepted when parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HdPath {
    path: DerivationPath,
}

impl HdPath {
    /// The FUND account path `44'/5555'/0'/0/<index>`.
    pub fn und(index: u32) -> SignerResult<Self> {
        Self::bip44(COIN_TYPE, 0, 0, index)
    }

    /// A BIP-44 path with hardened purpose/coin/account and soft change/index.
    pub fn bip44(coin_type: u32, account: u32, change: u32, index: u32) -> SignerResult<Self> {
        format!("{HD_PURPOSE}'/{coin_type}'/{account}'/{change}/{index}").parse()
    }

    /// Index of the leaf segment, if the path is not empty.
    pub fn address_index(&self) -> Option<u32> {
        self.path.iter().last().map(|child| child.index())
    }

    pub fn as_derivation_path(&self) -> &DerivationPath {
        &self.path
    }
}

impl FromStr for HdPath {
    type Err = SignerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let full = if trimmed == "m" || trimmed.starts_with("m/") {
            trimmed.to_string()
        } else {
            format!("m/{trimmed}")
        };
        let path = full
            .parse::<DerivationPath>()
            .map_err(|e| SignerError::InvalidHdPath(format!("{s}: {e}")))?;
        Ok(Self { path })
    }
}

impl fmt::Display for HdPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segments: Vec<String> = self
            .path
            .iter()
            .map(|child| {
                if child.is_hardened() {
                    format!("{}'", child.index())
                } else {
                    child.index().to_string()
                }
            })
            .collect();
        f.write_str(&segments.join("/"))
    }
}

/// Walk `path` from the BIP-32 master key of `seed` and return the leaf scalar.
pub fn derive_private_key(seed: &Seed, path: &HdPath) -> SignerResult<PrivateKey> {
    debug!(path = %path, "deriving private key");
    let child = XPrv::derive_from_path(seed.as_bytes(), path.as_derivation_path())
        .map_err(|e| SignerError::InvalidHdPath(format!("{path}: {e}")))?;
    PrivateKey::from_slice(child.private_key().to_bytes().as_slice())
}

/// Convenience: mnemonic + passphrase + path in one call.
pub fn private_key_from_mnemonic(
    mnemonic: &str,
    passphrase: &str,
    path: &HdPath,
) -> SignerResult<PrivateKey> {
    let seed = derive_seed(mnemonic, passphrase)?;
    derive_private_key(&seed, path)
}

/// A secp256k1 secret scalar. Never printed; zeroized on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey([u8; PRIVKEY_LEN]);

impl PrivateKey {
    /// Build a key from raw bytes, checking length and scalar range.
    pub fn from_slice(bytes: &[u8]) -> SignerResult<Self> {
        if bytes.len() != PRIVKEY_LEN {
            return Err(SignerError::InvalidPrivateKeyLength(bytes.len()));
        }
        SigningKey::from_slice(bytes).map_err(|_| SignerError::InvalidPrivateKey)?;
        let mut key = [0u8; PRIVKEY_LEN];
        key.copy_from_slice(bytes);
        Ok(Self(key))
    }

    pub fn from_hex(hex_key: &str) -> SignerResult<Self> {
        let trimmed = hex_key.trim().trim_start_matches("0x");
        let mut bytes = hex::decode(trimmed)?;
        let key = Self::from_slice(&bytes);
        bytes.zeroize();
        key
    }

    /// Random key from OS entropy.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        loop {
            let mut candidate = [0u8; PRIVKEY_LEN];
            rng.fill_bytes(&mut candidate);
            let key = Self::from_slice(&candidate);
            candidate.zeroize();
            if let Ok(key) = key {
                return key;
            }
        }
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; PRIVKEY_LEN] {
        &self.0
    }

    pub fn public_key(&self) -> SignerResult<PublicKey> {
        PublicKey::from_private_key(self)
    }

    pub(crate) fn signing_key(&self) -> SignerResult<SigningKey> {
        SigningKey::from_slice(&self.0).map_err(|_| SignerError::InvalidPrivateKey)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// Compressed SEC1 secp256k1 point.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PUBKEY_LEN]);

impl PublicKey {
    /// Point multiplication of the generator by `private_key`.
    pub fn from_private_key(private_key: &PrivateKey) -> SignerResult<Self> {
        let signing_key = private_key.signing_key()?;
        Self::from_slice(&signing_key.public_key().to_bytes())
    }

    /// Accepts compressed or uncompressed SEC1 input; stores the compressed form.
    pub fn from_slice(bytes: &[u8]) -> SignerResult<Self> {
        let verifying_key = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|e| SignerError::encoding(format!("invalid public key: {e}")))?;
        let point = verifying_key.to_encoded_point(true);
        let mut out = [0u8; PUBKEY_LEN];
        out.copy_from_slice(point.as_bytes());
        Ok(Self(out))
    }

    pub fn as_bytes(&self) -> &[u8; PUBKEY_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub(crate) fn verifying_key(&self) -> SignerResult<VerifyingKey> {
        VerifyingKey::from_sec1_bytes(&self.0)
            .map_err(|e| SignerError::encoding(format!("invalid public key: {e}")))
    }

    pub(crate) fn to_cosmos(self) -> SignerResult<cosmrs::crypto::PublicKey> {
        Ok(cosmrs::crypto::PublicKey::from(self.verifying_key()?))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}
