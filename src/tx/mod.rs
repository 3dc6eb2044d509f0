//! SIGN_MODE_DIRECT sign documents, secp256k1 signatures and raw transactions.

use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use cosmrs::tx::{AuthInfo, SignerInfo};
use k256::ecdsa::signature::Verifier;
use tracing::debug;
use und_types::cosmos::tx::v1beta1::{SignDoc, TxRaw};
use und_types::Message;

use crate::crypto::hash::sha256;
use crate::crypto::keys::{PrivateKey, PublicKey};
use crate::error::{SignerError, SignerResult};
use crate::messages::{Coin, TxBody};

const SIGNATURE_LEN: usize = 64;

/// Transaction fee: amount paid and gas limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fee {
    pub amount: Coin,
    pub gas_limit: u64,
}

impl Fee {
    pub fn new(amount: Coin, gas_limit: u64) -> Self {
        Self { amount, gas_limit }
    }

    pub fn validate(&self) -> SignerResult<()> {
        self.amount.validate("fee")?;
        if self.gas_limit == 0 {
            return Err(SignerError::invalid_amount("gas_limit", "should be a positive number"));
        }
        Ok(())
    }

    fn to_cosmos(&self) -> SignerResult<cosmrs::tx::Fee> {
        Ok(cosmrs::tx::Fee::from_amount_and_gas(
            self.amount.to_cosmos()?,
            self.gas_limit,
        ))
    }
}

/// Chain and account state a signature commits to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxContext {
    pub chain_id: String,
    pub account_number: u64,
    pub sequence: u64,
}

/// Single-signer, direct-mode auth info for `public_key` at `sequence`.
pub fn compile_auth_info(
    sequence: u64,
    fee: &Fee,
    public_key: &PublicKey,
) -> SignerResult<AuthInfo> {
    fee.validate()?;
    let signer = SignerInfo::single_direct(Some(public_key.to_cosmos()?), sequence);
    Ok(signer.auth_info(fee.to_cosmos()?))
}

fn auth_info_bytes(auth_info: &AuthInfo) -> SignerResult<Vec<u8>> {
    auth_info.clone().into_bytes().map_err(SignerError::encoding)
}

/// Protobuf `cosmos.tx.v1beta1.SignDoc` bytes.
pub fn build_sign_doc(
    body: &TxBody,
    auth_info: &AuthInfo,
    chain_id: &str,
    account_number: u64,
) -> SignerResult<Vec<u8>> {
    if chain_id.trim().is_empty() {
        return Err(SignerError::MissingRequiredField("chain_id"));
    }
    let doc = SignDoc {
        body_bytes: body.to_bytes()?,
        auth_info_bytes: auth_info_bytes(auth_info)?,
        chain_id: chain_id.to_string(),
        account_number,
    };
    Ok(doc.encode_to_vec())
}

/// Compact `r || s` secp256k1 signature with low S.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature([u8; SIGNATURE_LEN]);

impl Signature {
    pub fn from_slice(bytes: &[u8]) -> SignerResult<Self> {
        let array: [u8; SIGNATURE_LEN] = bytes.try_into().map_err(|_| {
            SignerError::encoding(format!(
                "signature must be {SIGNATURE_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(array))
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    /// Check this signature over `SHA-256(message)` against `public_key`.
    pub fn verify(&self, message: &[u8], public_key: &PublicKey) -> bool {
        let Ok(verifying_key) = public_key.verifying_key() else {
            return false;
        };
        match k256::ecdsa::Signature::from_slice(&self.0) {
            Ok(signature) => verifying_key.verify(message, &signature).is_ok(),
            Err(_) => false,
        }
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", hex::encode(self.0))
    }
}

/// ECDSA over SHA-256 of `sign_doc` (RFC 6979 nonces), normalized to low S.
pub fn sign(sign_doc: &[u8], private_key: &PrivateKey) -> SignerResult<Signature> {
    let signing_key = private_key.signing_key()?;
    let signature = signing_key.sign(sign_doc).map_err(SignerError::encoding)?;
    let signature = signature.normalize_s().unwrap_or(signature);
    debug!(sign_doc_hash = %hex::encode(sha256(sign_doc)), "signed sign doc");
    Signature::from_slice(&signature.to_bytes())
}

/// A signed `cosmos.tx.v1beta1.TxRaw`.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedTransaction {
    raw: TxRaw,
}

impl SignedTransaction {
    pub fn body_bytes(&self) -> &[u8] {
        &self.raw.body_bytes
    }

    pub fn auth_info_bytes(&self) -> &[u8] {
        &self.raw.auth_info_bytes
    }

    pub fn signatures(&self) -> &[Vec<u8>] {
        &self.raw.signatures
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.raw.encode_to_vec()
    }

    pub fn to_base64(&self) -> String {
        BASE64.encode(self.to_bytes())
    }

    /// Upper-case hex SHA-256 of the encoded transaction, as nodes report it.
    pub fn hash(&self) -> String {
        hex::encode_upper(sha256(&self.to_bytes()))
    }
}

/// Combine body, auth info and the signature into a raw transaction.
pub fn assemble(
    body: &TxBody,
    auth_info: &AuthInfo,
    signature: Signature,
) -> SignerResult<SignedTransaction> {
    Ok(SignedTransaction {
        raw: TxRaw {
            body_bytes: body.to_bytes()?,
            auth_info_bytes: auth_info_bytes(auth_info)?,
            signatures: vec![signature.as_bytes().to_vec()],
        },
    })
}

/// Auth info, sign doc, signature and assembly for one context snapshot.
pub fn sign_transaction(
    body: &TxBody,
    fee: &Fee,
    context: &TxContext,
    private_key: &PrivateKey,
) -> SignerResult<SignedTransaction> {
    let public_key = private_key.public_key()?;
    let auth_info = compile_auth_info(context.sequence, fee, &public_key)?;
    let sign_doc = build_sign_doc(body, &auth_info, &context.chain_id, context.account_number)?;
    let signature = sign(&sign_doc, private_key)?;
    debug!(
        chain_id = %context.chain_id,
        account_number = context.account_number,
        sequence = context.sequence,
        messages = body.messages().len(),
        "signed transaction"
    );
    assemble(body, &auth_info, signature)
}
