use thiserror::Error;

/// Signer-wide error types
#[derive(Error, Debug)]
pub enum SignerError {
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("Invalid private key length: expected 32 bytes, got {0}")]
    InvalidPrivateKeyLength(usize),

    #[error("Invalid private key: not a valid secp256k1 scalar")]
    InvalidPrivateKey,

    #[error("Invalid HD path: {0}")]
    InvalidHdPath(String),

    #[error("Invalid address for {field}: {address}")]
    InvalidAddress { field: &'static str, address: String },

    #[error("Invalid amount for {field}: {reason}")]
    InvalidAmount { field: &'static str, reason: String },

    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("\"{0}\" is an invalid vote option")]
    InvalidVoteOption(String),

    #[error("{delegator} is not the self-delegator of {validator}")]
    SelfDelegationRequired { validator: String, delegator: String },

    #[error("Unsupported keystore parameters: {0}")]
    UnsupportedCipherOrKdf(String),

    #[error("Keystore mac check failed (sha3 & sha256) - wrong password?")]
    MacMismatch,

    #[error("No signing key configured")]
    NoSigningKeyConfigured,

    #[error("Transaction body must contain at least one message")]
    EmptyTxBody,

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Node error: {0}")]
    Node(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Hex decoding error: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl SignerError {
    pub fn invalid_address<S: Into<String>>(field: &'static str, address: S) -> Self {
        Self::InvalidAddress {
            field,
            address: address.into(),
        }
    }

    pub fn invalid_amount<S: Into<String>>(field: &'static str, reason: S) -> Self {
        Self::InvalidAmount {
            field,
            reason: reason.into(),
        }
    }

    pub fn encoding<E: std::fmt::Display>(err: E) -> Self {
        Self::Encoding(err.to_string())
    }

    pub fn node<S: Into<String>>(msg: S) -> Self {
        Self::Node(msg.into())
    }

    /// True for failures raised by local validation, before any signing or
    /// network work started.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidMnemonic(_)
                | Self::InvalidPrivateKeyLength(_)
                | Self::InvalidPrivateKey
                | Self::InvalidHdPath(_)
                | Self::InvalidAddress { .. }
                | Self::InvalidAmount { .. }
                | Self::MissingRequiredField(_)
                | Self::InvalidVoteOption(_)
                | Self::SelfDelegationRequired { .. }
                | Self::EmptyTxBody
        )
    }
}

/// Result type alias using SignerError
pub type SignerResult<T> = Result<T, SignerError>;
