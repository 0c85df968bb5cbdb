//! Error types for ykcrypt
//!
//! Two layers are defined here:
//! - [`TokenError`] is what token collaborators (transport, catalog,
//!   primitives) report through the ports.
//! - [`YkcryptError`] is the failure taxonomy of the orchestrator. Each
//!   variant is a stable kind and keeps the collaborator cause as its source.

use thiserror::Error;

use crate::model::{ObjectId, OperationKind};

/// Result type alias for ykcrypt operations
pub type YkcryptResult<T> = Result<T, YkcryptError>;

/// Result type alias for port (collaborator) calls
pub type TokenResult<T> = Result<T, TokenError>;

/// Errors reported by token collaborators
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Requested object does not exist on the token
    #[error("object not found")]
    ObjectNotFound,

    /// PIN rejected by the token
    #[error("incorrect PIN, {tries} tries remaining")]
    PinIncorrect { tries: u8 },

    /// PIN is blocked after too many failed attempts
    #[error("PIN is blocked")]
    PinBlocked,

    /// Operation or key type not supported by the token
    #[error("not supported: {0}")]
    NotSupported(String),

    /// Input rejected before reaching the token
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Result does not fit into the caller's buffer
    #[error("result of {needed} bytes exceeds buffer of {available} bytes")]
    BufferTooSmall { needed: usize, available: usize },

    /// Reader or PC/SC level failure
    #[error("transport error: {0}")]
    Transport(String),

    /// Any other card-side failure
    #[error("card error: {0}")]
    Card(String),
}

/// Top-level error type for all ykcrypt operations
#[derive(Error, Debug)]
pub enum YkcryptError {
    /// Reader subsystem could not be initialized
    #[error("Failed to establish context: {source}")]
    ContextFailed {
        #[source]
        source: TokenError,
    },

    /// Device selector is not below the number of readers
    #[error("Illegal reader number {selector}. Only {count} reader(s) configured")]
    DeviceSelectorInvalid { selector: usize, count: usize },

    /// No token in the selected reader, or detection failed
    #[error("Card not present in reader {selector}")]
    DeviceAbsent {
        selector: usize,
        #[source]
        source: Option<TokenError>,
    },

    /// Token is present but the connection failed
    #[error("Failed to connect to card: {source}")]
    ConnectFailed {
        #[source]
        source: TokenError,
    },

    /// Connected token exposes no usable object catalog
    #[error("Object catalog initialization failed: {source}")]
    CatalogBindFailed {
        #[source]
        source: TokenError,
    },

    /// Listing private keys failed or found none
    #[error("Private key enumeration failed: {source}")]
    KeyEnumerationFailed {
        #[source]
        source: TokenError,
    },

    /// No private key with the requested identifier
    #[error("Unable to find private key '{key_id}': {source}")]
    KeyNotFound {
        key_id: ObjectId,
        #[source]
        source: TokenError,
    },

    /// Key refers to a PIN object the catalog does not hold
    #[error("Unable to find PIN code for private key: {source}")]
    CredentialNotFound {
        #[source]
        source: TokenError,
    },

    /// Operator cancelled the PIN prompt with an empty entry
    #[error("PIN entry cancelled")]
    SecretAborted,

    /// Terminal could not be read for PIN entry
    #[error("Unable to read PIN from terminal: {reason}")]
    PromptFailed { reason: String },

    /// Token rejected the PIN
    #[error("PIN code verification failed: {source}")]
    CredentialIncorrect {
        #[source]
        source: TokenError,
    },

    /// PIN is blocked on the token
    #[error("PIN code verification failed: {source}")]
    CredentialBlocked {
        #[source]
        source: TokenError,
    },

    /// Verification could not be performed (transport or device failure)
    #[error("PIN code verification failed: {source}")]
    AuthorizationFailed {
        #[source]
        source: TokenError,
    },

    /// Input source missing or not readable
    #[error("Input unavailable: {reason}")]
    InputMissingOrUnreadable { reason: String },

    /// Output sink missing or not writable
    #[error("Output unavailable: {reason}")]
    OutputUnwritable { reason: String },

    /// Input longer than the operation buffer
    #[error("Input of {len} bytes exceeds the maximum of {max} bytes")]
    InputTooLarge { len: usize, max: usize },

    /// Token rejected or failed the private-key operation
    #[error("{operation} failed: {source}")]
    CryptoOpFailed {
        operation: OperationKind,
        #[source]
        source: TokenError,
    },
}

impl YkcryptError {
    /// Process exit status for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            YkcryptError::DeviceAbsent { .. } => 3,
            YkcryptError::KeyNotFound { .. }
            | YkcryptError::InputMissingOrUnreadable { .. }
            | YkcryptError::OutputUnwritable { .. }
            | YkcryptError::InputTooLarge { .. } => 2,
            YkcryptError::SecretAborted
            | YkcryptError::PromptFailed { .. }
            | YkcryptError::CredentialIncorrect { .. }
            | YkcryptError::CredentialBlocked { .. }
            | YkcryptError::AuthorizationFailed { .. } => 5,
            YkcryptError::ContextFailed { .. }
            | YkcryptError::DeviceSelectorInvalid { .. }
            | YkcryptError::ConnectFailed { .. }
            | YkcryptError::CatalogBindFailed { .. }
            | YkcryptError::KeyEnumerationFailed { .. }
            | YkcryptError::CredentialNotFound { .. }
            | YkcryptError::CryptoOpFailed { .. } => 1,
        }
    }
}

/// Exit status for a finished run: 0 on success
pub fn exit_code<T>(outcome: &YkcryptResult<T>) -> u8 {
    match outcome {
        Ok(_) => 0,
        Err(err) => err.exit_code(),
    }
}

/// Convert yubikey crate errors to collaborator errors
impl From<yubikey::Error> for TokenError {
    fn from(err: yubikey::Error) -> Self {
        match err {
            yubikey::Error::WrongPin { tries } => TokenError::PinIncorrect { tries },
            yubikey::Error::PinLocked => TokenError::PinBlocked,
            yubikey::Error::NotFound => TokenError::ObjectNotFound,
            yubikey::Error::NotSupported => TokenError::NotSupported(err.to_string()),
            yubikey::Error::PcscError { .. } => TokenError::Transport(err.to_string()),
            other => TokenError::Card(other.to_string()),
        }
    }
}
