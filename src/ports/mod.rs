//! Ports (traits) for token collaborators
//!
//! The orchestrator depends on these abstractions, not on a concrete
//! transport or card type. They represent ports in hexagonal architecture.

mod credential_verifier;
mod key_directory;
mod private_key_operator;
mod secret_reader;
mod token_driver;

pub use credential_verifier::CredentialVerifier;
pub use key_directory::KeyDirectory;
pub use private_key_operator::PrivateKeyOperator;
pub use secret_reader::SecretReader;
pub use token_driver::{TokenDriver, Unbound};

/// Combined trait for everything a bound catalog offers
pub trait TokenCatalog: KeyDirectory + CredentialVerifier + PrivateKeyOperator {}

// Blanket implementation for types that implement all catalog traits
impl<T> TokenCatalog for T where T: KeyDirectory + CredentialVerifier + PrivateKeyOperator {}
