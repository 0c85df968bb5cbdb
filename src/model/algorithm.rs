//! Key algorithms of private keys held on the token

use std::fmt;

use thiserror::Error;

const RSA_ENCRYPTION_OID: &str = "1.2.840.113549.1.1.1";
const EC_PUBLIC_KEY_OID: &str = "1.2.840.10045.2.1";

/// Algorithm of an on-card private key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAlgorithm {
    /// RSA 1024-bit
    Rsa1024,
    /// RSA 2048-bit
    Rsa2048,
    /// ECC P-256
    EccP256,
    /// ECC P-384
    EccP384,
}

impl KeyAlgorithm {
    /// Size in bytes of a modulus or field element
    pub fn key_size(self) -> usize {
        match self {
            KeyAlgorithm::Rsa1024 => 128,
            KeyAlgorithm::Rsa2048 => 256,
            KeyAlgorithm::EccP256 => 32,
            KeyAlgorithm::EccP384 => 48,
        }
    }

    pub fn is_rsa(self) -> bool {
        matches!(self, KeyAlgorithm::Rsa1024 | KeyAlgorithm::Rsa2048)
    }

    /// Convert to yubikey crate's AlgorithmId
    pub fn to_yubikey_algorithm_id(self) -> yubikey::piv::AlgorithmId {
        match self {
            KeyAlgorithm::Rsa1024 => yubikey::piv::AlgorithmId::Rsa1024,
            KeyAlgorithm::Rsa2048 => yubikey::piv::AlgorithmId::Rsa2048,
            KeyAlgorithm::EccP256 => yubikey::piv::AlgorithmId::EccP256,
            KeyAlgorithm::EccP384 => yubikey::piv::AlgorithmId::EccP384,
        }
    }

    /// Determine the algorithm from a certificate's public key
    ///
    /// `oid` is the dotted algorithm identifier of the SubjectPublicKeyInfo and
    /// `key_len` the length of its subject public key bit string in bytes.
    pub fn from_public_key(oid: &str, key_len: usize) -> Result<Self, AlgorithmError> {
        match (oid, key_len) {
            (RSA_ENCRYPTION_OID, 0..=200) => Ok(KeyAlgorithm::Rsa1024),
            (RSA_ENCRYPTION_OID, 201..=300) => Ok(KeyAlgorithm::Rsa2048),
            // uncompressed points: 0x04 || X || Y
            (EC_PUBLIC_KEY_OID, 65) => Ok(KeyAlgorithm::EccP256),
            (EC_PUBLIC_KEY_OID, 97) => Ok(KeyAlgorithm::EccP384),
            _ => Err(AlgorithmError::Unsupported {
                algorithm: format!("{} ({} byte key)", oid, key_len),
            }),
        }
    }
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyAlgorithm::Rsa1024 => "RSA-1024",
            KeyAlgorithm::Rsa2048 => "RSA-2048",
            KeyAlgorithm::EccP256 => "ECC P-256",
            KeyAlgorithm::EccP384 => "ECC P-384",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlgorithmError {
    #[error("Algorithm not supported: {algorithm}")]
    Unsupported { algorithm: String },
}
