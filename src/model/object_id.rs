//! Opaque identifier of an object in the on-card catalog

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Identifier of a key or credential object
///
/// Identifiers are opaque byte strings of up to [`ObjectId::MAX_LENGTH`]
/// bytes. The empty identifier is valid. On the command line they are
/// written in hexadecimal, optionally separated by colons (`45`, `0a:0b`).
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct ObjectId(Vec<u8>);

impl ObjectId {
    /// Maximum identifier length in bytes
    pub const MAX_LENGTH: usize = 255;

    pub fn new(bytes: Vec<u8>) -> Result<Self, ObjectIdError> {
        if bytes.len() > Self::MAX_LENGTH {
            return Err(ObjectIdError::TooLong { len: bytes.len() });
        }
        Ok(Self(bytes))
    }

    /// Parse a hexadecimal identifier
    pub fn from_hex(text: &str) -> Result<Self, ObjectIdError> {
        let digits: String = text.chars().filter(|c| *c != ':').collect();
        let bytes = hex::decode(&digits).map_err(|e| ObjectIdError::InvalidHex {
            input: text.to_string(),
            reason: e.to_string(),
        })?;
        Self::new(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<u8> for ObjectId {
    fn from(byte: u8) -> Self {
        Self(vec![byte])
    }
}

impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObjectIdError {
    #[error("invalid identifier '{input}': {reason}")]
    InvalidHex { input: String, reason: String },

    #[error("identifier of {len} bytes exceeds {max} bytes", max = ObjectId::MAX_LENGTH)]
    TooLong { len: usize },
}
