//! PrivateKeyOperator trait - capability to use an on-card private key

use crate::error::TokenResult;
use crate::model::{HashKind, KeyObject};

/// Cryptographic primitives executed by the token
///
/// Callers must have verified the key's credential beforehand; the token
/// refuses private-key operations otherwise.
pub trait PrivateKeyOperator {
    /// Sign `input` with the key
    ///
    /// # Arguments
    ///
    /// * `key` - The key object to sign with
    /// * `hash` - Whether `input` is raw data or a precomputed digest
    /// * `input` - The data or digest
    /// * `max_out` - Largest acceptable signature length
    ///
    /// # Returns
    ///
    /// The signature bytes
    fn compute_signature(
        &mut self,
        key: &KeyObject,
        hash: HashKind,
        input: &[u8],
        max_out: usize,
    ) -> TokenResult<Vec<u8>>;

    /// Decrypt `input` with the key, returning at most `max_out` bytes
    fn decipher(&mut self, key: &KeyObject, input: &[u8], max_out: usize)
        -> TokenResult<Vec<u8>>;
}
