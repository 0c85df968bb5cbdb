//! KeyDirectory trait - capability to look up objects in a bound catalog

use crate::error::TokenResult;
use crate::model::{CredentialObject, KeyObject, ObjectId};

/// Read access to the on-card object catalog
pub trait KeyDirectory {
    /// Card label reported by the catalog
    fn label(&self) -> &str;

    /// All private key objects, in catalog order
    ///
    /// The order is stable for a given binding only.
    fn enumerate_private_keys(&mut self) -> TokenResult<Vec<KeyObject>>;

    /// Private key with exactly this identifier
    ///
    /// # Errors
    ///
    /// Returns `TokenError::ObjectNotFound` if no key matches
    fn find_key_by_id(&mut self, id: &ObjectId) -> TokenResult<KeyObject>;

    /// Credential object whose identifier is `auth_id`
    ///
    /// # Errors
    ///
    /// Returns `TokenError::ObjectNotFound` if no credential matches
    fn find_credential_by_reference(&mut self, auth_id: &ObjectId)
        -> TokenResult<CredentialObject>;
}
