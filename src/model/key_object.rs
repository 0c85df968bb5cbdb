use super::{KeyAlgorithm, ObjectId};

/// Private key object resolved from the on-card catalog
///
/// Key objects are descriptors owned by the catalog that produced them; the
/// key material never leaves the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyObject {
    id: ObjectId,
    label: String,
    reference: u8,
    algorithm: KeyAlgorithm,
    auth_id: ObjectId,
}

impl KeyObject {
    pub fn new(id: ObjectId, reference: u8, algorithm: KeyAlgorithm, auth_id: ObjectId) -> Self {
        Self {
            id,
            label: String::new(),
            reference,
            algorithm,
            auth_id,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// On-card key reference (PIV slot number for the PIV adapter)
    pub fn reference(&self) -> u8 {
        self.reference
    }

    pub fn algorithm(&self) -> KeyAlgorithm {
        self.algorithm
    }

    /// Identifier of the credential that authorizes use of this key
    pub fn auth_id(&self) -> &ObjectId {
        &self.auth_id
    }
}
