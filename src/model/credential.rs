use super::ObjectId;

/// PIN object guarding one or more private keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialObject {
    auth_id: ObjectId,
    label: String,
    min_length: usize,
    max_length: usize,
    reference: u8,
}

impl CredentialObject {
    pub fn new(
        auth_id: ObjectId,
        label: impl Into<String>,
        min_length: usize,
        max_length: usize,
        reference: u8,
    ) -> Self {
        Self {
            auth_id,
            label: label.into(),
            min_length,
            max_length,
            reference,
        }
    }

    pub fn auth_id(&self) -> &ObjectId {
        &self.auth_id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Maximum stored length of the PIN on the card
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn reference(&self) -> u8 {
        self.reference
    }

    /// Whether an entered PIN of `len` bytes is worth sending to the card
    pub fn accepts_length(&self, len: usize) -> bool {
        (self.min_length..=self.max_length).contains(&len)
    }
}
