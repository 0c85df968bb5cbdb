//! In-memory token for tests
//!
//! `FakeTokenDriver` records every collaborator call in a shared [`Journal`]
//! and can be told to fail at any acquisition stage. `FakeCatalog` holds
//! key and credential objects, a PIN with a retry counter, and canned
//! primitive results.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

use crate::error::{TokenError, TokenResult};
use crate::model::{CredentialObject, HashKind, KeyAlgorithm, KeyObject, ObjectId, Secret};
use crate::ports::{
    CredentialVerifier, KeyDirectory, PrivateKeyOperator, SecretReader, TokenDriver, Unbound,
};

/// A collaborator call observed by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    EstablishContext,
    DetectToken(usize),
    Connect(usize),
    BindCatalog,
    EnumeratePrivateKeys,
    FindKeyById(ObjectId),
    FindCredential(ObjectId),
    VerifyCredential(Vec<u8>),
    ComputeSignature(HashKind, Vec<u8>),
    Decipher(Vec<u8>),
    UnbindCatalog,
    Disconnect,
    DestroyContext,
}

/// Acquisition stage at which the fake driver fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Context,
    Detect,
    Connect,
    Bind,
}

#[derive(Debug, Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<Call>>>);

impl Journal {
    pub fn record(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.0.borrow().iter().filter(|call| pred(call)).count()
    }

    /// Release calls in the order they happened
    pub fn releases(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| {
                matches!(
                    call,
                    Call::UnbindCatalog | Call::Disconnect | Call::DestroyContext
                )
            })
            .collect()
    }
}

pub const FAKE_PIN: &[u8] = b"123456";
pub const FAKE_SIGNATURE: &[u8] = &[0x5c; 64];

pub fn pin_id() -> ObjectId {
    ObjectId::from(0x01)
}

pub fn signing_key() -> KeyObject {
    KeyObject::new(ObjectId::from(0x45), 0x9c, KeyAlgorithm::Rsa2048, pin_id())
        .with_label("Signing key")
}

pub fn decryption_key() -> KeyObject {
    KeyObject::new(ObjectId::from(0x46), 0x9d, KeyAlgorithm::Rsa2048, pin_id())
        .with_label("Decryption key")
}

#[derive(Debug, Clone)]
pub struct FakeCatalog {
    pub label: String,
    pub keys: Vec<KeyObject>,
    pub credentials: Vec<CredentialObject>,
    pub pin: Vec<u8>,
    pub tries_left: u8,
    pub verified: bool,
    pub transport_down: bool,
    pub enumeration_fails: bool,
    pub signature: Vec<u8>,
    pub crypto_fails: bool,
    pub journal: Journal,
}

impl FakeCatalog {
    pub fn new(journal: Journal) -> Self {
        Self {
            label: "Fake Token".to_string(),
            keys: vec![signing_key(), decryption_key()],
            credentials: vec![CredentialObject::new(pin_id(), "User PIN", 4, 8, 0x80)],
            pin: FAKE_PIN.to_vec(),
            tries_left: 3,
            verified: false,
            transport_down: false,
            enumeration_fails: false,
            signature: FAKE_SIGNATURE.to_vec(),
            crypto_fails: false,
            journal,
        }
    }

    fn ensure_verified(&self) -> TokenResult<()> {
        if self.verified {
            Ok(())
        } else {
            Err(TokenError::Card("security status not satisfied".to_string()))
        }
    }
}

impl Default for FakeCatalog {
    fn default() -> Self {
        Self::new(Journal::default())
    }
}

impl KeyDirectory for FakeCatalog {
    fn label(&self) -> &str {
        &self.label
    }

    fn enumerate_private_keys(&mut self) -> TokenResult<Vec<KeyObject>> {
        self.journal.record(Call::EnumeratePrivateKeys);
        if self.enumeration_fails {
            return Err(TokenError::Card("file not found".to_string()));
        }
        Ok(self.keys.clone())
    }

    fn find_key_by_id(&mut self, id: &ObjectId) -> TokenResult<KeyObject> {
        self.journal.record(Call::FindKeyById(id.clone()));
        self.keys
            .iter()
            .find(|key| key.id() == id)
            .cloned()
            .ok_or(TokenError::ObjectNotFound)
    }

    fn find_credential_by_reference(
        &mut self,
        auth_id: &ObjectId,
    ) -> TokenResult<CredentialObject> {
        self.journal.record(Call::FindCredential(auth_id.clone()));
        self.credentials
            .iter()
            .find(|credential| credential.auth_id() == auth_id)
            .cloned()
            .ok_or(TokenError::ObjectNotFound)
    }
}

impl CredentialVerifier for FakeCatalog {
    fn verify_credential(
        &mut self,
        _credential: &CredentialObject,
        secret: &[u8],
    ) -> TokenResult<()> {
        self.journal.record(Call::VerifyCredential(secret.to_vec()));
        if self.transport_down {
            return Err(TokenError::Transport("card removed".to_string()));
        }
        if self.tries_left == 0 {
            return Err(TokenError::PinBlocked);
        }
        if secret == self.pin.as_slice() {
            self.tries_left = 3;
            self.verified = true;
            Ok(())
        } else {
            self.tries_left -= 1;
            Err(TokenError::PinIncorrect {
                tries: self.tries_left,
            })
        }
    }
}

impl PrivateKeyOperator for FakeCatalog {
    fn compute_signature(
        &mut self,
        _key: &KeyObject,
        hash: HashKind,
        input: &[u8],
        max_out: usize,
    ) -> TokenResult<Vec<u8>> {
        self.journal
            .record(Call::ComputeSignature(hash, input.to_vec()));
        self.ensure_verified()?;
        if self.crypto_fails {
            return Err(TokenError::Card("incorrect parameters in APDU".to_string()));
        }
        if let Some(expected) = hash.digest_len() {
            if input.len() != expected {
                return Err(TokenError::InvalidInput(format!(
                    "digest of {} bytes, expected {}",
                    input.len(),
                    expected
                )));
            }
        }
        if self.signature.len() > max_out {
            return Err(TokenError::BufferTooSmall {
                needed: self.signature.len(),
                available: max_out,
            });
        }
        Ok(self.signature.clone())
    }

    /// The fake "plaintext" is the ciphertext reversed
    fn decipher(&mut self, _key: &KeyObject, input: &[u8], max_out: usize) -> TokenResult<Vec<u8>> {
        self.journal.record(Call::Decipher(input.to_vec()));
        self.ensure_verified()?;
        if self.crypto_fails {
            return Err(TokenError::Card("incorrect parameters in APDU".to_string()));
        }
        let plain: Vec<u8> = input.iter().rev().copied().collect();
        if plain.len() > max_out {
            return Err(TokenError::BufferTooSmall {
                needed: plain.len(),
                available: max_out,
            });
        }
        Ok(plain)
    }
}

pub struct FakeContext;
pub struct FakeConnection;

#[derive(Debug, Clone)]
pub struct FakeTokenDriver {
    pub devices: usize,
    pub token_present: bool,
    pub fail_at: Option<Stage>,
    pub catalog: FakeCatalog,
    pub journal: Journal,
}

impl FakeTokenDriver {
    pub fn new() -> Self {
        let journal = Journal::default();
        Self {
            devices: 1,
            token_present: true,
            fail_at: None,
            catalog: FakeCatalog::new(journal.clone()),
            journal,
        }
    }

    pub fn failing_at(stage: Stage) -> Self {
        Self {
            fail_at: Some(stage),
            ..Self::new()
        }
    }

    fn injected(&self, stage: Stage) -> TokenResult<()> {
        if self.fail_at == Some(stage) {
            Err(TokenError::Transport(format!("injected failure at {:?}", stage)))
        } else {
            Ok(())
        }
    }
}

impl Default for FakeTokenDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenDriver for FakeTokenDriver {
    type Context = FakeContext;
    type Connection = FakeConnection;
    type Catalog = FakeCatalog;

    fn establish_context(&mut self) -> TokenResult<FakeContext> {
        self.journal.record(Call::EstablishContext);
        self.injected(Stage::Context)?;
        Ok(FakeContext)
    }

    fn device_count(&mut self, _context: &mut FakeContext) -> usize {
        self.devices
    }

    fn device_name(&mut self, _context: &mut FakeContext, index: usize) -> Option<String> {
        (index < self.devices).then(|| format!("Fake Reader {}", index))
    }

    fn detect_token(&mut self, _context: &mut FakeContext, index: usize) -> TokenResult<bool> {
        self.journal.record(Call::DetectToken(index));
        self.injected(Stage::Detect)?;
        Ok(self.token_present)
    }

    fn connect(&mut self, _context: &mut FakeContext, index: usize) -> TokenResult<FakeConnection> {
        self.journal.record(Call::Connect(index));
        self.injected(Stage::Connect)?;
        Ok(FakeConnection)
    }

    fn bind_catalog(
        &mut self,
        connection: FakeConnection,
    ) -> Result<FakeCatalog, Unbound<FakeConnection>> {
        self.journal.record(Call::BindCatalog);
        match self.injected(Stage::Bind) {
            Ok(()) => Ok(self.catalog.clone()),
            Err(error) => Err(Unbound { connection, error }),
        }
    }

    fn unbind_catalog(&mut self, catalog: FakeCatalog) -> FakeConnection {
        self.journal.record(Call::UnbindCatalog);
        // keep the retry counter across bindings, like a real card
        self.catalog.tries_left = catalog.tries_left;
        FakeConnection
    }

    fn disconnect(&mut self, _connection: FakeConnection) {
        self.journal.record(Call::Disconnect);
    }

    fn destroy_context(&mut self, _context: FakeContext) {
        self.journal.record(Call::DestroyContext);
    }
}

/// Secret reader answering prompts from a script
#[derive(Debug, Default)]
pub struct ScriptedSecretReader {
    pub answers: VecDeque<String>,
    pub prompts: Vec<String>,
}

impl ScriptedSecretReader {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }
}

impl SecretReader for ScriptedSecretReader {
    fn read_secret(&mut self, prompt: &str) -> io::Result<Secret> {
        self.prompts.push(prompt.to_string());
        self.answers
            .pop_front()
            .map(Secret::from)
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more answers"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract_tests_for;
    use crate::ports::contract_tests::catalog_contract;

    contract_tests_for!(
        fake_catalog_contract,
        make = FakeCatalog::default,
        tests = {
            test_enumerate_yields_findable_keys => catalog_contract::test_enumerate_yields_findable_keys,
            test_find_key_unknown_id => catalog_contract::test_find_key_unknown_id,
            test_credential_for_first_key => catalog_contract::test_credential_for_first_key,
            test_unknown_credential => catalog_contract::test_unknown_credential,
            test_verify_success => catalog_contract::test_verify_success,
            test_verify_wrong_pin => catalog_contract::test_verify_wrong_pin,
            test_sign_after_verify => catalog_contract::test_sign_after_verify,
            test_sign_rejects_bad_digest_length => catalog_contract::test_sign_rejects_bad_digest_length,
        }
    );

    #[test]
    fn test_fake_pin_blocks_after_three_failures() {
        let mut catalog = FakeCatalog::default();
        let credential = catalog.credentials[0].clone();

        for _ in 0..3 {
            assert!(matches!(
                catalog.verify_credential(&credential, b"0000"),
                Err(TokenError::PinIncorrect { .. })
            ));
        }
        assert_eq!(
            catalog.verify_credential(&credential, FAKE_PIN),
            Err(TokenError::PinBlocked)
        );
    }

    #[test]
    fn test_fake_refuses_operations_before_verification() {
        let mut catalog = FakeCatalog::default();
        let key = signing_key();

        assert!(catalog
            .compute_signature(&key, HashKind::Raw, b"data", 1024)
            .is_err());
        assert!(catalog.decipher(&key, b"data", 1024).is_err());
    }
}
