//! PIV implementation of the token ports
//!
//! Readers come from PC/SC through the yubikey crate. The PIV application
//! has no object directory of its own, so the catalog is derived from the
//! key slots that carry a certificate; every key is guarded by the PIV
//! application PIN.

use sha2::{Digest, Sha256};
use tracing::{debug, warn};
use yubikey::piv::{decrypt_data, sign_data, Key, SlotId};
use yubikey::{Context, YubiKey};

use crate::error::{TokenError, TokenResult};
use crate::logic::pkcs1;
use crate::model::{CredentialObject, HashKind, KeyAlgorithm, KeyObject, ObjectId};
use crate::ports::{
    CredentialVerifier, KeyDirectory, PrivateKeyOperator, TokenDriver, Unbound,
};

/// Key reference of the PIV application PIN
pub const PIV_PIN_REFERENCE: u8 = 0x80;

const PIV_PIN_LABEL: &str = "PIV PIN";
const PIV_PIN_MIN_LENGTH: usize = 6;
const PIV_PIN_MAX_LENGTH: usize = 8;

/// PC/SC based driver for YubiKey PIV tokens
#[derive(Debug, Clone, Copy, Default)]
pub struct PivTokenDriver;

/// Open PC/SC context with the reader names seen when it was established
pub struct PivContext {
    readers: Context,
    names: Vec<String>,
}

impl TokenDriver for PivTokenDriver {
    type Context = PivContext;
    type Connection = YubiKey;
    type Catalog = PivCatalog;

    fn establish_context(&mut self) -> TokenResult<PivContext> {
        let mut readers = Context::open()?;
        let names: Vec<String> = readers
            .iter()?
            .map(|reader| reader.name().to_string())
            .collect();

        debug!("PC/SC context established with {} reader(s)", names.len());
        Ok(PivContext { readers, names })
    }

    fn device_count(&mut self, context: &mut PivContext) -> usize {
        context.names.len()
    }

    fn device_name(&mut self, context: &mut PivContext, index: usize) -> Option<String> {
        context.names.get(index).cloned()
    }

    fn detect_token(&mut self, context: &mut PivContext, index: usize) -> TokenResult<bool> {
        let reader = context
            .readers
            .iter()?
            .nth(index)
            .ok_or(TokenError::ObjectNotFound)?;

        match reader.open() {
            Ok(_) => Ok(true),
            Err(e) => {
                debug!("No PIV token in reader {:?}: {}", reader.name(), e);
                Ok(false)
            }
        }
    }

    fn connect(&mut self, context: &mut PivContext, index: usize) -> TokenResult<YubiKey> {
        let reader = context
            .readers
            .iter()?
            .nth(index)
            .ok_or(TokenError::ObjectNotFound)?;

        let yubikey = reader.open()?;
        debug!("Connected to YubiKey: {:?}", reader.name());
        Ok(yubikey)
    }

    fn bind_catalog(&mut self, mut yubikey: YubiKey) -> Result<PivCatalog, Unbound<YubiKey>> {
        let slots = match Key::list(&mut yubikey) {
            Ok(slots) => slots,
            Err(e) => {
                return Err(Unbound {
                    connection: yubikey,
                    error: e.into(),
                })
            }
        };

        let keys: Vec<KeyObject> = slots.iter().filter_map(key_object).collect();
        let label = format!("YubiKey PIV (serial {})", yubikey.serial());
        debug!("{} exposes {} usable key(s)", label, keys.len());

        Ok(PivCatalog {
            device: yubikey,
            keys,
            label,
        })
    }

    fn unbind_catalog(&mut self, catalog: PivCatalog) -> YubiKey {
        catalog.device
    }

    fn disconnect(&mut self, connection: YubiKey) {
        debug!("Disconnecting from YubiKey");
        drop(connection);
    }

    fn destroy_context(&mut self, context: PivContext) {
        drop(context);
    }
}

/// Describe a certificate-bearing slot as a key object
fn key_object(key: &Key) -> Option<KeyObject> {
    let slot = key.slot();
    let spki = key.certificate().subject_pki();
    let oid = spki.algorithm.oid.to_string();

    let algorithm =
        match KeyAlgorithm::from_public_key(&oid, spki.subject_public_key.raw_bytes().len()) {
            Ok(algorithm) => algorithm,
            Err(e) => {
                warn!("Skipping slot {:?}: {}", slot, e);
                return None;
            }
        };

    let reference = u8::from(slot);
    Some(
        KeyObject::new(
            ObjectId::from(reference),
            reference,
            algorithm,
            ObjectId::from(PIV_PIN_REFERENCE),
        )
        .with_label(format!("{:?}", slot)),
    )
}

/// Bound PIV application
pub struct PivCatalog {
    device: YubiKey,
    keys: Vec<KeyObject>,
    label: String,
}

fn slot_id(key: &KeyObject) -> TokenResult<SlotId> {
    SlotId::try_from(key.reference()).map_err(|_| {
        TokenError::NotSupported(format!("key reference {:#04x}", key.reference()))
    })
}

/// Only the PIV application PIN can be verified through this catalog
fn check_pin_reference(credential: &CredentialObject) -> TokenResult<()> {
    if credential.reference() != PIV_PIN_REFERENCE {
        return Err(TokenError::NotSupported(format!(
            "PIN reference {:#04x}",
            credential.reference()
        )));
    }
    Ok(())
}

fn fit(output: Vec<u8>, max_out: usize) -> TokenResult<Vec<u8>> {
    if output.len() > max_out {
        return Err(TokenError::BufferTooSmall {
            needed: output.len(),
            available: max_out,
        });
    }
    Ok(output)
}

impl KeyDirectory for PivCatalog {
    fn label(&self) -> &str {
        &self.label
    }

    fn enumerate_private_keys(&mut self) -> TokenResult<Vec<KeyObject>> {
        Ok(self.keys.clone())
    }

    fn find_key_by_id(&mut self, id: &ObjectId) -> TokenResult<KeyObject> {
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
        if auth_id.as_bytes() != [PIV_PIN_REFERENCE] {
            return Err(TokenError::ObjectNotFound);
        }
        Ok(CredentialObject::new(
            auth_id.clone(),
            PIV_PIN_LABEL,
            PIV_PIN_MIN_LENGTH,
            PIV_PIN_MAX_LENGTH,
            PIV_PIN_REFERENCE,
        ))
    }
}

impl CredentialVerifier for PivCatalog {
    fn verify_credential(
        &mut self,
        credential: &CredentialObject,
        secret: &[u8],
    ) -> TokenResult<()> {
        check_pin_reference(credential)?;
        self.device.verify_pin(secret)?;
        debug!("PIN verified successfully");
        Ok(())
    }
}

impl PrivateKeyOperator for PivCatalog {
    fn compute_signature(
        &mut self,
        key: &KeyObject,
        hash: HashKind,
        input: &[u8],
        max_out: usize,
    ) -> TokenResult<Vec<u8>> {
        let slot = slot_id(key)?;
        let algorithm = key.algorithm();

        let (hash, mut digest) = match hash.digest_len() {
            None => (HashKind::Sha256, Sha256::digest(input).to_vec()),
            Some(expected) if input.len() == expected => (hash, input.to_vec()),
            Some(expected) => {
                return Err(TokenError::InvalidInput(format!(
                    "digest of {} bytes, expected {}",
                    input.len(),
                    expected
                )))
            }
        };

        let payload = if algorithm.is_rsa() {
            let info = pkcs1::digest_info(hash, &digest)
                .map_err(|e| TokenError::InvalidInput(e.to_string()))?;
            pkcs1::pad_signature(&info, algorithm.key_size())
                .map_err(|e| TokenError::InvalidInput(e.to_string()))?
        } else {
            digest.truncate(algorithm.key_size());
            digest
        };

        debug!(
            "Signing {} byte block using slot {:?}, algorithm {}",
            payload.len(),
            slot,
            algorithm
        );
        let signature = sign_data(
            &mut self.device,
            &payload,
            algorithm.to_yubikey_algorithm_id(),
            slot,
        )?;

        fit(signature.to_vec(), max_out)
    }

    fn decipher(&mut self, key: &KeyObject, input: &[u8], max_out: usize) -> TokenResult<Vec<u8>> {
        let slot = slot_id(key)?;
        let algorithm = key.algorithm();

        if algorithm.is_rsa() && input.len() != algorithm.key_size() {
            return Err(TokenError::InvalidInput(format!(
                "ciphertext of {} bytes for a {} key",
                input.len(),
                algorithm
            )));
        }

        debug!("Deciphering {} bytes using slot {:?}", input.len(), slot);
        let block = decrypt_data(
            &mut self.device,
            input,
            algorithm.to_yubikey_algorithm_id(),
            slot,
        )?;

        let plain = if algorithm.is_rsa() {
            pkcs1::unpad_encryption(&block).map_err(|e| TokenError::Card(e.to_string()))?
        } else {
            // ECDH: the shared secret is the result
            block.to_vec()
        };

        fit(plain, max_out)
    }
}
