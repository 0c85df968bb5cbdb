//! Credential verification gate

use std::fmt;

use tracing::info;

use crate::error::{TokenError, YkcryptError, YkcryptResult};
use crate::model::{CredentialObject, Secret};
use crate::ports::CredentialVerifier;

/// Proof that a credential was verified on a bound catalog
///
/// Only [`authorize`] can construct it. The proof holds the catalog it was
/// obtained on, so the private-key primitives in `dispatch` can only run
/// against that same binding.
pub struct Authorized<'c, C: ?Sized> {
    catalog: &'c mut C,
}

impl<C: ?Sized> Authorized<'_, C> {
    pub(super) fn catalog(&mut self) -> &mut C {
        self.catalog
    }
}

impl<C: ?Sized> fmt::Debug for Authorized<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authorized").finish_non_exhaustive()
    }
}

/// Verify `secret` against `credential` exactly once
///
/// The secret is consumed and wiped after the single verification attempt,
/// whatever the outcome.
pub fn authorize<'c, C>(
    catalog: &'c mut C,
    credential: &CredentialObject,
    secret: Secret,
) -> YkcryptResult<Authorized<'c, C>>
where
    C: CredentialVerifier + ?Sized,
{
    let outcome = catalog.verify_credential(credential, secret.as_bytes());
    drop(secret);

    match outcome {
        Ok(()) => {
            info!("PIN code correct.");
            Ok(Authorized { catalog })
        }
        Err(source @ TokenError::PinIncorrect { .. }) => {
            Err(YkcryptError::CredentialIncorrect { source })
        }
        Err(source @ TokenError::PinBlocked) => Err(YkcryptError::CredentialBlocked { source }),
        Err(source) => Err(YkcryptError::AuthorizationFailed { source }),
    }
}
