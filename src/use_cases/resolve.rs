//! Key and credential resolution against a bound catalog

use tracing::debug;

use crate::error::{TokenError, YkcryptError, YkcryptResult};
use crate::model::{CredentialObject, KeyObject, ObjectId};
use crate::ports::KeyDirectory;

/// Locate the private key to operate with
///
/// Keys are enumerated first; an empty catalog is an enumeration failure.
/// Without `key_id` the first enumerated key is used.
pub fn resolve_key<C>(catalog: &mut C, key_id: Option<&ObjectId>) -> YkcryptResult<KeyObject>
where
    C: KeyDirectory + ?Sized,
{
    let keys = catalog
        .enumerate_private_keys()
        .map_err(|source| YkcryptError::KeyEnumerationFailed { source })?;

    let Some(first) = keys.into_iter().next() else {
        return Err(YkcryptError::KeyEnumerationFailed {
            source: TokenError::ObjectNotFound,
        });
    };

    let key = match key_id {
        Some(id) => catalog
            .find_key_by_id(id)
            .map_err(|source| YkcryptError::KeyNotFound {
                key_id: id.clone(),
                source,
            })?,
        None => first,
    };

    debug!(
        "Using private key {} '{}' ({})",
        key.id(),
        key.label(),
        key.algorithm()
    );
    Ok(key)
}

/// Locate the PIN object that authorizes `key`
pub fn resolve_credential<C>(catalog: &mut C, key: &KeyObject) -> YkcryptResult<CredentialObject>
where
    C: KeyDirectory + ?Sized,
{
    catalog
        .find_credential_by_reference(key.auth_id())
        .map_err(|source| YkcryptError::CredentialNotFound { source })
}
