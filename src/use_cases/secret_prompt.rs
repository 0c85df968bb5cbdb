//! PIN acquisition for a credential

use tracing::warn;

use crate::error::{YkcryptError, YkcryptResult};
use crate::model::{CredentialObject, Secret};
use crate::ports::SecretReader;

/// Prompt shown to the operator for `credential`
pub fn prompt_for(credential: &CredentialObject) -> String {
    format!("Enter PIN [{}]: ", credential.label())
}

/// Get the secret that unlocks `credential`
///
/// A `supplied` secret is returned as is, without a length check; the token
/// decides whether it is acceptable. Otherwise the operator is prompted
/// until an entry with a length inside the credential's bounds is given.
/// An empty entry cancels.
pub fn obtain_secret<R>(
    reader: &mut R,
    credential: &CredentialObject,
    supplied: Option<Secret>,
) -> YkcryptResult<Secret>
where
    R: SecretReader + ?Sized,
{
    if let Some(secret) = supplied {
        return Ok(secret);
    }

    let prompt = prompt_for(credential);
    loop {
        let secret = reader
            .read_secret(&prompt)
            .map_err(|e| YkcryptError::PromptFailed {
                reason: e.to_string(),
            })?;

        if secret.is_empty() {
            return Err(YkcryptError::SecretAborted);
        }
        if credential.accepts_length(secret.len()) {
            return Ok(secret);
        }
        warn!(
            "PIN must be between {} and {} characters long",
            credential.min_length(),
            credential.max_length()
        );
    }
}
