//! Private-key operation dispatch

use tracing::{debug, info};

use crate::error::{YkcryptError, YkcryptResult};
use crate::model::{HashKind, KeyObject, OperationKind, OperationRequest, MAX_IO_BUFFER};
use crate::ports::PrivateKeyOperator;

use super::authorize::Authorized;

fn check_input(input: &[u8]) -> YkcryptResult<()> {
    if input.len() > MAX_IO_BUFFER {
        return Err(YkcryptError::InputTooLarge {
            len: input.len(),
            max: MAX_IO_BUFFER,
        });
    }
    Ok(())
}

/// Sign `input` with `key` on the authorized catalog
///
/// `hash` says whether `input` is already a digest.
pub fn sign<C>(
    authorized: &mut Authorized<'_, C>,
    key: &KeyObject,
    hash: HashKind,
    input: &[u8],
) -> YkcryptResult<Vec<u8>>
where
    C: PrivateKeyOperator + ?Sized,
{
    check_input(input)?;
    debug!(
        "Signing {} bytes of {} with key {} ({})",
        input.len(),
        if hash.is_precomputed() { "digest" } else { "data" },
        key.id(),
        key.label()
    );

    authorized
        .catalog()
        .compute_signature(key, hash, input, MAX_IO_BUFFER)
        .map_err(|source| YkcryptError::CryptoOpFailed {
            operation: OperationKind::Sign,
            source,
        })
}

/// Decrypt `input` with `key` on the authorized catalog
pub fn decipher<C>(
    authorized: &mut Authorized<'_, C>,
    key: &KeyObject,
    input: &[u8],
) -> YkcryptResult<Vec<u8>>
where
    C: PrivateKeyOperator + ?Sized,
{
    check_input(input)?;
    debug!("Deciphering {} bytes with key {}", input.len(), key.id());

    authorized
        .catalog()
        .decipher(key, input, MAX_IO_BUFFER)
        .map_err(|source| YkcryptError::CryptoOpFailed {
            operation: OperationKind::Decipher,
            source,
        })
}

/// Run the operation named by `request`
pub fn execute<C>(
    authorized: &mut Authorized<'_, C>,
    key: &KeyObject,
    request: &OperationRequest,
    input: &[u8],
) -> YkcryptResult<Vec<u8>>
where
    C: PrivateKeyOperator + ?Sized,
{
    let output = match request.kind() {
        OperationKind::Sign => sign(authorized, key, request.hash(), input)?,
        OperationKind::Decipher => decipher(authorized, key, input)?,
    };
    info!("{} produced {} bytes", request.kind(), output.len());
    Ok(output)
}
