//! End-to-end sign / decipher pipeline

use tracing::{debug, info};

use crate::error::YkcryptResult;
use crate::io::{read_input, write_output};
use crate::model::{CryptConfig, ObjectId, OperationRequest, Secret, MAX_IO_BUFFER};
use crate::ports::{SecretReader, TokenCatalog, TokenDriver};

use super::authorize::authorize;
use super::dispatch::execute;
use super::resolve::{resolve_credential, resolve_key};
use super::secret_prompt::obtain_secret;
use super::session::Session;

/// Run one credential-gated operation described by `config`
///
/// Input is read and the output target validated before the token is
/// touched. The session is released before the result is written, on
/// success and on every failure.
///
/// # Returns
///
/// The bytes produced by the token, as written to the output sink.
pub fn run_crypt_operation<D, R>(
    driver: &mut D,
    reader: &mut R,
    config: CryptConfig,
) -> YkcryptResult<Vec<u8>>
where
    D: TokenDriver,
    R: SecretReader + ?Sized,
{
    let CryptConfig {
        device,
        key_id,
        pin,
        operation,
        hash,
        input,
        output,
    } = config;

    let request = OperationRequest::new(operation, hash, input, output)?;
    let data = read_input(request.input(), MAX_IO_BUFFER)?;
    debug!("Read {} bytes of input", data.len());

    let result = Session::run(driver, device, |catalog| {
        operate(catalog, reader, key_id.as_ref(), pin, &request, &data)
    })?;

    write_output(request.output(), &result)?;
    Ok(result)
}

fn operate<C, R>(
    catalog: &mut C,
    reader: &mut R,
    key_id: Option<&ObjectId>,
    pin: Option<Secret>,
    request: &OperationRequest,
    data: &[u8],
) -> YkcryptResult<Vec<u8>>
where
    C: TokenCatalog + ?Sized,
    R: SecretReader + ?Sized,
{
    let key = resolve_key(catalog, key_id)?;
    let credential = resolve_credential(catalog, &key)?;
    info!("{} with key {}", request.kind(), key.id());

    let secret = obtain_secret(reader, &credential, pin)?;
    let mut authorized = authorize(catalog, &credential, secret)?;

    execute(&mut authorized, &key, request, data)
}
