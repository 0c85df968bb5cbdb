use crate::error::TokenResult;
use crate::model::CredentialObject;

pub trait CredentialVerifier {
    /// Verify `secret` against the credential; the slice length is the PIN length
    fn verify_credential(&mut self, credential: &CredentialObject, secret: &[u8])
        -> TokenResult<()>;
}
