use crate::adapters::{PivTokenDriver, TerminalSecretReader};
use crate::error::YkcryptResult;
use crate::use_cases::run_crypt_operation;

pub use crate::model::*;

/// Sign or decipher with a PIV token attached to a PC/SC reader
///
/// The PIN is taken from `config.pin` or prompted for on the terminal.
pub fn run(config: CryptConfig) -> YkcryptResult<Vec<u8>> {
    let mut driver = PivTokenDriver;
    let mut reader = TerminalSecretReader;
    run_crypt_operation(&mut driver, &mut reader, config)
}
