//! No-echo PIN entry on the controlling terminal

use std::io;

use crate::model::Secret;
use crate::ports::SecretReader;

#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalSecretReader;

impl SecretReader for TerminalSecretReader {
    fn read_secret(&mut self, prompt: &str) -> io::Result<Secret> {
        rpassword::prompt_password(prompt).map(Secret::from)
    }
}
