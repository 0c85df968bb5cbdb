use std::io;

use crate::model::Secret;

/// Source of interactively entered secrets
pub trait SecretReader {
    /// Show `prompt` and read one line without echoing it
    fn read_secret(&mut self, prompt: &str) -> io::Result<Secret>;
}
