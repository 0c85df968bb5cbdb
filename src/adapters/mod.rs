//! Adapters - concrete implementations of ports (traits)

mod piv_token;
mod terminal_prompt;

#[cfg(test)]
pub mod fake_token;

pub use piv_token::PivTokenDriver;
pub use terminal_prompt::TerminalSecretReader;
