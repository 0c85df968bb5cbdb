//! Sign or decipher data with a private key held on a PIV token
//!
//! A run opens a session on one reader, resolves a private key and the PIN
//! that guards it, verifies the PIN once and performs a single signature
//! or decryption. See [`api::run`] for the hardware entry point and
//! [`use_cases::run_crypt_operation`] for the port-generic pipeline.

mod adapters;
pub mod api;
pub mod error;
pub mod io;
mod logic;
pub mod model;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use error::{exit_code, TokenError, TokenResult, YkcryptError, YkcryptResult};

pub use api::run;
