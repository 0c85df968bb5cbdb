//! Use cases (orchestration)
//!
//! Each step of a run lives in its own module and talks to the token only
//! through ports. [`run_crypt_operation`] strings them together.

mod authorize;
mod crypt;
mod dispatch;
mod resolve;
mod secret_prompt;
mod session;

pub use authorize::{authorize, Authorized};
pub use crypt::run_crypt_operation;
pub use dispatch::{decipher, execute, sign};
pub use resolve::{resolve_credential, resolve_key};
pub use secret_prompt::{obtain_secret, prompt_for};
pub use session::Session;
