//! Pure helpers used by adapters

pub mod pkcs1;
