mod algorithm;
mod config;
mod credential;
mod key_object;
mod object_id;
mod operation;
mod secret;

pub use algorithm::{AlgorithmError, KeyAlgorithm};
pub use config::CryptConfig;
pub use credential::CredentialObject;
pub use key_object::KeyObject;
pub use object_id::{ObjectId, ObjectIdError};
pub use operation::{
    HashKind, InputSource, OperationKind, OperationRequest, OutputSink, MAX_IO_BUFFER,
};
pub use secret::Secret;
