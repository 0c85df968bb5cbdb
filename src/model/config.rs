use super::{HashKind, InputSource, ObjectId, OperationKind, OutputSink, Secret};

/// Configuration of one run, built once at entry
///
/// The value is moved into the pipeline; nothing reads configuration from
/// process-wide state.
#[derive(Debug)]
pub struct CryptConfig {
    /// Index of the reader holding the token
    pub device: usize,
    /// Key to use; the first enumerated key when absent
    pub key_id: Option<ObjectId>,
    /// PIN supplied out-of-band; prompted for when absent
    pub pin: Option<Secret>,
    pub operation: OperationKind,
    pub hash: HashKind,
    pub input: Option<InputSource>,
    pub output: Option<OutputSink>,
}

impl CryptConfig {
    pub fn new(operation: OperationKind) -> Self {
        Self {
            device: 0,
            key_id: None,
            pin: None,
            operation,
            hash: HashKind::default(),
            input: None,
            output: None,
        }
    }
}
