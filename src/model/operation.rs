//! Operation request types

use std::fmt;
use std::path::PathBuf;

use crate::error::{YkcryptError, YkcryptResult};

/// Size of the staging buffers for operation input and output
pub const MAX_IO_BUFFER: usize = 1024;

/// Private-key operation to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Sign,
    Decipher,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Sign => f.write_str("Compute signature"),
            OperationKind::Decipher => f.write_str("Decrypt"),
        }
    }
}

/// How signature input is to be treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HashKind {
    /// Raw data; the token side digests it
    #[default]
    Raw,
    /// Input is a precomputed SHA-1 digest
    Sha1,
    /// Input is a precomputed SHA-256 digest
    Sha256,
}

impl HashKind {
    pub fn is_precomputed(self) -> bool {
        !matches!(self, HashKind::Raw)
    }

    /// Expected input length for precomputed digests
    pub fn digest_len(self) -> Option<usize> {
        match self {
            HashKind::Raw => None,
            HashKind::Sha1 => Some(20),
            HashKind::Sha256 => Some(32),
        }
    }
}

/// Where operation input comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
}

/// Where operation output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    /// Raw bytes written to a file
    File(PathBuf),
    /// Hexadecimal text written to standard output
    Stdout,
}

impl InputSource {
    /// `-` selects standard input
    pub fn from_arg(arg: PathBuf) -> Self {
        if arg.as_os_str() == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(arg)
        }
    }
}

impl OutputSink {
    /// `-` selects standard output
    pub fn from_arg(arg: PathBuf) -> Self {
        if arg.as_os_str() == "-" {
            OutputSink::Stdout
        } else {
            OutputSink::File(arg)
        }
    }
}

/// A single validated operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRequest {
    kind: OperationKind,
    hash: HashKind,
    input: InputSource,
    output: OutputSink,
}

impl OperationRequest {
    /// Check that the sources the operation needs are configured
    ///
    /// Both operations need an input. Signing needs an explicit output,
    /// deciphering falls back to standard output.
    pub fn new(
        kind: OperationKind,
        hash: HashKind,
        input: Option<InputSource>,
        output: Option<OutputSink>,
    ) -> YkcryptResult<Self> {
        let input = input.ok_or_else(|| YkcryptError::InputMissingOrUnreadable {
            reason: "No input file specified".to_string(),
        })?;

        let output = match (kind, output) {
            (_, Some(output)) => output,
            (OperationKind::Sign, None) => {
                return Err(YkcryptError::OutputUnwritable {
                    reason: "No output file specified".to_string(),
                })
            }
            (OperationKind::Decipher, None) => OutputSink::Stdout,
        };

        Ok(Self {
            kind,
            hash,
            input,
            output,
        })
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn hash(&self) -> HashKind {
        self.hash
    }

    pub fn input(&self) -> &InputSource {
        &self.input
    }

    pub fn output(&self) -> &OutputSink {
        &self.output
    }
}
