//! Bounded input reading and output writing for operations

use std::fs::File;
use std::io::{self, Read, Write};

use crate::error::{YkcryptError, YkcryptResult};
use crate::model::{InputSource, OutputSink};

/// Read at most `max` bytes; more input is an error, never a truncation
pub fn read_bounded<R: Read>(reader: R, max: usize) -> YkcryptResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(max);
    reader
        .take(max as u64 + 1)
        .read_to_end(&mut buf)
        .map_err(|e| YkcryptError::InputMissingOrUnreadable {
            reason: e.to_string(),
        })?;

    if buf.len() > max {
        return Err(YkcryptError::InputTooLarge {
            len: buf.len(),
            max,
        });
    }
    Ok(buf)
}

pub fn read_input(source: &InputSource, max: usize) -> YkcryptResult<Vec<u8>> {
    match source {
        InputSource::Stdin => read_bounded(io::stdin().lock(), max),
        InputSource::File(path) => {
            let file = File::open(path).map_err(|e| YkcryptError::InputMissingOrUnreadable {
                reason: format!("Unable to open '{}' for reading: {}", path.display(), e),
            })?;
            read_bounded(file, max)
        }
    }
}

/// Write `bytes` as lowercase hex followed by a newline
pub fn write_hex<W: Write>(mut writer: W, bytes: &[u8]) -> io::Result<()> {
    writeln!(writer, "{}", hex::encode(bytes))?;
    writer.flush()
}

pub fn write_output(sink: &OutputSink, bytes: &[u8]) -> YkcryptResult<()> {
    match sink {
        OutputSink::Stdout => {
            write_hex(io::stdout().lock(), bytes).map_err(|e| YkcryptError::OutputUnwritable {
                reason: e.to_string(),
            })
        }
        OutputSink::File(path) => {
            let mut file = File::create(path).map_err(|e| YkcryptError::OutputUnwritable {
                reason: format!("Unable to open '{}' for writing: {}", path.display(), e),
            })?;
            file.write_all(bytes)
                .and_then(|()| file.flush())
                .map_err(|e| YkcryptError::OutputUnwritable {
                    reason: format!("Unable to write '{}': {}", path.display(), e),
                })
        }
    }
}
