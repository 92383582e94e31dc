//! Text codec of the accelerometer stream.
//!
//! Every sample travels as ASCII `"<x>,<y>,<z>*"`, with no length prefix. The
//! trailing `*` is the only framing.

use crate::constants::{FIELD_SEPARATOR, N_AXES, RECORD_DELIMITER};
use crate::errors::CodecError;
use crate::types::Sample;

/// Formats `sample` as a stream record, e.g. `12,-5,300*`
pub fn encode_record(sample: &Sample) -> String {
    format!("{}{}", sample, RECORD_DELIMITER)
}

/// Parses the body of one record (without the delimiter).
pub fn decode_record(record: &str) -> Result<Sample, CodecError> {
    let fields: Vec<&str> = record.trim().split(FIELD_SEPARATOR).collect();
    if fields.len() != N_AXES {
        return Err(CodecError::Malformed(record.to_string()));
    }
    let mut values = [0i32; N_AXES];
    for (value, field) in values.iter_mut().zip(fields) {
        *value = field
            .trim()
            .parse::<i32>()
            .map_err(|_| CodecError::Malformed(record.to_string()))?;
    }
    Ok(Sample::from(values))
}

/// Incremental decoder. Bytes may arrive in arbitrary chunks; partial records
/// are kept until their delimiter shows up.
#[derive(Debug, Default, Clone)]
pub struct RecordDecoder {
    pending: Vec<u8>,
}

impl RecordDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds `bytes` and returns one result per completed record.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<Result<Sample, CodecError>> {
        let mut decoded = Vec::new();
        for &byte in bytes {
            if byte == RECORD_DELIMITER as u8 {
                let record = std::mem::take(&mut self.pending);
                decoded.push(
                    std::str::from_utf8(&record)
                        .map_err(|_| CodecError::InvalidEncoding)
                        .and_then(decode_record),
                );
            } else {
                self.pending.push(byte);
            }
        }
        decoded
    }

    /// Number of buffered bytes belonging to an incomplete record
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
