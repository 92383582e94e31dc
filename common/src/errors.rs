//! Module errors
use thiserror::Error;

/// Errors raised while decoding the `x,y,z*` accelerometer stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Record does not have exactly three integer fields.
    #[error("malformed record `{0}`")]
    Malformed(String),

    /// Record bytes are not valid UTF-8.
    #[error("record is not valid utf-8")]
    InvalidEncoding,
}

/// Represents the different types of errors a sensor feed can raise.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SensorError {
    /// Feed cannot be connected. Fatal at startup.
    #[error("sensor unavailable: {0}")]
    SensorUnavailable(String),

    /// Error indicating that the listener was not found.
    #[error("listener not found: {0}")]
    ListenerNotFound(String),

    /// Received data could not be decoded into a sample.
    #[error("decode error: {0}")]
    Decode(#[from] CodecError),

    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for SensorError {
    fn from(value: std::io::Error) -> Self {
        SensorError::Io(value.to_string())
    }
}
