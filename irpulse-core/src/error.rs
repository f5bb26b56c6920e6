//! Error types for irpulse operations

use crate::types::Protocol;

/// Errors that can occur while capturing, decoding, encoding or sending
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IrError {
    /// The hardware boundary cannot be reached
    #[error("Hardware connection unavailable")]
    HardwareUnavailable,

    /// The hardware boundary rejected a request
    #[error("Device error: {0}")]
    Device(String),

    /// Protocol tag cannot be encoded
    #[error("Unsupported protocol: {0}")]
    UnsupportedProtocol(Protocol),

    /// Encoding produced nothing to transmit
    #[error("Encoded pulse train is empty")]
    EmptyPulseTrain,

    /// A mark fits neither the long nor the short window
    #[error("Mark {index} of {duration_us}us matches no bit class")]
    UnmatchedMark {
        /// Position of the mark within the frame.
        index: usize,
        /// The observed mark duration.
        duration_us: u32,
    },

    /// Nothing to decode before the sequence ended
    #[error("Frame contains no marks")]
    EmptyFrame,

    /// Export format number outside the supported set
    #[error("Unsupported or unknown format: {0}")]
    InvalidFormat(i64),

    /// A bit value other than 0 or 1
    #[error("Invalid bit value: {0}")]
    InvalidBit(i64),

    /// The transmitter stayed busy past the configured bound
    #[error("Transmission did not complete within {0} ms")]
    TransmitTimeout(u64),
}
