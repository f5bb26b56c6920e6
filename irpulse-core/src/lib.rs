//! # irpulse Core
//!
//! Capture, classification and regeneration of infrared remote-control
//! signals on pulse-timing hardware.
//!
//! ## Modules
//!
//! - `constants`: Timing constants and per-protocol timing tables
//! - `types`: Core types (RawEdge, EdgeSequence, Frame, PulseTrain)
//! - `classifier`: Protocol identification by pulse timing
//! - `decoder`: Bit extraction from edge sequences
//! - `encoder`: Pulse train generation
//! - `segment`: Frame segmentation on inactivity gaps
//! - `sampler`: Edge capture from a receive line
//! - `transceiver`: Send/record orchestration
//! - `device`: Hardware boundary traits and simulated devices
//! - `export`: JSON export document

#![warn(missing_docs)]

pub mod classifier;
pub mod constants;
pub mod decoder;
pub mod device;
pub mod encoder;
pub mod error;
pub mod export;
pub mod sampler;
pub mod segment;
pub mod transceiver;
pub mod types;

// Re-export commonly used types
pub use error::IrError;
pub use types::{EdgeSequence, Frame, Level, Protocol, Pulse, PulseTrain, RawEdge};

/// Result type alias for irpulse operations
pub type Result<T> = core::result::Result<T, IrError>;
