//! Timing constants and per-protocol timing tables
//!
//! All durations are in microseconds. These values must match bit-exactly
//! for codes to interoperate with other tools using the same protocols.

use crate::types::{Level, Protocol};

/// An inter-edge duration strictly greater than this marks the end of a frame
pub const MAX_GAP_US: u32 = 10_000;

/// AEHA unit duration
pub const T_AEHA: u32 = 425;

/// NEC unit duration
pub const T_NEC: u32 = 562;

/// NEC repeat-code mark duration
pub const T_NEC_REPEAT: u32 = 2_250;

/// SONY unit duration
pub const T_SONY: u32 = 600;

/// Accepted relative deviation from a nominal duration (± 35%)
pub const TOLERANCE: f64 = 0.35;

/// [`TOLERANCE`] in whole percent, used for exact integer window checks
pub const TOLERANCE_PERCENT: u32 = 35;

/// Default capture timeout in milliseconds
pub const DEFAULT_CAPTURE_TIMEOUT_MS: u64 = 5_000;

/// Interval at which the capture loop wakes to inspect received edges
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Interval at which the transmit path re-checks the busy flag
pub const DEFAULT_BUSY_POLL_MS: u64 = 1;

/// Upper bound on how long a transmission may stay busy
pub const DEFAULT_TRANSMIT_TIMEOUT_MS: u64 = 10_000;

/// Capacity of the edge channel between the line listener and the capture loop
pub const EDGE_CHANNEL_CAPACITY: usize = 4_096;

/// Highest signal-line number accepted by the hardware
pub const MAX_LINE: u8 = 27;

/// Default transmit line
pub const DEFAULT_TX_LINE: u8 = 13;

/// Default receive line
pub const DEFAULT_RX_LINE: u8 = 4;

/// Line level while carrier is detected.
///
/// IR receiver modules pull their output low while they see carrier, so a
/// segment that ends on a rising edge was a mark.
pub const MARK_LEVEL: Level = Level::Low;

/// Mark/space durations for one protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Fixed space duration, and the nominal unit of the protocol
    pub unit_us: u32,
    /// Mark duration encoding a `1`
    pub long_mark_us: u32,
    /// Mark duration encoding a `0`
    pub short_mark_us: u32,
}

impl Timing {
    /// Mark duration for a bit value
    pub const fn mark_for(&self, bit: bool) -> u32 {
        if bit {
            self.long_mark_us
        } else {
            self.short_mark_us
        }
    }
}

/// AEHA: long mark = T, short mark = T/3
pub const AEHA_TIMING: Timing = Timing {
    unit_us: T_AEHA,
    long_mark_us: T_AEHA,
    short_mark_us: T_AEHA / 3,
};

/// NEC: long mark = T, short mark = T/2
pub const NEC_TIMING: Timing = Timing {
    unit_us: T_NEC,
    long_mark_us: T_NEC,
    short_mark_us: T_NEC / 2,
};

/// SONY: long mark = T, short mark = T/2
pub const SONY_TIMING: Timing = Timing {
    unit_us: T_SONY,
    long_mark_us: T_SONY,
    short_mark_us: T_SONY / 2,
};

/// Protocols in classification priority order
pub const PRIORITY: [Protocol; 3] = [Protocol::Aeha, Protocol::Nec, Protocol::Sony];

/// Check whether `observed` lies within [`TOLERANCE`] of `nominal`, inclusive
pub const fn within_tolerance(nominal: u32, observed: u32) -> bool {
    let observed = observed as u64 * 100;
    let nominal = nominal as u64;
    observed >= nominal * (100 - TOLERANCE_PERCENT as u64)
        && observed <= nominal * (100 + TOLERANCE_PERCENT as u64)
}
