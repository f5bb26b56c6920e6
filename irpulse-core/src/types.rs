//! Core types for captured edges, decoded frames and pulse trains

use crate::constants::{
    Timing, AEHA_TIMING, MARK_LEVEL, MAX_GAP_US, NEC_TIMING, SONY_TIMING,
};
use crate::error::IrError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Level reported for one observed transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Line went high
    High,
    /// Line went low
    Low,
    /// Watchdog fired with no transition
    Timeout,
}

impl Level {
    /// The opposite real level; `Timeout` has none and maps to itself
    pub const fn inverted(self) -> Self {
        match self {
            Level::High => Level::Low,
            Level::Low => Level::High,
            Level::Timeout => Level::Timeout,
        }
    }
}

/// One observed transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEdge {
    /// Time since the previous edge (or since capture start for the first one)
    pub duration_us: u32,
    /// Level the line entered
    pub level: Level,
}

impl RawEdge {
    /// Create a new edge
    pub const fn new(duration_us: u32, level: Level) -> Self {
        Self { duration_us, level }
    }

    /// Watchdog sentinel edge
    pub const fn timeout(duration_us: u32) -> Self {
        Self::new(duration_us, Level::Timeout)
    }

    /// Whether this is a watchdog sentinel rather than a real transition
    pub const fn is_timeout(&self) -> bool {
        matches!(self.level, Level::Timeout)
    }
}

/// Whether a segment had carrier on the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Carrier present
    Mark,
    /// Line idle
    Space,
}

/// A stretch of constant line level between two edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Mark or space
    pub kind: SegmentKind,
    /// Length of the stretch
    pub duration_us: u32,
}

impl Segment {
    /// Whether this segment is long enough to end a frame
    pub const fn is_gap(&self) -> bool {
        self.duration_us > MAX_GAP_US
    }
}

/// Chronologically ordered edges from one capture
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeSequence(Vec<RawEdge>);

impl EdgeSequence {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Wrap edges already in arrival order
    pub fn from_edges(edges: Vec<RawEdge>) -> Self {
        Self(edges)
    }

    /// Append an edge
    pub fn push(&mut self, edge: RawEdge) {
        self.0.push(edge);
    }

    /// Number of edges
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no edge was recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Edges in arrival order
    pub fn edges(&self) -> &[RawEdge] {
        &self.0
    }

    /// Most recent edge
    pub fn last(&self) -> Option<&RawEdge> {
        self.0.last()
    }

    /// Take ownership of the edges
    pub fn into_edges(self) -> Vec<RawEdge> {
        self.0
    }

    /// Line segments between consecutive edges.
    ///
    /// The first edge is skipped because its duration is measured from
    /// capture start. A watchdog sentinel ends the iteration: it is not a
    /// transition, so nothing after it can be paired up reliably.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.0
            .iter()
            .skip(1)
            .take_while(|edge| !edge.is_timeout())
            .map(|edge| Segment {
                // Entering the mark level means the stretch before it was idle
                kind: if edge.level == MARK_LEVEL {
                    SegmentKind::Space
                } else {
                    SegmentKind::Mark
                },
                duration_us: edge.duration_us,
            })
    }

    /// The edges a receiver observes while `train` is transmitted.
    ///
    /// The final space has no closing edge because the line stays idle.
    pub fn from_pulse_train(train: &PulseTrain) -> Self {
        let mut edges = Vec::with_capacity(train.len() * 2 + 1);
        edges.push(RawEdge::new(0, MARK_LEVEL));

        let last = train.len().saturating_sub(1);
        for (i, pulse) in train.iter().enumerate() {
            edges.push(RawEdge::new(pulse.mark_us, MARK_LEVEL.inverted()));
            if i < last {
                edges.push(RawEdge::new(pulse.space_us, MARK_LEVEL));
            }
        }

        Self(edges)
    }
}

impl From<Vec<RawEdge>> for EdgeSequence {
    fn from(edges: Vec<RawEdge>) -> Self {
        Self(edges)
    }
}

/// Infrared protocol tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    /// No supported protocol matched
    Unknown,
    /// AEHA (Japanese consumer electronics)
    Aeha,
    /// NEC
    Nec,
    /// SONY SIRC
    Sony,
}

impl Protocol {
    /// Numeric code used in export files
    pub const fn format(self) -> u8 {
        match self {
            Protocol::Unknown => 0,
            Protocol::Aeha => 1,
            Protocol::Nec => 2,
            Protocol::Sony => 3,
        }
    }

    /// Parse an export-file format number; only supported protocols are accepted
    pub fn from_format(format: i64) -> Result<Self, IrError> {
        match format {
            1 => Ok(Protocol::Aeha),
            2 => Ok(Protocol::Nec),
            3 => Ok(Protocol::Sony),
            other => Err(IrError::InvalidFormat(other)),
        }
    }

    /// Mark/space timing, `None` for [`Protocol::Unknown`]
    pub const fn timing(self) -> Option<Timing> {
        match self {
            Protocol::Unknown => None,
            Protocol::Aeha => Some(AEHA_TIMING),
            Protocol::Nec => Some(NEC_TIMING),
            Protocol::Sony => Some(SONY_TIMING),
        }
    }

    /// Display name
    pub const fn name(self) -> &'static str {
        match self {
            Protocol::Unknown => "UNKNOWN",
            Protocol::Aeha => "AEHA",
            Protocol::Nec => "NEC",
            Protocol::Sony => "SONY",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded bit frame and the protocol that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Protocol tag
    pub protocol: Protocol,

    /// Bits in transmission order
    pub bits: Vec<bool>,

    /// NEC repeat indicator; carries no bits
    pub repeat: bool,
}

impl Frame {
    /// A data frame
    pub fn data(protocol: Protocol, bits: Vec<bool>) -> Self {
        Self {
            protocol,
            bits,
            repeat: false,
        }
    }

    /// An NEC repeat code
    pub fn repeat() -> Self {
        Self {
            protocol: Protocol::Nec,
            bits: Vec::new(),
            repeat: true,
        }
    }

    /// Result of a failed classification or decode
    pub fn unknown() -> Self {
        Self::data(Protocol::Unknown, Vec::new())
    }

    /// Build a data frame from 0/1 values
    pub fn from_bits(protocol: Protocol, bits: &[u8]) -> Result<Self, IrError> {
        let bits = bits
            .iter()
            .map(|&b| match b {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(IrError::InvalidBit(other as i64)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::data(protocol, bits))
    }

    /// Build a data frame from bytes, each sent least significant bit first
    pub fn from_bytes(protocol: Protocol, bytes: &[u8]) -> Self {
        let bits = bytes
            .iter()
            .flat_map(|&byte| (0..8).map(move |i| (byte >> i) & 1 == 1))
            .collect();
        Self::data(protocol, bits)
    }

    /// Pack bits into bytes, least significant bit first; the last byte is zero padded
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &bit)| acc | (u8::from(bit) << i))
            })
            .collect()
    }

    /// Bits as 0/1 values
    pub fn bit_values(&self) -> Vec<u8> {
        self.bits.iter().map(|&b| u8::from(b)).collect()
    }

    /// Whether decoding failed
    pub fn is_unknown(&self) -> bool {
        self.protocol == Protocol::Unknown
    }

    /// Whether this is a repeat indicator rather than a data frame
    pub fn is_repeat(&self) -> bool {
        self.repeat
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            return write!(f, "{}", self.protocol);
        }
        if self.repeat {
            return write!(f, "{} repeat", self.protocol);
        }

        write!(f, "{} {} bits ", self.protocol, self.bits.len())?;
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        f.write_str(" [")?;
        for (i, byte) in self.to_bytes().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02X}", byte)?;
        }
        f.write_str("]")
    }
}

/// One mark followed by one space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pulse {
    /// Line active
    pub mark_us: u32,
    /// Line idle
    pub space_us: u32,
}

impl Pulse {
    /// Create a new pulse
    pub const fn new(mark_us: u32, space_us: u32) -> Self {
        Self { mark_us, space_us }
    }
}

/// Mark/space pairs ready for transmission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PulseTrain(Vec<Pulse>);

impl PulseTrain {
    /// Wrap pulses in transmission order
    pub fn from_pulses(pulses: Vec<Pulse>) -> Self {
        Self(pulses)
    }

    /// Number of mark/space pairs
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the train carries nothing to transmit
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over pulses
    pub fn iter(&self) -> std::slice::Iter<'_, Pulse> {
        self.0.iter()
    }

    /// Pulses in transmission order
    pub fn pulses(&self) -> &[Pulse] {
        &self.0
    }

    /// Flattened mark, space, mark, space... durations
    pub fn durations(&self) -> Vec<u32> {
        self.0
            .iter()
            .flat_map(|p| [p.mark_us, p.space_us])
            .collect()
    }

    /// Total airtime of the train
    pub fn total_duration_us(&self) -> u64 {
        self.0
            .iter()
            .map(|p| p.mark_us as u64 + p.space_us as u64)
            .sum()
    }

    /// Replay a captured sequence as-is.
    ///
    /// Each mark is paired with the space that follows it. Gaps are clipped
    /// to [`MAX_GAP_US`] and a final mark with no closing edge gets an empty
    /// space.
    pub fn from_edges(edges: &EdgeSequence) -> Self {
        let mut pulses = Vec::new();
        let mut pending_mark: Option<u32> = None;

        for segment in edges.segments() {
            match (segment.kind, pending_mark.take()) {
                (SegmentKind::Mark, previous) => {
                    if let Some(mark) = previous {
                        pulses.push(Pulse::new(mark, 0));
                    }
                    pending_mark = Some(segment.duration_us);
                }
                (SegmentKind::Space, Some(mark)) => {
                    pulses.push(Pulse::new(mark, segment.duration_us.min(MAX_GAP_US)));
                }
                // Space before the first mark
                (SegmentKind::Space, None) => {}
            }
        }
        if let Some(mark) = pending_mark {
            pulses.push(Pulse::new(mark, 0));
        }

        Self(pulses)
    }
}

impl From<Vec<Pulse>> for PulseTrain {
    fn from(pulses: Vec<Pulse>) -> Self {
        Self(pulses)
    }
}

impl<'a> IntoIterator for &'a PulseTrain {
    type Item = &'a Pulse;
    type IntoIter = std::slice::Iter<'a, Pulse>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
