//! Pulse train encoding

use crate::error::IrError;
use crate::types::{Frame, Protocol, Pulse, PulseTrain};

/// Encode a frame into a pulse train
///
/// Every bit becomes exactly one pulse:
/// 1. Mark: the protocol's long mark for `1`, short mark for `0`
/// 2. Space: one protocol unit, whatever the bit
///
/// Nominal durations are used exactly. No leader or trailer is added; if a
/// device expects one it must already be part of the frame's bits.
pub fn encode(protocol: Protocol, frame: &Frame) -> Result<PulseTrain, IrError> {
    let timing = protocol
        .timing()
        .ok_or(IrError::UnsupportedProtocol(protocol))?;

    let pulses: Vec<Pulse> = frame
        .bits
        .iter()
        .map(|&bit| Pulse::new(timing.mark_for(bit), timing.unit_us))
        .collect();

    if pulses.is_empty() {
        return Err(IrError::EmptyPulseTrain);
    }

    Ok(PulseTrain::from_pulses(pulses))
}

/// Encode a frame using its own protocol tag
pub fn encode_frame(frame: &Frame) -> Result<PulseTrain, IrError> {
    encode(frame.protocol, frame)
}

/// Builder for assembling frames bit by bit or byte by byte
pub struct FrameBuilder {
    protocol: Protocol,
    bits: Vec<bool>,
}

impl FrameBuilder {
    /// Create a new frame builder
    pub fn new(protocol: Protocol) -> Self {
        Self {
            protocol,
            bits: Vec::new(),
        }
    }

    /// Append one bit
    pub fn bit(mut self, bit: bool) -> Self {
        self.bits.push(bit);
        self
    }

    /// Append bits in order
    pub fn bits(mut self, bits: &[bool]) -> Self {
        self.bits.extend_from_slice(bits);
        self
    }

    /// Append a byte, least significant bit first
    pub fn byte(mut self, byte: u8) -> Self {
        self.bits.extend((0..8).map(|i| (byte >> i) & 1 == 1));
        self
    }

    /// Append bytes, each least significant bit first
    pub fn bytes(self, bytes: &[u8]) -> Self {
        bytes.iter().fold(self, |builder, &b| builder.byte(b))
    }

    /// Build the frame struct without encoding
    pub fn build_struct(self) -> Frame {
        Frame::data(self.protocol, self.bits)
    }

    /// Build and encode the frame
    pub fn build(self) -> Result<PulseTrain, IrError> {
        encode_frame(&self.build_struct())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_aeha_byte() {
        let train = FrameBuilder::new(Protocol::Aeha).byte(0xA5).build().unwrap();

        let marks: Vec<u32> = train.iter().map(|p| p.mark_us).collect();
        assert_eq!(marks, vec![425, 141, 425, 141, 141, 425, 141, 425]);
        assert!(train.iter().all(|p| p.space_us == 425));
    }

    #[test]
    fn test_output_is_two_durations_per_bit() {
        let frame = FrameBuilder::new(Protocol::Sony)
            .bits(&[true, false, false])
            .build_struct();
        let train = encode(Protocol::Sony, &frame).unwrap();

        assert_eq!(train.durations(), vec![600, 600, 300, 600, 300, 600]);
    }

    #[test]
    fn test_nec_marks() {
        let train = FrameBuilder::new(Protocol::Nec)
            .bit(true)
            .bit(false)
            .build()
            .unwrap();
        assert_eq!(train.pulses(), &[Pulse::new(562, 562), Pulse::new(281, 562)]);
    }

    #[test]
    fn test_encode_unknown_fails() {
        let frame = FrameBuilder::new(Protocol::Aeha).byte(0x01).build_struct();
        assert_eq!(
            encode(Protocol::Unknown, &frame),
            Err(IrError::UnsupportedProtocol(Protocol::Unknown))
        );
    }

    #[test]
    fn test_encode_empty_fails() {
        assert_eq!(
            FrameBuilder::new(Protocol::Nec).build(),
            Err(IrError::EmptyPulseTrain)
        );
        assert_eq!(encode_frame(&Frame::repeat()), Err(IrError::EmptyPulseTrain));
    }
}
