//! Bit decoding (strict mode)

use crate::classifier::{classify_mark, classify_segments, is_repeat_code};
use crate::error::IrError;
use crate::segment::{first_frame, split_frames};
use crate::types::{EdgeSequence, Frame, Protocol, Segment, SegmentKind};

#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// Decode the first frame of `edges` as `protocol`.
///
/// Decoding is all-or-nothing: when any mark fits neither bit window the
/// result is [`Frame::unknown`] rather than a partial frame. Use
/// [`try_decode`] to learn why decoding failed.
pub fn decode(protocol: Protocol, edges: &EdgeSequence) -> Frame {
    if protocol == Protocol::Unknown {
        return Frame::unknown();
    }

    match try_decode(protocol, edges) {
        Ok(frame) => frame,
        Err(_e) => {
            #[cfg(feature = "logging")]
            warn!("Failed to decode {} frame: {}", protocol, _e);
            Frame::unknown()
        }
    }
}

/// Decode the first frame of `edges` as `protocol`, reporting the failure
pub fn try_decode(protocol: Protocol, edges: &EdgeSequence) -> Result<Frame, IrError> {
    try_decode_segments(protocol, &first_frame(edges))
}

/// Decode one frame's segments as `protocol`.
///
/// Each mark yields one bit; the space after it is not checked since it
/// is the same for both bit values.
pub fn try_decode_segments(protocol: Protocol, segments: &[Segment]) -> Result<Frame, IrError> {
    let timing = protocol
        .timing()
        .ok_or(IrError::UnsupportedProtocol(protocol))?;

    if protocol == Protocol::Nec && is_repeat_code(segments) {
        return Ok(Frame::repeat());
    }

    let bits = segments
        .iter()
        .filter(|s| s.kind == SegmentKind::Mark)
        .enumerate()
        .map(|(index, mark)| {
            classify_mark(&timing, mark.duration_us).ok_or(IrError::UnmatchedMark {
                index,
                duration_us: mark.duration_us,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if bits.is_empty() {
        return Err(IrError::EmptyFrame);
    }

    #[cfg(feature = "logging")]
    debug!("Decoded {} bits as {}", bits.len(), protocol);

    Ok(Frame::data(protocol, bits))
}

/// Classify and decode the first frame of `edges`
pub fn decode_edges(edges: &EdgeSequence) -> Frame {
    decode(crate::classifier::classify(edges), edges)
}

/// Classify and decode every frame in `edges`.
///
/// A capture holding an NEC data frame followed by repeat codes yields the
/// data frame followed by one repeat frame per code.
pub fn decode_all(edges: &EdgeSequence) -> Vec<Frame> {
    split_frames(edges)
        .iter()
        .map(|segments| {
            let protocol = classify_segments(segments);
            if protocol == Protocol::Unknown {
                return Frame::unknown();
            }
            try_decode_segments(protocol, segments).unwrap_or_else(|_e| {
                #[cfg(feature = "logging")]
                warn!("Failed to decode {} frame: {}", protocol, _e);
                Frame::unknown()
            })
        })
        .collect()
}
