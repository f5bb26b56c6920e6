//! Protocol classification by pulse timing
//!
//! Every bit is a variable-length mark followed by a space of one protocol
//! unit, so the spaces give the unit away. A protocol matches when the
//! observed unit falls within tolerance of its nominal unit and every mark
//! fits one of its two mark windows. Protocols are tried in
//! [`PRIORITY`] order and the first match wins.

use crate::constants::{within_tolerance, Timing, PRIORITY, T_NEC_REPEAT};
use crate::segment::first_frame;
use crate::types::{EdgeSequence, Protocol, Segment, SegmentKind};

#[cfg(feature = "logging")]
use tracing::debug;

/// Identify the protocol of the first frame in `edges`
pub fn classify(edges: &EdgeSequence) -> Protocol {
    classify_segments(&first_frame(edges))
}

/// Identify the protocol of one frame's segments
pub fn classify_segments(segments: &[Segment]) -> Protocol {
    let Some(unit) = observed_unit(segments) else {
        return Protocol::Unknown;
    };

    for protocol in PRIORITY {
        if protocol == Protocol::Nec && is_repeat_code(segments) {
            #[cfg(feature = "logging")]
            debug!("Classified NEC repeat code");
            return Protocol::Nec;
        }

        let Some(timing) = protocol.timing() else {
            continue;
        };
        if within_tolerance(timing.unit_us, unit) && marks_fit(&timing, segments) {
            #[cfg(feature = "logging")]
            debug!("Classified {} (observed unit {}us)", protocol, unit);
            return protocol;
        }
    }

    #[cfg(feature = "logging")]
    debug!("No protocol matched observed unit {}us", unit);

    Protocol::Unknown
}

/// Whether a frame is an NEC repeat code: a single mark of about 2250us
pub fn is_repeat_code(segments: &[Segment]) -> bool {
    let mut marks = segments.iter().filter(|s| s.kind == SegmentKind::Mark);
    match (marks.next(), marks.next()) {
        (Some(mark), None) => within_tolerance(T_NEC_REPEAT, mark.duration_us),
        _ => false,
    }
}

/// Decide which bit a mark encodes under `timing`.
///
/// Returns `None` when the mark fits neither window. Where the long and
/// short windows overlap the nearer nominal wins, ties going to the long
/// mark.
pub fn classify_mark(timing: &Timing, duration_us: u32) -> Option<bool> {
    let long = within_tolerance(timing.long_mark_us, duration_us);
    let short = within_tolerance(timing.short_mark_us, duration_us);

    match (long, short) {
        (true, false) => Some(true),
        (false, true) => Some(false),
        (true, true) => {
            let to_long = duration_us.abs_diff(timing.long_mark_us);
            let to_short = duration_us.abs_diff(timing.short_mark_us);
            Some(to_long <= to_short)
        }
        (false, false) => None,
    }
}

/// Median interior space, or the longest mark when the frame has no space
fn observed_unit(segments: &[Segment]) -> Option<u32> {
    let mut spaces: Vec<u32> = segments
        .iter()
        .filter(|s| s.kind == SegmentKind::Space)
        .map(|s| s.duration_us)
        .collect();

    if spaces.is_empty() {
        return segments
            .iter()
            .filter(|s| s.kind == SegmentKind::Mark)
            .map(|s| s.duration_us)
            .max();
    }

    spaces.sort_unstable();
    Some(spaces[(spaces.len() - 1) / 2])
}

fn marks_fit(timing: &Timing, segments: &[Segment]) -> bool {
    segments
        .iter()
        .filter(|s| s.kind == SegmentKind::Mark)
        .all(|s| classify_mark(timing, s.duration_us).is_some())
}
