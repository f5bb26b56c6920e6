//! Gap segmentation of captured edge sequences

use crate::types::{EdgeSequence, Segment, SegmentKind};

#[cfg(feature = "logging")]
use tracing::debug;

/// Split a sequence into per-frame segment runs.
///
/// A segment longer than [`MAX_GAP_US`](crate::constants::MAX_GAP_US) ends
/// the current frame and is not part of either neighbour. Every run starts
/// with a mark: idle stretches before the first mark carry no information.
///
/// A single capture may hold a data frame followed by repeat codes; whether
/// the later runs mean anything is up to the protocol.
pub fn split_frames(edges: &EdgeSequence) -> Vec<Vec<Segment>> {
    let mut frames = Vec::new();
    let mut current: Vec<Segment> = Vec::new();

    for segment in edges.segments() {
        if segment.is_gap() {
            if !current.is_empty() {
                frames.push(std::mem::take(&mut current));
            }
            continue;
        }
        if current.is_empty() && segment.kind == SegmentKind::Space {
            continue;
        }
        current.push(segment);
    }
    if !current.is_empty() {
        frames.push(current);
    }

    #[cfg(feature = "logging")]
    debug!(
        "Split {} edges into {} frame(s)",
        edges.len(),
        frames.len()
    );

    frames
}

/// Segments of the first frame only
pub fn first_frame(edges: &EdgeSequence) -> Vec<Segment> {
    split_frames(edges).into_iter().next().unwrap_or_default()
}
