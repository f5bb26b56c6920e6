//! Fuzzing entry points for irpulse-core
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_decode

use irpulse_core::{EdgeSequence, Level, RawEdge};

/// Interpret fuzz input as edges: three bytes each, a 16-bit duration
/// (little-endian, scaled by 8 to reach past the gap threshold) and a level.
pub fn edges_from_bytes(data: &[u8]) -> EdgeSequence {
    data.chunks_exact(3)
        .map(|chunk| {
            let duration_us = u32::from(u16::from_le_bytes([chunk[0], chunk[1]])) * 8;
            let level = match chunk[2] % 3 {
                0 => Level::Low,
                1 => Level::High,
                _ => Level::Timeout,
            };
            RawEdge::new(duration_us, level)
        })
        .collect::<Vec<_>>()
        .into()
}

pub fn fuzz_decode(data: &[u8]) {
    use irpulse_core::decoder::{decode_all, try_decode};
    use irpulse_core::Protocol;

    let edges = edges_from_bytes(data);

    // Should never panic
    for protocol in [Protocol::Aeha, Protocol::Nec, Protocol::Sony, Protocol::Unknown] {
        let _ = try_decode(protocol, &edges);
    }
    let _ = decode_all(&edges);
}

pub fn fuzz_classify(data: &[u8]) {
    use irpulse_core::classifier::classify;
    use irpulse_core::sampler::CaptureStatus;
    use irpulse_core::PulseTrain;

    let edges = edges_from_bytes(data);

    // Should never panic
    let _ = classify(&edges);
    let _ = CaptureStatus::of(&edges);
    let _ = PulseTrain::from_edges(&edges);
}
