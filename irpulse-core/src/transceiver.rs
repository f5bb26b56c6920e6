//! Sending and recording through the hardware boundary

use crate::constants::{DEFAULT_BUSY_POLL_MS, DEFAULT_TRANSMIT_TIMEOUT_MS, DEFAULT_TX_LINE};
use crate::decoder::decode_edges;
use crate::device::{EdgeSource, PulseSink, WaveId};
use crate::error::IrError;
use crate::sampler::{CaptureStatus, EdgeSampler};
use crate::types::{EdgeSequence, Frame, PulseTrain};
use crate::Result;
use std::time::{Duration, Instant};

#[cfg(feature = "logging")]
use tracing::{debug, info};

/// Transmit settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderConfig {
    /// Transmit line number
    pub line: u8,
    /// How often to check whether the transmission finished
    pub busy_poll: Duration,
    /// Give up waiting for completion after this long; `None` waits forever
    pub timeout: Option<Duration>,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            line: DEFAULT_TX_LINE,
            busy_poll: Duration::from_millis(DEFAULT_BUSY_POLL_MS),
            timeout: Some(Duration::from_millis(DEFAULT_TRANSMIT_TIMEOUT_MS)),
        }
    }
}

/// Transmits pulse trains one at a time
#[derive(Debug, Clone, Default)]
pub struct Sender {
    config: SenderConfig,
}

impl Sender {
    /// Create a sender with the given settings
    pub fn new(config: SenderConfig) -> Self {
        Self { config }
    }

    /// Transmit `train` once and block until the device reports completion.
    ///
    /// The wave is released on every exit path, including a timeout.
    pub fn send<T: PulseSink + ?Sized>(&self, sink: &mut T, train: &PulseTrain) -> Result<()> {
        if !sink.is_connected() {
            return Err(IrError::HardwareUnavailable);
        }
        if train.is_empty() {
            return Err(IrError::EmptyPulseTrain);
        }

        let wave = LoadedWave::create(sink, self.config.line, train)?;
        wave.sink.send_once(wave.id)?;

        #[cfg(feature = "logging")]
        debug!(
            "Transmitting {} pulses on line {}",
            train.len(),
            self.config.line
        );

        let start = Instant::now();
        while wave.sink.is_busy()? {
            if let Some(limit) = self.config.timeout {
                if start.elapsed() > limit {
                    return Err(IrError::TransmitTimeout(limit.as_millis() as u64));
                }
            }
            std::thread::sleep(self.config.busy_poll);
        }

        Ok(())
    }
}

/// A wave registered with the sink, deleted on drop
struct LoadedWave<'a, T: PulseSink + ?Sized> {
    sink: &'a mut T,
    id: WaveId,
}

impl<'a, T: PulseSink + ?Sized> LoadedWave<'a, T> {
    fn create(sink: &'a mut T, line: u8, train: &PulseTrain) -> Result<Self> {
        let id = sink.create_wave(line, train)?;
        Ok(Self { sink, id })
    }
}

impl<T: PulseSink + ?Sized> Drop for LoadedWave<'_, T> {
    fn drop(&mut self) {
        self.sink.delete_wave(self.id);
    }
}

/// A complete capture and its decoded first frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recording {
    /// Raw edges as captured
    pub edges: EdgeSequence,
    /// First frame, [`Frame::unknown`] if it could not be classified or decoded
    pub frame: Frame,
}

/// Result of a recording attempt that reached the hardware
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A complete transmission was captured
    Captured(Recording),
    /// Nothing usable was captured
    Failed(CaptureStatus),
}

/// Captures and decodes transmissions
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    sampler: EdgeSampler,
}

impl Recorder {
    /// Create a recorder around a sampler
    pub fn new(sampler: EdgeSampler) -> Self {
        Self { sampler }
    }

    /// Capture one transmission and decode it
    pub fn record<S: EdgeSource + ?Sized>(&self, source: &mut S, timeout_ms: u64) -> Result<RecordOutcome> {
        let capture = self.sampler.capture(source, timeout_ms)?;
        if !capture.is_success() {
            return Ok(RecordOutcome::Failed(capture.status));
        }

        let frame = decode_edges(&capture.edges);

        #[cfg(feature = "logging")]
        info!("Recorded {} edges: {}", capture.edges.len(), frame);

        Ok(RecordOutcome::Captured(Recording {
            edges: capture.edges,
            frame,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::sim::{Disconnected, LoopbackTransmitter};
    use crate::encoder::FrameBuilder;
    use crate::types::Protocol;

    fn fast_sender(timeout: Option<Duration>) -> Sender {
        Sender::new(SenderConfig {
            line: 13,
            busy_poll: Duration::from_millis(1),
            timeout,
        })
    }

    #[test]
    fn test_send_waits_for_completion_and_releases() {
        let train = FrameBuilder::new(Protocol::Nec).byte(0x5A).build().unwrap();
        let mut tx = LoopbackTransmitter::new().with_busy_polls(3);

        fast_sender(None).send(&mut tx, &train).unwrap();

        assert_eq!(tx.sent().len(), 1);
        assert_eq!(tx.sent()[0], (13, train));
        assert_eq!(tx.live_waves(), 0);
    }

    #[test]
    fn test_send_times_out_and_releases() {
        let train = FrameBuilder::new(Protocol::Sony).byte(0x01).build().unwrap();
        let mut tx = LoopbackTransmitter::new().stuck();

        let result = fast_sender(Some(Duration::from_millis(5))).send(&mut tx, &train);

        assert_eq!(result, Err(IrError::TransmitTimeout(5)));
        assert_eq!(tx.live_waves(), 0);
    }

    #[test]
    fn test_send_rejects_disconnected_and_empty() {
        let train = FrameBuilder::new(Protocol::Aeha).byte(0xFF).build().unwrap();
        assert_eq!(
            fast_sender(None).send(&mut Disconnected, &train),
            Err(IrError::HardwareUnavailable)
        );

        let mut tx = LoopbackTransmitter::new();
        assert_eq!(
            fast_sender(None).send(&mut tx, &PulseTrain::default()),
            Err(IrError::EmptyPulseTrain)
        );
        assert!(tx.sent().is_empty());
    }
}
