//! Edge capture from a receive line
//!
//! Edges arrive asynchronously from the source's callback context over a
//! bounded channel. The capture loop is the only consumer: it wakes at a
//! fixed interval, appends whatever arrived in arrival order, and stops at
//! the first inactivity gap or when the capture timeout expires.

use crate::constants::{
    DEFAULT_POLL_INTERVAL_MS, DEFAULT_RX_LINE, EDGE_CHANNEL_CAPACITY, MAX_GAP_US,
};
use crate::device::EdgeSource;
use crate::types::{EdgeSequence, RawEdge};
use crate::Result;
use crossbeam_channel::Receiver;
use std::time::{Duration, Instant};

#[cfg(feature = "logging")]
use tracing::debug;

/// Outcome of one capture attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureStatus {
    /// A complete transmission followed by an inactivity gap
    Success,
    /// Fewer than two edges were seen
    NoData,
    /// The capture ended while a transmission was still in progress
    Short,
}

impl CaptureStatus {
    /// Judge a finished capture
    pub fn of(edges: &EdgeSequence) -> Self {
        if edges.len() < 2 {
            return CaptureStatus::NoData;
        }
        match edges.last() {
            Some(last) if !last.is_timeout() && last.duration_us > MAX_GAP_US => {
                CaptureStatus::Success
            }
            _ => CaptureStatus::Short,
        }
    }
}

/// Edges from one capture attempt and how the attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    /// How the attempt ended
    pub status: CaptureStatus,
    /// Everything recorded, in arrival order
    pub edges: EdgeSequence,
}

impl Capture {
    /// Whether the capture holds a complete transmission
    pub fn is_success(&self) -> bool {
        self.status == CaptureStatus::Success
    }
}

/// Capture settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplerConfig {
    /// Receive line number
    pub line: u8,
    /// How often the capture loop inspects received edges
    pub poll_interval: Duration,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            line: DEFAULT_RX_LINE,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

/// Captures edge sequences from an [`EdgeSource`]
#[derive(Debug, Clone, Default)]
pub struct EdgeSampler {
    config: SamplerConfig,
}

impl EdgeSampler {
    /// Create a sampler with the given settings
    pub fn new(config: SamplerConfig) -> Self {
        Self { config }
    }

    /// Settings in use
    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Capture one transmission.
    ///
    /// Fails with [`IrError::HardwareUnavailable`](crate::IrError::HardwareUnavailable)
    /// before touching the line if the source is not connected. Otherwise
    /// the watchdog and listener are released on every exit path.
    pub fn capture<S: EdgeSource + ?Sized>(&self, source: &mut S, timeout_ms: u64) -> Result<Capture> {
        if !source.is_connected() {
            return Err(crate::IrError::HardwareUnavailable);
        }

        let watchdog_ms = (timeout_ms / 1_000).max(1) as u32;
        let listener = Listener::arm(source, self.config.line, watchdog_ms)?;

        #[cfg(feature = "logging")]
        debug!(
            "Capturing on line {} (timeout {} ms)",
            self.config.line, timeout_ms
        );

        let start = Instant::now();
        let timeout = Duration::from_millis(timeout_ms);
        let mut edges = EdgeSequence::new();

        'poll: loop {
            for edge in listener.receiver().try_iter() {
                edges.push(edge);
                if ends_capture(&edges, &edge) {
                    break 'poll;
                }
            }

            let elapsed = start.elapsed();
            if elapsed >= timeout {
                break;
            }
            std::thread::sleep(self.config.poll_interval.min(timeout - elapsed));
        }

        drop(listener);

        let status = CaptureStatus::of(&edges);

        #[cfg(feature = "logging")]
        debug!("Capture finished: {:?}, {} edges", status, edges.len());

        Ok(Capture { status, edges })
    }
}

/// The transmitter went idle: at least two edges and the newest one closes a gap
fn ends_capture(edges: &EdgeSequence, newest: &RawEdge) -> bool {
    edges.len() > 1 && newest.duration_us > MAX_GAP_US
}

/// Registered listener plus armed watchdog, released on drop
struct Listener<'a, S: EdgeSource + ?Sized> {
    source: &'a mut S,
    line: u8,
    receiver: Receiver<RawEdge>,
    listening: bool,
}

impl<'a, S: EdgeSource + ?Sized> Listener<'a, S> {
    fn arm(source: &'a mut S, line: u8, watchdog_ms: u32) -> Result<Self> {
        let (sender, receiver) = crossbeam_channel::bounded(EDGE_CHANNEL_CAPACITY);

        let mut listener = Self {
            source,
            line,
            receiver,
            listening: false,
        };
        listener.source.set_watchdog(line, watchdog_ms)?;
        listener.source.listen(line, sender)?;
        listener.listening = true;

        Ok(listener)
    }

    fn receiver(&self) -> &Receiver<RawEdge> {
        &self.receiver
    }
}

impl<S: EdgeSource + ?Sized> Drop for Listener<'_, S> {
    fn drop(&mut self) {
        // Close the channel first so a producer blocked on a full channel can exit
        drop(std::mem::replace(
            &mut self.receiver,
            crossbeam_channel::never(),
        ));
        let _ = self.source.set_watchdog(self.line, 0);
        if self.listening {
            self.source.cancel(self.line);
        }
    }
}
