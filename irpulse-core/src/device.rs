//! Hardware boundary for the signal lines
//!
//! The codec never talks to a pin directly. Capture goes through an
//! [`EdgeSource`] that pushes edges into a channel from its own callback
//! context, and transmission goes through a [`PulseSink`] that owns waves
//! built from pulse trains. Real backends live outside this crate; the
//! [`sim`] module provides software stand-ins for tests and dry runs.

use crate::types::{PulseTrain, RawEdge};
use crate::Result;

/// Producer half of the edge channel handed to an [`EdgeSource`]
pub type EdgeSender = crossbeam_channel::Sender<RawEdge>;

/// Receive side of a signal line
pub trait EdgeSource {
    /// Whether the hardware boundary can be reached
    fn is_connected(&self) -> bool;

    /// Arm the inactivity watchdog on `line`; `0` disarms it.
    ///
    /// While armed, the source reports a [`Level::Timeout`](crate::types::Level::Timeout)
    /// edge whenever `timeout_ms` passes without a transition.
    fn set_watchdog(&mut self, line: u8, timeout_ms: u32) -> Result<()>;

    /// Start delivering edges on `line` to `sink`, in arrival order
    fn listen(&mut self, line: u8, sink: EdgeSender) -> Result<()>;

    /// Stop delivering edges on `line`; must be safe to call when idle
    fn cancel(&mut self, line: u8);
}

/// Handle to a wave registered with a [`PulseSink`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WaveId(pub u32);

/// Transmit side of a signal line
pub trait PulseSink {
    /// Whether the hardware boundary can be reached
    fn is_connected(&self) -> bool;

    /// Register `train` for transmission on `line`
    fn create_wave(&mut self, line: u8, train: &PulseTrain) -> Result<WaveId>;

    /// Start transmitting a registered wave once
    fn send_once(&mut self, wave: WaveId) -> Result<()>;

    /// Whether a transmission is still in progress
    fn is_busy(&self) -> Result<bool>;

    /// Release a registered wave
    fn delete_wave(&mut self, wave: WaveId);
}

/// Software devices for tests and runs without hardware
pub mod sim {
    use super::*;
    use crate::error::IrError;
    use crate::types::EdgeSequence;
    use std::cell::Cell;
    use std::collections::HashMap;
    use std::thread::JoinHandle;

    #[cfg(feature = "logging")]
    use tracing::debug;

    /// A boundary that is never reachable
    #[derive(Debug, Default, Clone, Copy)]
    pub struct Disconnected;

    impl EdgeSource for Disconnected {
        fn is_connected(&self) -> bool {
            false
        }

        fn set_watchdog(&mut self, _line: u8, _timeout_ms: u32) -> Result<()> {
            Err(IrError::HardwareUnavailable)
        }

        fn listen(&mut self, _line: u8, _sink: EdgeSender) -> Result<()> {
            Err(IrError::HardwareUnavailable)
        }

        fn cancel(&mut self, _line: u8) {}
    }

    impl PulseSink for Disconnected {
        fn is_connected(&self) -> bool {
            false
        }

        fn create_wave(&mut self, _line: u8, _train: &PulseTrain) -> Result<WaveId> {
            Err(IrError::HardwareUnavailable)
        }

        fn send_once(&mut self, _wave: WaveId) -> Result<()> {
            Err(IrError::HardwareUnavailable)
        }

        fn is_busy(&self) -> Result<bool> {
            Err(IrError::HardwareUnavailable)
        }

        fn delete_wave(&mut self, _wave: WaveId) {}
    }

    /// Receive line that replays a fixed edge script from a worker thread.
    ///
    /// Edges are delivered as fast as the channel accepts them; their
    /// durations are data, not wall-clock time. If the watchdog is armed
    /// when listening starts, one timeout sentinel follows the script.
    pub struct ScriptedLine {
        script: Vec<RawEdge>,
        watchdog_ms: u32,
        worker: Option<JoinHandle<()>>,
        listen_count: usize,
    }

    impl ScriptedLine {
        /// Create a line that will replay `edges`
        pub fn new(edges: EdgeSequence) -> Self {
            Self {
                script: edges.into_edges(),
                watchdog_ms: 0,
                worker: None,
                listen_count: 0,
            }
        }

        /// Whether a listener is currently registered
        pub fn is_listening(&self) -> bool {
            self.worker.is_some()
        }

        /// Whether the watchdog is currently armed
        pub fn watchdog_armed(&self) -> bool {
            self.watchdog_ms > 0
        }

        /// How many times a listener was registered
        pub fn listen_count(&self) -> usize {
            self.listen_count
        }
    }

    impl EdgeSource for ScriptedLine {
        fn is_connected(&self) -> bool {
            true
        }

        fn set_watchdog(&mut self, _line: u8, timeout_ms: u32) -> Result<()> {
            self.watchdog_ms = timeout_ms;
            Ok(())
        }

        fn listen(&mut self, _line: u8, sink: EdgeSender) -> Result<()> {
            if self.worker.is_some() {
                return Err(IrError::Device("line already has a listener".into()));
            }

            let script = self.script.clone();
            let watchdog_us = self.watchdog_ms.saturating_mul(1_000);
            self.worker = Some(std::thread::spawn(move || {
                for edge in script {
                    if sink.send(edge).is_err() {
                        return;
                    }
                }
                if watchdog_us > 0 {
                    let _ = sink.send(RawEdge::timeout(watchdog_us));
                }
            }));
            self.listen_count += 1;
            Ok(())
        }

        fn cancel(&mut self, _line: u8) {
            if let Some(worker) = self.worker.take() {
                let _ = worker.join();
            }
        }
    }

    impl Drop for ScriptedLine {
        fn drop(&mut self) {
            if let Some(worker) = self.worker.take() {
                let _ = worker.join();
            }
        }
    }

    /// Transmitter that keeps every transmitted train for inspection.
    ///
    /// Each transmission reports busy for a configurable number of polls.
    pub struct LoopbackTransmitter {
        waves: HashMap<WaveId, (u8, PulseTrain)>,
        next_id: u32,
        sent: Vec<(u8, PulseTrain)>,
        busy_polls: u32,
        busy_left: Cell<u32>,
        stuck: bool,
    }

    impl LoopbackTransmitter {
        /// Create a transmitter that finishes immediately
        pub fn new() -> Self {
            Self {
                waves: HashMap::new(),
                next_id: 0,
                sent: Vec::new(),
                busy_polls: 0,
                busy_left: Cell::new(0),
                stuck: false,
            }
        }

        /// Report busy for `polls` checks after each send
        pub fn with_busy_polls(mut self, polls: u32) -> Self {
            self.busy_polls = polls;
            self
        }

        /// Never report completion
        pub fn stuck(mut self) -> Self {
            self.stuck = true;
            self
        }

        /// Trains transmitted so far, with their line
        pub fn sent(&self) -> &[(u8, PulseTrain)] {
            &self.sent
        }

        /// Number of waves registered and not yet released
        pub fn live_waves(&self) -> usize {
            self.waves.len()
        }
    }

    impl Default for LoopbackTransmitter {
        fn default() -> Self {
            Self::new()
        }
    }

    impl PulseSink for LoopbackTransmitter {
        fn is_connected(&self) -> bool {
            true
        }

        fn create_wave(&mut self, line: u8, train: &PulseTrain) -> Result<WaveId> {
            let id = WaveId(self.next_id);
            self.next_id += 1;
            self.waves.insert(id, (line, train.clone()));
            Ok(id)
        }

        fn send_once(&mut self, wave: WaveId) -> Result<()> {
            let (line, train) = self
                .waves
                .get(&wave)
                .cloned()
                .ok_or_else(|| IrError::Device(format!("unknown wave {}", wave.0)))?;

            #[cfg(feature = "logging")]
            debug!(
                "Loopback transmit on line {}: {} pulses, {}us",
                line,
                train.len(),
                train.total_duration_us()
            );

            self.sent.push((line, train));
            self.busy_left.set(self.busy_polls);
            Ok(())
        }

        fn is_busy(&self) -> Result<bool> {
            if self.stuck {
                return Ok(true);
            }
            let left = self.busy_left.get();
            if left == 0 {
                return Ok(false);
            }
            self.busy_left.set(left - 1);
            Ok(true)
        }

        fn delete_wave(&mut self, wave: WaveId) {
            self.waves.remove(&wave);
        }
    }
}
