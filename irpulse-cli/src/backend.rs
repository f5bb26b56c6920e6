//! Selection of the hardware boundary the commands talk to

use anyhow::{Context, Result};
use irpulse_core::device::sim::{Disconnected, LoopbackTransmitter, ScriptedLine};
use irpulse_core::device::{EdgeSource, PulseSink};
use irpulse_core::EdgeSequence;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::settings::Settings;

/// Receive and transmit sides
pub struct Backend {
    /// Receive line
    pub source: Box<dyn EdgeSource>,
    /// Transmitter
    pub sink: Box<dyn PulseSink>,
}

impl Backend {
    /// No device reachable; rec and send report the hardware as unavailable
    pub fn disconnected() -> Self {
        Self {
            source: Box::new(Disconnected),
            sink: Box::new(Disconnected),
        }
    }

    /// Replay a JSON edge capture as the receive line and keep transmissions in memory
    pub fn replay(path: &Path) -> Result<Self> {
        let edges = load_edges(path)?;
        info!(
            "Replaying {} edges from {}",
            edges.len(),
            path.display()
        );

        Ok(Self {
            source: Box::new(ScriptedLine::new(edges)),
            sink: Box::new(LoopbackTransmitter::new()),
        })
    }

    /// Replay when a capture file is configured, otherwise disconnected
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        match &settings.replay {
            Some(path) => Self::replay(path),
            None => Ok(Self::disconnected()),
        }
    }
}

/// Read a JSON array of edges
pub fn load_edges(path: &Path) -> Result<EdgeSequence> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read capture file: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse capture file: {}", path.display()))
}
