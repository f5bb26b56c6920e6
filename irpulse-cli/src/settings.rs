//! Immutable settings built once from the command line

use irpulse_core::constants::{DEFAULT_CAPTURE_TIMEOUT_MS, DEFAULT_RX_LINE, DEFAULT_TX_LINE};
use irpulse_core::sampler::SamplerConfig;
use irpulse_core::transceiver::SenderConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Default code store file name
pub const DEFAULT_STORE_PATH: &str = "codes.json";

/// Everything a command needs besides its own arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Code store location
    pub store_path: PathBuf,
    /// Line used by `send`
    pub tx_line: u8,
    /// Line used by `rec`
    pub rx_line: u8,
    /// Pause between codes in a `send` batch
    pub wait: Duration,
    /// How long `rec` waits for a transmission
    pub capture_timeout_ms: u64,
    /// Edge capture replayed in place of a receive line
    pub replay: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            tx_line: DEFAULT_TX_LINE,
            rx_line: DEFAULT_RX_LINE,
            wait: Duration::from_secs(1),
            capture_timeout_ms: DEFAULT_CAPTURE_TIMEOUT_MS,
            replay: None,
        }
    }
}

impl Settings {
    /// Settings for a store file, with default lines
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
            ..Self::default()
        }
    }

    /// Use one line for both directions, as `-g` does
    pub fn with_gpio(mut self, gpio: Option<u8>) -> Self {
        if let Some(line) = gpio {
            self.tx_line = line;
            self.rx_line = line;
        }
        self
    }

    /// Pause between sent codes
    pub fn with_wait(mut self, wait: Duration) -> Self {
        self.wait = wait;
        self
    }

    /// Replay a capture file instead of talking to hardware
    pub fn with_replay(mut self, replay: Option<PathBuf>) -> Self {
        self.replay = replay;
        self
    }

    /// Capture settings for the receive line
    pub fn sampler_config(&self) -> SamplerConfig {
        SamplerConfig {
            line: self.rx_line,
            ..SamplerConfig::default()
        }
    }

    /// Transmit settings for the transmit line
    pub fn sender_config(&self) -> SenderConfig {
        SenderConfig {
            line: self.tx_line,
            ..SenderConfig::default()
        }
    }
}
