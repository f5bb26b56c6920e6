//! Named code storage
//!
//! The store is a single pretty-printed JSON object mapping each name to a
//! tagged code:
//!
//! ```json
//! {
//!   "tv_power": { "kind": "raw", "edges": [ { "duration_us": 0, "level": "low" } ] },
//!   "fan_on": { "kind": "pulses", "protocol": "AEHA", "train": [ { "mark_us": 425, "space_us": 425 } ] }
//! }
//! ```
//!
//! Encoded codes keep their protocol, since timing alone cannot tell AEHA
//! from NEC or NEC from SONY. Raw captures carry no protocol and are
//! classified when decoded.

use irpulse_core::decoder::{decode, decode_all, decode_edges};
use irpulse_core::{EdgeSequence, Frame, Protocol, PulseTrain};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Failures reading or writing the store file
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file exists but is not a valid store
    #[error("code store {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The file could not be read or written
    #[error("cannot access code store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One stored code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoredCode {
    /// Edges as captured by `rec`
    Raw { edges: EdgeSequence },
    /// Pulse train generated by `enc`
    Pulses {
        protocol: Protocol,
        train: PulseTrain,
    },
}

impl StoredCode {
    /// What to transmit for this code
    pub fn to_pulse_train(&self) -> PulseTrain {
        match self {
            StoredCode::Raw { edges } => PulseTrain::from_edges(edges),
            StoredCode::Pulses { train, .. } => train.clone(),
        }
    }

    /// What a receiver would observe for this code
    pub fn to_edges(&self) -> EdgeSequence {
        match self {
            StoredCode::Raw { edges } => edges.clone(),
            StoredCode::Pulses { train, .. } => EdgeSequence::from_pulse_train(train),
        }
    }

    /// Every frame in the code
    pub fn frames(&self) -> Vec<Frame> {
        match self {
            StoredCode::Raw { edges } => decode_all(edges),
            StoredCode::Pulses { .. } => vec![self.first_frame()],
        }
    }

    /// The frame to export: decoded with the stored protocol when there is
    /// one, otherwise classified from timing
    pub fn first_frame(&self) -> Frame {
        match self {
            StoredCode::Raw { edges } => decode_edges(edges),
            StoredCode::Pulses { protocol, train } => {
                decode(*protocol, &EdgeSequence::from_pulse_train(train))
            }
        }
    }
}

impl fmt::Display for StoredCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoredCode::Raw { edges } => {
                write!(f, "raw capture, {} edges:", edges.len())?;
                for edge in edges.edges() {
                    write!(f, " {}", edge.duration_us)?;
                }
                Ok(())
            }
            StoredCode::Pulses { protocol, train } => {
                write!(f, "{} pulse train, {} pulses:", protocol, train.len())?;
                for duration in train.durations() {
                    write!(f, " {}", duration)?;
                }
                Ok(())
            }
        }
    }
}

/// Name to code mapping, kept sorted by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeStore {
    codes: BTreeMap<String, StoredCode>,
}

impl CodeStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a store file. A missing file is an empty store.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No code store at {}, starting empty", path.display());
                return Ok(Self::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&content).map_err(|source| StoreError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read a store file, proceeding with an empty store on failure
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(store) => store,
            Err(e) => {
                warn!("{}; continuing with an empty store", e);
                Self::new()
            }
        }
    }

    /// Write the store as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| StoreError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

        fs::write(path, json).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Saved {} codes to {}", self.codes.len(), path.display());
        Ok(())
    }

    /// Look up a code by name
    pub fn get(&self, name: &str) -> Option<&StoredCode> {
        self.codes.get(name)
    }

    /// Add or replace a code
    pub fn insert(&mut self, name: impl Into<String>, code: StoredCode) -> Option<StoredCode> {
        self.codes.insert(name.into(), code)
    }

    /// Remove a code, returning it if it existed
    pub fn remove(&mut self, name: &str) -> Option<StoredCode> {
        self.codes.remove(name)
    }

    /// Stored names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.codes.keys().map(String::as_str)
    }

    /// Number of stored codes
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
