use anyhow::{Context, Result};
use irpulse_core::device::EdgeSource;
use irpulse_core::sampler::{CaptureStatus, EdgeSampler};
use irpulse_core::transceiver::{RecordOutcome, Recorder};
use tracing::{info, warn};

use super::{fail, ok, print_frames};
use crate::settings::Settings;
use crate::store::{CodeStore, StoredCode};

/// Capture one code per name and store each raw capture.
///
/// A failed capture or save moves on to the next name; a hardware error
/// aborts the batch. Returns the number of codes saved.
pub fn execute<S: EdgeSource + ?Sized>(
    settings: &Settings,
    source: &mut S,
    names: &[String],
) -> Result<usize> {
    let mut store = CodeStore::load(&settings.store_path)
        .context("Refusing to overwrite an unreadable code store")?;
    let recorder = Recorder::new(EdgeSampler::new(settings.sampler_config()));
    let mut saved = 0;

    for name in names {
        println!("------------------------------------");
        println!(
            "Recording \"{}\" on line {}... point the remote at the receiver.",
            name, settings.rx_line
        );

        let outcome = recorder
            .record(&mut *source, settings.capture_timeout_ms)
            .context("Recording aborted")?;

        let recording = match outcome {
            RecordOutcome::Captured(recording) => recording,
            RecordOutcome::Failed(CaptureStatus::NoData) => {
                fail("Nothing received");
                continue;
            }
            RecordOutcome::Failed(CaptureStatus::Short | CaptureStatus::Success) => {
                fail("Incomplete capture; the transmission had not ended");
                continue;
            }
        };

        let code = StoredCode::Raw {
            edges: recording.edges,
        };
        println!("\nReceived {}", code);
        println!();
        print_frames(&code.frames());

        store.insert(name.as_str(), code);
        match store.save(&settings.store_path) {
            Ok(()) => {
                info!("Stored \"{}\"", name);
                ok(format!("Saved \"{}\"", name));
                saved += 1;
            }
            Err(e) => {
                warn!("{}", e);
                fail(format!(
                    "Could not save \"{}\"; check permissions on {}",
                    name,
                    settings.store_path.display()
                ));
            }
        }
    }

    Ok(saved)
}
