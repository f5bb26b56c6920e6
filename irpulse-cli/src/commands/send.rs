use anyhow::{Context, Result};
use irpulse_core::device::PulseSink;
use irpulse_core::transceiver::Sender;
use irpulse_core::IrError;
use std::thread;
use tracing::{debug, warn};

use super::{fail, ok};
use crate::settings::Settings;
use crate::store::CodeStore;

/// Transmit stored codes in order, pausing between them.
///
/// Unknown names are reported and skipped; a hardware error aborts the
/// batch. Returns the number of codes transmitted.
pub fn execute<T: PulseSink + ?Sized>(
    settings: &Settings,
    sink: &mut T,
    names: &[String],
) -> Result<usize> {
    let store = CodeStore::load_or_empty(&settings.store_path);
    let sender = Sender::new(settings.sender_config());
    let mut sent = 0;

    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            debug!("Waiting {:?} before \"{}\"", settings.wait, name);
            thread::sleep(settings.wait);
        }

        let Some(code) = store.get(name) else {
            fail(format!("No code named \"{}\"", name));
            continue;
        };

        println!("Sending \"{}\" on line {}...", name, settings.tx_line);
        match sender.send(&mut *sink, &code.to_pulse_train()) {
            Ok(()) => {
                ok(format!("Sent \"{}\"", name));
                sent += 1;
            }
            Err(IrError::EmptyPulseTrain) => {
                warn!("\"{}\" holds no marks", name);
                fail(format!("Nothing to send for \"{}\"", name));
            }
            Err(e) => return Err(e).context("Sending aborted"),
        }
    }

    Ok(sent)
}
