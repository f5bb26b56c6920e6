use anyhow::{bail, Context, Result};
use irpulse_core::export::ExportFile;
use std::fs;
use tracing::info;

use super::{fail, ok, print_frames};
use crate::settings::Settings;
use crate::store::CodeStore;

/// Decode a stored code and write its first frame to `file`.
///
/// Nothing is written when the code does not decode.
pub fn execute(settings: &Settings, file: &str, name: &str) -> Result<()> {
    let store = CodeStore::load_or_empty(&settings.store_path);
    let Some(code) = store.get(name) else {
        bail!("No code named \"{}\"", name);
    };

    println!("Decoding \"{}\"\n", name);
    println!("{}\n", code);

    print_frames(&code.frames());

    let frame = code.first_frame();
    if frame.is_unknown() {
        fail("Unsupported or unknown format; nothing written");
        return Ok(());
    }

    let export = ExportFile::from_frame(&frame)
        .with_context(|| format!("Cannot export \"{}\"", name))?;
    let json = serde_json::to_string_pretty(&export)?;

    fs::write(file, json).with_context(|| format!("Failed to write output file: {}", file))?;

    info!("Exported {} bits of {} to {}", frame.bits.len(), frame.protocol, file);
    ok(format!("Saved to \"{}\"", file));
    Ok(())
}
